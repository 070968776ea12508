// ABOUTME: Todo item type definitions
// ABOUTME: The stored item, its completion state, and reorder instructions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    pub description: String,
    pub is_done: bool,
    /// 1-based slot in the list; all items together cover 1..=N
    pub item_position: i64,
    pub list_color: Option<String>,
}

impl TodoItem {
    pub fn state(&self) -> TodoState {
        if self.is_done {
            TodoState::Done
        } else {
            TodoState::Pending
        }
    }
}

/// Completion state. Pending is initial and Done is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoState {
    Pending,
    Done,
}

impl Default for TodoState {
    fn default() -> Self {
        TodoState::Pending
    }
}

/// One entry of a caller-supplied reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub id: i64,
    pub position: i64,
}
