// ABOUTME: Ordered todo item store
// ABOUTME: Keeps item positions a dense 1..N sequence across create, reorder and delete

pub mod error;
pub mod storage;
pub mod types;

pub use error::{TodoError, TodoResult};
pub use storage::TodoStorage;
pub use types::{PositionUpdate, TodoItem, TodoState};
