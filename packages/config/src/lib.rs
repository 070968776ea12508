// ABOUTME: Configuration constants for the todo list server
// ABOUTME: Single place where environment variable names are defined

pub mod constants;

pub use constants::*;
