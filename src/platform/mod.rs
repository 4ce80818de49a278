//! Platform abstraction layer
//!
//! Handles frontend differences for:
//! - Input snapshots (held keys + toggle presses)

pub mod input;

pub use input::{InputSnapshot, Key};
