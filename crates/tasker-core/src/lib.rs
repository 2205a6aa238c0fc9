//! `tasker-core` — configuration and top-level errors shared by every Tasker crate.

pub mod config;
pub mod error;

pub use config::TaskerConfig;
pub use error::{Result, TaskerError};
