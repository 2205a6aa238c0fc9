pub mod db;
pub mod error;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{Result, TaskError};
pub use store::TaskStore;
pub use types::{Task, TaskDraft};
pub use validate::prepare;
