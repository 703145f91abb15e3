pub mod api;
pub mod cli;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;

pub use engine::HierarchyEngine;
pub use error::{QuillError, Result};
pub use store::SqliteStore;
