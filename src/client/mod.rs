pub mod api;
pub mod loader;
pub mod types;

pub use api::{ApiError, PostApi, API};
pub use loader::{load_post, loading_notice, LoadError};
