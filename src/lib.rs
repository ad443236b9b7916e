//! Terminal detail view for a single video post.

pub mod client;
pub mod config;
pub mod logging;
pub mod media;
pub mod session;
pub mod ui;
