pub mod app;
pub mod components;
pub mod detail;
pub mod layout;
pub mod views;

// Re-export commonly used items
pub use app::App;
pub use detail::DetailView;
pub use layout::draw;
