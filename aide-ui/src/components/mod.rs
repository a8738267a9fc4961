//! UI Components
//!
//! Leptos components shared by the views.

pub mod loading;
pub mod nav;
pub mod sidebar;

pub use loading::{listing_view, Loading};
pub use nav::Nav;
pub use sidebar::Sidebar;
