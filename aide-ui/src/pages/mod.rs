//! Pages
//!
//! One component per top-level view.

pub mod chat;
pub mod dashboard;
pub mod quizzes;
pub mod tasks;

pub use chat::Chat;
pub use dashboard::Dashboard;
pub use quizzes::Quizzes;
pub use tasks::Tasks;
