//! # Aide
//!
//! View controller for a personal-assistant web app: chat with the agent,
//! review calendar events as today's tasks, keep a manual to-do list,
//! follow a dashboard and take generated quizzes.
//!
//! The crate holds everything between the page and the backend except the
//! markup itself, so the same controller runs in the browser shell
//! (`aide-ui`) and in the `aide` terminal client.
//!
//! ## Modules
//!
//! - [`api`]: Backend contract, payloads and the `Backend` seam
//! - [`view`]: UI state and per-pane rendering
//! - [`controller`]: Action dispatch and follow-up refreshes
//! - [`bindings`]: Page controls mapped to actions
//! - `config`, `terminal`: Native front end (feature `native`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//!
//! use aide::api::HttpBackend;
//! use aide::config::Config;
//! use aide::controller::{Action, Controller};
//! use aide::terminal::TerminalDialogs;
//! use aide::view::{StateCell, SystemClock, UiState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default().config;
//!     let controller = Controller::new(
//!         RefCell::new(UiState::new(config.ui.user_name.clone())),
//!         HttpBackend::new(&config.backend)?,
//!         TerminalDialogs { assume_yes: false },
//!         SystemClock,
//!     );
//!
//!     controller.state().update(|s| s.composer = "What's on today?".to_string());
//!     controller.dispatch(Action::SubmitChat).await;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bindings;
pub mod controller;
pub mod view;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod terminal;

#[cfg(test)]
mod testing;

pub use api::{ApiError, ApiResult, Backend};
pub use controller::{Action, Controller, Dialogs};
pub use view::{Effect, StateCell, UiState, View};
