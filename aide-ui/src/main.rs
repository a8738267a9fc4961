//! Aide Web Shell
//!
//! Browser front end for the personal assistant, built with Leptos (WASM).
//!
//! # Architecture
//!
//! The page is a thin rendering of [`aide::UiState`]. User input becomes
//! [`aide::Action`]s dispatched to the shared controller, which talks to
//! the backend through `gloo-net` and re-renders through a reactive
//! trigger. The backend base URL comes from `localStorage["aide_api_url"]`
//! and defaults to the page's own origin.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    mount_to_body(|| view! { <app::App /> });
}
