//! Backend access from the browser

mod client;

pub use client::GlooBackend;
