//! Recipe collection and shopping list client.
//!
//! Runs in the browser as a Leptos CSR app. The modules below `app`,
//! `components` and `pages` hold no DOM state and are tested natively.

pub mod api;
pub mod app;
pub mod browser;
pub mod components;
pub mod config;
pub mod draft;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod pages;
pub mod session;
pub mod shopping;
pub mod toast;
