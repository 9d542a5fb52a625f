//! taglens Web
//!
//! The demo web front end: axum routes, server-rendered pages, and the CLI.
//! All classification goes through the injected
//! [`taglens_inference::InferenceService`]; this crate owns none of the cache
//! or pool internals.

pub mod app;
pub mod cli;
pub mod pages;
pub mod routes;
pub mod state;

pub use app::{build_app, run_server};
pub use cli::Cli;
pub use state::AppState;
