//! VitaFlex AI client shell
//!
//! A server-rendered front end for the VitaFlex AI backend. Every page is
//! plain HTML with forms; each action makes exactly one backend call and
//! renders the outcome.
//!
//! # Modules
//!
//! - [`backend`]: HTTP client and wire types for the backend API
//! - [`profile`]: User profile, choice lists and form parsing
//! - [`session`]: Per-browser chat transcripts
//! - [`shell`]: Views and the operations behind them
//! - [`ui`]: HTML rendering
//! - [`server`]: Router and handlers

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod backend;
pub mod config;
pub mod profile;
pub mod server;
pub mod session;
pub mod shell;
pub mod telemetry;
pub mod ui;

use std::sync::Arc;

use backend::Backend;
use config::AppConfig;
use session::SessionStore;
use shell::ClientShell;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Operations against the backend.
    pub shell: ClientShell,
    /// Chat transcripts keyed by session cookie.
    pub sessions: SessionStore,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Arc<AppConfig>, backend: Arc<dyn Backend>) -> Self {
        Self {
            shell: ClientShell::new(backend),
            sessions: SessionStore::new(),
            config,
        }
    }
}
