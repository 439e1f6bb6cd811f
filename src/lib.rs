//! ScriptForge: client library for a network configuration script generator.
//!
//! [`session::FormSession`] drives one generation form end to end; the
//! `script-forge` binary wraps it in a command line and a `serve` mode.

pub mod actions;
pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod router;
pub mod session;
pub mod submission;
pub mod utils;

#[cfg(test)]
mod test_support;

use config::Config;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
        Ok(Self { config, http })
    }
}
