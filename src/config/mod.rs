use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::actions::COPY_ACK_DELAY;
use crate::submission::GENERATE_DEADLINE;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the server exposing /api/generate and /api/download
    pub generator_url: String,
    /// Generator that serve mode forwards to; empty disables forwarding
    pub upstream_url: String,
    pub credentials_path: PathBuf,
    pub download_dir: PathBuf,
    pub listen_addr: String,
    pub frontend_dir: String,
    pub request_timeout: Duration,
    pub copy_ack_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            generator_url: get_env("GENERATOR_URL", "http://127.0.0.1:5000"),
            upstream_url: get_env("UPSTREAM_URL", ""),
            credentials_path: PathBuf::from(get_env(
                "CREDENTIALS_PATH",
                "./data/credentials.json",
            )),
            download_dir: PathBuf::from(get_env("DOWNLOAD_DIR", "./output")),
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            frontend_dir: get_env("FRONTEND_DIR", "./frontend"),
            request_timeout: get_env("REQUEST_TIMEOUT_SECS", "")
                .parse()
                .map(Duration::from_secs)
                .unwrap_or(GENERATE_DEADLINE),
            copy_ack_delay: get_env("COPY_ACK_MS", "")
                .parse()
                .map(Duration::from_millis)
                .unwrap_or(COPY_ACK_DELAY),
        }
    }

    pub fn upstream(&self) -> Option<&str> {
        let url = self.upstream_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
