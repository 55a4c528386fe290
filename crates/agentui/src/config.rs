//! AgentUI Configuration

use agentui_catalog::{DEFAULT_CATALOG_FILE, DEFAULT_SCRIPT_HINT};
use agentui_net::LoaderConfig;
use std::time::Duration;

/// Configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log duplicate component definitions
    pub debug: bool,

    /// Substring identifying the bundle script tag
    pub script_hint: String,

    /// File name of the describe catalog next to the bundle
    pub catalog_file: String,

    /// User agent string
    pub user_agent: String,

    /// Timeout of the catalog request
    pub request_timeout: Duration,

    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            script_hint: DEFAULT_SCRIPT_HINT.to_string(),
            catalog_file: DEFAULT_CATALOG_FILE.to_string(),
            user_agent: format!("AgentUI/{}", crate::VERSION),
            request_timeout: Duration::from_secs(30),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `AGENTUI_DEBUG`, `AGENTUI_SCRIPT_HINT` and
    /// `AGENTUI_CATALOG_FILE`
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = var("AGENTUI_DEBUG") {
            match parse_flag(&value) {
                Some(debug) => config.debug = debug,
                None => tracing::warn!(value = %value, "ignoring unrecognised AGENTUI_DEBUG"),
            }
        }
        if let Some(hint) = var("AGENTUI_SCRIPT_HINT").filter(|v| !v.trim().is_empty()) {
            config.script_hint = hint.trim().to_string();
        }
        if let Some(file) = var("AGENTUI_CATALOG_FILE").filter(|v| !v.trim().is_empty()) {
            config.catalog_file = file.trim().to_string();
        }
        config
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn script_hint(mut self, hint: &str) -> Self {
        self.script_hint = hint.to_string();
        self
    }

    pub fn catalog_file(mut self, file: &str) -> Self {
        self.catalog_file = file.to_string();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn log_filter(mut self, filter: &str) -> Self {
        self.log_filter = filter.to_string();
        self
    }

    /// Settings for the HTTP loader
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            user_agent: self.user_agent.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
