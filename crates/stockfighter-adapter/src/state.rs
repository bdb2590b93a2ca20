/*
[INPUT]:  Caller-supplied API key, base URLs, timeouts and trading account
[OUTPUT]: Client configuration and the shared held-account slot
[POS]:    State layer - per-client configuration read by HTTP and WebSocket layers
[UPDATE]: When adding connection options or changing account semantics
*/

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::{Result, StockfighterError};

/// Base URLs for the Stockfighter APIs
pub const DEFAULT_REST_URL: &str = "https://api.stockfighter.io/ob/api";
pub const DEFAULT_STREAM_URL: &str = "wss://api.stockfighter.io/ob/api/ws";
pub const DEFAULT_GM_URL: &str = "https://www.stockfighter.io/gm";
pub const DEFAULT_AUTH_HEADER: &str = "X-Starfighter-Authorization";

/// Client configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    /// Initial trading account; can be replaced later with `set_account`
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default = "default_rest_url")]
    pub base_rest_url: String,
    #[serde(default = "default_stream_url")]
    pub base_stream_url: String,
    #[serde(default = "default_gm_url")]
    pub gm_base_url: String,
    /// Header carrying the API key
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            account: None,
            base_rest_url: default_rest_url(),
            base_stream_url: default_stream_url(),
            gm_base_url: default_gm_url(),
            auth_header: default_auth_header(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_rest_url(mut self, url: impl Into<String>) -> Self {
        self.base_rest_url = url.into();
        self
    }

    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.base_stream_url = url.into();
        self
    }

    pub fn with_gm_url(mut self, url: impl Into<String>) -> Self {
        self.gm_base_url = url.into();
        self
    }

    pub fn with_auth_header(mut self, header: impl Into<String>) -> Self {
        self.auth_header = header.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("account", &self.account)
            .field("base_rest_url", &self.base_rest_url)
            .field("base_stream_url", &self.base_stream_url)
            .field("gm_base_url", &self.gm_base_url)
            .field("auth_header", &self.auth_header)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

fn default_rest_url() -> String {
    DEFAULT_REST_URL.to_string()
}

fn default_stream_url() -> String {
    DEFAULT_STREAM_URL.to_string()
}

fn default_gm_url() -> String {
    DEFAULT_GM_URL.to_string()
}

fn default_auth_header() -> String {
    DEFAULT_AUTH_HEADER.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Thread-safe slot for the currently selected trading account.
///
/// Writes replace the whole value, so concurrent order placement never sees
/// a partially written account.
#[derive(Debug, Clone, Default)]
pub struct AccountHolder {
    account: Arc<RwLock<Option<String>>>,
}

impl AccountHolder {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            account: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn set(&self, account: impl Into<String>) {
        let mut guard = self.account.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(account.into());
    }

    pub fn get(&self) -> Option<String> {
        let guard = self.account.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    pub fn clear(&self) {
        let mut guard = self.account.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Pick the explicit account when given, otherwise the held one.
    pub fn resolve(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(account) = explicit {
            if account.trim().is_empty() {
                return Err(StockfighterError::validation("account", "must not be empty"));
            }
            return Ok(account.to_string());
        }
        self.get()
            .filter(|account| !account.trim().is_empty())
            .ok_or_else(|| {
                StockfighterError::validation("account", "no account given and none is held")
            })
    }
}
