use anyhow::{anyhow, Context, Result};
use std::fmt;
use tickerboard_client::endp::finnhub::{DEFAULT_BASE_URL, DEFAULT_RELAY_URL};
use url::Url;

pub const API_KEY_VAR: &str = "FINNHUB_API_KEY";
pub const BASE_URL_VAR: &str = "FINNHUB_BASE_URL";
pub const RELAY_URL_VAR: &str = "CORS_RELAY_URL";
pub const USER_AGENT_VAR: &str = "USER_AGENT";

/// Values given on the command line; each wins over its environment variable.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub relay_url: Option<String>,
    pub user_agent: Option<String>,
}

/// Startup configuration, resolved once.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: Url,
    pub relay_url: Url,
    pub user_agent: String,
}

// keep the key out of logs
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"***")
            .field("base_url", &self.base_url.as_str())
            .field("relay_url", &self.relay_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Settings {
    /// Resolve from `overrides`, then `env`, then defaults. A missing API
    /// key is an error; there is no built-in key.
    pub fn resolve_with<F>(overrides: &Overrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: &Option<String>, var: &str| {
            flag.clone()
                .or_else(|| env(var))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = pick(&overrides.api_key, API_KEY_VAR).ok_or_else(|| {
            anyhow!("no Finnhub API key: pass --api-key or set {API_KEY_VAR} (a .env file works)")
        })?;

        let base_url = pick(&overrides.base_url, BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url =
            Url::parse(&base_url).with_context(|| format!("invalid base url: {base_url}"))?;

        let relay_url = pick(&overrides.relay_url, RELAY_URL_VAR)
            .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());
        let relay_url =
            Url::parse(&relay_url).with_context(|| format!("invalid relay url: {relay_url}"))?;

        let user_agent = pick(&overrides.user_agent, USER_AGENT_VAR)
            .unwrap_or_else(|| format!("tickerboard/{}", env!("CARGO_PKG_VERSION")));

        Ok(Self {
            api_key,
            base_url,
            relay_url,
            user_agent,
        })
    }
}
