use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_WS_URL: &str = "ws://localhost:4000/socket";
pub const PUSH_TIMEOUT: Duration = Duration::from_secs(10);
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub ws_url: String,
    pub push_timeout: Duration,
    pub heartbeat_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            push_timeout: PUSH_TIMEOUT,
            heartbeat_interval: HEARTBEAT_INTERVAL,
        }
    }
}

impl ClientConfig {
    // The browser has no process environment, so endpoints are baked in at
    // build time.
    pub fn from_build_env() -> Self {
        Self::from_overrides(
            option_env!("INFESTATION_API_URL"),
            option_env!("INFESTATION_WS_URL"),
        )
    }

    pub fn from_overrides(api_url: Option<&str>, ws_url: Option<&str>) -> Self {
        let defaults = ClientConfig::default();
        ClientConfig {
            api_url: non_empty(api_url).unwrap_or(defaults.api_url),
            ws_url: non_empty(ws_url).unwrap_or(defaults.ws_url),
            ..defaults
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().trim_end_matches('/'))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
