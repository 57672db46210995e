//! Client configuration and endpoint derivation

use http::Uri;
use tracing::warn;

use super::error::ConfigError;

/// Path of the simulation WebSocket on the serving host
pub const WS_PATH: &str = "/ws";

/// Origin used by native builds when nothing else is configured
pub const DEFAULT_SERVER_ORIGIN: &str = "http://127.0.0.1:3000";

/// WebSocket URL for [`DEFAULT_SERVER_ORIGIN`]
pub const DEFAULT_WS_URL: &str = "ws://127.0.0.1:3000/ws";

/// Fixed delay between a close and the next connect attempt
pub const RECONNECT_DELAY_SECS: f64 = 1.0;

/// Build the WebSocket URL for a page served with `protocol` (`"https:"`, `"http:"`)
/// from `host` (`"example.com:3000"`).
pub fn derive_ws_url(protocol: &str, host: &str) -> String {
    let scheme = if protocol.trim_end_matches(':').eq_ignore_ascii_case("https") {
        "wss"
    } else {
        "ws"
    };
    format!("{scheme}://{host}{WS_PATH}")
}

/// Same derivation starting from a full origin such as `https://host:3000/`.
/// Origins without a scheme (`host:3000`) are treated as plain http.
pub fn ws_url_from_origin(origin: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidOrigin {
        origin: origin.to_string(),
        reason,
    };
    let uri: Uri = origin.trim().parse().map_err(|e: http::uri::InvalidUri| invalid(e.to_string()))?;
    let authority = uri
        .authority()
        .ok_or_else(|| invalid("missing host".to_string()))?;
    Ok(derive_ws_url(uri.scheme_str().unwrap_or("http"), authority.as_str()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Full WebSocket URL
    pub endpoint: String,
    pub reconnect_delay: f64,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            reconnect_delay: RECONNECT_DELAY_SECS,
        }
    }

    /// Resolve from environment-style lookups: `FLOCK_WS` wins, then `FLOCK_SERVER`,
    /// then the built-in origin.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup("FLOCK_WS") {
            return Self::new(endpoint);
        }
        match lookup("FLOCK_SERVER").map(|origin| ws_url_from_origin(&origin)) {
            Some(Ok(endpoint)) => Self::new(endpoint),
            Some(Err(e)) => {
                warn!(error = %e, "Ignoring FLOCK_SERVER, using {}", DEFAULT_SERVER_ORIGIN);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Resolve from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WS_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_page_upgrades_to_wss() {
        assert_eq!(derive_ws_url("https:", "flock.example:8443"), "wss://flock.example:8443/ws");
        assert_eq!(derive_ws_url("http:", "localhost:3000"), "ws://localhost:3000/ws");
        assert_eq!(derive_ws_url("file:", "localhost"), "ws://localhost/ws");
    }

    #[test]
    fn origin_parsing_drops_path() {
        assert_eq!(
            ws_url_from_origin("https://host:3000/index.html").unwrap(),
            "wss://host:3000/ws"
        );
        assert_eq!(ws_url_from_origin("http://10.0.0.2:3000").unwrap(), "ws://10.0.0.2:3000/ws");
        assert_eq!(ws_url_from_origin("host:3000").unwrap(), "ws://host:3000/ws");
    }

    #[test]
    fn origin_without_host_is_rejected() {
        assert!(ws_url_from_origin("/just/a/path").is_err());
        assert!(ws_url_from_origin("http://bad host:3000").is_err());
        assert_eq!(ws_url_from_origin(DEFAULT_SERVER_ORIGIN).unwrap(), DEFAULT_WS_URL);
    }

    #[test]
    fn lookup_precedence() {
        let cfg = ClientConfig::from_lookup(|k| match k {
            "FLOCK_WS" => Some("ws://override/ws".into()),
            "FLOCK_SERVER" => Some("https://ignored".into()),
            _ => None,
        });
        assert_eq!(cfg.endpoint, "ws://override/ws");

        let cfg = ClientConfig::from_lookup(|k| (k == "FLOCK_SERVER").then(|| "https://sim:9000".into()));
        assert_eq!(cfg.endpoint, "wss://sim:9000/ws");

        let cfg = ClientConfig::from_lookup(|k| (k == "FLOCK_SERVER").then(|| "/no-host".into()));
        assert_eq!(cfg.endpoint, DEFAULT_WS_URL);

        let cfg = ClientConfig::from_lookup(|_| None);
        assert_eq!(cfg.endpoint, "ws://127.0.0.1:3000/ws");
        assert_eq!(cfg.reconnect_delay, 1.0);
    }
}
