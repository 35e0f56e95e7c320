use std::env;

use url::Url;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_DATABASE_URL: &str = "ghlfeed.db";
pub const DEFAULT_MAX_ITEMS: usize = 5;
pub const DEFAULT_GHL_API_BASE_URL: &str = "https://services.leadconnectorhq.com";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub port: u16,
    pub database_url: String,
    pub max_items: usize,
    pub selector_url: Option<Url>,
    pub ghl_api_base_url: Url,
    pub publish: PublishConfig,
}

/// Values the publish flow needs. All optional here so the server can start
/// without them; [`PublishConfig::require`] enforces presence at run time.
#[derive(Clone, Default)]
pub struct PublishConfig {
    pub feed_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub location_id: Option<String>,
}

/// Validated publish settings.
#[derive(Clone)]
pub struct PublishSettings {
    pub feed_url: String,
    pub credentials: OAuthCredentials,
    pub location_id: String,
}

#[derive(Clone)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("PublishConfig")
            .field("feed_url", &self.feed_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("refresh_token", &redacted(&self.refresh_token))
            .field("location_id", &self.location_id)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = get("GHLFEED_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());

        let port = match get("GHLFEED_PORT") {
            Some(port) => {
                tracing::info!("Using port from GHLFEED_PORT: {}", port);
                port.parse::<u16>().map_err(|_| {
                    AppError::ConfigurationError(format!("GHLFEED_PORT is not a valid port: {port}"))
                })?
            }
            None => DEFAULT_PORT,
        };

        let database_url = match get("GHLFEED_DATABASE_URL") {
            Some(path) => {
                tracing::info!("Using database path from GHLFEED_DATABASE_URL: {}", path);
                path
            }
            None => DEFAULT_DATABASE_URL.to_string(),
        };

        let max_items = match get("GHLFEED_MAX_ITEMS") {
            Some(max) => match max.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::ConfigurationError(format!(
                        "GHLFEED_MAX_ITEMS must be a positive integer: {max}"
                    )))
                }
            },
            None => DEFAULT_MAX_ITEMS,
        };

        let selector_url = get("GHLFEED_SELECTOR_URL")
            .map(|raw| parse_url("GHLFEED_SELECTOR_URL", &raw))
            .transpose()?;

        let ghl_api_base_url = parse_url(
            "GHL_API_BASE_URL",
            &get("GHL_API_BASE_URL").unwrap_or_else(|| DEFAULT_GHL_API_BASE_URL.to_string()),
        )?;

        let publish = PublishConfig {
            feed_url: get("RSS_FEED_URL"),
            client_id: get("GHL_CLIENT_ID"),
            client_secret: get("GHL_CLIENT_SECRET"),
            refresh_token: get("GHL_REFRESH_TOKEN"),
            location_id: get("GHL_LOCATION_ID"),
        };

        Ok(AppConfig {
            bind,
            port,
            database_url,
            max_items,
            selector_url,
            ghl_api_base_url,
            publish,
        })
    }
}

impl PublishConfig {
    /// Fails with every missing variable named, before any network call.
    pub fn require(&self) -> AppResult<PublishSettings> {
        let fields = [
            ("RSS_FEED_URL", &self.feed_url),
            ("GHL_CLIENT_ID", &self.client_id),
            ("GHL_CLIENT_SECRET", &self.client_secret),
            ("GHL_REFRESH_TOKEN", &self.refresh_token),
            ("GHL_LOCATION_ID", &self.location_id),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::ConfigurationError(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        // Presence checked above
        let value = |v: &Option<String>| v.clone().unwrap_or_default();
        Ok(PublishSettings {
            feed_url: value(&self.feed_url),
            credentials: OAuthCredentials {
                client_id: value(&self.client_id),
                client_secret: value(&self.client_secret),
                refresh_token: value(&self.refresh_token),
            },
            location_id: value(&self.location_id),
        })
    }
}

fn parse_url(key: &str, raw: &str) -> AppResult<Url> {
    Url::parse(raw).map_err(|e| AppError::ConfigurationError(format!("{key} is not a valid URL: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppResult<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind, DEFAULT_BIND);
        assert_eq!(config.max_items, DEFAULT_MAX_ITEMS);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(config.selector_url.is_none());
        assert_eq!(
            config.ghl_api_base_url.as_str(),
            "https://services.leadconnectorhq.com/"
        );
    }

    #[test]
    fn test_invalid_port_is_configuration_error() {
        let err = config_from(&[("GHLFEED_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError(_)));
    }

    #[test]
    fn test_zero_max_items_rejected() {
        let err = config_from(&[("GHLFEED_MAX_ITEMS", "0")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError(_)));
    }

    #[test]
    fn test_require_names_every_missing_variable() {
        let config = config_from(&[
            ("RSS_FEED_URL", "https://example.com/feed.xml"),
            ("GHL_CLIENT_ID", "client"),
            ("GHL_CLIENT_SECRET", "   "),
        ])
        .unwrap();

        let err = config.publish.require().err().unwrap();
        let message = err.to_string();
        assert!(message.contains("GHL_CLIENT_SECRET"));
        assert!(message.contains("GHL_REFRESH_TOKEN"));
        assert!(message.contains("GHL_LOCATION_ID"));
        assert!(!message.contains("RSS_FEED_URL"));
    }

    #[test]
    fn test_require_succeeds_when_complete() {
        let config = config_from(&[
            ("RSS_FEED_URL", "https://example.com/feed.xml"),
            ("GHL_CLIENT_ID", "client"),
            ("GHL_CLIENT_SECRET", "s3cr3t-value"),
            ("GHL_REFRESH_TOKEN", "r3fr3sh-value"),
            ("GHL_LOCATION_ID", "loc-1"),
        ])
        .unwrap();

        let settings = config.publish.require().unwrap();
        assert_eq!(settings.location_id, "loc-1");
        assert_eq!(settings.credentials.refresh_token, "r3fr3sh-value");
        let debug = format!("{:?}", settings.credentials);
        assert!(!debug.contains("s3cr3t-value"));
        assert!(!debug.contains("r3fr3sh-value"));
    }
}
