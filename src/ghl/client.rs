use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum GhlError {
    #[error("{0}")]
    Auth(String),
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid JSON from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{message}")]
    Upstream { status: u16, message: String },
}

/// Thin wrapper over a shared `reqwest::Client` pointed at one API base URL.
/// Endpoint-specific calls live in the sibling modules.
#[derive(Debug, Clone)]
pub struct GhlClient {
    http: Client,
    base_url: String,
}

impl GhlClient {
    pub fn new(base_url: &Url) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Sends a request, mapping transport failures to [`GhlError::Network`].
pub(crate) async fn send(
    request: reqwest::RequestBuilder,
    endpoint: &str,
) -> Result<Response, GhlError> {
    request.send().await.map_err(|source| GhlError::Network {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Reads the full body as text.
pub(crate) async fn read_body(response: Response, endpoint: &str) -> Result<String, GhlError> {
    response.text().await.map_err(|source| GhlError::Network {
        endpoint: endpoint.to_string(),
        source,
    })
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T, GhlError> {
    serde_json::from_str(body).map_err(|source| GhlError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

/// Pulls the platform's `message` field out of an error body. GHL sends
/// either a string or a list of validation strings.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Array(parts) => {
            let parts: Vec<&str> = parts.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GhlClient::new(&Url::parse("http://localhost:9000/").unwrap());
        assert_eq!(client.endpoint("/oauth/token"), "http://localhost:9000/oauth/token");
    }

    #[test]
    fn test_error_message_string() {
        assert_eq!(
            error_message(r#"{"statusCode":401,"message":"Invalid JWT"}"#),
            Some("Invalid JWT".to_string())
        );
    }

    #[test]
    fn test_error_message_list() {
        assert_eq!(
            error_message(r#"{"message":["title should not be empty","content must be a string"]}"#),
            Some("title should not be empty; content must be a string".to_string())
        );
    }

    #[test]
    fn test_error_message_absent() {
        assert_eq!(error_message(r#"{"error":"nope"}"#), None);
        assert_eq!(error_message("<html>502</html>"), None);
    }
}
