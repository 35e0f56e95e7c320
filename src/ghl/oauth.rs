use reqwest::header;
use serde::Deserialize;

use super::client::{read_body, send, GhlClient, GhlError};
use crate::config::OAuthCredentials;

pub const TOKEN_PATH: &str = "/oauth/token";
const TOKEN_REFRESH_FAILED: &str = "Token refresh failed";

/// Short-lived bearer credential. Never cached; every publish run fetches a
/// fresh one.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl GhlClient {
    /// Exchanges the refresh token for an access token using the
    /// `refresh_token` grant. Any failure (transport, non-JSON body, missing
    /// `access_token`) is reported as [`GhlError::Auth`].
    pub async fn refresh_access_token(
        &self,
        credentials: &OAuthCredentials,
    ) -> Result<AccessToken, GhlError> {
        let endpoint = self.endpoint(TOKEN_PATH);
        tracing::info!(client_id = %credentials.client_id, "Refreshing access token");

        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", credentials.refresh_token.as_str()),
        ];
        let request = self
            .http()
            .post(&endpoint)
            .header(header::ACCEPT, "application/json")
            .form(&form);

        let response = send(request, &endpoint).await.map_err(auth_failure)?;
        let status = response.status();
        let body = read_body(response, &endpoint).await.map_err(auth_failure)?;

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(status = %status, error = %e, "Token endpoint returned invalid JSON");
            GhlError::Auth(format!("{TOKEN_REFRESH_FAILED}: invalid response"))
        })?;

        match parsed.access_token.filter(|t| !t.is_empty()) {
            Some(token) => {
                tracing::info!("Access token refreshed");
                Ok(AccessToken(token))
            }
            None => {
                tracing::warn!(status = %status, "Token endpoint response has no access_token");
                Err(GhlError::Auth(TOKEN_REFRESH_FAILED.to_string()))
            }
        }
    }
}

fn auth_failure(err: GhlError) -> GhlError {
    tracing::warn!(error = %err, "Token refresh request failed");
    GhlError::Auth(format!("{TOKEN_REFRESH_FAILED}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{body_string_contains, header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> OAuthCredentials {
        OAuthCredentials {
            client_id: "client-1".to_string(),
            client_secret: "shh".to_string(),
            refresh_token: "refresh-1".to_string(),
        }
    }

    fn client_for(server: &MockServer) -> GhlClient {
        GhlClient::new(&Url::parse(&server.uri()).unwrap())
    }

    #[actix_web::test]
    async fn test_returns_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(header_matcher("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .and(body_string_contains("client_id=client-1"))
            .and(body_string_contains("client_secret=shh"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "abc"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let token = client_for(&server)
            .refresh_access_token(&credentials())
            .await
            .unwrap();
        assert_eq!(token.as_str(), "abc");
        assert_eq!(token.bearer(), "Bearer abc");
    }

    #[actix_web::test]
    async fn test_missing_access_token_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let result = client_for(&server).refresh_access_token(&credentials()).await;
        match result {
            Err(GhlError::Auth(message)) => assert_eq!(message, "Token refresh failed"),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn test_invalid_json_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).refresh_access_token(&credentials()).await;
        assert!(matches!(result, Err(GhlError::Auth(_))));
    }

    #[actix_web::test]
    async fn test_unreachable_endpoint_is_auth_error() {
        let client = GhlClient::new(&Url::parse("http://127.0.0.1:1").unwrap());
        let result = client.refresh_access_token(&credentials()).await;
        assert!(matches!(result, Err(GhlError::Auth(_))));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = AccessToken::new("super-secret");
        assert!(!format!("{token:?}").contains("super-secret"));
    }
}
