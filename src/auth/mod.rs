//! Authentication hooks applied by the default transport.
//!
//! The upload client itself never touches credentials. Transports decide how a
//! request is authenticated; [`ReqwestTransport`](crate::transport::ReqwestTransport)
//! asks an [`AuthProvider`] for the `Authorization` header value.

use crate::errors::AuthenticationError;
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

/// Environment variable read by [`BearerTokenProvider::from_env`].
pub const ENV_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";

/// Source of the `Authorization` header for outgoing requests.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the value for the `Authorization` header.
    async fn authorization_header(&self) -> Result<HeaderValue, AuthenticationError>;
}

/// Static bearer token.
pub struct BearerTokenProvider {
    token: SecretString,
}

impl BearerTokenProvider {
    /// Creates a provider from a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }

    /// Creates a provider from `TWITTER_BEARER_TOKEN`.
    pub fn from_env() -> Result<Self, AuthenticationError> {
        let token = std::env::var(ENV_BEARER_TOKEN)
            .map_err(|_| AuthenticationError::MissingToken(format!("{} is not set", ENV_BEARER_TOKEN)))?;
        Ok(Self::new(token))
    }
}

impl std::fmt::Debug for BearerTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenProvider")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl AuthProvider for BearerTokenProvider {
    async fn authorization_header(&self) -> Result<HeaderValue, AuthenticationError> {
        let token = self.token.expose_secret();
        if token.is_empty() {
            return Err(AuthenticationError::MissingToken(
                "bearer token is empty".to_string(),
            ));
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| AuthenticationError::InvalidToken(e.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bearer_header() {
        let provider = BearerTokenProvider::new("AAAA%2Ftoken");
        let value = provider.authorization_header().await.unwrap();

        assert_eq!(value.to_str().unwrap(), "Bearer AAAA%2Ftoken");
        assert!(value.is_sensitive());
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let provider = BearerTokenProvider::new("");
        let result = provider.authorization_header().await;
        assert!(matches!(result, Err(AuthenticationError::MissingToken(_))));
    }

    #[tokio::test]
    async fn test_token_with_line_break_is_rejected() {
        let provider = BearerTokenProvider::new("abc\ndef");
        let result = provider.authorization_header().await;
        assert!(matches!(result, Err(AuthenticationError::InvalidToken(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let provider = BearerTokenProvider::new("super-secret");
        assert!(!format!("{:?}", provider).contains("super-secret"));
    }
}
