use crate::error::{DnsError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Status and fully-read body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Sends JSON POST requests on behalf of [`PorkbunClient`](super::PorkbunClient).
///
/// Implementations must read the whole body before returning so no connection
/// state outlives the call. Failures to reach the server map to
/// [`DnsError::Transport`](crate::error::DnsError::Transport).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse>;
}

/// Default transport backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a whole-request timeout; a zero timeout is rejected.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(DnsError::Config(
                "Transport timeout must be greater than 0".to_string(),
            ));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ReqwestTransport::with_timeout(Duration::ZERO).unwrap_err();
        assert!(matches!(err, DnsError::Config(msg) if msg.contains("timeout")));
    }

    #[test]
    fn non_zero_timeout_builds() {
        assert!(ReqwestTransport::with_timeout(Duration::from_millis(250)).is_ok());
    }
}
