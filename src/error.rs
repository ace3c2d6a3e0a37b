use thiserror::Error;

/// Boxed error produced by an [`HttpTransport`](crate::api::HttpTransport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// DnsError covers every way a Porkbun DNS call can fail.
#[derive(Error, Debug)]
pub enum DnsError {
    #[error("Invalid client configuration: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("Unexpected response code: {status} ({body})")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Expected `SUCCESS` status, got {status}{}", message_suffix(.message))]
    ApiStatus {
        status: String,
        message: Option<String>,
    },

    #[error("Error decoding DNS response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Error encoding request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl From<reqwest::Error> for DnsError {
    fn from(err: reqwest::Error) -> Self {
        DnsError::Transport(Box::new(err))
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, DnsError>;
