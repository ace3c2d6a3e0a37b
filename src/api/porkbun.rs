use std::fmt;
use std::sync::Arc;

use super::{
    client::{HttpResponse, HttpTransport, ReqwestTransport},
    models::*,
};
use crate::error::{DnsError, Result};
use log::{debug, warn};
use reqwest::Url;
use serde::Serialize;

pub const API_BASE_URL: &str = "https://api.porkbun.com/api/json/v3";
const STATUS_SUCCESS: &str = "SUCCESS";

/// Client for the Porkbun DNS record endpoints.
///
/// Holds only immutable credentials and a shared transport, so clones are
/// cheap and a single client can serve concurrent callers.
#[derive(Clone)]
pub struct PorkbunClient {
    transport: Arc<dyn HttpTransport>,
    auth: Auth,
    base_url: String,
}

impl fmt::Debug for PorkbunClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PorkbunClient")
            .field("auth", &self.auth)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PorkbunClient {
    pub fn new(auth: Auth) -> Result<Self> {
        Self::with_transport(auth, ReqwestTransport::new())
    }

    pub fn with_transport(auth: Auth, transport: impl HttpTransport + 'static) -> Result<Self> {
        if auth.api_key.is_empty() {
            return Err(DnsError::Config("APIKey should not be empty".to_string()));
        }
        if auth.secret_api_key.is_empty() {
            return Err(DnsError::Config(
                "SecretAPIKey should not be empty".to_string(),
            ));
        }

        Ok(Self {
            transport: Arc::new(transport),
            auth,
            base_url: API_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create_record(&self, domain: &str, record: &DnsRecord) -> Result<DnsResponse> {
        let url = self.endpoint(&["dns", "create", domain])?;
        self.post(&url, &self.record_with_auth(record)).await
    }

    pub async fn edit_record(
        &self,
        domain: &str,
        id: &str,
        record: &DnsRecord,
    ) -> Result<DnsResponse> {
        let url = self.endpoint(&["dns", "edit", domain, id])?;
        self.post(&url, &self.record_with_auth(record)).await
    }

    pub async fn delete_record(&self, domain: &str, id: &str) -> Result<DnsResponse> {
        let url = self.endpoint(&["dns", "delete", domain, id])?;
        self.post(&url, &self.auth).await
    }

    pub async fn retrieve_records(&self, domain: &str) -> Result<DnsResponse> {
        let url = self.endpoint(&["dns", "retrieve", domain])?;
        self.post(&url, &self.auth).await
    }

    pub async fn retrieve_record(&self, domain: &str, id: &str) -> Result<DnsResponse> {
        let url = self.endpoint(&["dns", "retrieve", domain, id])?;
        self.post(&url, &self.auth).await
    }

    /// Records matching a type, optionally narrowed to one subdomain.
    pub async fn retrieve_by_name_type(
        &self,
        domain: &str,
        r#type: &str,
        subdomain: Option<&str>,
    ) -> Result<DnsResponse> {
        let mut segments = vec!["dns", "retrieveByNameType", domain, r#type];
        if let Some(sub) = subdomain.filter(|s| !s.is_empty()) {
            segments.push(sub);
        }
        let url = self.endpoint(&segments)?;
        self.post(&url, &self.auth).await
    }

    /// Appends `segments` to the base URL, percent-encoding each one so a
    /// caller-supplied `/`, `?` or `#` stays inside its segment.
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DnsError::Config(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| DnsError::Config(format!("Invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    fn record_with_auth<'a>(&'a self, record: &'a DnsRecord) -> RecordWithAuth<'a> {
        RecordWithAuth {
            auth: &self.auth,
            record,
        }
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<DnsResponse> {
        let payload = serde_json::to_vec(body).map_err(DnsError::Encode)?;

        debug!("POST {}", url);
        let response = self.transport.post_json(url, payload).await?;
        debug!("Response status: {}", response.status);

        extract_dns_response(response)
    }
}

/// Validates HTTP status, decodes the envelope and checks the API status.
fn extract_dns_response(response: HttpResponse) -> Result<DnsResponse> {
    if response.status != 200 {
        warn!("Unexpected response code {}", response.status);
        return Err(DnsError::UnexpectedStatus {
            status: response.status,
            body: response.body,
        });
    }

    let dns_response: DnsResponse =
        serde_json::from_str(&response.body).map_err(DnsError::Decode)?;

    if !dns_response.status.eq_ignore_ascii_case(STATUS_SUCCESS) {
        warn!("API returned status {}", dns_response.status);
        return Err(DnsError::ApiStatus {
            status: dns_response.status,
            message: dns_response.message,
        });
    }

    Ok(dns_response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = PorkbunClient::new(Auth::new("", "sk1_test")).unwrap_err();
        assert!(matches!(err, DnsError::Config(msg) if msg.contains("APIKey")));
    }

    #[test]
    fn empty_secret_api_key_is_rejected() {
        let err = PorkbunClient::new(Auth::new("pk1_test", "")).unwrap_err();
        assert!(matches!(err, DnsError::Config(msg) if msg.contains("SecretAPIKey")));
    }

    #[test]
    fn base_url_defaults_and_trims_trailing_slash() {
        let client = PorkbunClient::new(Auth::new("pk1", "sk1")).unwrap();
        assert_eq!(client.base_url(), API_BASE_URL);

        let client = client.with_base_url("http://localhost:8080/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn extract_accepts_lowercase_success() {
        let response = extract_dns_response(ok(r#"{"status":"success"}"#)).unwrap();
        assert_eq!(response.status, "success");
    }

    #[test]
    fn extract_rejects_non_200_before_decoding() {
        let err = extract_dns_response(HttpResponse {
            status: 404,
            body: "not json".to_string(),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            DnsError::UnexpectedStatus { status: 404, ref body } if body == "not json"
        ));
    }

    #[test]
    fn extract_reports_decode_failure() {
        let err = extract_dns_response(ok("<html>")).unwrap_err();
        assert!(matches!(err, DnsError::Decode(_)));
    }

    #[test]
    fn extract_carries_api_message() {
        let err = extract_dns_response(ok(
            r#"{"status":"ERROR","message":"Invalid API key."}"#,
        ))
        .unwrap_err();
        match err {
            DnsError::ApiStatus { status, message } => {
                assert_eq!(status, "ERROR");
                assert_eq!(message.as_deref(), Some("Invalid API key."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn endpoint_encodes_path_segments() {
        let client = PorkbunClient::new(Auth::new("pk1", "sk1"))
            .unwrap()
            .with_base_url("https://dns.test/api");

        assert_eq!(
            client.endpoint(&["dns", "delete", "example.com", "1/../x"]).unwrap(),
            "https://dns.test/api/dns/delete/example.com/1%2F..%2Fx"
        );
        assert_eq!(
            client.endpoint(&["dns", "retrieve", "example.com", "1?a#b"]).unwrap(),
            "https://dns.test/api/dns/retrieve/example.com/1%3Fa%23b"
        );
    }

    #[test]
    fn endpoint_rejects_unparseable_base_url() {
        let client = PorkbunClient::new(Auth::new("pk1", "sk1"))
            .unwrap()
            .with_base_url("not a url");
        assert!(matches!(
            client.endpoint(&["dns", "retrieve", "example.com"]),
            Err(DnsError::Config(_))
        ));
    }
}
