use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::api::{Auth, PorkbunClient, ReqwestTransport, API_BASE_URL};
use crate::error::{DnsError, Result};

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub secret_api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout handed to the HTTP transport.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("secret_api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| DnsError::Config(e.to_string()))
    }

    pub fn auth(&self) -> Auth {
        Auth::new(self.api_key.clone(), self.secret_api_key.clone())
    }

    pub fn build_client(&self) -> Result<PorkbunClient> {
        let transport = match self.timeout_secs {
            Some(secs) => ReqwestTransport::with_timeout(Duration::from_secs(secs))?,
            None => ReqwestTransport::new(),
        };

        Ok(PorkbunClient::with_transport(self.auth(), transport)?.with_base_url(&self.base_url))
    }
}
