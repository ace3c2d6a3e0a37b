//! Client for the Porkbun DNS record API.
//!
//! Every request is a JSON `POST` whose body carries the account credentials
//! next to any record fields. A call succeeds only when the server answers
//! HTTP 200 and the envelope's `status` is `SUCCESS`.

pub mod api;
pub mod config;
pub mod error;

pub use api::{
    Auth, DnsRecord, DnsResponse, HttpResponse, HttpTransport, PorkbunClient, ReqwestTransport,
};
pub use config::Config;
pub use error::{DnsError, Result};
