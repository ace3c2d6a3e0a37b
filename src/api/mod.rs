pub mod client;
pub mod models;
pub mod porkbun;

pub use client::{HttpResponse, HttpTransport, ReqwestTransport};
pub use models::{Auth, DnsRecord, DnsResponse};
pub use porkbun::{PorkbunClient, API_BASE_URL};
