//! AgentUI Networking
//!
//! Resource loading behind the [`Fetch`] seam. [`ResourceLoader`] is the HTTP
//! implementation; [`StaticFetch`] serves canned responses for embedded
//! resources and tests.

pub mod loader;
mod static_fetch;

pub use loader::{LoaderConfig, Request, ResourceLoader};
pub use static_fetch::StaticFetch;
pub use url::Url;

use smol::future::Boxed;

/// Something that can GET a resource
pub trait Fetch: Send + Sync {
    /// Fetch `url`. The returned future owns everything it needs.
    fn fetch(&self, url: &Url) -> Boxed<Result<Response, NetError>>;
}

/// HTTP Response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// 200 response with the given body
    pub fn ok_with_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Check if response is OK (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get body as text
    pub fn text(&self) -> Result<String, NetError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| NetError::Decode(e.to_string()))
    }

    /// Get body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, NetError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| NetError::Decode(e.to_string()))
    }

    /// Fail on non-2xx status
    pub fn error_for_status(self) -> Result<Self, NetError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(NetError::HttpError { status: self.status })
        }
    }
}

/// Network error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Decode error: {0}")]
    Decode(String),
}
