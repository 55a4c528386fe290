//! Static fetcher
//!
//! Serves pre-registered responses by URL. Counts every fetch so callers can
//! check how many requests actually went out.

use crate::{Fetch, NetError, Response};
use smol::future::Boxed;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use url::Url;

/// In-memory [`Fetch`] implementation
#[derive(Debug, Default, Clone)]
pub struct StaticFetch {
    routes: Arc<RwLock<HashMap<String, Response>>>,
    requests: Arc<AtomicUsize>,
}

impl StaticFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `url`
    pub fn with_body(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.route(url, Response::ok_with_body(body))
    }

    /// Serve an arbitrary response at `url`
    pub fn route(self, url: &str, response: Response) -> Self {
        if let Ok(mut routes) = self.routes.write() {
            routes.insert(url.to_string(), response);
        }
        self
    }

    /// Number of fetches issued so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Fetch for StaticFetch {
    fn fetch(&self, url: &Url) -> Boxed<Result<Response, NetError>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let found = self.routes
            .read()
            .ok()
            .and_then(|routes| routes.get(url.as_str()).cloned());
        let url = url.to_string();
        Box::pin(async move {
            match found {
                Some(response) => Ok(response),
                None => {
                    tracing::debug!("static fetch miss: {}", url);
                    Err(NetError::HttpError { status: 404 })
                }
            }
        })
    }
}
