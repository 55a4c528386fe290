//! Resource Loader
//!
//! HTTP requests through reqwest's blocking client, moved off the calling
//! task with `smol::unblock` so async callers never block.

use crate::{Fetch, NetError, Response};
use smol::future::Boxed;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// A GET request
#[derive(Debug, Default, Clone)]
pub struct Request {
    pub url: String,
    pub headers: HashMap<String, String>,
}

impl Request {
    pub fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }
}

/// Loader configuration
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// User agent string
    pub user_agent: String,
    /// Request timeout
    pub request_timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("AgentUI/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Load resources from network
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    client: reqwest::blocking::Client,
}

impl ResourceLoader {
    /// Build a loader; fails only if the TLS backend cannot initialise
    pub fn new(config: &LoaderConfig) -> Result<Self, NetError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch a URL with GET
    pub async fn get(&self, url: &str) -> Result<Response, NetError> {
        self.request(Request::get(url)).await
    }

    /// Send a GET request
    pub async fn request(&self, req: Request) -> Result<Response, NetError> {
        tracing::info!("HTTP GET {}", req.url);

        let url = Url::parse(&req.url).map_err(|e| NetError::InvalidUrl(format!("{}: {}", req.url, e)))?;
        let client = self.client.clone();
        smol::unblock(move || send_blocking(&client, url, req.headers)).await
    }
}

fn send_blocking(
    client: &reqwest::blocking::Client,
    url: Url,
    headers: HashMap<String, String>,
) -> Result<Response, NetError> {
    let mut builder = client.get(url);
    for (key, value) in headers {
        builder = builder.header(key, value);
    }

    let resp = builder.send().map_err(|e| NetError::Network(e.to_string()))?;
    let status = resp.status().as_u16();
    let headers = resp.headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    let body = resp.bytes().map_err(|e| NetError::Network(e.to_string()))?.to_vec();

    tracing::debug!(status, bytes = body.len(), "HTTP response");
    Ok(Response { status, headers, body })
}

impl Fetch for ResourceLoader {
    fn fetch(&self, url: &Url) -> Boxed<Result<Response, NetError>> {
        let loader = self.clone();
        let req = Request::get(url.as_str()).with_header("Accept", "application/json");
        Box::pin(async move { loader.request(req).await })
    }
}
