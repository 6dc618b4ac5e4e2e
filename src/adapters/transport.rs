//! Outbound fetch transport for the signing engine.
//!
//! The engine performs its own network calls (timestamp authority,
//! revocation checks, chain fetches) through a `FetchTransport` capability
//! supplied per signing call. Wrapping the base transport in
//! `ProxyTransport` for one call reroutes that call's fetches through the
//! caller's forwarding proxy without touching any shared state, so
//! concurrent calls with different proxies stay independent.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

use crate::domain::options::ProxyConfig;

/// Characters percent-encoded when embedding a URL as a query value:
/// everything except ASCII alphanumerics and the unreserved marks.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Transport-level failure. Engine implementations decide how to surface it;
/// it is deliberately outside the signing error taxonomy.
#[derive(Error, Debug)]
#[error("Transport error: {0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        TransportError(error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    Get,
    Post,
}

/// One outbound request as the engine issues it.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: FetchMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl FetchRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: FetchMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn post(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: FetchMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Capability the engine uses for every outbound request.
#[async_trait]
pub trait FetchTransport: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError>;
}

/// Plain HTTP transport backed by reqwest. Imposes no timeout or retry of
/// its own; latency behavior belongs to the engine.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchTransport for HttpTransport {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, TransportError> {
        let mut builder = match request.method {
            FetchMethod::Get => self.client.get(&request.url),
            FetchMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?.to_vec();

        Ok(FetchResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Transport decorator that reroutes requests through the caller's
/// forwarding proxy.
///
/// Requests already targeting the proxy, and requests whose scheme is
/// neither `http` nor `https`, pass through unmodified. Everything else is
/// rewritten to `{base}/fetch?url={percent-encoded original}` with the
/// proxy's custom headers merged in, caller headers winning over whatever
/// the engine attached.
pub struct ProxyTransport<T: ?Sized = dyn FetchTransport> {
    inner: std::sync::Arc<T>,
    proxy: ProxyConfig,
}

impl<T: FetchTransport + ?Sized> ProxyTransport<T> {
    #[must_use]
    pub fn new(inner: std::sync::Arc<T>, proxy: ProxyConfig) -> Self {
        Self { inner, proxy }
    }

    /// Rewrite a target URL into its proxied form, or return `None` when the
    /// request must pass through unmodified.
    fn reroute(&self, url: &str) -> Option<String> {
        let base = self.proxy.base_url.trimmed();
        if url.starts_with(base) {
            return None;
        }
        match url::Url::parse(url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Some(format!(
                "{base}/fetch?url={}",
                utf8_percent_encode(url, URL_COMPONENT)
            )),
            // Unparseable or non-HTTP targets are none of the proxy's business.
            _ => None,
        }
    }

    fn merge_headers(&self, headers: &mut Vec<(String, String)>) {
        let Some(custom) = &self.proxy.headers else {
            return;
        };
        for (name, value) in custom {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }
    }
}

#[async_trait]
impl<T: FetchTransport + ?Sized> FetchTransport for ProxyTransport<T> {
    async fn fetch(&self, mut request: FetchRequest) -> Result<FetchResponse, TransportError> {
        if let Some(rerouted) = self.reroute(&request.url) {
            log::debug!("Rerouting {} via proxy", request.url);
            request.url = rerouted;
            self.merge_headers(&mut request.headers);
        }
        self.inner.fetch(request).await
    }
}
