//! Blocking HTTP transport for the xenon REST clients
//!
//! This crate owns the single network call each request object performs.
//! It knows nothing about JSON shapes or services: it takes a fully
//! described [`HttpRequest`] and hands back the status code and body text.

mod error;

pub use error::HttpError;

use std::fmt;
use std::time::Duration;

/// Default connect timeout applied by [`HttpClient::new`]
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default read timeout applied by [`HttpClient::new`]
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP verbs used by the REST clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully described outgoing request
///
/// Query pairs and headers keep insertion order. Repeated query keys are
/// sent as repeated keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body, if any
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Look up the first header with the given name, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All values sent for a query key, in order
    pub fn query_values(&self, key: &str) -> Vec<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Status code and raw body text of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can perform one HTTP exchange
///
/// Request objects are generic over this so callers can swap in their own
/// agent, or a recording transport in tests.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(request)
    }
}

/// A minimal blocking HTTP client backed by a `ureq` agent
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    /// Create a new client with the default timeouts
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT)
    }

    /// Create a new client with explicit connect and read timeouts
    pub fn with_timeouts(connect: Duration, read: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(connect)
                .timeout_read(read)
                .build(),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpClient {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut call = self.agent.request(request.method.as_str(), &request.url);
        for (key, value) in &request.query {
            call = call.query(key, value);
        }
        for (name, value) in &request.headers {
            call = call.set(name, value);
        }

        let outcome = match &request.body {
            Some(body) => call.send_string(body),
            None => call.call(),
        };

        // ureq reports 4xx/5xx as errors; here they are ordinary responses.
        let response = match outcome {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                tracing::debug!(method = %request.method, url = %request.url, "transport failure: {}", transport);
                return Err(HttpError::Network(transport.to_string()));
            }
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| HttpError::Body(e.to_string()))?;

        tracing::debug!(method = %request.method, url = %request.url, status, "request completed");

        Ok(HttpResponse { status, body })
    }
}
