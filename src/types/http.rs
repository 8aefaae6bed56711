//! Request/response model of the backend HTTP surface
//!
//! Requests carry the absolute URL without its query string; query
//! parameters travel separately, the same way an HTTP client keeps its
//! params object apart from the URL until the request is sent.

use serde_json::Value;
use std::fmt;

/// HTTP methods used by the customer API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
            Method::Put => f.write_str("PUT"),
        }
    }
}

/// Outgoing API request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        ApiRequest {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, url).with_body(body)
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, url).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a query parameter
    ///
    /// Blank values are omitted, never sent as empty parameters.
    pub fn with_param(mut self, key: impl Into<String>, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.query.push((key.into(), value.to_string()));
        }
        self
    }

    /// First value of a query parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path segment that follows `marker` in the URL, e.g. the id in
    /// `.../get-customer/{id}`
    pub fn path_param(&self, marker: &str) -> Option<&str> {
        let start = self.url.find(marker)? + marker.len();
        let rest = &self.url[start..];
        (!rest.is_empty()).then_some(rest)
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

/// Incoming API response
///
/// A status of `0` means the request never reached a server.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: Value) -> Self {
        ApiResponse {
            status,
            status_text: status_text.into(),
            body,
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, "OK", body)
    }

    pub fn created(body: Value) -> Self {
        Self::new(201, "Created", body)
    }

    pub fn not_found() -> Self {
        Self::new(404, "Not Found", Value::Null)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", Value::String(message.into()))
    }

    /// Network-level failure: nothing answered
    pub fn unreachable() -> Self {
        Self::new(0, "Unknown Error", Value::Null)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
