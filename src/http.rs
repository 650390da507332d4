//! JSON-over-HTTP wrapper shared by all resource clients.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FlixApiError, Result};

/// Per-call options for [`HttpClient::call`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn post(body: Option<Value>) -> Self {
        Self {
            method: Method::POST,
            body,
            ..Default::default()
        }
    }

    pub fn query(query: Vec<(String, String)>) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }
}

/// Blocking HTTP client bound to one backend base URL.
///
/// No retries, no timeouts, no caching: every call is a single request
/// awaited to completion or failure.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    http: Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(None)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issue one request and return the parsed JSON body.
    ///
    /// A successful response whose body is empty or not JSON yields
    /// `Ok(None)`.
    pub fn call(&self, path: &str, options: RequestOptions) -> Result<Option<Value>> {
        let url = self.url(path);
        debug!(method = %options.method, %url, "sending request");

        let mut request = self.http.request(options.method.clone(), &url);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FlixApiError::without_status(format!("Invalid header name: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| FlixApiError::without_status(format!("Invalid header value: {e}")))?;
            request = request.header(name, value);
        }
        if let Some(ref body) = options.body {
            request = request.body(body.to_string());
        }

        let response = request.send().map_err(|e| {
            warn!(%url, error = %e, "request could not be sent");
            FlixApiError::from(e)
        })?;
        handle_response(response)
    }
}

/// Status-code → result mapping.
fn handle_response(response: Response) -> Result<Option<Value>> {
    let status = response.status().as_u16();
    let text = response.text().unwrap_or_default();
    debug!(status, bytes = text.len(), "received response");

    if (200..300).contains(&status) {
        return Ok(serde_json::from_str(&text).ok());
    }

    let message = error_message(status, &text);
    warn!(status, %message, "request failed");
    Err(FlixApiError::with_status(status, message))
}

/// `detail` of a JSON error body, or `Error <status>` when there is none.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|data| {
            data.get("detail")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Error {status}"))
}
