//! HTTP action contract for API-level checks.
//!
//! The same suites that drive a UI session usually assert against the
//! service underneath it, so this module carries a small blocking HTTP
//! client behind the same error taxonomy. Query parameters and headers use
//! insertion-ordered maps so requests are reproducible in logs.

use indexmap::IndexMap;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

use crate::result::{UiError, UiResult};

/// Multi-valued query parameters, insertion-ordered.
pub type Params = IndexMap<String, Vec<String>>;

/// Request or response headers, insertion-ordered.
pub type Headers = IndexMap<String, String>;

/// One completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Status code.
    pub status: u16,
    /// Response headers, names lowercased.
    pub headers: Headers,
    /// Response body as text.
    pub body: String,
}

impl ApiResponse {
    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// `Backend` when the body is not valid JSON for `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> UiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| UiError::Backend {
            op: "json",
            message: e.to_string(),
        })
    }
}

/// Verb-level HTTP contract. The short forms are sugar over the `_with`
/// forms, the same way two-argument UI operations are sugar over focus
/// plus the zero-argument form.
pub trait ApiActions {
    /// GET without parameters.
    ///
    /// # Errors
    ///
    /// Transport failures.
    fn get(&self, path: &str) -> UiResult<ApiResponse> {
        self.get_with(path, &Params::new(), &Headers::new())
    }

    /// GET with query parameters and headers.
    ///
    /// # Errors
    ///
    /// Transport failures, `InvalidArgument` for malformed headers.
    fn get_with(&self, path: &str, query: &Params, headers: &Headers) -> UiResult<ApiResponse>;

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// Transport failures.
    fn post(&self, path: &str, body: &serde_json::Value) -> UiResult<ApiResponse> {
        self.post_with(path, &Params::new(), &Headers::new(), Some(body))
    }

    /// POST with query parameters, headers and an optional JSON body.
    ///
    /// # Errors
    ///
    /// Transport failures, `InvalidArgument` for malformed headers.
    fn post_with(
        &self,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: Option<&serde_json::Value>,
    ) -> UiResult<ApiResponse>;

    /// PUT a JSON body.
    ///
    /// # Errors
    ///
    /// Transport failures.
    fn put(&self, path: &str, body: &serde_json::Value) -> UiResult<ApiResponse> {
        self.put_with(path, &Params::new(), &Headers::new(), Some(body))
    }

    /// PUT with query parameters, headers and an optional JSON body.
    ///
    /// # Errors
    ///
    /// Transport failures, `InvalidArgument` for malformed headers.
    fn put_with(
        &self,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: Option<&serde_json::Value>,
    ) -> UiResult<ApiResponse>;

    /// PATCH a JSON body.
    ///
    /// # Errors
    ///
    /// Transport failures.
    fn patch(&self, path: &str, body: &serde_json::Value) -> UiResult<ApiResponse> {
        self.patch_with(path, &Params::new(), &Headers::new(), Some(body))
    }

    /// PATCH with query parameters, headers and an optional JSON body.
    ///
    /// # Errors
    ///
    /// Transport failures, `InvalidArgument` for malformed headers.
    fn patch_with(
        &self,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: Option<&serde_json::Value>,
    ) -> UiResult<ApiResponse>;

    /// DELETE without parameters.
    ///
    /// # Errors
    ///
    /// Transport failures.
    fn delete(&self, path: &str) -> UiResult<ApiResponse> {
        self.delete_with(path, &Params::new(), &Headers::new())
    }

    /// DELETE with query parameters and headers.
    ///
    /// # Errors
    ///
    /// Transport failures, `InvalidArgument` for malformed headers.
    fn delete_with(&self, path: &str, query: &Params, headers: &Headers) -> UiResult<ApiResponse>;
}

/// Blocking HTTP client bound to one base URL.
#[derive(Debug)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    /// Build a client for a base URL.
    ///
    /// TLS validation is relaxed; these clients run against test
    /// deployments with self-signed certificates.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty base URL, `Backend` when the client
    /// cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> UiResult<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(UiError::InvalidArgument {
                message: "base URL must not be empty".to_string(),
            });
        }
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| UiError::Backend {
                op: "client",
                message: e.to_string(),
            })?;
        Ok(Self { base_url, client })
    }

    fn execute(
        &self,
        op: &'static str,
        method: Method,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: Option<&serde_json::Value>,
    ) -> UiResult<ApiResponse> {
        let url = join_url(&self.base_url, path);
        tracing::debug!(%method, url, "api request");

        let mut request = self.client.request(method, &url);
        for (name, values) in query {
            for value in values {
                request = request.query(&[(name, value)]);
            }
        }
        request = request.headers(build_headers(headers)?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|e| UiError::Backend {
            op,
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        let mut response_headers = Headers::new();
        for (name, value) in response.headers() {
            response_headers.insert(
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            );
        }
        let body = response.text().map_err(|e| UiError::Backend {
            op,
            message: e.to_string(),
        })?;

        Ok(ApiResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}

impl ApiActions for HttpApi {
    fn get_with(&self, path: &str, query: &Params, headers: &Headers) -> UiResult<ApiResponse> {
        self.execute("get", Method::GET, path, query, headers, None)
    }

    fn post_with(
        &self,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: Option<&serde_json::Value>,
    ) -> UiResult<ApiResponse> {
        self.execute("post", Method::POST, path, query, headers, body)
    }

    fn put_with(
        &self,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: Option<&serde_json::Value>,
    ) -> UiResult<ApiResponse> {
        self.execute("put", Method::PUT, path, query, headers, body)
    }

    fn patch_with(
        &self,
        path: &str,
        query: &Params,
        headers: &Headers,
        body: Option<&serde_json::Value>,
    ) -> UiResult<ApiResponse> {
        self.execute("patch", Method::PATCH, path, query, headers, body)
    }

    fn delete_with(&self, path: &str, query: &Params, headers: &Headers) -> UiResult<ApiResponse> {
        self.execute("delete", Method::DELETE, path, query, headers, None)
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn build_headers(headers: &Headers) -> UiResult<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| UiError::InvalidArgument {
            message: format!("bad header name {name:?}: {e}"),
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| UiError::InvalidArgument {
            message: format!("bad header value for {name}: {e}"),
        })?;
        map.insert(name, value);
    }
    Ok(map)
}
