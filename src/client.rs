//! HTTP client for the SendoraCity REST API.
//!
//! [`ApiClient`] turns a verb, a resource path and an optional JSON body or
//! query filters into one request against `base_uri/path`, then classifies
//! the response:
//!
//! - `200` and `201` are successes; the response is handed back unread.
//! - `404` is a soft outcome. It is handed back like a success so adapters
//!   can detect a vanished entity by status instead of by error message.
//! - Anything else becomes an [`ApiError`] carrying the status code and the
//!   best message the body offers.

use std::collections::HashMap;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use tracing::{debug, instrument, warn};

use crate::error::{ApiError, ClientError};

/// Result of an [`ApiClient`] verb.
pub type ClientResult = Result<Response, ClientError>;

/// Client bound to a single API base URI.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_uri: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URI.
    ///
    /// A trailing `/` is trimmed so joined URLs never contain `//`.
    pub fn new(base_uri: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(base_uri, http))
    }

    /// Create a client reusing an existing `reqwest` client.
    pub fn with_http_client(base_uri: &str, http: reqwest::Client) -> Self {
        Self {
            base_uri: base_uri.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// The base URI every path is resolved against.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Absolute URL for a resource path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_uri, path)
    }

    /// `POST` a JSON body to `path`.
    #[instrument(skip(self, body), name = "api.create")]
    pub async fn create(&self, path: &str, body: Vec<u8>) -> ClientResult {
        let request = with_json(self.http.post(self.url(path)), body);
        self.execute(request).await
    }

    /// `GET` the collection at `path`, one query parameter per filter.
    #[instrument(skip(self), name = "api.list")]
    pub async fn list(&self, path: &str, filters: &HashMap<String, String>) -> ClientResult {
        let request = self.http.get(self.url(path)).query(filters);
        self.execute(request).await
    }

    /// `GET` the entity at `path`.
    #[instrument(skip(self), name = "api.read")]
    pub async fn read(&self, path: &str) -> ClientResult {
        let request = self.http.get(self.url(path));
        self.execute(request).await
    }

    /// `PATCH` the entity at `path` with a JSON body.
    #[instrument(skip(self, body), name = "api.update")]
    pub async fn update(&self, path: &str, body: Vec<u8>) -> ClientResult {
        let request = with_json(self.http.patch(self.url(path)), body);
        self.execute(request).await
    }

    /// `DELETE` the entity at `path`.
    #[instrument(skip(self), name = "api.delete")]
    pub async fn delete(&self, path: &str) -> ClientResult {
        let request = self.http.delete(self.url(path));
        self.execute(request).await
    }

    async fn execute(&self, request: RequestBuilder) -> ClientResult {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().to_string();
        debug!(%method, %url, "Sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if is_pass_through(status) {
            debug!(%method, %url, status = status.as_u16(), "Request completed");
            return Ok(response);
        }

        let body = response.bytes().await?;
        let err = classify_error(&method, &url, status, &body);
        warn!(%method, %url, status = status.as_u16(), error = %err, "Request failed");
        Err(err.into())
    }
}

fn with_json(request: RequestBuilder, body: Vec<u8>) -> RequestBuilder {
    request
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .header(ACCEPT, HeaderValue::from_static("*/*"))
        .body(body)
}

/// Whether a response is handed back to the caller instead of failing.
///
/// Everything up to `201 Created` passes, as does `404 Not Found`.
pub fn is_pass_through(status: StatusCode) -> bool {
    status.as_u16() <= StatusCode::CREATED.as_u16() || status == StatusCode::NOT_FOUND
}

/// Build the classified error for a failed response.
///
/// The detail is chosen in priority order: the re-serialized `errors` object
/// of a JSON error envelope, then the raw body, then nothing.
pub fn classify_error(method: &Method, url: &str, status: StatusCode, body: &[u8]) -> ApiError {
    let code = status.as_u16();
    if body.is_empty() {
        return ApiError::new(code, format!("Method {} to uri {} failed", method, url));
    }

    let reason = error_envelope(body).unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
    ApiError::new(
        code,
        format!("Method {} to uri {} failed, reason : {}", method, url, reason),
    )
}

fn error_envelope(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let errors = value.get("errors")?.as_object()?;
    serde_json::to_string(errors).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://localhost:8080/cities";

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ApiClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.url("cities/7"), "http://localhost:8080/cities/7");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_uri(), "http://localhost:8080");
        assert_eq!(client.url("houses"), "http://localhost:8080/houses");
    }

    #[test]
    fn test_pass_through_statuses() {
        assert!(is_pass_through(StatusCode::OK));
        assert!(is_pass_through(StatusCode::CREATED));
        assert!(is_pass_through(StatusCode::NOT_FOUND));

        for code in [202u16, 204, 400, 401, 403, 409, 422, 500, 502, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(!is_pass_through(status), "{code} should fail");
        }
    }

    #[test]
    fn test_classify_errors_envelope() {
        let body = br#"{"errors":{"name":["required"]}}"#;
        let err = classify_error(
            &Method::POST,
            URL,
            StatusCode::UNPROCESSABLE_ENTITY,
            body,
        );
        assert_eq!(err.code(), 422);
        assert_eq!(
            err.message(),
            r#"Method POST to uri http://localhost:8080/cities failed, reason : {"name":["required"]}"#
        );
    }

    #[test]
    fn test_classify_empty_body() {
        let err = classify_error(&Method::GET, URL, StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(err.code(), 500);
        assert_eq!(
            err.message(),
            "Method GET to uri http://localhost:8080/cities failed"
        );
    }

    #[test]
    fn test_classify_raw_body() {
        let err = classify_error(&Method::PATCH, URL, StatusCode::BAD_REQUEST, b"bad input");
        assert_eq!(err.code(), 400);
        assert!(err.message().ends_with("reason : bad input"));
        assert!(err.message().contains("PATCH"));
    }

    #[test]
    fn test_classify_json_without_errors_object_uses_raw_body() {
        let body = br#"{"message":"conflict"}"#;
        let err = classify_error(&Method::POST, URL, StatusCode::CONFLICT, body);
        assert_eq!(err.code(), 409);
        assert!(err.message().ends_with(r#"reason : {"message":"conflict"}"#));

        let body = br#"{"errors":"not an object"}"#;
        let err = classify_error(&Method::POST, URL, StatusCode::CONFLICT, body);
        assert!(err.message().ends_with(r#"reason : {"errors":"not an object"}"#));
    }
}
