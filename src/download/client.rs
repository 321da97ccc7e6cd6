//! HTTP client wrapper for fetching remote documents.
//!
//! [`HttpClient`] owns one pooled `reqwest` client configured with the
//! browser User-Agent and a bounded redirect policy. Individual requests are
//! described by a [`FetchRequest`], which carries the method, timeout, optional
//! byte range, referer behavior and status policy.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, RANGE, REFERER};
use reqwest::redirect::Policy;
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT, MAX_REDIRECTS};
use super::error::FetchError;
use crate::user_agent::{BROWSER_USER_AGENT, PDF_ACCEPT};

/// HTTP method used for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    /// Full download; the body is returned.
    Get,
    /// Headers only; the body is never read.
    Head,
}

/// Which response statuses count as a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Any non-2xx status is a [`FetchError::HttpStatus`].
    #[default]
    RequireSuccess,
    /// Only 5xx statuses fail; 4xx responses are returned to the caller.
    RejectServerErrors,
}

impl StatusPolicy {
    fn rejects(self, status: reqwest::StatusCode) -> bool {
        match self {
            Self::RequireSuccess => !status.is_success(),
            Self::RejectServerErrors => status.is_server_error(),
        }
    }
}

/// A single outbound request.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Absolute URL to fetch.
    pub url: String,
    /// GET or HEAD.
    pub method: FetchMethod,
    /// Whole-request timeout, including body transfer.
    pub timeout: Duration,
    /// Inclusive byte range (`Range: bytes=start-end`).
    pub range: Option<(u64, u64)>,
    /// Send `Referer: <origin of url>`.
    pub send_referer: bool,
    /// Status handling for this request.
    pub status_policy: StatusPolicy,
}

impl FetchRequest {
    /// GET with the document download defaults: referer set, any non-2xx fails.
    pub fn document(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            method: FetchMethod::Get,
            timeout,
            range: None,
            send_referer: true,
            status_policy: StatusPolicy::RequireSuccess,
        }
    }

    /// HEAD probe.
    pub fn head(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            method: FetchMethod::Head,
            timeout,
            range: None,
            send_referer: false,
            status_policy: StatusPolicy::RequireSuccess,
        }
    }

    /// Restricts the request to an inclusive byte range.
    #[must_use]
    pub fn with_range(mut self, start: u64, end: u64) -> Self {
        self.range = Some((start, end));
        self
    }

    /// Overrides the status policy.
    #[must_use]
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }
}

/// Response of a successful fetch. HEAD responses have an empty body.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Final HTTP status after redirects.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl FetchResponse {
    /// `Content-Type` header value, if present and valid UTF-8.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// `Content-Length` header parsed as a byte count.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    }

    /// Whether the final status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Parses `url` and accepts it only if it is an absolute http(s) URL.
#[must_use]
pub fn parse_http_url(url: &str) -> Option<Url> {
    Url::parse(url)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}

/// Performs remote fetches.
///
/// Services depend on this trait rather than on [`HttpClient`] so tests and
/// embedders can substitute their own transport.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Executes `request`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on timeout, connection failure, or a status the
    /// request's [`StatusPolicy`] rejects.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}

/// HTTP client for fetching remote documents.
///
/// Create once and share: the inner client pools connections per host.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with the default connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the TLS backend or system
    /// configuration prevents building the client.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_connect_timeout(CONNECT_TIMEOUT)
    }

    /// Creates a client with an explicit connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the client cannot be built.
    pub fn with_connect_timeout(connect_timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|source| FetchError::ClientBuild { source })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    #[instrument(skip(self, request), fields(url = %request.url, method = ?request.method))]
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        let parsed = parse_http_url(&request.url)
            .ok_or_else(|| FetchError::invalid_url(request.url.clone()))?;

        let mut builder = match request.method {
            FetchMethod::Get => self.client.get(parsed.clone()).header(ACCEPT, PDF_ACCEPT),
            FetchMethod::Head => self.client.head(parsed.clone()),
        };
        builder = builder.timeout(request.timeout);
        if let Some((start, end)) = request.range {
            builder = builder.header(RANGE, format!("bytes={start}-{end}"));
        }
        if request.send_referer {
            builder = builder.header(REFERER, parsed.origin().ascii_serialization());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(request.url.clone(), e))?;

        let status = response.status();
        if request.status_policy.rejects(status) {
            debug!(status = status.as_u16(), "remote returned rejected status");
            return Err(FetchError::http_status(
                request.url.clone(),
                status.as_u16(),
            ));
        }

        let headers = response.headers().clone();
        let body = match request.method {
            FetchMethod::Get => response
                .bytes()
                .await
                .map_err(|e| FetchError::from_reqwest(request.url.clone(), e))?,
            FetchMethod::Head => Bytes::new(),
        };

        debug!(status = status.as_u16(), bytes = body.len(), "fetch complete");

        Ok(FetchResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_status_policy_require_success() {
        let policy = StatusPolicy::RequireSuccess;
        assert!(!policy.rejects(reqwest::StatusCode::OK));
        assert!(policy.rejects(reqwest::StatusCode::NOT_FOUND));
        assert!(policy.rejects(reqwest::StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_status_policy_reject_server_errors() {
        let policy = StatusPolicy::RejectServerErrors;
        assert!(!policy.rejects(reqwest::StatusCode::OK));
        assert!(!policy.rejects(reqwest::StatusCode::NOT_FOUND));
        assert!(policy.rejects(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_parse_http_url() {
        assert!(parse_http_url("https://ncert.nic.in/textbook/pdf/lemh101.pdf").is_some());
        assert!(parse_http_url("http://files.example.org/Maths Paper 2015(Delhi).pdf").is_some());
        assert!(parse_http_url("file:///etc/passwd").is_none());
        assert!(parse_http_url("/relative/path.pdf").is_none());
    }

    #[test]
    fn test_fetch_rejects_relative_url() {
        let client = HttpClient::new().unwrap();
        let request = FetchRequest::document("papers/1.pdf", TIMEOUT);
        let result = tokio_test::block_on(client.fetch(&request));
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_fetch_rejects_non_http_scheme() {
        let client = HttpClient::new().unwrap();
        let request = FetchRequest::document("ftp://example.com/1.pdf", TIMEOUT);
        let result = tokio_test::block_on(client.fetch(&request));
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_get_sends_browser_headers_and_origin_referer() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/papers/maths.pdf"))
            .and(header("referer", mock_server.uri().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 body".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/papers/maths.pdf", mock_server.uri());
        let response = client
            .fetch(&FetchRequest::document(url, TIMEOUT))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(&response.body[..], b"%PDF-1.4 body");

        let requests = mock_server.received_requests().await.unwrap();
        let sent = &requests[0].headers;
        assert_eq!(
            sent.get("user-agent").and_then(|v| v.to_str().ok()),
            Some(BROWSER_USER_AGENT)
        );
        assert_eq!(
            sent.get("accept").and_then(|v| v.to_str().ok()),
            Some(PDF_ACCEPT)
        );
    }

    #[tokio::test]
    async fn test_get_follows_redirects() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/old.pdf"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/new.pdf", mock_server.uri())),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.5".to_vec()))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/old.pdf", mock_server.uri());
        let response = client
            .fetch(&FetchRequest::document(url, TIMEOUT))
            .await
            .unwrap();
        assert_eq!(&response.body[..], b"%PDF-1.5");
    }

    #[tokio::test]
    async fn test_get_stops_after_redirect_limit() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/loop.pdf"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/loop.pdf", mock_server.uri())),
            )
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/loop.pdf", mock_server.uri());
        let result = client.fetch(&FetchRequest::document(url, TIMEOUT)).await;
        match result {
            Err(error) => assert_eq!(error.reason().as_str(), "network"),
            Ok(response) => panic!("expected redirect failure, got status {}", response.status),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_http_status_failure() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/broken.pdf"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/broken.pdf", mock_server.uri());
        let result = client.fetch(&FetchRequest::document(url, TIMEOUT)).await;
        match result {
            Err(FetchError::HttpStatus { status, .. }) => assert_eq!(status, 503),
            other => panic!("Expected HttpStatus error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_client_error_passes_reject_server_errors_policy() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("HEAD"))
            .and(path("/gone.pdf"))
            .respond_with(ResponseTemplate::new(404).insert_header("content-type", "text/html"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/gone.pdf", mock_server.uri());
        let request =
            FetchRequest::head(url, TIMEOUT).with_status_policy(StatusPolicy::RejectServerErrors);
        let response = client.fetch(&request).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
        assert_eq!(response.content_type(), Some("text/html"));
    }

    #[tokio::test]
    async fn test_head_returns_headers_without_body() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("HEAD"))
            .and(path("/paper.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .insert_header("content-length", "2048"),
            )
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/paper.pdf", mock_server.uri());
        let response = client.fetch(&FetchRequest::head(url, TIMEOUT)).await.unwrap();
        assert!(response.body.is_empty());
        assert_eq!(response.content_type(), Some("application/pdf"));
        assert_eq!(response.content_length(), Some(2048));
    }

    #[tokio::test]
    async fn test_range_header_is_sent() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/paper.pdf"))
            .and(header("range", "bytes=0-10"))
            .respond_with(ResponseTemplate::new(206).set_body_bytes(b"%PDF-1.7\n%\xe2".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/paper.pdf", mock_server.uri());
        let request = FetchRequest::document(url, TIMEOUT).with_range(0, 10);
        let response = client.fetch(&request).await.unwrap();
        assert_eq!(response.status, 206);
        assert!(response.body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_slow_remote_times_out() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };

        Mock::given(method("GET"))
            .and(path("/slow.pdf"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(b"%PDF".to_vec())
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/slow.pdf", mock_server.uri());
        let request = FetchRequest::document(url, Duration::from_millis(200));
        let result = client.fetch(&request).await;
        assert!(
            matches!(result, Err(FetchError::Timeout { .. })),
            "expected timeout, got {result:?}"
        );
    }
}
