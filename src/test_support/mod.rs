//! Shared fixtures for unit tests.

pub mod socket_guard;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::download::{FetchError, FetchMethod, FetchRequest, FetchResponse, Fetcher};

/// Canned remote behavior for one URL.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// 200 with the given content type and body.
    Ok {
        content_type: &'static str,
        body: Bytes,
    },
    /// Request times out.
    Timeout,
    /// Rejected HTTP status.
    Status(u16),
}

impl StubReply {
    pub fn pdf(body: &'static [u8]) -> Self {
        Self::Ok {
            content_type: "application/pdf",
            body: Bytes::from_static(body),
        }
    }

    pub fn html(body: &'static [u8]) -> Self {
        Self::Ok {
            content_type: "text/html; charset=utf-8",
            body: Bytes::from_static(body),
        }
    }
}

/// In-memory [`Fetcher`] keyed by URL. Unknown URLs behave as unreachable.
#[derive(Debug, Default)]
pub struct StubFetcher {
    replies: HashMap<String, StubReply>,
    seen: Mutex<Vec<FetchRequest>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, url: &str, reply: StubReply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    /// Requests received so far, in arrival order.
    pub fn seen(&self) -> Vec<FetchRequest> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }
        match self.replies.get(&request.url) {
            Some(StubReply::Ok { content_type, body }) => {
                let mut headers = HeaderMap::new();
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
                headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
                let body = match request.method {
                    FetchMethod::Get => body.clone(),
                    FetchMethod::Head => Bytes::new(),
                };
                Ok(FetchResponse {
                    status: 200,
                    headers,
                    body,
                })
            }
            Some(StubReply::Timeout) => Err(FetchError::timeout(request.url.clone())),
            Some(StubReply::Status(status)) => {
                Err(FetchError::http_status(request.url.clone(), *status))
            }
            None => Err(FetchError::invalid_url(request.url.clone())),
        }
    }
}
