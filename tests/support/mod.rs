//! Shared fixtures for API integration tests.

#![allow(dead_code)]

pub mod socket_guard;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use paper_proxy::{Catalog, HttpClient, ProxyService, ProxySettings, ResourceLibrary, api};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\ntrailer\n<<>>\n%%EOF";
pub const HTML: &[u8] = b"<!DOCTYPE html><html><body>Page moved</body></html>";

/// Catalog record pointing at `url`.
pub fn paper(id: &str, subject: &str, year: u16, url: &str) -> Value {
    json!({
        "id": id,
        "subject": subject,
        "year": year,
        "type": "Question Paper",
        "region": "Delhi",
        "set": "1",
        "code": null,
        "title": format!("{subject} {year} Question Paper (Delhi)"),
        "url": url,
    })
}

/// Router over the given catalog records and resource library.
pub fn app(papers: &[Value], resources: ResourceLibrary) -> Router {
    let catalog = Catalog::from_json_str(&Value::Array(papers.to_vec()).to_string())
        .expect("fixture catalog is valid");
    let settings = ProxySettings::new(Duration::from_secs(5), Duration::from_secs(5), 5)
        .expect("fixture settings are valid");
    let client = HttpClient::new().expect("client builds");
    api::router(ProxyService::new(catalog, resources, Arc::new(client), settings))
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Reply {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    Reply {
        status,
        headers,
        body,
    }
}

pub async fn get(app: Router, uri: &str) -> Reply {
    let request = Request::get(uri).body(Body::empty()).expect("request builds");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Reply {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");
    send(app, request).await
}
