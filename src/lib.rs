//! Paper Proxy Library
//!
//! Serves a static catalog of exam-paper PDFs and proxies their downloads
//! from third-party hosts, validating every payload before delivery.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - Paper catalog loading, validation and querying
//! - [`resources`] - Textbook library (subject, book, chapter) and its download index
//! - [`download`] - Remote fetching, PDF validation, filenames and zip assembly
//! - [`proxy`] - Single, batch and verification services over a shared context
//! - [`api`] - axum router exposing the services over HTTP

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod catalog;
pub mod download;
pub mod proxy;
pub mod resources;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogEntry, CatalogError, CatalogFilter};
pub use download::{FetchError, Fetcher, HttpClient, is_pdf};
pub use proxy::{BatchSummary, ProxyError, ProxyService, ProxySettings, VerifyReport};
pub use resources::{ResourceError, ResourceLibrary};
