//! Subject, book and chapter records served by `GET /api/resources`.

use serde::{Deserialize, Serialize};

/// All books listed under one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectResources {
    /// Subject display name.
    pub subject: String,
    /// Books in display order.
    pub books: Vec<Book>,
}

/// A textbook, downloadable whole and/or chapter by chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Book identifier (not itself downloadable).
    pub id: String,
    /// Display title.
    pub title: String,
    /// Full-book PDF, if one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whole: Option<WholeBook>,
    /// Per-chapter PDFs.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// Full-book download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WholeBook {
    /// Download identifier.
    pub id: String,
    /// Absolute source URL.
    pub url: String,
    /// Attachment name; derived from the book title when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Single chapter download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Download identifier.
    pub id: String,
    /// Display title, e.g. `Chapter 3`.
    pub title: String,
    /// Absolute source URL.
    pub url: String,
    /// Attachment name; derived from book and chapter titles when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Flattened download target for one resource id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceItem {
    /// Absolute source URL.
    pub url: String,
    /// Attachment name.
    pub filename: String,
}
