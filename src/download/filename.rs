//! Filename derivation for delivered documents.
//!
//! Single downloads and batch archive entries share one naming scheme so a
//! paper fetched on its own and the same paper inside a zip carry the same
//! `<year>_<type>[_Set<set>][_<region>]` stem.

use std::path::{Component, Path};

use crate::catalog::CatalogEntry;

/// Builds the attachment filename for a single paper download.
///
/// Pattern: `<subject>_<year>_<type>[_Set<set>][_<region>].pdf`
#[must_use]
pub fn derive_filename(entry: &CatalogEntry) -> String {
    format!(
        "{}_{}.pdf",
        sanitize_filename(&entry.subject),
        filename_stem(entry)
    )
}

/// Builds the path of a paper inside a batch archive, namespaced by subject.
///
/// Pattern: `<subject>/<year>_<type>[_Set<set>][_<region>].pdf`
#[must_use]
pub fn archive_entry_path(entry: &CatalogEntry) -> String {
    format!(
        "{}/{}.pdf",
        sanitize_filename(&entry.subject),
        filename_stem(entry)
    )
}

fn filename_stem(entry: &CatalogEntry) -> String {
    let mut stem = format!(
        "{}_{}",
        entry.year,
        sanitize_filename(&entry.paper_type)
    );
    if let Some(set) = non_empty(entry.set.as_deref()) {
        stem.push_str("_Set");
        stem.push_str(&sanitize_filename(set));
    }
    if let Some(region) = non_empty(entry.region.as_deref()) {
        stem.push('_');
        stem.push_str(&sanitize_filename(region));
    }
    stem
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Replaces whitespace runs with a single underscore (`"Part I"` -> `"Part_I"`).
#[must_use]
pub fn underscore_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Sanitizes a filename component for archive paths and download headers.
///
/// Replaces characters that are invalid on common filesystems
/// (`/ \ : * ? " < > |`) and control characters. Spaces are kept.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Builds a `Content-Disposition: attachment` header value.
///
/// Header values must be visible ASCII, so non-ASCII names get an ASCII
/// `filename` fallback plus an RFC 5987 `filename*` parameter.
#[must_use]
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if filename.is_ascii() && ascii == filename {
        format!("attachment; filename=\"{ascii}\"")
    } else {
        let encoded = urlencoding::encode(filename);
        format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
    }
}
