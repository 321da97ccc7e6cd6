//! Auxiliary downloadable resources (textbooks and chapters).
//!
//! Resources are organised as subject → book → chapter for browsing and
//! flattened into an id → `{url, filename}` index for downloads. The index is
//! built and validated once; both views are read-only afterwards.

mod builtin;
mod error;
mod model;

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::{debug, info};

use crate::download::{parse_http_url, sanitize_filename, underscore_whitespace};

pub use error::ResourceError;
pub use model::{Book, Chapter, ResourceItem, SubjectResources, WholeBook};

/// Browsable resource tree plus its flattened download index.
#[derive(Debug, Clone, Default)]
pub struct ResourceLibrary {
    subjects: BTreeMap<String, SubjectResources>,
    index: HashMap<String, ResourceItem>,
}

impl ResourceLibrary {
    /// The built-in Class 12 textbook table.
    ///
    /// # Errors
    ///
    /// Returns a validation error only if the built-in table is inconsistent.
    pub fn builtin() -> Result<Self, ResourceError> {
        Self::from_subjects(builtin::builtin_subjects())
    }

    /// Builds the library from a subject map, flattening and validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyId`], [`ResourceError::DuplicateId`] or
    /// [`ResourceError::InvalidUrl`] for the first offending item.
    pub fn from_subjects(
        subjects: BTreeMap<String, SubjectResources>,
    ) -> Result<Self, ResourceError> {
        let mut index = HashMap::new();
        for (subject, resources) in &subjects {
            for book in &resources.books {
                for (id, item) in flatten_book(book) {
                    insert_item(&mut index, subject, book, id, item)?;
                }
            }
        }
        debug!(
            subjects = subjects.len(),
            items = index.len(),
            "resource library validated"
        );
        Ok(Self { subjects, index })
    }

    /// Parses a JSON object keyed by subject name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Parse`] on schema mismatch, otherwise the
    /// same errors as [`ResourceLibrary::from_subjects`].
    pub fn from_json_str(json: &str) -> Result<Self, ResourceError> {
        let subjects: BTreeMap<String, SubjectResources> =
            serde_json::from_str(json).map_err(|source| ResourceError::Parse { source })?;
        Self::from_subjects(subjects)
    }

    /// Reads a library file.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`ResourceLibrary::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            items = library.len(),
            "resource library loaded"
        );
        Ok(library)
    }

    /// Subject names, sorted.
    #[must_use]
    pub fn subject_names(&self) -> Vec<&str> {
        self.subjects.keys().map(String::as_str).collect()
    }

    /// Record for one subject (exact name).
    #[must_use]
    pub fn subject(&self, name: &str) -> Option<&SubjectResources> {
        self.subjects.get(name)
    }

    /// Download target for a whole-book or chapter id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ResourceItem> {
        self.index.get(id)
    }

    /// Number of downloadable items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if there is nothing to download.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn flatten_book(book: &Book) -> impl Iterator<Item = (&str, ResourceItem)> + '_ {
    let title = underscore_whitespace(&book.title);
    let whole = book.whole.as_ref().map(|whole| {
        let filename = whole
            .filename
            .clone()
            .unwrap_or_else(|| sanitize_filename(&format!("{title}.pdf")));
        (
            whole.id.as_str(),
            ResourceItem {
                url: whole.url.clone(),
                filename,
            },
        )
    });
    let chapters = book.chapters.iter().map(move |chapter| {
        let filename = chapter.filename.clone().unwrap_or_else(|| {
            sanitize_filename(&format!(
                "{title}_{}.pdf",
                underscore_whitespace(&chapter.title)
            ))
        });
        (
            chapter.id.as_str(),
            ResourceItem {
                url: chapter.url.clone(),
                filename,
            },
        )
    });
    whole.into_iter().chain(chapters)
}

fn insert_item(
    index: &mut HashMap<String, ResourceItem>,
    subject: &str,
    book: &Book,
    id: &str,
    item: ResourceItem,
) -> Result<(), ResourceError> {
    if id.trim().is_empty() {
        return Err(ResourceError::EmptyId {
            subject: subject.to_string(),
            book: book.id.clone(),
        });
    }
    if parse_http_url(&item.url).is_none() {
        return Err(ResourceError::InvalidUrl {
            id: id.to_string(),
            url: item.url,
        });
    }
    match index.entry(id.to_string()) {
        Entry::Occupied(_) => Err(ResourceError::DuplicateId { id: id.to_string() }),
        Entry::Vacant(slot) => {
            slot.insert(item);
            Ok(())
        }
    }
}
