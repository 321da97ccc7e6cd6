//! Catalog filtering, distinct-value extraction and counts.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::CatalogEntry;

/// Conjunctive filter over catalog entries. `None` fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Exact year. Values no entry can hold simply match nothing.
    pub year: Option<i64>,
    /// Case-insensitive exact subject.
    pub subject: Option<String>,
    /// Case-insensitive exact region.
    pub region: Option<String>,
    /// Case-insensitive exact set.
    pub set: Option<String>,
    /// Case-insensitive exact paper type.
    pub paper_type: Option<String>,
    /// Case-insensitive substring of title, subject, or decimal year.
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Returns `true` if `entry` satisfies every provided constraint.
    #[must_use]
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if self.year.is_some_and(|year| i64::from(entry.year) != year) {
            return false;
        }
        if !matches_exact(self.subject.as_deref(), Some(&entry.subject))
            || !matches_exact(self.region.as_deref(), entry.region.as_deref())
            || !matches_exact(self.set.as_deref(), entry.set.as_deref())
            || !matches_exact(self.paper_type.as_deref(), Some(&entry.paper_type))
        {
            return false;
        }
        match self.search.as_deref() {
            Some(term) => matches_search(&term.to_lowercase(), entry),
            None => true,
        }
    }
}

fn matches_exact(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted, actual) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(wanted), Some(actual)) => eq_ignore_case(wanted, actual),
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn matches_search(needle: &str, entry: &CatalogEntry) -> bool {
    entry.title.to_lowercase().contains(needle)
        || entry.subject.to_lowercase().contains(needle)
        || entry.year.to_string().contains(needle)
}

/// Returns the entries matching `filter`, in catalog order.
#[must_use]
pub fn filter_entries<'a>(entries: &'a [CatalogEntry], filter: &CatalogFilter) -> Vec<&'a CatalogEntry> {
    entries.iter().filter(|entry| filter.matches(entry)).collect()
}

/// Distinct attribute values present in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Years, newest first.
    pub years: Vec<u16>,
    /// Subjects, ascending.
    pub subjects: Vec<String>,
    /// Regions, ascending; null regions excluded.
    pub regions: Vec<String>,
    /// Sets, ascending; null sets excluded.
    pub sets: Vec<String>,
    /// Paper types, ascending.
    pub types: Vec<String>,
}

/// Collects distinct non-null values for each filterable attribute.
#[must_use]
pub fn filter_options(entries: &[CatalogEntry]) -> FilterOptions {
    let mut years = BTreeSet::new();
    let mut subjects = BTreeSet::new();
    let mut regions = BTreeSet::new();
    let mut sets = BTreeSet::new();
    let mut types = BTreeSet::new();

    for entry in entries {
        years.insert(entry.year);
        subjects.insert(entry.subject.clone());
        types.insert(entry.paper_type.clone());
        if let Some(region) = non_blank(entry.region.as_deref()) {
            regions.insert(region.to_string());
        }
        if let Some(set) = non_blank(entry.set.as_deref()) {
            sets.insert(set.to_string());
        }
    }

    FilterOptions {
        years: years.into_iter().rev().collect(),
        subjects: subjects.into_iter().collect(),
        regions: regions.into_iter().collect(),
        sets: sets.into_iter().collect(),
        types: types.into_iter().collect(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Paper counts grouped by subject, year and type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Number of papers in the catalog.
    pub total_papers: usize,
    /// Count per subject.
    pub by_subject: BTreeMap<String, usize>,
    /// Count per year.
    pub by_year: BTreeMap<u16, usize>,
    /// Count per paper type.
    pub by_type: BTreeMap<String, usize>,
}

/// Counts papers per subject, year and type.
#[must_use]
pub fn catalog_stats(entries: &[CatalogEntry]) -> CatalogStats {
    let mut stats = CatalogStats {
        total_papers: entries.len(),
        ..CatalogStats::default()
    };
    for entry in entries {
        *stats.by_subject.entry(entry.subject.clone()).or_default() += 1;
        *stats.by_year.entry(entry.year).or_default() += 1;
        *stats.by_type.entry(entry.paper_type.clone()).or_default() += 1;
    }
    stats
}
