//! The derived view: a pure projection of the collection for listing.
//!
//! Filters are conjunctive: a snippet appears only if every active filter
//! passes. Sorting is a total order per [`SortMode`]; `sort_by` is stable,
//! so ties keep the collection's insertion order.

use std::cmp::Ordering;

use crate::collection::Collection;
use crate::model::{Language, Snippet, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    NameAsc,
    NameDesc,
    CreatedAsc,
    CreatedDesc,
    UsageAsc,
    UsageDesc,
}

impl Default for SortMode {
    fn default() -> Self {
        // Newest first, matching the list rendering default.
        Self::CreatedDesc
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" | "name-asc" => Ok(SortMode::NameAsc),
            "name-desc" => Ok(SortMode::NameDesc),
            "created" | "created-asc" => Ok(SortMode::CreatedAsc),
            "created-desc" => Ok(SortMode::CreatedDesc),
            "usage" | "usage-asc" => Ok(SortMode::UsageAsc),
            "usage-desc" => Ok(SortMode::UsageDesc),
            other => Err(format!("Unknown sort mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    /// Case-insensitive free text matched against name, code, tags, owner.
    pub search: Option<String>,
    /// Exact language match; `None` means all languages.
    pub language: Option<Language>,
    /// Every listed tag must be present (AND, not OR).
    pub tags: Vec<String>,
    pub visibility: Option<Visibility>,
    /// Archived snippets are excluded unless this is set.
    pub include_archived: bool,
    pub sort: SortMode,
}

impl ViewFilter {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

/// Computes the ordered subset of the collection to render.
pub fn apply(collection: &Collection, filter: &ViewFilter) -> Vec<Snippet> {
    let mut listed: Vec<Snippet> = collection
        .snippets
        .iter()
        .filter(|s| matches(s, filter))
        .cloned()
        .collect();

    listed.sort_by(|a, b| compare(a, b, filter.sort));
    listed
}

fn matches(snippet: &Snippet, filter: &ViewFilter) -> bool {
    if snippet.is_archived && !filter.include_archived {
        return false;
    }

    if let Some(language) = &filter.language {
        if &snippet.language != language {
            return false;
        }
    }

    if let Some(visibility) = filter.visibility {
        if snippet.visibility != visibility {
            return false;
        }
    }

    if !filter.tags.iter().all(|t| snippet.has_tag(t)) {
        return false;
    }

    if let Some(term) = &filter.search {
        let term = term.trim().to_lowercase();
        if !term.is_empty() {
            let hit = snippet.name.to_lowercase().contains(&term)
                || snippet.code.to_lowercase().contains(&term)
                || snippet.owner.to_lowercase().contains(&term)
                || snippet.tags.iter().any(|t| t.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }
    }

    true
}

fn compare(a: &Snippet, b: &Snippet, sort: SortMode) -> Ordering {
    match sort {
        SortMode::NameAsc => a.name.cmp(&b.name),
        SortMode::NameDesc => b.name.cmp(&a.name),
        SortMode::CreatedAsc => a.created_at.cmp(&b.created_at),
        SortMode::CreatedDesc => b.created_at.cmp(&a.created_at),
        SortMode::UsageAsc => a.use_count.cmp(&b.use_count),
        SortMode::UsageDesc => b.use_count.cmp(&a.use_count),
    }
}
