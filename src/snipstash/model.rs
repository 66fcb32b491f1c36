//! # Domain Model: Snippets, Versions, and Tag Normalization
//!
//! The core data types for snipstash: [`Snippet`], [`Version`], [`Language`],
//! and [`Visibility`]. This module also owns tag normalization, which keeps
//! the tag-uniqueness invariant in one place.
//!
//! ## Versioning
//!
//! A [`Version`] is an immutable snapshot of a snippet's code *as it was
//! before* the edit that produced it. Versions are append-only: they are
//! never mutated or reordered after creation, and they live and die with
//! their snippet.
//!
//! ## Tags
//!
//! Tags are free text, unique per snippet **case-insensitively**. The first
//! spelling wins: adding `HTTP` to a snippet tagged `http` is a no-op.
//! Normalization trims whitespace and drops empty entries.
//!
//! ## Archival
//!
//! Snippets are never hard-deleted by the archive operation; the
//! `is_archived` / `archived_at` pair is a soft flag that hides the snippet
//! from the default view while keeping it in storage. The delete operation
//! removes the record (and its version log) for good.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Team,
    Public,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Private
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Private => write!(f, "private"),
            Visibility::Team => write!(f, "team"),
            Visibility::Public => write!(f, "public"),
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "team" => Ok(Visibility::Team),
            "public" => Ok(Visibility::Public),
            other => Err(format!("Unknown visibility: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    Ruby,
    Bash,
    Sql,
    Html,
    Css,
    Yaml,
    Json,
    Markdown,
    Text,
    Other(String),
}

impl Default for Language {
    fn default() -> Self {
        Self::Text
    }
}

impl Language {
    pub fn display_name(&self) -> &str {
        match self {
            Language::Rust => "Rust",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Go => "Go",
            Language::Java => "Java",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Ruby => "Ruby",
            Language::Bash => "Bash",
            Language::Sql => "SQL",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Yaml => "YAML",
            Language::Json => "JSON",
            Language::Markdown => "Markdown",
            Language::Text => "Text",
            Language::Other(name) => name,
        }
    }

    /// File extension used when exporting snippet files.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Language::Rust => "rs",
            Language::Python => "py",
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
            Language::Go => "go",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Ruby => "rb",
            Language::Bash => "sh",
            Language::Sql => "sql",
            Language::Html => "html",
            Language::Css => "css",
            Language::Yaml => "yaml",
            Language::Json => "json",
            Language::Markdown => "md",
            Language::Text => "txt",
            Language::Other(_) => "txt",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Language {
    type Err = std::convert::Infallible;

    /// Unknown names become `Other`, so parsing never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "rust" | "rs" => Language::Rust,
            "python" | "py" => Language::Python,
            "javascript" | "js" => Language::JavaScript,
            "typescript" | "ts" => Language::TypeScript,
            "go" | "golang" => Language::Go,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" | "c++" => Language::Cpp,
            "ruby" | "rb" => Language::Ruby,
            "bash" | "sh" | "shell" => Language::Bash,
            "sql" => Language::Sql,
            "html" => Language::Html,
            "css" => Language::Css,
            "yaml" | "yml" => Language::Yaml,
            "json" => Language::Json,
            "markdown" | "md" => Language::Markdown,
            "text" | "txt" | "plain" => Language::Text,
            _ => Language::Other(s.to_string()),
        })
    }
}

/// An immutable snapshot of a snippet's code taken just before an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// The code as it was *before* the edit that produced this version.
    pub code: String,
    pub message: String,
    pub author: String,
}

impl Version {
    pub fn new(code: String, message: String, author: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            code,
            message,
            author,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub language: Language,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub visibility: Visibility,
    pub owner: String,
    #[serde(default)]
    pub collaborators: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub use_count: u32,
    #[serde(default)]
    pub versions: Vec<Version>,
}

impl Snippet {
    pub fn new(name: String, code: String, language: Language, owner: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            code,
            language,
            tags: Vec::new(),
            visibility: Visibility::default(),
            owner,
            collaborators: Vec::new(),
            created_at: now,
            updated_at: now,
            is_archived: false,
            archived_at: None,
            use_count: 0,
            versions: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = normalize_tags(&tags);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }

    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}

/// Trims entries, drops empties, and removes case-insensitive duplicates.
/// The first spelling of a tag wins.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut result = Vec::new();
    for tag in tags {
        let clean = tag.trim();
        if clean.is_empty() {
            continue;
        }
        let key = clean.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        result.push(clean.to_string());
    }
    result
}

/// Applies a tag delta to an existing tag list: removals first, then
/// additions, preserving case-insensitive uniqueness throughout.
pub fn apply_tag_delta(existing: &[String], add: &[String], remove: &[String]) -> Vec<String> {
    let removals: Vec<String> = remove.iter().map(|t| t.trim().to_lowercase()).collect();
    let mut merged: Vec<String> = existing
        .iter()
        .filter(|t| !removals.contains(&t.to_lowercase()))
        .cloned()
        .collect();
    merged.extend(add.iter().cloned());
    normalize_tags(&merged)
}
