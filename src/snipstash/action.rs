//! The closed set of state transitions understood by the reducer.
//!
//! Every mutation of the [`Collection`](crate::collection::Collection) is
//! expressed as an [`Action`] value. The reducer matches on this enum
//! exhaustively, so adding a variant is a compile-time checklist of every
//! place that needs to handle it.

use uuid::Uuid;

use crate::model::{Language, Snippet, Visibility};

/// A partial edit of a snippet. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct SnippetPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub language: Option<Language>,
    pub tags: Option<Vec<String>>,
    pub visibility: Option<Visibility>,
    /// Change message recorded in the version log when the code changes.
    pub message: Option<String>,
    /// Author recorded in the version log; defaults to the snippet's owner.
    pub author: Option<String>,
}

impl SnippetPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.code.is_none()
            && self.language.is_none()
            && self.tags.is_none()
            && self.visibility.is_none()
    }
}

/// A tag delta applied uniformly to a set of snippets.
#[derive(Debug, Clone, Default)]
pub struct TagDelta {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Append a new snippet and make it the active selection.
    /// The caller supplies the (fresh) id as part of the snippet.
    Add(Snippet),
    /// Apply a partial edit; a code change appends a version first.
    Update { id: Uuid, patch: SnippetPatch },
    /// Remove a snippet and its version log.
    Delete { id: Uuid },
    /// Soft-hide a snippet from the default view.
    Archive { id: Uuid },
    /// Undo an archive.
    Restore { id: Uuid },
    /// No-op unless the snippet's visibility is `team`.
    AddCollaborator { id: Uuid, user: String },
    /// No-op unless the snippet's visibility is `team`.
    RemoveCollaborator { id: Uuid, user: String },
    /// Apply the same tag delta to every listed snippet that exists.
    BulkTag { ids: Vec<Uuid>, delta: TagDelta },
    /// Bump the usage counter (e.g. when a snippet is shown or copied).
    MarkUsed { id: Uuid },
}
