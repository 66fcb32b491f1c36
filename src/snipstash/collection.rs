//! The [`Collection`] is the aggregate root: every snippet in the session
//! lives here, and the reducer is its single point of mutation.
//!
//! Snippets are kept in a `Vec` rather than a map. Insertion order is the
//! canonical tie-break order for sorting in the derived view, and the
//! collection is small enough that linear id lookup is not a concern.
//! Identifier uniqueness is an invariant: the reducer refuses to append a
//! snippet whose id is already present.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Language, Snippet, Visibility};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub snippets: Vec<Snippet>,
    /// The currently selected snippet, if any.
    #[serde(default)]
    pub active: Option<Uuid>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.snippets.iter().any(|s| &s.id == id)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Snippet> {
        self.snippets.iter().find(|s| &s.id == id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Snippet> {
        self.snippets.iter_mut().find(|s| &s.id == id)
    }

    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.snippets.iter().position(|s| &s.id == id)
    }

    /// The built-in starter set used when the store has nothing usable.
    pub fn seed() -> Self {
        let mut collection = Self::new();

        let hello = Snippet::new(
            "hello-world".to_string(),
            "echo \"hello, world\"".to_string(),
            Language::Bash,
            "snipstash".to_string(),
        )
        .with_tags(vec!["shell".to_string(), "starter".to_string()]);

        let undo = Snippet::new(
            "git-undo-last-commit".to_string(),
            "git reset --soft HEAD~1".to_string(),
            Language::Bash,
            "snipstash".to_string(),
        )
        .with_tags(vec!["git".to_string(), "starter".to_string()]);

        let fetch = Snippet::new(
            "http-get-json".to_string(),
            "import json\nimport urllib.request\n\nwith urllib.request.urlopen(url) as resp:\n    data = json.load(resp)".to_string(),
            Language::Python,
            "snipstash".to_string(),
        )
        .with_tags(vec!["http".to_string(), "starter".to_string()])
        .with_visibility(Visibility::Public);

        collection.active = Some(hello.id);
        collection.snippets = vec![hello, undo, fetch];
        collection
    }
}
