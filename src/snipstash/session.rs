//! # Session Facade
//!
//! The dispatch interface exposed to clients: load once at startup, then
//! funnel every mutation through [`Session::dispatch`], which runs the
//! reducer and persists the whole collection.
//!
//! Persistence is deliberately non-transactional. A failed write never
//! reverts the in-memory state; it surfaces as a warning-level message and
//! the session keeps going. The window between an in-memory mutation and
//! its durable write is accepted data-loss exposure on process crash.

use crate::action::Action;
use crate::collection::Collection;
use crate::model::Snippet;
use crate::reducer;
use crate::store::DataStore;
use crate::view::{self, ViewFilter};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A live vault session: the in-memory collection plus its backing store.
pub struct Session<S: DataStore> {
    store: S,
    collection: Collection,
}

impl<S: DataStore> Session<S> {
    /// Loads the stored collection, falling back to the seed set when the
    /// store is empty or unreadable. Startup warnings (e.g. unparsable
    /// data) are returned for the client to render.
    pub fn open(store: S) -> (Self, Vec<CmdMessage>) {
        let mut messages = Vec::new();
        let collection = match store.load() {
            Ok(Some(collection)) => collection,
            Ok(None) => Collection::seed(),
            Err(e) => {
                messages.push(CmdMessage::warning(format!(
                    "Stored collection is unreadable ({}); starting from the seed set",
                    e
                )));
                Collection::seed()
            }
        };
        (Self { store, collection }, messages)
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Computes the derived view for the current collection.
    pub fn view(&self, filter: &ViewFilter) -> Vec<Snippet> {
        view::apply(&self.collection, filter)
    }

    /// Runs the reducer, then persists the full collection. A write
    /// failure becomes a warning; the in-memory state stands.
    pub fn dispatch(&mut self, action: Action) -> Vec<CmdMessage> {
        reducer::reduce(&mut self.collection, action);

        match self.store.save(&self.collection) {
            Ok(()) => Vec::new(),
            Err(e) => vec![CmdMessage::warning(format!(
                "Could not persist collection: {}",
                e
            ))],
        }
    }
}
