//! # The Reducer
//!
//! The single point of mutation for the collection: a total transition
//! function from `(collection, action)` to the next collection. It performs
//! no I/O and never fails. Operating on an id that does not exist is a
//! silent no-op, which is the documented contract for a UI-local store with
//! no concurrent writers and no channel to report partial failure.
//!
//! Invariants maintained here:
//! - snippet ids stay unique within the collection;
//! - `updated_at >= created_at` for every snippet;
//! - version logs are append-only and hold the code as it was *before*
//!   each edit;
//! - no tag list ever contains case-insensitive duplicates;
//! - the active selection always refers to a snippet that exists (or is
//!   `None`).

use chrono::Utc;

use crate::action::{Action, SnippetPatch, TagDelta};
use crate::collection::Collection;
use crate::model::{apply_tag_delta, normalize_tags, Snippet, Version, Visibility};
use uuid::Uuid;

/// Applies one action to the collection.
pub fn reduce(state: &mut Collection, action: Action) {
    match action {
        Action::Add(snippet) => add(state, snippet),
        Action::Update { id, patch } => update(state, id, patch),
        Action::Delete { id } => delete(state, id),
        Action::Archive { id } => set_archived(state, id, true),
        Action::Restore { id } => set_archived(state, id, false),
        Action::AddCollaborator { id, user } => edit_collaborators(state, id, user, true),
        Action::RemoveCollaborator { id, user } => edit_collaborators(state, id, user, false),
        Action::BulkTag { ids, delta } => bulk_tag(state, &ids, &delta),
        Action::MarkUsed { id } => mark_used(state, id),
    }
}

fn add(state: &mut Collection, snippet: Snippet) {
    // The caller is responsible for generating a fresh id; if it collides
    // anyway, the unique-id invariant wins and the action is skipped.
    if state.contains(&snippet.id) {
        return;
    }
    state.active = Some(snippet.id);
    state.snippets.push(snippet);
}

fn update(state: &mut Collection, id: Uuid, patch: SnippetPatch) {
    let snippet = match state.get_mut(&id) {
        Some(s) => s,
        None => return,
    };

    if let Some(code) = patch.code {
        // A changed code field appends a version holding the prior code
        // before the edit lands. Unchanged code records nothing.
        if code != snippet.code {
            let message = patch.message.unwrap_or_else(|| "edit".to_string());
            let author = patch.author.unwrap_or_else(|| snippet.owner.clone());
            snippet
                .versions
                .push(Version::new(snippet.code.clone(), message, author));
            snippet.code = code;
        }
    }

    if let Some(name) = patch.name {
        snippet.name = name;
    }
    if let Some(language) = patch.language {
        snippet.language = language;
    }
    if let Some(tags) = patch.tags {
        snippet.tags = normalize_tags(&tags);
    }
    if let Some(visibility) = patch.visibility {
        snippet.visibility = visibility;
    }

    snippet.updated_at = Utc::now();
}

fn delete(state: &mut Collection, id: Uuid) {
    let position = match state.position(&id) {
        Some(p) => p,
        None => return,
    };
    // The version log is owned by the snippet and goes with it.
    state.snippets.remove(position);

    if state.active == Some(id) {
        state.active = state.snippets.first().map(|s| s.id);
    }
}

fn set_archived(state: &mut Collection, id: Uuid, archived: bool) {
    let snippet = match state.get_mut(&id) {
        Some(s) => s,
        None => return,
    };
    snippet.is_archived = archived;
    snippet.archived_at = if archived { Some(Utc::now()) } else { None };
}

fn edit_collaborators(state: &mut Collection, id: Uuid, user: String, add: bool) {
    let snippet = match state.get_mut(&id) {
        Some(s) => s,
        None => return,
    };
    // Collaborators only make sense on team snippets.
    if snippet.visibility != Visibility::Team {
        return;
    }

    if add {
        if !snippet.collaborators.contains(&user) {
            snippet.collaborators.push(user);
            snippet.updated_at = Utc::now();
        }
    } else if let Some(pos) = snippet.collaborators.iter().position(|u| u == &user) {
        snippet.collaborators.remove(pos);
        snippet.updated_at = Utc::now();
    }
}

fn bulk_tag(state: &mut Collection, ids: &[Uuid], delta: &TagDelta) {
    for id in ids {
        // Ids that no longer exist are silently skipped; there is no
        // partial-failure channel back to the caller.
        let snippet = match state.get_mut(id) {
            Some(s) => s,
            None => continue,
        };
        snippet.tags = apply_tag_delta(&snippet.tags, &delta.add, &delta.remove);
        snippet.updated_at = Utc::now();
    }
}

fn mark_used(state: &mut Collection, id: Uuid) {
    if let Some(snippet) = state.get_mut(&id) {
        snippet.use_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Language;

    fn snippet(name: &str, code: &str) -> Snippet {
        Snippet::new(name.into(), code.into(), Language::Python, "me".into())
    }

    #[test]
    fn add_appends_and_selects() {
        let mut state = Collection::new();
        let s = snippet("foo", "x=1");
        let id = s.id;

        reduce(&mut state, Action::Add(s));

        assert_eq!(state.len(), 1);
        assert_eq!(state.active, Some(id));
    }

    #[test]
    fn add_with_colliding_id_is_skipped() {
        let mut state = Collection::new();
        let first = snippet("foo", "x=1");
        let mut second = snippet("bar", "y=2");
        second.id = first.id;

        reduce(&mut state, Action::Add(first));
        reduce(&mut state, Action::Add(second));

        assert_eq!(state.len(), 1);
        assert_eq!(state.snippets[0].name, "foo");
    }

    #[test]
    fn update_code_appends_version_with_prior_code() {
        let mut state = Collection::new();
        let s = snippet("foo", "x=1");
        let id = s.id;
        reduce(&mut state, Action::Add(s));

        reduce(
            &mut state,
            Action::Update {
                id,
                patch: SnippetPatch::new().with_code("x=2").with_message("bump"),
            },
        );

        let s = state.get(&id).unwrap();
        assert_eq!(s.code, "x=2");
        assert_eq!(s.versions.len(), 1);
        assert_eq!(s.versions[0].code, "x=1");
        assert_eq!(s.versions[0].message, "bump");
        assert_eq!(s.versions[0].author, "me");
    }

    #[test]
    fn version_log_is_append_only_and_ordered() {
        let mut state = Collection::new();
        let s = snippet("foo", "v0");
        let id = s.id;
        reduce(&mut state, Action::Add(s));

        for i in 1..=4 {
            reduce(
                &mut state,
                Action::Update {
                    id,
                    patch: SnippetPatch::new().with_code(format!("v{}", i)),
                },
            );
        }

        let s = state.get(&id).unwrap();
        assert_eq!(s.versions.len(), 4);
        let codes: Vec<&str> = s.versions.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, vec!["v0", "v1", "v2", "v3"]);
    }

    #[test]
    fn update_with_unchanged_code_records_no_version() {
        let mut state = Collection::new();
        let s = snippet("foo", "x=1");
        let id = s.id;
        reduce(&mut state, Action::Add(s));

        reduce(
            &mut state,
            Action::Update {
                id,
                patch: SnippetPatch::new().with_code("x=1").with_name("renamed"),
            },
        );

        let s = state.get(&id).unwrap();
        assert!(s.versions.is_empty());
        assert_eq!(s.name, "renamed");
        assert!(s.updated_at >= s.created_at);
    }

    #[test]
    fn update_refreshes_updated_at() {
        let mut state = Collection::new();
        let s = snippet("foo", "x=1");
        let id = s.id;
        reduce(&mut state, Action::Add(s));
        let before = state.get(&id).unwrap().updated_at;

        std::thread::sleep(std::time::Duration::from_millis(5));
        reduce(
            &mut state,
            Action::Update {
                id,
                patch: SnippetPatch::new().with_code("x=2"),
            },
        );

        assert!(state.get(&id).unwrap().updated_at > before);
    }

    #[test]
    fn missing_id_actions_leave_state_identical() {
        let mut state = Collection::new();
        reduce(&mut state, Action::Add(snippet("foo", "x=1")));
        let ghost = Uuid::new_v4();
        let before = state.clone();

        reduce(
            &mut state,
            Action::Update {
                id: ghost,
                patch: SnippetPatch::new().with_code("y"),
            },
        );
        reduce(&mut state, Action::Delete { id: ghost });
        reduce(&mut state, Action::Archive { id: ghost });
        reduce(&mut state, Action::Restore { id: ghost });
        reduce(&mut state, Action::MarkUsed { id: ghost });
        reduce(
            &mut state,
            Action::AddCollaborator {
                id: ghost,
                user: "ana".into(),
            },
        );

        assert_eq!(state, before);
    }

    #[test]
    fn delete_moves_selection_to_first_remaining() {
        let mut state = Collection::new();
        let a = snippet("a", "1");
        let b = snippet("b", "2");
        let (id_a, id_b) = (a.id, b.id);
        reduce(&mut state, Action::Add(a));
        reduce(&mut state, Action::Add(b));
        assert_eq!(state.active, Some(id_b));

        reduce(&mut state, Action::Delete { id: id_b });

        assert_eq!(state.active, Some(id_a));
    }

    #[test]
    fn deleting_the_only_snippet_clears_selection() {
        let mut state = Collection::new();
        let s = snippet("only", "1");
        let id = s.id;
        reduce(&mut state, Action::Add(s));

        reduce(&mut state, Action::Delete { id });

        assert!(state.is_empty());
        assert_eq!(state.active, None);
    }

    #[test]
    fn delete_drops_version_log_with_snippet() {
        let mut state = Collection::new();
        let s = snippet("foo", "v0");
        let id = s.id;
        reduce(&mut state, Action::Add(s));
        reduce(
            &mut state,
            Action::Update {
                id,
                patch: SnippetPatch::new().with_code("v1"),
            },
        );

        reduce(&mut state, Action::Delete { id });
        assert!(state.is_empty());
    }

    #[test]
    fn archive_and_restore_toggle_the_flag() {
        let mut state = Collection::new();
        let s = snippet("foo", "1");
        let id = s.id;
        reduce(&mut state, Action::Add(s));

        reduce(&mut state, Action::Archive { id });
        let s = state.get(&id).unwrap();
        assert!(s.is_archived);
        assert!(s.archived_at.is_some());

        reduce(&mut state, Action::Restore { id });
        let s = state.get(&id).unwrap();
        assert!(!s.is_archived);
        assert!(s.archived_at.is_none());
    }

    #[test]
    fn collaborators_require_team_visibility() {
        let mut state = Collection::new();
        let s = snippet("foo", "1"); // private by default
        let id = s.id;
        reduce(&mut state, Action::Add(s));

        reduce(
            &mut state,
            Action::AddCollaborator {
                id,
                user: "ana".into(),
            },
        );
        assert!(state.get(&id).unwrap().collaborators.is_empty());

        reduce(
            &mut state,
            Action::Update {
                id,
                patch: SnippetPatch {
                    visibility: Some(Visibility::Team),
                    ..Default::default()
                },
            },
        );
        reduce(
            &mut state,
            Action::AddCollaborator {
                id,
                user: "ana".into(),
            },
        );
        reduce(
            &mut state,
            Action::AddCollaborator {
                id,
                user: "ana".into(),
            },
        );
        assert_eq!(state.get(&id).unwrap().collaborators, vec!["ana"]);

        reduce(
            &mut state,
            Action::RemoveCollaborator {
                id,
                user: "ana".into(),
            },
        );
        assert!(state.get(&id).unwrap().collaborators.is_empty());
    }

    #[test]
    fn bulk_tag_skips_missing_ids() {
        let mut state = Collection::new();
        let a = snippet("a", "1");
        let b = snippet("b", "2");
        let (id_a, id_b) = (a.id, b.id);
        reduce(&mut state, Action::Add(a));
        reduce(&mut state, Action::Add(b));

        reduce(
            &mut state,
            Action::BulkTag {
                ids: vec![id_a, Uuid::new_v4(), id_b],
                delta: TagDelta {
                    add: vec!["go".into(), "GO".into()],
                    remove: vec![],
                },
            },
        );

        assert_eq!(state.get(&id_a).unwrap().tags, vec!["go"]);
        assert_eq!(state.get(&id_b).unwrap().tags, vec!["go"]);
    }

    #[test]
    fn bulk_tag_never_produces_case_insensitive_duplicates() {
        let mut state = Collection::new();
        let s = snippet("a", "1").with_tags(vec!["Http".into()]);
        let id = s.id;
        reduce(&mut state, Action::Add(s));

        reduce(
            &mut state,
            Action::BulkTag {
                ids: vec![id],
                delta: TagDelta {
                    add: vec!["HTTP".into(), "cli".into()],
                    remove: vec![],
                },
            },
        );

        let tags = &state.get(&id).unwrap().tags;
        assert_eq!(tags, &vec!["Http".to_string(), "cli".to_string()]);
    }

    #[test]
    fn bulk_tag_removal_is_case_insensitive() {
        let mut state = Collection::new();
        let s = snippet("a", "1").with_tags(vec!["Http".into(), "go".into()]);
        let id = s.id;
        reduce(&mut state, Action::Add(s));

        reduce(
            &mut state,
            Action::BulkTag {
                ids: vec![id],
                delta: TagDelta {
                    add: vec![],
                    remove: vec!["http".into()],
                },
            },
        );

        assert_eq!(state.get(&id).unwrap().tags, vec!["go"]);
    }

    #[test]
    fn mark_used_bumps_the_counter_only() {
        let mut state = Collection::new();
        let s = snippet("a", "1");
        let id = s.id;
        reduce(&mut state, Action::Add(s));
        let updated_before = state.get(&id).unwrap().updated_at;

        reduce(&mut state, Action::MarkUsed { id });
        reduce(&mut state, Action::MarkUsed { id });

        let s = state.get(&id).unwrap();
        assert_eq!(s.use_count, 2);
        assert_eq!(s.updated_at, updated_before);
    }

    // One edit yields exactly one version holding the pre-edit code.
    #[test]
    fn add_then_update_scenario() {
        let mut state = Collection::new();
        let s = snippet("foo", "x=1");
        let id = s.id;

        reduce(&mut state, Action::Add(s));
        reduce(
            &mut state,
            Action::Update {
                id,
                patch: SnippetPatch::new().with_code("x=2"),
            },
        );

        assert_eq!(state.len(), 1);
        let s = state.get(&id).unwrap();
        assert_eq!(s.code, "x=2");
        assert_eq!(s.versions.len(), 1);
        assert_eq!(s.versions[0].code, "x=1");
    }
}
