//! Mutations on individual nodes of the current tree: creating, renaming,
//! appending notes, applying an editor draft, moving, copying and deleting
//! subtrees.

use crate::commands::{load_current, moved_note, require_current, CmdMessage, CmdResult};
use crate::editor::NodeDraft;
use crate::error::{BurrowError, Result};
use crate::store::TreeStore;

/// Create a new node next to `at` (the cursor when `None`): a child by
/// default, a sibling with `as_sibling`. The new id lands in `text` so
/// callers can chain a `go` onto it.
pub fn add<S: TreeStore>(
    store: &mut S,
    at: Option<&str>,
    title: &str,
    as_sibling: bool,
) -> Result<CmdResult> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BurrowError::InvalidOperation(
            "node title cannot be empty".to_string(),
        ));
    }
    require_current(store)?;
    let mut tree = load_current(store)?;
    let anchor = match at {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    let new_id = if as_sibling {
        tree.add_sibling(&anchor, title)?
    } else {
        tree.add_child(&anchor, title)?
    };
    store.save_tree(&tree)?;
    Ok(CmdResult::default()
        .with_text(new_id.clone())
        .with_message(CmdMessage::success(format!("Added [{}] {}", new_id, title))))
}

/// Retitle `id` (the cursor node when `None`).
pub fn set_title<S: TreeStore>(store: &mut S, id: Option<&str>, title: &str) -> Result<CmdResult> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BurrowError::InvalidOperation(
            "node title cannot be empty".to_string(),
        ));
    }
    require_current(store)?;
    let mut tree = load_current(store)?;
    let id = match id {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    tree.set_title(&id, title)?;
    store.save_tree(&tree)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Updated title of [{}]",
        id
    ))))
}

/// Append a paragraph to a node's body. Targets the cursor when `id` is
/// `None`. Whitespace-only input is a no-op.
pub fn append<S: TreeStore>(store: &mut S, id: Option<&str>, text: &str) -> Result<CmdResult> {
    if text.trim().is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Nothing to append")));
    }
    require_current(store)?;
    let mut tree = load_current(store)?;
    let id = match id {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    tree.append_body(&id, text)?;
    store.save_tree(&tree)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("Appended to [{}]", id))))
}

/// Apply an edited draft back onto a node. Link targets that no longer
/// exist (or point at the node itself) are skipped with a warning rather
/// than failing the whole edit.
pub fn edit_apply<S: TreeStore>(
    store: &mut S,
    id: Option<&str>,
    draft: NodeDraft,
) -> Result<CmdResult> {
    require_current(store)?;
    let mut tree = load_current(store)?;
    let id = match id {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    tree.get(&id)?;

    let mut result = CmdResult::default();

    let title = draft.title.trim();
    if title.is_empty() {
        result.add_message(CmdMessage::warning("Title cannot be empty, keeping previous"));
    } else {
        tree.set_title(&id, title)?;
    }
    tree.set_status(&id, draft.status)?;
    tree.set_body(&id, &draft.body)?;

    let old_links = tree.get(&id)?.links.clone();
    for target in &old_links {
        tree.remove_link(&id, target)?;
    }
    for target in &draft.links {
        if target == &id {
            result.add_message(CmdMessage::warning("Ignoring link from node to itself"));
        } else if !tree.contains(target) {
            result.add_message(CmdMessage::warning(format!(
                "Ignoring link to unknown node: {}",
                target
            )));
        } else {
            tree.add_link(&id, target)?;
        }
    }

    store.save_tree(&tree)?;
    result.add_message(CmdMessage::success(format!("Updated [{}]", id)));
    Ok(result)
}

/// Reparent `id` (and its whole subtree) under `new_parent`.
pub fn mv<S: TreeStore>(store: &mut S, id: &str, new_parent: &str) -> Result<CmdResult> {
    require_current(store)?;
    let mut tree = load_current(store)?;
    tree.move_node(id, new_parent)?;
    store.save_tree(&tree)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Moved [{}] under [{}]",
        id, new_parent
    ))))
}

/// Duplicate the subtree rooted at `id` under `target`. The new root id
/// lands in `text`.
pub fn copy_node<S: TreeStore>(store: &mut S, id: &str, target: &str) -> Result<CmdResult> {
    require_current(store)?;
    let mut tree = load_current(store)?;
    let new_id = tree.copy_subtree(id, target)?;
    store.save_tree(&tree)?;
    Ok(CmdResult::default()
        .with_text(new_id.clone())
        .with_message(CmdMessage::success(format!(
            "Copied [{}] to [{}] under [{}]",
            id, new_id, target
        ))))
}

/// Delete the subtree rooted at `id` (the cursor node when `None`). When
/// the cursor was inside the deleted subtree it lands on the deleted
/// node's parent.
pub fn remove<S: TreeStore>(store: &mut S, id: Option<&str>) -> Result<CmdResult> {
    require_current(store)?;
    let mut tree = load_current(store)?;
    let id = match id {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    let before = tree.current.clone();
    let removed = tree.delete_subtree(&id)?;
    store.save_tree(&tree)?;

    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Deleted [{}] and {} descendant(s)",
        id,
        removed.len() - 1
    )));
    if tree.current != before {
        result.add_message(moved_note(&tree));
    }
    Ok(result)
}
