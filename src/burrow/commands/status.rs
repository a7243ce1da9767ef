//! Status transitions. `finish` and `abandon` close the cursor node and
//! climb back to its parent, which is what makes depth-first digging feel
//! cheap. `set` is the plain form for retagging any node in place.

use crate::commands::{load_current, moved_note, require_current, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NodeStatus;
use crate::store::TreeStore;

/// Mark the cursor node done, optionally recording a summary, then move
/// up to its parent.
pub fn finish<S: TreeStore>(store: &mut S, summary: Option<&str>) -> Result<CmdResult> {
    close(store, summary, true)
}

/// Mark the cursor node dropped, optionally recording why, then move up
/// to its parent.
pub fn abandon<S: TreeStore>(store: &mut S, reason: Option<&str>) -> Result<CmdResult> {
    close(store, reason, false)
}

/// Set the status of `id` (the cursor node when `None`) without moving
/// the cursor.
pub fn set<S: TreeStore>(
    store: &mut S,
    id: Option<&str>,
    status: NodeStatus,
) -> Result<CmdResult> {
    require_current(store)?;
    let mut tree = load_current(store)?;
    let id = match id {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    tree.set_status(&id, status)?;
    store.save_tree(&tree)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Marked [{}] as {}",
        id, status
    ))))
}

fn close<S: TreeStore>(store: &mut S, note: Option<&str>, done: bool) -> Result<CmdResult> {
    require_current(store)?;
    let mut tree = load_current(store)?;
    let closed = tree.current.clone();
    if done {
        tree.finish(note)?;
    } else {
        tree.abandon(note)?;
    }
    store.save_tree(&tree)?;

    let word = if done { "done" } else { "dropped" };
    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Marked [{}] as {}",
        closed, word
    )));
    if tree.current != closed {
        result.add_message(moved_note(&tree));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ROOT_ID;
    use crate::store::memory::fixtures::{store_with_branching_tree, store_with_tree};
    use crate::store::TreeStore;

    #[test]
    fn test_finish_climbs_to_parent() {
        let (mut store, a, a1, ..) = store_with_branching_tree("demo");
        let mut tree = store.load_tree("demo").unwrap();
        tree.go_to(&a1).unwrap();
        store.save_tree(&tree).unwrap();

        let result = finish(&mut store, Some("answered in the appendix")).unwrap();
        assert_eq!(result.messages.len(), 2);
        assert!(result.messages[0].content.contains("done"));

        let tree = store.load_tree("demo").unwrap();
        assert_eq!(tree.current, a);
        let node = tree.get(&a1).unwrap();
        assert_eq!(node.status, NodeStatus::Done);
        assert!(node.body.contains("**Summary:** answered in the appendix"));
    }

    #[test]
    fn test_abandon_at_root_stays_put() {
        let mut store = store_with_tree("demo");
        let result = abandon(&mut store, None).unwrap();
        assert_eq!(result.messages.len(), 1, "no landing note when nothing moved");

        let tree = store.load_tree("demo").unwrap();
        assert_eq!(tree.current, ROOT_ID);
        assert_eq!(tree.get(ROOT_ID).unwrap().status, NodeStatus::Dropped);
    }

    #[test]
    fn test_set_retags_in_place() {
        let (mut store, a, ..) = store_with_branching_tree("demo");
        set(&mut store, Some(&a), NodeStatus::Todo).unwrap();

        let tree = store.load_tree("demo").unwrap();
        assert_eq!(tree.get(&a).unwrap().status, NodeStatus::Todo);
        assert_eq!(tree.current, ROOT_ID, "cursor does not move");
    }

    #[test]
    fn test_set_defaults_to_cursor() {
        let (mut store, a, ..) = store_with_branching_tree("demo");
        let mut tree = store.load_tree("demo").unwrap();
        tree.go_to(&a).unwrap();
        store.save_tree(&tree).unwrap();

        set(&mut store, None, NodeStatus::Done).unwrap();
        let tree = store.load_tree("demo").unwrap();
        assert_eq!(tree.get(&a).unwrap().status, NodeStatus::Done);
        assert_eq!(tree.current, a);
    }
}
