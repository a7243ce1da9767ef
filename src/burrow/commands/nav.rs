//! Navigation commands. Moves that have no target (up at root, back with
//! no history, down past the last child) are reported as plain
//! information; the tree is saved only when the cursor actually moved.

use crate::commands::{load_current, require_current, CmdMessage, CmdResult, NodeLine};
use crate::error::Result;
use crate::store::TreeStore;

pub fn go<S: TreeStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    require_current(store)?;
    let mut tree = load_current(store)?;
    tree.go_to(id)?;
    store.save_tree(&tree)?;
    Ok(CmdResult::default().with_message(arrived(&tree)))
}

pub fn up<S: TreeStore>(store: &mut S) -> Result<CmdResult> {
    relative_move(store, |t| t.up(), "Already at root")
}

pub fn down<S: TreeStore>(store: &mut S, index: usize) -> Result<CmdResult> {
    relative_move(store, |t| t.down(index), "No child at that position")
}

pub fn next<S: TreeStore>(store: &mut S) -> Result<CmdResult> {
    relative_move(store, |t| t.next_sibling(), "No next sibling")
}

pub fn prev<S: TreeStore>(store: &mut S) -> Result<CmdResult> {
    relative_move(store, |t| t.prev_sibling(), "No previous sibling")
}

pub fn root<S: TreeStore>(store: &mut S) -> Result<CmdResult> {
    relative_move(store, |t| t.go_root(), "Already at root")
}

pub fn back<S: TreeStore>(store: &mut S) -> Result<CmdResult> {
    relative_move(store, |t| t.back(), "No further history")
}

/// The visited trail, oldest first, with the cursor as the final row.
pub fn log<S: TreeStore>(store: &S) -> Result<CmdResult> {
    let tree = load_current(store)?;
    let mut lines: Vec<NodeLine> = tree
        .history
        .iter()
        .filter_map(|id| tree.get(id).ok())
        .map(NodeLine::from_node)
        .collect();
    lines.push(NodeLine::from_node(tree.current_node()));
    Ok(CmdResult::default().with_listed_nodes(lines))
}

fn relative_move<S, F>(store: &mut S, op: F, noop: &str) -> Result<CmdResult>
where
    S: TreeStore,
    F: FnOnce(&mut crate::model::Tree) -> bool,
{
    require_current(store)?;
    let mut tree = load_current(store)?;
    if !op(&mut tree) {
        return Ok(CmdResult::default().with_message(CmdMessage::info(noop)));
    }
    store.save_tree(&tree)?;
    Ok(CmdResult::default().with_message(arrived(&tree)))
}

fn arrived(tree: &crate::model::Tree) -> CmdMessage {
    let node = tree.current_node();
    CmdMessage::success(format!("Now at [{}] {}", node.id, node.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::ROOT_ID;
    use crate::store::memory::fixtures::store_with_branching_tree;
    use crate::store::memory::InMemoryStore;
    use crate::store::TreeStore;

    #[test]
    fn test_go_moves_and_persists() {
        let (mut store, a, ..) = store_with_branching_tree("demo");
        go(&mut store, &a).unwrap();
        assert_eq!(store.load_tree("demo").unwrap().current, a);
    }

    #[test]
    fn test_go_to_missing_node_fails() {
        let (mut store, ..) = store_with_branching_tree("demo");
        assert!(go(&mut store, "n99").is_err());
        assert_eq!(store.load_tree("demo").unwrap().current, ROOT_ID);
    }

    #[test]
    fn test_up_at_root_is_informational() {
        let (mut store, ..) = store_with_branching_tree("demo");
        let result = up(&mut store).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(result.messages[0].content.contains("Already at root"));
    }

    #[test]
    fn test_down_next_prev_back_flow() {
        let (mut store, a, _, a2, b) = store_with_branching_tree("demo");
        down(&mut store, 0).unwrap();
        assert_eq!(store.load_tree("demo").unwrap().current, a);
        down(&mut store, 1).unwrap();
        assert_eq!(store.load_tree("demo").unwrap().current, a2);
        up(&mut store).unwrap();
        next(&mut store).unwrap();
        assert_eq!(store.load_tree("demo").unwrap().current, b);
        prev(&mut store).unwrap();
        assert_eq!(store.load_tree("demo").unwrap().current, a);
        back(&mut store).unwrap();
        // next/prev are navigations too, so back rewinds through them.
        assert_eq!(store.load_tree("demo").unwrap().current, b);
    }

    #[test]
    fn test_root_and_log() {
        let (mut store, a, a1, ..) = store_with_branching_tree("demo");
        go(&mut store, &a).unwrap();
        go(&mut store, &a1).unwrap();
        root(&mut store).unwrap();
        let result = log(&store).unwrap();
        let ids: Vec<&str> = result.listed_nodes.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec![ROOT_ID, a.as_str(), a1.as_str(), ROOT_ID]);
    }

    #[test]
    fn test_nav_with_no_trees_fails() {
        let mut store = InMemoryStore::new();
        assert!(up(&mut store).is_err());
    }
}
