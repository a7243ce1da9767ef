//! Read-only views over the current tree: the outline, the path from
//! root, a node's body, and aggregate statistics. These return data; the
//! presentation layer decides how it looks.

use crate::commands::{load_current, CmdResult, NodeLine};
use crate::error::Result;
use crate::store::TreeStore;

/// Snapshot of the whole current tree (the outline renderer walks it).
pub fn show<S: TreeStore>(store: &S) -> Result<CmdResult> {
    let tree = load_current(store)?;
    Ok(CmdResult::default().with_snapshot(tree))
}

/// Root-to-cursor path, root first.
pub fn path<S: TreeStore>(store: &S) -> Result<CmdResult> {
    let tree = load_current(store)?;
    let lines: Vec<NodeLine> = tree
        .path_to_root(&tree.current)?
        .into_iter()
        .map(NodeLine::from_node)
        .collect();
    Ok(CmdResult::default().with_listed_nodes(lines))
}

/// The body of `id`, or of the cursor node when `id` is `None`.
pub fn cat<S: TreeStore>(store: &S, id: Option<&str>) -> Result<CmdResult> {
    let tree = load_current(store)?;
    let node = match id {
        Some(id) => tree.get(id)?,
        None => tree.current_node(),
    };
    Ok(CmdResult::default()
        .with_listed_nodes(vec![NodeLine::from_node(node)])
        .with_text(node.body.clone()))
}

/// Snapshot for the statistics view.
pub fn stat<S: TreeStore>(store: &S) -> Result<CmdResult> {
    let tree = load_current(store)?;
    Ok(CmdResult::default().with_snapshot(tree))
}
