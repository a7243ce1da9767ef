//! Queries over the current tree: text search and the find-* filters.

use crate::commands::{load_current, CmdMessage, CmdResult, NodeLine};
use crate::error::Result;
use crate::model::{Node, NodeStatus};
use crate::store::TreeStore;

/// Case-insensitive substring search over titles and bodies.
pub fn grep<S: TreeStore>(store: &S, query: &str) -> Result<CmdResult> {
    let tree = load_current(store)?;
    let hits = tree.search(query);
    if hits.is_empty() {
        return Ok(CmdResult::default()
            .with_message(CmdMessage::info(format!("No matches for '{}'", query))));
    }
    Ok(listing(hits))
}

/// All nodes carrying the given status.
pub fn by_status<S: TreeStore>(store: &S, status: NodeStatus) -> Result<CmdResult> {
    let tree = load_current(store)?;
    let hits = tree.find_by_status(status);
    if hits.is_empty() {
        return Ok(
            CmdResult::default().with_message(CmdMessage::info(format!("No {} nodes", status)))
        );
    }
    Ok(listing(hits))
}

/// Nodes without children, the frontier of the dig.
pub fn leaves<S: TreeStore>(store: &S) -> Result<CmdResult> {
    let tree = load_current(store)?;
    Ok(listing(tree.find_leaves()))
}

/// Leaves with no links in either direction.
pub fn orphans<S: TreeStore>(store: &S) -> Result<CmdResult> {
    let tree = load_current(store)?;
    let hits = tree.find_orphans();
    if hits.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No orphan leaves")));
    }
    Ok(listing(hits))
}

fn listing(nodes: Vec<&Node>) -> CmdResult {
    let count = nodes.len();
    CmdResult::default()
        .with_listed_nodes(nodes.into_iter().map(NodeLine::from_node).collect())
        .with_message(CmdMessage::info(format!("{} node(s)", count)))
}
