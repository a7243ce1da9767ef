//! Cross-links between nodes. Links are directed and live outside the
//! parent/child structure, so related questions in distant branches can
//! reference each other.

use crate::commands::{load_current, require_current, CmdMessage, CmdResult, NodeLine};
use crate::error::Result;
use crate::store::TreeStore;

/// Link `from` (the cursor node when `None`) to `to`. Adding a link that
/// already exists is reported, not an error.
pub fn link<S: TreeStore>(store: &mut S, to: &str, from: Option<&str>) -> Result<CmdResult> {
    require_current(store)?;
    let mut tree = load_current(store)?;
    let from = match from {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    let added = tree.add_link(&from, to)?;
    if !added {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "[{}] already links to [{}]",
            from, to
        ))));
    }
    store.save_tree(&tree)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Linked [{}] to [{}]",
        from, to
    ))))
}

/// Remove the link from `from` (the cursor node when `None`) to `to`.
pub fn unlink<S: TreeStore>(store: &mut S, to: &str, from: Option<&str>) -> Result<CmdResult> {
    require_current(store)?;
    let mut tree = load_current(store)?;
    let from = match from {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    let removed = tree.remove_link(&from, to)?;
    if !removed {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "[{}] has no link to [{}]",
            from, to
        ))));
    }
    store.save_tree(&tree)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Removed link [{}] to [{}]",
        from, to
    ))))
}

/// List the outgoing links of `id` (the cursor node when `None`), in the
/// order they were added.
pub fn links<S: TreeStore>(store: &S, id: Option<&str>) -> Result<CmdResult> {
    let tree = load_current(store)?;
    let id = match id {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    let lines: Vec<NodeLine> = tree
        .links_of(&id)?
        .into_iter()
        .map(NodeLine::from_node)
        .collect();
    if lines.is_empty() {
        return Ok(CmdResult::default()
            .with_message(CmdMessage::info(format!("[{}] has no links", id))));
    }
    Ok(CmdResult::default().with_listed_nodes(lines))
}

/// List the nodes that link to `id` (the cursor node when `None`).
pub fn backlinks<S: TreeStore>(store: &S, id: Option<&str>) -> Result<CmdResult> {
    let tree = load_current(store)?;
    let id = match id {
        Some(id) => id.to_string(),
        None => tree.current.clone(),
    };
    let lines: Vec<NodeLine> = tree
        .backlinks_of(&id)?
        .into_iter()
        .map(NodeLine::from_node)
        .collect();
    if lines.is_empty() {
        return Ok(CmdResult::default()
            .with_message(CmdMessage::info(format!("Nothing links to [{}]", id))));
    }
    Ok(CmdResult::default().with_listed_nodes(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::store_with_branching_tree;
    use crate::store::TreeStore;

    #[test]
    fn test_link_defaults_to_cursor_and_is_idempotent() {
        let (mut store, a, _a1, a2, _b) = store_with_branching_tree("demo");
        let mut tree = store.load_tree("demo").unwrap();
        tree.go_to(&a).unwrap();
        store.save_tree(&tree).unwrap();

        let first = link(&mut store, &a2, None).unwrap();
        assert_eq!(first.messages[0].level, MessageLevel::Success);

        let second = link(&mut store, &a2, None).unwrap();
        assert_eq!(second.messages[0].level, MessageLevel::Info);

        let tree = store.load_tree("demo").unwrap();
        assert_eq!(tree.get(&a).unwrap().links, vec![a2]);
    }

    #[test]
    fn test_link_rejects_unknown_target() {
        let (mut store, ..) = store_with_branching_tree("demo");
        assert!(link(&mut store, "n99", None).is_err());
    }

    #[test]
    fn test_unlink_reports_missing_link() {
        let (mut store, a, a1, _a2, b) = store_with_branching_tree("demo");
        let missing = unlink(&mut store, &a1, Some(&a)).unwrap();
        assert_eq!(missing.messages[0].level, MessageLevel::Info);

        let removed = unlink(&mut store, &a1, Some(&b)).unwrap();
        assert_eq!(removed.messages[0].level, MessageLevel::Success);
        let tree = store.load_tree("demo").unwrap();
        assert!(tree.get(&b).unwrap().links.is_empty());
    }

    #[test]
    fn test_links_and_backlinks_listings() {
        let (store, _a, a1, _a2, b) = store_with_branching_tree("demo");

        let out = links(&store, Some(&b)).unwrap();
        let ids: Vec<&str> = out.listed_nodes.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec![a1.as_str()]);

        let back = backlinks(&store, Some(&a1)).unwrap();
        let ids: Vec<&str> = back.listed_nodes.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec![b.as_str()]);

        let none = backlinks(&store, Some(&b)).unwrap();
        assert_eq!(none.messages[0].level, MessageLevel::Info);
    }
}
