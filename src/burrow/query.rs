//! Read-only queries over one tree: substring search and the find-*
//! filters. Results always come back in ascending id order (the arena's
//! iteration order), which is what search-next in the interactive UI
//! cycles through.

use std::collections::HashSet;

use crate::model::{Node, NodeStatus, Tree};

impl Tree {
    /// Case-insensitive substring search over titles and bodies.
    pub fn search(&self, query: &str) -> Vec<&Node> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.nodes
            .values()
            .filter(|n| {
                n.title.to_lowercase().contains(&needle)
                    || n.body.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn find_by_status(&self, status: NodeStatus) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.status == status).collect()
    }

    /// Nodes without children.
    pub fn find_leaves(&self) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.is_leaf()).collect()
    }

    /// Leaves that neither link out nor are linked to: loose ends worth a
    /// second look before closing a line of research.
    pub fn find_orphans(&self) -> Vec<&Node> {
        let linked: HashSet<&str> = self
            .nodes
            .values()
            .flat_map(|n| n.links.iter().map(|l| l.as_str()))
            .collect();
        self.nodes
            .values()
            .filter(|n| n.is_leaf() && n.links.is_empty() && !linked.contains(n.id.as_str()))
            .collect()
    }
}
