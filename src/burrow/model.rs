//! # Data Model
//!
//! A `Tree` is an arena of `Node`s keyed by id, plus a cursor (`current`),
//! a bounded trail of previously visited ids (`history`), and a monotonic
//! id counter (`nextId`). The root node has the fixed id `"root"`; every
//! other node gets `"n<k>"` from the counter at creation time. Ids are
//! never reused.
//!
//! ## Persisted format
//!
//! Trees serialize to JSON with exactly the field names below (note the
//! `nextId` casing). The root node carries no `parent` key. Optional node
//! fields deserialize to defaults so hand-edited files still load; the
//! stores run [`Tree::normalize`] after deserializing to repair a stale
//! cursor or history left behind by hand edits.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BurrowError, Result};

/// Fixed id of every tree's root node.
pub const ROOT_ID: &str = "root";

/// Maximum number of entries kept in the navigation history.
pub const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Active,
    Done,
    Dropped,
    Todo,
}

impl NodeStatus {
    /// One-character marker used by every renderer.
    pub fn icon(&self) -> &'static str {
        match self {
            NodeStatus::Active => "►",
            NodeStatus::Done => "✓",
            NodeStatus::Dropped => "✗",
            NodeStatus::Todo => "?",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Active => "active",
            NodeStatus::Done => "done",
            NodeStatus::Dropped => "dropped",
            NodeStatus::Todo => "todo",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeStatus {
    type Err = BurrowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(NodeStatus::Active),
            "done" => Ok(NodeStatus::Done),
            "dropped" => Ok(NodeStatus::Dropped),
            "todo" => Ok(NodeStatus::Todo),
            other => Err(BurrowError::InvalidOperation(format!(
                "unknown status '{}' (expected active, done, dropped or todo)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub title: String,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub links: Vec<String>,
}

impl Node {
    pub(crate) fn new(id: &str, title: &str, parent: Option<&str>) -> Node {
        Node {
            id: id.to_string(),
            parent: parent.map(|p| p.to_string()),
            title: title.to_string(),
            status: NodeStatus::Active,
            children: Vec::new(),
            body: String::new(),
            links: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Aggregate counts over one tree, as shown by `burrow stat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total: usize,
    pub active: usize,
    pub done: usize,
    pub dropped: usize,
    pub todo: usize,
    pub leaves: usize,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub name: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default = "default_current")]
    pub current: String,
    #[serde(rename = "nextId", default = "default_next_id")]
    pub next_id: u64,
    #[serde(default)]
    pub history: Vec<String>,
    pub nodes: BTreeMap<String, Node>,
}

fn default_current() -> String {
    ROOT_ID.to_string()
}

fn default_next_id() -> u64 {
    1
}

impl Tree {
    pub fn new(name: &str) -> Tree {
        let now = Utc::now();
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT_ID.to_string(), Node::new(ROOT_ID, "Root", None));
        Tree {
            name: name.to_string(),
            created: now,
            updated: now,
            current: ROOT_ID.to_string(),
            next_id: 1,
            history: Vec::new(),
            nodes,
        }
    }

    pub fn get(&self, id: &str) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| BurrowError::NodeNotFound(id.to_string()))
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| BurrowError::NodeNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// The cursor node. The cursor id is kept live by every mutating
    /// operation and by [`Tree::normalize`], so a miss falls back to root.
    pub fn current_node(&self) -> &Node {
        self.nodes
            .get(&self.current)
            .or_else(|| self.nodes.get(ROOT_ID))
            .expect("tree always has a root node")
    }

    pub(crate) fn generate_id(&mut self) -> String {
        let id = format!("n{}", self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn touch(&mut self) {
        self.updated = Utc::now();
    }

    /// Nodes from root down to `id`, inclusive.
    pub fn path_to_root(&self, id: &str) -> Result<Vec<&Node>> {
        let mut path = Vec::new();
        let mut cursor = self.get(id)?;
        loop {
            path.push(cursor);
            match &cursor.parent {
                Some(parent) => cursor = self.get(parent)?,
                None => break,
            }
        }
        path.reverse();
        Ok(path)
    }

    /// Depth-first walk in child order, yielding each node with its depth.
    pub fn walk(&self) -> Vec<(&Node, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(&str, usize)> = vec![(ROOT_ID, 0)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else { continue };
            out.push((node, depth));
            for child in node.children.iter().rev() {
                stack.push((child.as_str(), depth + 1));
            }
        }
        out
    }

    pub fn statistics(&self) -> TreeStats {
        let mut stats = TreeStats {
            total: 0,
            active: 0,
            done: 0,
            dropped: 0,
            todo: 0,
            leaves: 0,
            max_depth: 0,
        };
        for (node, depth) in self.walk() {
            stats.total += 1;
            match node.status {
                NodeStatus::Active => stats.active += 1,
                NodeStatus::Done => stats.done += 1,
                NodeStatus::Dropped => stats.dropped += 1,
                NodeStatus::Todo => stats.todo += 1,
            }
            if node.is_leaf() {
                stats.leaves += 1;
            }
            if depth > stats.max_depth {
                stats.max_depth = depth;
            }
        }
        stats
    }

    /// Repair state that only hand edits can break: a cursor or history
    /// entry naming a missing node. Fails only when the root itself is gone.
    pub(crate) fn normalize(&mut self) -> Result<()> {
        if !self.nodes.contains_key(ROOT_ID) {
            return Err(BurrowError::InvalidOperation(format!(
                "tree '{}' has no root node",
                self.name
            )));
        }
        if !self.nodes.contains_key(&self.current) {
            self.current = ROOT_ID.to_string();
        }
        let nodes = &self.nodes;
        self.history.retain(|id| nodes.contains_key(id));
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
        Ok(())
    }

    /// Full structural check: single root, consistent parent/child edges,
    /// no hierarchy cycles, live link endpoints, live cursor and history.
    pub fn validate(&self) -> Result<()> {
        let root = self.get(ROOT_ID)?;
        if root.parent.is_some() {
            return Err(invalid("root node has a parent"));
        }
        for (id, node) in &self.nodes {
            if *id != node.id {
                return Err(invalid(&format!("node '{}' is keyed as '{}'", node.id, id)));
            }
            match &node.parent {
                None if !node.is_root() => {
                    return Err(invalid(&format!("node '{}' has no parent", id)));
                }
                Some(parent) => {
                    let parent_node = self
                        .nodes
                        .get(parent)
                        .ok_or_else(|| invalid(&format!("node '{}' has missing parent '{}'", id, parent)))?;
                    if !parent_node.children.contains(id) {
                        return Err(invalid(&format!(
                            "node '{}' is not listed among the children of '{}'",
                            id, parent
                        )));
                    }
                }
                None => {}
            }
            for child in &node.children {
                let child_node = self
                    .nodes
                    .get(child)
                    .ok_or_else(|| invalid(&format!("node '{}' has missing child '{}'", id, child)))?;
                if child_node.parent.as_deref() != Some(id.as_str()) {
                    return Err(invalid(&format!(
                        "child '{}' does not point back to '{}'",
                        child, id
                    )));
                }
            }
            for link in &node.links {
                if link == id {
                    return Err(invalid(&format!("node '{}' links to itself", id)));
                }
                if !self.nodes.contains_key(link) {
                    return Err(invalid(&format!("node '{}' links to missing '{}'", id, link)));
                }
            }
        }
        // Reachability doubles as the cycle check: with consistent edges, a
        // cycle would leave its members unreachable from root.
        if self.walk().len() != self.nodes.len() {
            return Err(invalid("hierarchy contains unreachable nodes or a cycle"));
        }
        if !self.nodes.contains_key(&self.current) {
            return Err(invalid(&format!("current node '{}' does not exist", self.current)));
        }
        for id in &self.history {
            if !self.nodes.contains_key(id) {
                return Err(invalid(&format!("history entry '{}' does not exist", id)));
            }
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> BurrowError {
    BurrowError::InvalidOperation(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_active_root() {
        let tree = Tree::new("demo");
        let root = tree.get(ROOT_ID).unwrap();
        assert_eq!(root.title, "Root");
        assert_eq!(root.status, NodeStatus::Active);
        assert!(root.parent.is_none());
        assert_eq!(tree.current, ROOT_ID);
        assert!(tree.history.is_empty());
        assert_eq!(tree.next_id, 1);
    }

    #[test]
    fn test_generate_id_is_monotonic() {
        let mut tree = Tree::new("demo");
        assert_eq!(tree.generate_id(), "n1");
        assert_eq!(tree.generate_id(), "n2");
        assert_eq!(tree.next_id, 3);
    }

    #[test]
    fn test_serialized_shape_matches_contract() {
        let tree = Tree::new("demo");
        let value = serde_json::to_value(&tree).unwrap();
        assert!(value.get("nextId").is_some());
        assert!(value.get("next_id").is_none());
        let root = &value["nodes"]["root"];
        assert!(root.get("parent").is_none(), "root must not serialize a parent key");
        assert_eq!(root["status"], "active");
        assert_eq!(root["children"], serde_json::json!([]));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let raw = r#"{
            "name": "demo",
            "created": "2026-01-01T00:00:00Z",
            "updated": "2026-01-02T00:00:00Z",
            "nodes": {
                "root": { "id": "root", "title": "Root" }
            }
        }"#;
        let tree: Tree = serde_json::from_str(raw).unwrap();
        assert_eq!(tree.current, ROOT_ID);
        assert_eq!(tree.next_id, 1);
        assert!(tree.history.is_empty());
        let root = tree.get(ROOT_ID).unwrap();
        assert_eq!(root.status, NodeStatus::Active);
        assert!(root.body.is_empty());
        assert!(root.links.is_empty());
    }

    #[test]
    fn test_walk_preserves_child_order() {
        let mut tree = Tree::new("demo");
        let a = tree.add_child(ROOT_ID, "a").unwrap();
        let b = tree.add_child(ROOT_ID, "b").unwrap();
        let a1 = tree.add_child(&a, "a1").unwrap();
        let order: Vec<&str> = tree.walk().iter().map(|(n, _)| n.id.as_str()).collect();
        assert_eq!(order, vec![ROOT_ID, a.as_str(), a1.as_str(), b.as_str()]);
        let depths: Vec<usize> = tree.walk().iter().map(|(_, d)| *d).collect();
        assert_eq!(depths, vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_statistics_counts_statuses_and_depth() {
        let mut tree = Tree::new("demo");
        let a = tree.add_child(ROOT_ID, "a").unwrap();
        let b = tree.add_child(ROOT_ID, "b").unwrap();
        tree.add_child(&a, "a1").unwrap();
        tree.set_status(&b, NodeStatus::Done).unwrap();
        let stats = tree.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 3);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.leaves, 2);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_normalize_repairs_stale_cursor_and_history() {
        let mut tree = Tree::new("demo");
        tree.current = "n99".to_string();
        tree.history = vec![ROOT_ID.to_string(), "n42".to_string()];
        tree.normalize().unwrap();
        assert_eq!(tree.current, ROOT_ID);
        assert_eq!(tree.history, vec![ROOT_ID.to_string()]);
    }

    #[test]
    fn test_normalize_rejects_missing_root() {
        let mut tree = Tree::new("demo");
        tree.nodes.clear();
        assert!(tree.normalize().is_err());
    }

    #[test]
    fn test_validate_accepts_fresh_tree() {
        let mut tree = Tree::new("demo");
        let a = tree.add_child(ROOT_ID, "a").unwrap();
        tree.add_child(&a, "a1").unwrap();
        tree.validate().unwrap();
    }

    #[test]
    fn test_validate_catches_dangling_child() {
        let mut tree = Tree::new("demo");
        tree.get_mut(ROOT_ID).unwrap().children.push("n9".to_string());
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_validate_catches_dangling_link() {
        let mut tree = Tree::new("demo");
        let a = tree.add_child(ROOT_ID, "a").unwrap();
        tree.get_mut(&a).unwrap().links.push("n9".to_string());
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_validate_catches_detached_subgraph() {
        let mut tree = Tree::new("demo");
        // A node claiming root as parent without root listing it back.
        tree.nodes.insert(
            "n1".to_string(),
            Node::new("n1", "floating", Some(ROOT_ID)),
        );
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("done".parse::<NodeStatus>().unwrap(), NodeStatus::Done);
        assert!("finished".parse::<NodeStatus>().is_err());
    }
}
