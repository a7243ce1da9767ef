//! Structural edits: adding, re-parenting, copying and deleting nodes.
//! Every operation either completes or returns an error with the tree
//! untouched; checks run before the first mutation.

use std::collections::{HashMap, HashSet};

use crate::error::{BurrowError, Result};
use crate::model::{Node, Tree, ROOT_ID};

impl Tree {
    /// Append a new active node under `parent_id` and return its id.
    pub fn add_child(&mut self, parent_id: &str, title: &str) -> Result<String> {
        if !self.contains(parent_id) {
            return Err(BurrowError::NodeNotFound(parent_id.to_string()));
        }
        let id = self.generate_id();
        self.nodes
            .insert(id.clone(), Node::new(&id, title, Some(parent_id)));
        self.get_mut(parent_id)?.children.push(id.clone());
        self.touch();
        Ok(id)
    }

    /// Insert a new active node immediately after `sibling_id` in the
    /// shared parent's child order and return its id.
    pub fn add_sibling(&mut self, sibling_id: &str, title: &str) -> Result<String> {
        let parent_id = self.get(sibling_id)?.parent.clone().ok_or_else(|| {
            BurrowError::InvalidOperation("the root node has no siblings".to_string())
        })?;
        let id = self.generate_id();
        self.nodes
            .insert(id.clone(), Node::new(&id, title, Some(&parent_id)));
        let children = &mut self.get_mut(&parent_id)?.children;
        let pos = children
            .iter()
            .position(|c| c == sibling_id)
            .map(|i| i + 1)
            .unwrap_or(children.len());
        children.insert(pos, id.clone());
        self.touch();
        Ok(id)
    }

    pub fn set_title(&mut self, id: &str, title: &str) -> Result<()> {
        self.get_mut(id)?.title = title.to_string();
        self.touch();
        Ok(())
    }

    pub fn set_body(&mut self, id: &str, body: &str) -> Result<()> {
        self.get_mut(id)?.body = body.to_string();
        self.touch();
        Ok(())
    }

    /// Append to the body, separated from existing content by a blank line.
    pub fn append_body(&mut self, id: &str, text: &str) -> Result<()> {
        let node = self.get_mut(id)?;
        if node.body.is_empty() {
            node.body = text.to_string();
        } else {
            node.body = format!("{}\n\n{}", node.body, text);
        }
        self.touch();
        Ok(())
    }

    /// Re-parent `id` under `new_parent_id`, appended to its children.
    /// Moving to the current parent is allowed and moves the node to the
    /// last position.
    pub fn move_node(&mut self, id: &str, new_parent_id: &str) -> Result<()> {
        if id == ROOT_ID {
            return Err(BurrowError::InvalidOperation(
                "cannot move the root node".to_string(),
            ));
        }
        self.get(id)?;
        if !self.contains(new_parent_id) {
            return Err(BurrowError::NodeNotFound(new_parent_id.to_string()));
        }
        if id == new_parent_id {
            return Err(BurrowError::InvalidOperation(
                "cannot move a node under itself".to_string(),
            ));
        }
        if self.is_ancestor(id, new_parent_id) {
            return Err(BurrowError::InvalidOperation(format!(
                "'{}' is inside the subtree of '{}'",
                new_parent_id, id
            )));
        }
        let old_parent = self.get(id)?.parent.clone();
        if let Some(ref p) = old_parent {
            if let Some(parent) = self.nodes.get_mut(p) {
                parent.children.retain(|c| c != id);
            }
        }
        self.get_mut(new_parent_id)?.children.push(id.to_string());
        self.get_mut(id)?.parent = Some(new_parent_id.to_string());
        self.touch();
        Ok(())
    }

    /// Deep-copy the subtree rooted at `id` under `target_parent_id` with
    /// fresh ids. Links between copied nodes are remapped onto the copies;
    /// links leaving the copied set are dropped. Returns the copy's root id.
    pub fn copy_subtree(&mut self, id: &str, target_parent_id: &str) -> Result<String> {
        // Snapshot before mutating, so a target inside the copied subtree
        // cannot feed the copies back into the walk.
        let source_ids = self.subtree_ids(id)?;
        if !self.contains(target_parent_id) {
            return Err(BurrowError::NodeNotFound(target_parent_id.to_string()));
        }
        let mut mapping: HashMap<String, String> = HashMap::with_capacity(source_ids.len());
        for old in &source_ids {
            let fresh = self.generate_id();
            mapping.insert(old.clone(), fresh);
        }
        for old in &source_ids {
            let source = self.get(old)?.clone();
            let parent = if old == id {
                target_parent_id.to_string()
            } else {
                match source.parent.as_deref().and_then(|p| mapping.get(p)) {
                    Some(p) => p.clone(),
                    None => target_parent_id.to_string(),
                }
            };
            let new_id = mapping[old.as_str()].clone();
            let copy = Node {
                id: new_id.clone(),
                parent: Some(parent),
                title: source.title.clone(),
                status: source.status,
                children: source
                    .children
                    .iter()
                    .filter_map(|c| mapping.get(c.as_str()).cloned())
                    .collect(),
                body: source.body.clone(),
                links: source
                    .links
                    .iter()
                    .filter_map(|l| mapping.get(l.as_str()).cloned())
                    .collect(),
            };
            self.nodes.insert(new_id, copy);
        }
        let new_root = mapping[id].clone();
        self.get_mut(target_parent_id)?.children.push(new_root.clone());
        self.touch();
        Ok(new_root)
    }

    /// Remove `id` and all its descendants. Purges links into the removed
    /// set from survivors, filters history, and retargets the cursor to the
    /// removed root's parent when the cursor was inside. Returns the removed
    /// ids in depth-first order.
    pub fn delete_subtree(&mut self, id: &str) -> Result<Vec<String>> {
        if id == ROOT_ID {
            return Err(BurrowError::InvalidOperation(
                "cannot delete the root node".to_string(),
            ));
        }
        let removed = self.subtree_ids(id)?;
        let removed_set: HashSet<&str> = removed.iter().map(|s| s.as_str()).collect();
        let parent_id = self.get(id)?.parent.clone();
        if let Some(ref p) = parent_id {
            if let Some(parent) = self.nodes.get_mut(p) {
                parent.children.retain(|c| c != id);
            }
        }
        for rid in &removed {
            self.nodes.remove(rid);
        }
        for node in self.nodes.values_mut() {
            node.links.retain(|l| !removed_set.contains(l.as_str()));
        }
        if removed_set.contains(self.current.as_str()) {
            self.current = parent_id.unwrap_or_else(|| ROOT_ID.to_string());
        }
        self.history.retain(|h| !removed_set.contains(h.as_str()));
        self.touch();
        Ok(removed)
    }

    /// Ids of the subtree rooted at `id`, depth-first.
    pub fn subtree_ids(&self, id: &str) -> Result<Vec<String>> {
        self.get(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id.to_string()];
        while let Some(nid) = stack.pop() {
            if let Some(node) = self.nodes.get(&nid) {
                for child in node.children.iter().rev() {
                    stack.push(child.clone());
                }
            }
            out.push(nid);
        }
        Ok(out)
    }

    fn is_ancestor(&self, ancestor_id: &str, node_id: &str) -> bool {
        let mut cursor = self.nodes.get(node_id).and_then(|n| n.parent.as_deref());
        while let Some(id) = cursor {
            if id == ancestor_id {
                return true;
            }
            cursor = self.nodes.get(id).and_then(|n| n.parent.as_deref());
        }
        false
    }
}
