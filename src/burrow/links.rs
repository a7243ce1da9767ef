//! Cross-links: directed edges between arbitrary nodes, independent of the
//! hierarchy (cycles are fine here). Outbound links are stored on the node;
//! backlinks are always computed by scanning the arena, never stored, so
//! they cannot drift out of sync.

use crate::error::{BurrowError, Result};
use crate::model::{Node, Tree};

impl Tree {
    /// Add a directed link. Returns `false` when the link already existed;
    /// adding it again is not an error.
    pub fn add_link(&mut self, from: &str, to: &str) -> Result<bool> {
        self.get(to)?;
        if from == to {
            return Err(BurrowError::InvalidOperation(
                "a node cannot link to itself".to_string(),
            ));
        }
        let node = self.get_mut(from)?;
        if node.links.iter().any(|l| l == to) {
            return Ok(false);
        }
        node.links.push(to.to_string());
        self.touch();
        Ok(true)
    }

    /// Remove a directed link. Returns `false` when there was nothing to
    /// remove; that is not an error.
    pub fn remove_link(&mut self, from: &str, to: &str) -> Result<bool> {
        let node = self.get_mut(from)?;
        let before = node.links.len();
        node.links.retain(|l| l != to);
        let removed = node.links.len() != before;
        if removed {
            self.touch();
        }
        Ok(removed)
    }

    /// Outbound link targets in stored (insertion) order.
    pub fn links_of(&self, id: &str) -> Result<Vec<&Node>> {
        Ok(self
            .get(id)?
            .links
            .iter()
            .filter_map(|l| self.nodes.get(l))
            .collect())
    }

    /// Nodes that link *to* `id`, in ascending id order (the arena's sorted
    /// iteration).
    pub fn backlinks_of(&self, id: &str) -> Result<Vec<&Node>> {
        self.get(id)?;
        Ok(self
            .nodes
            .values()
            .filter(|n| n.links.iter().any(|l| l == id))
            .collect())
    }
}
