use std::collections::BTreeMap;

use super::TreeStore;
use crate::error::{BurrowError, Result};
use crate::model::Tree;

/// In-memory store for tests. Same contract as [`super::fs::FileStore`],
/// minus the disk.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    trees: BTreeMap<String, Tree>,
    current: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TreeStore for InMemoryStore {
    fn save_tree(&mut self, tree: &Tree) -> Result<()> {
        self.trees.insert(tree.name.clone(), tree.clone());
        Ok(())
    }

    fn load_tree(&self, name: &str) -> Result<Tree> {
        let mut tree = self
            .trees
            .get(name)
            .cloned()
            .ok_or_else(|| BurrowError::TreeNotFound(name.to_string()))?;
        tree.normalize()?;
        Ok(tree)
    }

    fn list_trees(&self) -> Result<Vec<String>> {
        Ok(self.trees.keys().cloned().collect())
    }

    fn delete_tree(&mut self, name: &str) -> Result<()> {
        self.trees
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| BurrowError::TreeNotFound(name.to_string()))
    }

    fn tree_exists(&self, name: &str) -> bool {
        self.trees.contains_key(name)
    }

    fn current_name(&self) -> Result<Option<String>> {
        Ok(self.current.clone())
    }

    fn set_current_name(&mut self, name: &str) -> Result<()> {
        self.current = Some(name.to_string());
        Ok(())
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    //! Canned stores and trees for tests.

    use super::*;
    use crate::model::ROOT_ID;

    /// A store holding one freshly created tree, selected as current.
    pub fn store_with_tree(name: &str) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.save_tree(&Tree::new(name)).unwrap();
        store.set_current_name(name).unwrap();
        store
    }

    /// A small branching tree: root -> (a -> a1, a2), b, with b linked to
    /// a1. Returns the tree and the ids (a, a1, a2, b).
    pub fn branching_tree(name: &str) -> (Tree, String, String, String, String) {
        let mut tree = Tree::new(name);
        let a = tree.add_child(ROOT_ID, "first question").unwrap();
        let a1 = tree.add_child(&a, "sub-question").unwrap();
        let a2 = tree.add_child(&a, "another angle").unwrap();
        let b = tree.add_child(ROOT_ID, "side quest").unwrap();
        tree.add_link(&b, &a1).unwrap();
        (tree, a, a1, a2, b)
    }

    /// A store holding a branching tree, selected as current.
    pub fn store_with_branching_tree(name: &str) -> (InMemoryStore, String, String, String, String) {
        let (tree, a, a1, a2, b) = branching_tree(name);
        let mut store = InMemoryStore::new();
        store.save_tree(&tree).unwrap();
        store.set_current_name(name).unwrap();
        (store, a, a1, a2, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ROOT_ID;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = InMemoryStore::new();
        let mut tree = Tree::new("demo");
        tree.add_child(ROOT_ID, "a").unwrap();
        store.save_tree(&tree).unwrap();
        let loaded = store.load_tree("demo").unwrap();
        assert_eq!(loaded.nodes.len(), 2);
        assert!(store.tree_exists("demo"));
        assert!(!store.tree_exists("other"));
    }

    #[test]
    fn test_memory_store_lists_sorted() {
        let mut store = InMemoryStore::new();
        store.save_tree(&Tree::new("zeta")).unwrap();
        store.save_tree(&Tree::new("alpha")).unwrap();
        assert_eq!(store.list_trees().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_memory_store_delete() {
        let mut store = InMemoryStore::new();
        store.save_tree(&Tree::new("demo")).unwrap();
        store.delete_tree("demo").unwrap();
        assert!(matches!(
            store.delete_tree("demo"),
            Err(BurrowError::TreeNotFound(_))
        ));
    }
}
