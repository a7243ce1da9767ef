//! Tree registry commands: the lifecycle of named trees and the
//! current-tree pointer. A current tree must always exist once any tree
//! does, so deleting the last one is refused.

use crate::commands::{CmdMessage, CmdResult, TreeLine};
use crate::error::{BurrowError, Result};
use crate::model::Tree;
use crate::store::TreeStore;

use super::validate_tree_name;

pub fn create<S: TreeStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    validate_tree_name(name)?;
    if store.tree_exists(name) {
        return Err(BurrowError::TreeExists(name.to_string()));
    }
    let tree = Tree::new(name);
    store.save_tree(&tree)?;
    store.set_current_name(name)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Created tree '{}'", name)))
        .with_message(CmdMessage::info("It is now the current tree")))
}

pub fn open<S: TreeStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    // Loading up front surfaces unreadable files before the switch.
    store.load_tree(name)?;
    store.set_current_name(name)?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Opened tree '{}'", name))))
}

pub fn list<S: TreeStore>(store: &S) -> Result<CmdResult> {
    let current = store.current_name()?;
    let mut lines = Vec::new();
    for name in store.list_trees()? {
        let tree = store.load_tree(&name)?;
        lines.push(TreeLine {
            is_current: current.as_deref() == Some(name.as_str()),
            name,
            updated: tree.updated,
            nodes: tree.nodes.len(),
        });
    }
    let mut result = CmdResult::default().with_listed_trees(lines);
    if result.listed_trees.is_empty() {
        result.add_message(CmdMessage::info(
            "No trees yet (run 'burrow new <name>' to start one)",
        ));
    }
    Ok(result)
}

pub fn rename<S: TreeStore>(store: &mut S, old: &str, new: &str) -> Result<CmdResult> {
    validate_tree_name(new)?;
    if store.tree_exists(new) {
        return Err(BurrowError::TreeExists(new.to_string()));
    }
    let mut tree = store.load_tree(old)?;
    tree.name = new.to_string();
    store.save_tree(&tree)?;
    store.delete_tree(old)?;
    if store.current_name()?.as_deref() == Some(old) {
        store.set_current_name(new)?;
    }
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Renamed tree '{}' to '{}'",
        old, new
    ))))
}

pub fn delete<S: TreeStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    if !store.tree_exists(name) {
        return Err(BurrowError::TreeNotFound(name.to_string()));
    }
    if store.list_trees()?.len() == 1 {
        return Err(BurrowError::InvalidOperation(
            "cannot delete the last remaining tree".to_string(),
        ));
    }
    store.delete_tree(name)?;
    let mut result =
        CmdResult::default().with_message(CmdMessage::success(format!("Deleted tree '{}'", name)));
    if store.current_name()?.as_deref() == Some(name) {
        if let Some(next) = store.list_trees()?.into_iter().next() {
            store.set_current_name(&next)?;
            result.add_message(CmdMessage::info(format!("Current tree is now '{}'", next)));
        }
    }
    Ok(result)
}

pub fn copy<S: TreeStore>(store: &mut S, src: &str, dst: &str) -> Result<CmdResult> {
    validate_tree_name(dst)?;
    if store.tree_exists(dst) {
        return Err(BurrowError::TreeExists(dst.to_string()));
    }
    let mut tree = store.load_tree(src)?;
    tree.name = dst.to_string();
    store.save_tree(&tree)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Copied tree '{}' to '{}'",
        src, dst
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ROOT_ID;
    use crate::store::memory::InMemoryStore;
    use crate::store::TreeStore;

    #[test]
    fn test_create_sets_current() {
        let mut store = InMemoryStore::new();
        create(&mut store, "research").unwrap();
        assert!(store.tree_exists("research"));
        assert_eq!(store.current_name().unwrap().as_deref(), Some("research"));
    }

    #[test]
    fn test_create_duplicate_fails() {
        let mut store = InMemoryStore::new();
        create(&mut store, "research").unwrap();
        assert!(matches!(
            create(&mut store, "research"),
            Err(BurrowError::TreeExists(_))
        ));
    }

    #[test]
    fn test_create_rejects_bad_names() {
        let mut store = InMemoryStore::new();
        assert!(create(&mut store, "a/b").is_err());
        assert!(create(&mut store, "").is_err());
    }

    #[test]
    fn test_open_switches_current() {
        let mut store = InMemoryStore::new();
        create(&mut store, "alpha").unwrap();
        create(&mut store, "beta").unwrap();
        open(&mut store, "alpha").unwrap();
        assert_eq!(store.current_name().unwrap().as_deref(), Some("alpha"));
    }

    #[test]
    fn test_open_missing_fails() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            open(&mut store, "nope"),
            Err(BurrowError::TreeNotFound(_))
        ));
    }

    #[test]
    fn test_list_marks_current_and_sorts() {
        let mut store = InMemoryStore::new();
        create(&mut store, "zeta").unwrap();
        create(&mut store, "alpha").unwrap();
        let result = list(&store).unwrap();
        let names: Vec<&str> = result.listed_trees.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(!result.listed_trees[0].is_current);
        assert!(result.listed_trees[1].is_current, "zeta stayed current");
    }

    #[test]
    fn test_rename_follows_current_pointer() {
        let mut store = InMemoryStore::new();
        create(&mut store, "old").unwrap();
        rename(&mut store, "old", "new").unwrap();
        assert!(!store.tree_exists("old"));
        assert!(store.tree_exists("new"));
        assert_eq!(store.current_name().unwrap().as_deref(), Some("new"));
        assert_eq!(store.load_tree("new").unwrap().name, "new");
    }

    #[test]
    fn test_rename_to_taken_name_fails() {
        let mut store = InMemoryStore::new();
        create(&mut store, "a").unwrap();
        create(&mut store, "b").unwrap();
        assert!(matches!(
            rename(&mut store, "a", "b"),
            Err(BurrowError::TreeExists(_))
        ));
    }

    #[test]
    fn test_delete_refuses_last_tree() {
        let mut store = InMemoryStore::new();
        create(&mut store, "only").unwrap();
        assert!(matches!(
            delete(&mut store, "only"),
            Err(BurrowError::InvalidOperation(_))
        ));
        assert!(store.tree_exists("only"));
    }

    #[test]
    fn test_delete_current_switches_to_first_survivor() {
        let mut store = InMemoryStore::new();
        create(&mut store, "beta").unwrap();
        create(&mut store, "alpha").unwrap();
        create(&mut store, "gamma").unwrap();
        delete(&mut store, "gamma").unwrap();
        assert_eq!(store.current_name().unwrap().as_deref(), Some("alpha"));
    }

    #[test]
    fn test_copy_preserves_ids_and_leaves_current_alone() {
        let mut store = InMemoryStore::new();
        create(&mut store, "src").unwrap();
        let mut tree = store.load_tree("src").unwrap();
        let a = tree.add_child(ROOT_ID, "a").unwrap();
        store.save_tree(&tree).unwrap();

        copy(&mut store, "src", "dst").unwrap();
        let copied = store.load_tree("dst").unwrap();
        assert_eq!(copied.name, "dst");
        assert!(copied.contains(&a), "node ids are preserved");
        assert_eq!(store.current_name().unwrap().as_deref(), Some("src"));
    }
}
