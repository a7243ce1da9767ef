//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the
//! single entry point for all burrow operations, regardless of the front
//! end driving them (CLI or the interactive UI).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! The API explicitly avoids:
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, terminals or editors
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over TreeStore
//!
//! `BurrowApi<S: TreeStore>` is generic over the storage backend:
//! - Production: `BurrowApi<FileStore>`
//! - Testing: `BurrowApi<InMemoryStore>`
//!
//! This enables testing the API layer without touching the filesystem.

use crate::commands;
use crate::editor::NodeDraft;
use crate::error::Result;
use crate::model::{NodeStatus, Tree};
use crate::store::TreeStore;

/// The main API facade for burrow operations.
///
/// Generic over `TreeStore` to allow different storage backends. All
/// front ends interact through this API.
pub struct BurrowApi<S: TreeStore> {
    store: S,
}

impl<S: TreeStore> BurrowApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // -- tree registry --------------------------------------------------

    pub fn create_tree(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::trees::create(&mut self.store, name)
    }

    pub fn open_tree(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::trees::open(&mut self.store, name)
    }

    pub fn list_trees(&self) -> Result<commands::CmdResult> {
        commands::trees::list(&self.store)
    }

    pub fn rename_tree(&mut self, old: &str, new: &str) -> Result<commands::CmdResult> {
        commands::trees::rename(&mut self.store, old, new)
    }

    pub fn delete_tree(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::trees::delete(&mut self.store, name)
    }

    pub fn copy_tree(&mut self, src: &str, dst: &str) -> Result<commands::CmdResult> {
        commands::trees::copy(&mut self.store, src, dst)
    }

    // -- views ----------------------------------------------------------

    pub fn show(&self) -> Result<commands::CmdResult> {
        commands::view::show(&self.store)
    }

    pub fn path(&self) -> Result<commands::CmdResult> {
        commands::view::path(&self.store)
    }

    pub fn cat(&self, id: Option<&str>) -> Result<commands::CmdResult> {
        commands::view::cat(&self.store, id)
    }

    pub fn stat(&self) -> Result<commands::CmdResult> {
        commands::view::stat(&self.store)
    }

    pub fn log(&self) -> Result<commands::CmdResult> {
        commands::nav::log(&self.store)
    }

    // -- navigation -----------------------------------------------------

    pub fn go(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::nav::go(&mut self.store, id)
    }

    pub fn up(&mut self) -> Result<commands::CmdResult> {
        commands::nav::up(&mut self.store)
    }

    pub fn down(&mut self, index: usize) -> Result<commands::CmdResult> {
        commands::nav::down(&mut self.store, index)
    }

    pub fn next(&mut self) -> Result<commands::CmdResult> {
        commands::nav::next(&mut self.store)
    }

    pub fn prev(&mut self) -> Result<commands::CmdResult> {
        commands::nav::prev(&mut self.store)
    }

    pub fn root(&mut self) -> Result<commands::CmdResult> {
        commands::nav::root(&mut self.store)
    }

    pub fn back(&mut self) -> Result<commands::CmdResult> {
        commands::nav::back(&mut self.store)
    }

    // -- node edits -----------------------------------------------------

    pub fn add(
        &mut self,
        at: Option<&str>,
        title: &str,
        as_sibling: bool,
    ) -> Result<commands::CmdResult> {
        commands::node::add(&mut self.store, at, title, as_sibling)
    }

    pub fn set_title(&mut self, id: Option<&str>, title: &str) -> Result<commands::CmdResult> {
        commands::node::set_title(&mut self.store, id, title)
    }

    pub fn append(&mut self, id: Option<&str>, text: &str) -> Result<commands::CmdResult> {
        commands::node::append(&mut self.store, id, text)
    }

    pub fn edit_apply(&mut self, id: Option<&str>, draft: NodeDraft) -> Result<commands::CmdResult> {
        commands::node::edit_apply(&mut self.store, id, draft)
    }

    pub fn move_node(&mut self, id: &str, new_parent: &str) -> Result<commands::CmdResult> {
        commands::node::mv(&mut self.store, id, new_parent)
    }

    pub fn copy_node(&mut self, id: &str, target: &str) -> Result<commands::CmdResult> {
        commands::node::copy_node(&mut self.store, id, target)
    }

    pub fn remove_node(&mut self, id: Option<&str>) -> Result<commands::CmdResult> {
        commands::node::remove(&mut self.store, id)
    }

    // -- status ---------------------------------------------------------

    pub fn finish(&mut self, summary: Option<&str>) -> Result<commands::CmdResult> {
        commands::status::finish(&mut self.store, summary)
    }

    pub fn abandon(&mut self, reason: Option<&str>) -> Result<commands::CmdResult> {
        commands::status::abandon(&mut self.store, reason)
    }

    pub fn set_status(&mut self, id: Option<&str>, status: NodeStatus) -> Result<commands::CmdResult> {
        commands::status::set(&mut self.store, id, status)
    }

    // -- links ----------------------------------------------------------

    pub fn link(&mut self, to: &str, from: Option<&str>) -> Result<commands::CmdResult> {
        commands::links::link(&mut self.store, to, from)
    }

    pub fn unlink(&mut self, to: &str, from: Option<&str>) -> Result<commands::CmdResult> {
        commands::links::unlink(&mut self.store, to, from)
    }

    pub fn links(&self, id: Option<&str>) -> Result<commands::CmdResult> {
        commands::links::links(&self.store, id)
    }

    pub fn backlinks(&self, id: Option<&str>) -> Result<commands::CmdResult> {
        commands::links::backlinks(&self.store, id)
    }

    // -- queries --------------------------------------------------------

    pub fn grep(&self, query: &str) -> Result<commands::CmdResult> {
        commands::search::grep(&self.store, query)
    }

    pub fn find_status(&self, status: NodeStatus) -> Result<commands::CmdResult> {
        commands::search::by_status(&self.store, status)
    }

    pub fn find_leaves(&self) -> Result<commands::CmdResult> {
        commands::search::leaves(&self.store)
    }

    pub fn find_orphans(&self) -> Result<commands::CmdResult> {
        commands::search::orphans(&self.store)
    }

    // -- transfer -------------------------------------------------------

    pub fn export(&self, markdown: bool) -> Result<commands::CmdResult> {
        commands::transfer::export(&self.store, markdown)
    }

    pub fn import(&mut self, content: &str, force: bool) -> Result<commands::CmdResult> {
        commands::transfer::import(&mut self.store, content, force)
    }

    // -- direct reads for front ends ------------------------------------

    /// The current tree, for front ends that render state themselves
    /// (confirmation prompts, the interactive UI).
    pub fn current_tree(&self) -> Result<Tree> {
        commands::load_current(&self.store)
    }

    /// Name of the current tree.
    pub fn current_tree_name(&self) -> Result<String> {
        commands::resolve_current(&self.store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, NodeLine, TreeLine};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn test_facade_wires_commands_to_the_store() {
        let mut api = BurrowApi::new(InMemoryStore::new());
        api.create_tree("demo").unwrap();
        let id = api.add(None, "first question", false).unwrap().text.unwrap();
        api.go(&id).unwrap();

        let tree = api.current_tree().unwrap();
        assert_eq!(tree.current, id);
        assert_eq!(api.current_tree_name().unwrap(), "demo");
    }
}
