//! # Storage Layer
//!
//! The [`TreeStore`] trait abstracts where trees live so the command layer
//! and the interactive UI never touch the filesystem directly.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage under the burrow data directory
//!   - one JSON file per tree: `trees/<name>.json`
//!   - atomic saves (write `.tmp`, rename over) with a `.bak` of the
//!     previous version
//!   - a plain-text `current` file holding the current tree's name
//!
//! - [`memory::InMemoryStore`]: in-memory storage for tests; no
//!   persistence, fast and isolated.
//!
//! Stores deal in whole trees: a save writes the complete snapshot, a load
//! returns a deep copy. Trees are small (human-curated), so correctness
//! wins over cleverness here. Loaded trees are normalized before they are
//! handed out, repairing the cursor and history of hand-edited files.

use crate::error::Result;
use crate::model::Tree;

pub mod fs;
pub mod memory;

/// Abstract interface for tree storage and the current-tree pointer.
pub trait TreeStore {
    /// Save a tree (create or overwrite) under its own name.
    fn save_tree(&mut self, tree: &Tree) -> Result<()>;

    /// Load a tree by name.
    fn load_tree(&self, name: &str) -> Result<Tree>;

    /// All stored tree names, alphabetically.
    fn list_trees(&self) -> Result<Vec<String>>;

    /// Remove a tree permanently.
    fn delete_tree(&mut self, name: &str) -> Result<()>;

    fn tree_exists(&self, name: &str) -> bool;

    /// The persisted current-tree name, if any. The pointer may be stale
    /// (naming a deleted tree); callers resolve that via
    /// [`crate::commands::require_current`].
    fn current_name(&self) -> Result<Option<String>>;

    /// Persist the current-tree name.
    fn set_current_name(&mut self, name: &str) -> Result<()>;
}
