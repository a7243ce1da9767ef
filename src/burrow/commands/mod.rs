//! # Command Layer
//!
//! One function per user-visible operation. Commands own the
//! load-mutate-save cycle against a [`TreeStore`] and report through
//! [`CmdResult`]: structured payloads for the presentation layer plus a
//! stream of leveled [`CmdMessage`]s. Nothing in here prints; the CLI
//! renders messages with color, the interactive UI routes them into its
//! status line.
//!
//! A command that fails before its save leaves the stored tree exactly as
//! it was; saves are atomic in the file store, so a failed save does too.

use crate::error::{BurrowError, Result};
use crate::model::{Node, NodeStatus, Tree};
use crate::store::TreeStore;

use chrono::{DateTime, Utc};

pub mod links;
pub mod nav;
pub mod node;
pub mod search;
pub mod status;
pub mod transfer;
pub mod trees;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One row in a node listing (search hits, link lists, the path, history).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLine {
    pub id: String,
    pub status: NodeStatus,
    pub title: String,
}

impl NodeLine {
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            status: node.status,
            title: node.title.clone(),
        }
    }
}

/// One row in the tree listing.
#[derive(Debug, Clone)]
pub struct TreeLine {
    pub name: String,
    pub updated: DateTime<Utc>,
    pub nodes: usize,
    pub is_current: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_nodes: Vec<NodeLine>,
    pub listed_trees: Vec<TreeLine>,
    /// Full tree snapshot for view-style commands (`show`, `stat`, `log`).
    pub snapshot: Option<Tree>,
    /// Raw text payload (`cat`, `export`).
    pub text: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_nodes(mut self, nodes: Vec<NodeLine>) -> Self {
        self.listed_nodes = nodes;
        self
    }

    pub fn with_listed_trees(mut self, trees: Vec<TreeLine>) -> Self {
        self.listed_trees = trees;
        self
    }

    pub fn with_snapshot(mut self, tree: Tree) -> Self {
        self.snapshot = Some(tree);
        self
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = Some(text);
        self
    }
}

/// Resolve the current tree name without writing: the stored pointer when
/// it names an existing tree, else the alphabetically first tree.
pub fn resolve_current<S: TreeStore>(store: &S) -> Result<String> {
    if let Some(name) = store.current_name()? {
        if store.tree_exists(&name) {
            return Ok(name);
        }
    }
    match store.list_trees()?.into_iter().next() {
        Some(first) => Ok(first),
        None => Err(BurrowError::InvalidOperation(
            "no tree is open (run 'burrow new <name>' first)".to_string(),
        )),
    }
}

/// Like [`resolve_current`], but persists the healed pointer when it had
/// gone stale.
pub fn require_current<S: TreeStore>(store: &mut S) -> Result<String> {
    let name = resolve_current(store)?;
    if store.current_name()?.as_deref() != Some(name.as_str()) {
        store.set_current_name(&name)?;
    }
    Ok(name)
}

/// Load the current tree.
pub fn load_current<S: TreeStore>(store: &S) -> Result<Tree> {
    let name = resolve_current(store)?;
    store.load_tree(&name)
}

/// Note emitted when a command moves the cursor as a side effect.
pub(crate) fn moved_note(tree: &Tree) -> CmdMessage {
    let node = tree.current_node();
    CmdMessage::info(format!("Now at [{}] {}", node.id, node.title))
}

/// Tree names double as file names, so keep them path-safe.
pub(crate) fn validate_tree_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BurrowError::InvalidOperation(
            "tree name cannot be empty".to_string(),
        ));
    }
    if name.starts_with('.') || name.contains('/') || name.contains('\\') {
        return Err(BurrowError::InvalidOperation(format!(
            "invalid tree name '{}' (no path separators or leading dots)",
            name
        )));
    }
    Ok(())
}
