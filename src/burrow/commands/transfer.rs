//! Moving whole trees across the store boundary: JSON or markdown export,
//! and JSON import with structural validation.

use crate::commands::{load_current, CmdMessage, CmdResult};
use crate::error::{BurrowError, Result};
use crate::export::to_markdown;
use crate::model::Tree;
use crate::store::TreeStore;

/// Serialize the current tree. JSON output is the storage format itself,
/// so an export can be re-imported verbatim; markdown is for reading.
pub fn export<S: TreeStore>(store: &S, markdown: bool) -> Result<CmdResult> {
    let tree = load_current(store)?;
    let text = if markdown {
        to_markdown(&tree)
    } else {
        let mut json = serde_json::to_string_pretty(&tree)?;
        json.push('\n');
        json
    };
    Ok(CmdResult::default().with_text(text))
}

/// Parse a JSON export and install it as a tree, refusing to overwrite an
/// existing tree of the same name unless `force` is set. The imported
/// tree becomes current.
pub fn import<S: TreeStore>(store: &mut S, content: &str, force: bool) -> Result<CmdResult> {
    let mut tree: Tree = serde_json::from_str(content)?;
    tree.normalize()?;
    tree.validate()?;

    if store.tree_exists(&tree.name) && !force {
        return Err(BurrowError::TreeExists(tree.name));
    }
    store.save_tree(&tree)?;
    store.set_current_name(&tree.name)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Imported tree '{}' ({} nodes)",
        tree.name,
        tree.nodes.len()
    ))))
}
