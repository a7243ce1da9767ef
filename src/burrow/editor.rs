//! External-editor round-trip for a node. The node is written to a temp
//! `.md` file as a YAML frontmatter block (`title`, `status`, `links`)
//! followed by the body, the editor runs to completion, and the file is
//! parsed back. Parsing is forgiving: a buffer without a frontmatter block
//! is treated as body-only, and an unparsable block keeps the previous
//! metadata rather than discarding the user's edit.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::config::BurrowConfig;
use crate::error::{BurrowError, Result};
use crate::model::{Node, NodeStatus};

/// Editable snapshot of a node, as round-tripped through the editor.
/// `links` are returned as written; the caller validates them against the
/// tree before applying.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDraft {
    pub title: String,
    pub status: NodeStatus,
    pub links: Vec<String>,
    pub body: String,
}

#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    status: NodeStatus,
    links: &'a [String],
}

/// Lenient read-side counterpart: every key optional, status as text.
#[derive(Debug, Deserialize)]
struct RawFrontMatter {
    title: Option<String>,
    status: Option<String>,
    links: Option<RawLinks>,
}

/// `links` as users actually type it: a YAML list or one comma-separated
/// scalar.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLinks {
    List(Vec<String>),
    Csv(String),
}

impl RawLinks {
    fn into_ids(self) -> Vec<String> {
        match self {
            RawLinks::List(ids) => ids,
            RawLinks::Csv(text) => text
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl NodeDraft {
    pub fn from_node(node: &Node) -> Self {
        Self {
            title: node.title.clone(),
            status: node.status,
            links: node.links.clone(),
            body: node.body.clone(),
        }
    }

    /// Render the editor buffer: frontmatter, a blank line, then the body.
    pub fn to_buffer(&self) -> Result<String> {
        let front = serde_yaml::to_string(&FrontMatter {
            title: &self.title,
            status: self.status,
            links: &self.links,
        })?;
        Ok(format!("---\n{}---\n\n{}", front, self.body))
    }

    /// Parse an edited buffer. `fallback` supplies any metadata the buffer
    /// lost (deleted keys, broken YAML, or no frontmatter at all).
    pub fn from_buffer(buffer: &str, fallback: &Node) -> Self {
        let body_only = |text: &str| Self {
            title: fallback.title.clone(),
            status: fallback.status,
            links: fallback.links.clone(),
            body: text.trim_start_matches('\n').trim_end().to_string(),
        };
        let Some((front, body)) = split_frontmatter(buffer) else {
            return body_only(buffer);
        };
        let raw = if front.trim().is_empty() {
            RawFrontMatter {
                title: None,
                status: None,
                links: None,
            }
        } else {
            match serde_yaml::from_str::<RawFrontMatter>(front) {
                Ok(raw) => raw,
                Err(_) => return body_only(buffer),
            }
        };
        let status = raw
            .status
            .and_then(|s| s.parse::<NodeStatus>().ok())
            .unwrap_or(fallback.status);
        Self {
            title: raw.title.unwrap_or_else(|| fallback.title.clone()),
            status,
            links: raw
                .links
                .map(RawLinks::into_ids)
                .unwrap_or_else(|| fallback.links.clone()),
            body: body.trim_start_matches('\n').trim_end().to_string(),
        }
    }
}

fn split_frontmatter(buffer: &str) -> Option<(&str, &str)> {
    let rest = buffer.strip_prefix("---\n")?;
    match rest.split_once("\n---\n") {
        Some((front, body)) => Some((front, body)),
        None => rest.strip_suffix("\n---").map(|front| (front, "")),
    }
}

/// Resolve the editor command: `$EDITOR`, then `$VISUAL`, then the config
/// entry, then `vi`.
pub fn get_editor(config: &BurrowConfig) -> String {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                return value;
            }
        }
    }
    if let Some(editor) = &config.editor {
        if !editor.is_empty() {
            return editor.clone();
        }
    }
    "vi".to_string()
}

/// Run the editor on `path` and wait for it to exit.
pub fn open_in_editor(path: &Path, config: &BurrowConfig) -> Result<()> {
    let editor = get_editor(config);
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| BurrowError::External("empty editor command".to_string()))?;
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| BurrowError::External(format!("failed to launch '{}': {}", editor, e)))?;
    if !status.success() {
        return Err(BurrowError::External(format!(
            "editor '{}' exited with {}",
            editor, status
        )));
    }
    Ok(())
}

/// Full round-trip: write the node to a temp file, edit, parse back.
pub fn edit_node(node: &Node, config: &BurrowConfig) -> Result<NodeDraft> {
    let draft = NodeDraft::from_node(node);
    let path = std::env::temp_dir().join(format!("burrow-{}-{}.md", std::process::id(), node.id));
    fs::write(&path, draft.to_buffer()?)?;
    let result = open_in_editor(&path, config);
    let buffer = fs::read_to_string(&path);
    let _ = fs::remove_file(&path);
    result?;
    Ok(NodeDraft::from_buffer(&buffer?, node))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Node {
        let mut n = Node::new("n1", "deep question", Some("root"));
        n.body = "old notes".to_string();
        n.links = vec!["n2".to_string()];
        n
    }

    #[test]
    fn test_buffer_layout() {
        let draft = NodeDraft::from_node(&node());
        let buffer = draft.to_buffer().unwrap();
        assert!(buffer.starts_with("---\ntitle: deep question\nstatus: active\n"));
        assert!(buffer.contains("links:\n- n2\n---\n\nold notes"));
    }

    #[test]
    fn test_roundtrip_preserves_everything() {
        let source = node();
        let draft = NodeDraft::from_node(&source);
        let parsed = NodeDraft::from_buffer(&draft.to_buffer().unwrap(), &source);
        assert_eq!(parsed, draft);
    }

    #[test]
    fn test_edited_fields_come_back() {
        let source = node();
        let buffer = "---\ntitle: sharper question\nstatus: todo\nlinks: [n3, n4]\n---\n\nnew body\n";
        let parsed = NodeDraft::from_buffer(buffer, &source);
        assert_eq!(parsed.title, "sharper question");
        assert_eq!(parsed.status, NodeStatus::Todo);
        assert_eq!(parsed.links, vec!["n3", "n4"]);
        assert_eq!(parsed.body, "new body");
    }

    #[test]
    fn test_buffer_without_frontmatter_is_body_only() {
        let source = node();
        let parsed = NodeDraft::from_buffer("just prose\nmore prose", &source);
        assert_eq!(parsed.title, "deep question");
        assert_eq!(parsed.links, vec!["n2"]);
        assert_eq!(parsed.body, "just prose\nmore prose");
    }

    #[test]
    fn test_broken_yaml_keeps_old_metadata_and_all_text() {
        let source = node();
        let parsed = NodeDraft::from_buffer("---\ntitle: [unclosed\n---\n\nbody", &source);
        assert_eq!(parsed.title, "deep question");
        assert_eq!(parsed.status, NodeStatus::Active);
        // nothing the user typed is discarded
        assert!(parsed.body.starts_with("---\ntitle: [unclosed"));
        assert!(parsed.body.ends_with("body"));
    }

    #[test]
    fn test_emptied_frontmatter_block_falls_back() {
        let source = node();
        let parsed = NodeDraft::from_buffer("---\n\n---\n\nonly body", &source);
        assert_eq!(parsed.title, "deep question");
        assert_eq!(parsed.links, vec!["n2"]);
        assert_eq!(parsed.body, "only body");
    }

    #[test]
    fn test_links_as_comma_separated_scalar() {
        let source = node();
        let parsed = NodeDraft::from_buffer("---\nlinks: n3, n4\n---\n\nbody", &source);
        assert_eq!(parsed.links, vec!["n3", "n4"]);
    }

    #[test]
    fn test_deleted_keys_fall_back() {
        let source = node();
        let parsed = NodeDraft::from_buffer("---\nstatus: done\n---\n\nbody", &source);
        assert_eq!(parsed.title, "deep question");
        assert_eq!(parsed.status, NodeStatus::Done);
        assert_eq!(parsed.links, vec!["n2"]);
    }

    #[test]
    fn test_unknown_status_falls_back() {
        let source = node();
        let parsed = NodeDraft::from_buffer("---\nstatus: paused\n---\n\nbody", &source);
        assert_eq!(parsed.status, NodeStatus::Active);
    }

    #[test]
    fn test_frontmatter_at_end_of_file() {
        let source = node();
        let parsed = NodeDraft::from_buffer("---\ntitle: bare\nstatus: active\n---", &source);
        assert_eq!(parsed.title, "bare");
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_title_with_colon_survives_roundtrip() {
        let mut source = node();
        source.title = "rust: the borrow checker".to_string();
        let draft = NodeDraft::from_node(&source);
        let parsed = NodeDraft::from_buffer(&draft.to_buffer().unwrap(), &source);
        assert_eq!(parsed.title, "rust: the borrow checker");
    }
}
