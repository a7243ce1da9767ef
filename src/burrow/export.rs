//! Markdown rendering of a whole tree, used by `burrow export --md`.
//! One line per node in depth-first order, bodies indented beneath their
//! node, link targets listed after the body.

use crate::model::Tree;

pub fn to_markdown(tree: &Tree) -> String {
    let mut lines: Vec<String> = vec![format!("# {}", tree.name), String::new()];
    for (node, depth) in tree.walk() {
        let indent = "  ".repeat(depth);
        let prefix = if depth > 0 { "- " } else { "" };
        lines.push(format!(
            "{}{}**[{}]** {} {}",
            indent,
            prefix,
            node.id,
            node.status.icon(),
            node.title
        ));
        if !node.body.is_empty() {
            for line in node.body.lines() {
                lines.push(format!("{}  {}", indent, line));
            }
        }
        if !node.links.is_empty() {
            let targets: Vec<String> = node.links.iter().map(|l| format!("[{}]", l)).collect();
            lines.push(format!("{}  → Links: {}", indent, targets.join(", ")));
        }
    }
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeStatus, Tree, ROOT_ID};

    #[test]
    fn test_markdown_layout() {
        let mut tree = Tree::new("demo");
        let a = tree.add_child(ROOT_ID, "question").unwrap();
        let b = tree.add_child(ROOT_ID, "tangent").unwrap();
        tree.set_body(&a, "line one\nline two").unwrap();
        tree.set_status(&a, NodeStatus::Done).unwrap();
        tree.add_link(&b, &a).unwrap();

        let md = to_markdown(&tree);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "# demo");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "**[root]** ► Root");
        assert_eq!(lines[3], "  - **[n1]** ✓ question");
        assert_eq!(lines[4], "    line one");
        assert_eq!(lines[5], "    line two");
        assert_eq!(lines[6], "  - **[n2]** ► tangent");
        assert_eq!(lines[7], "    → Links: [n1]");
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn test_markdown_nests_by_depth() {
        let mut tree = Tree::new("demo");
        let a = tree.add_child(ROOT_ID, "outer").unwrap();
        tree.add_child(&a, "inner").unwrap();
        let md = to_markdown(&tree);
        assert!(md.contains("\n  - **[n1]** ► outer\n"));
        assert!(md.contains("\n    - **[n2]** ► inner\n"));
    }
}
