//! Status transitions, including the "close out and climb" behavior:
//! finishing or abandoning the cursor node records an optional note in its
//! body and then climbs to the parent, so the flow of marking work done
//! naturally walks back up the tree.

use crate::error::Result;
use crate::model::{NodeStatus, Tree};

impl Tree {
    /// Set a node's status. Every transition is legal, including setting
    /// the status a node already has.
    pub fn set_status(&mut self, id: &str, status: NodeStatus) -> Result<()> {
        self.get_mut(id)?.status = status;
        self.touch();
        Ok(())
    }

    /// Mark the cursor node done, optionally appending a summary to its
    /// body, then move up to its parent (a no-op at root).
    pub fn finish(&mut self, summary: Option<&str>) -> Result<()> {
        self.close_current(NodeStatus::Done, "Summary", summary)
    }

    /// Mark the cursor node dropped, optionally appending the reason, then
    /// move up to its parent (a no-op at root).
    pub fn abandon(&mut self, reason: Option<&str>) -> Result<()> {
        self.close_current(NodeStatus::Dropped, "Dropped", reason)
    }

    fn close_current(&mut self, status: NodeStatus, marker: &str, note: Option<&str>) -> Result<()> {
        let id = self.current.clone();
        if let Some(text) = note {
            if !text.trim().is_empty() {
                self.append_body(&id, &format!("---\n**{}:** {}", marker, text))?;
            }
        }
        self.set_status(&id, status)?;
        // The climb is an ordinary navigation: it pushes history and is
        // skipped only when the cursor is already at root.
        self.up();
        Ok(())
    }
}
