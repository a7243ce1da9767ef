//! # Navigation Engine
//!
//! The cursor (`current`) is the tree's "where I am now". Moving it with
//! [`Tree::go_to`] pushes the old position onto a bounded history;
//! [`Tree::back`] pops that history strictly, LIFO, without pushing the
//! position it leaves. Relative moves that have no target (`up` at root,
//! `down` past the last child, `next` at the end of the sibling row) return
//! `false` and change nothing; callers surface that as information, not as
//! an error.

use crate::error::Result;
use crate::model::{Tree, HISTORY_LIMIT, ROOT_ID};

impl Tree {
    /// Jump the cursor to `id`, recording the old position in history.
    /// Jumping to the cursor's own node changes nothing.
    pub fn go_to(&mut self, id: &str) -> Result<()> {
        self.get(id)?;
        if self.current == id {
            return Ok(());
        }
        let previous = std::mem::replace(&mut self.current, id.to_string());
        self.history.push(previous);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.touch();
        Ok(())
    }

    /// Move to the parent. `false` at root.
    pub fn up(&mut self) -> bool {
        match self.current_node().parent.clone() {
            Some(parent) => self.go_to(&parent).is_ok(),
            None => false,
        }
    }

    /// Move to the `n`th child (zero-based). `false` when out of range.
    pub fn down(&mut self, n: usize) -> bool {
        match self.current_node().children.get(n).cloned() {
            Some(child) => self.go_to(&child).is_ok(),
            None => false,
        }
    }

    /// Move to the following sibling. `false` at the end of the row.
    pub fn next_sibling(&mut self) -> bool {
        self.step_sibling(true)
    }

    /// Move to the preceding sibling. `false` at the start of the row.
    pub fn prev_sibling(&mut self) -> bool {
        self.step_sibling(false)
    }

    /// Jump to the root node. `false` when already there.
    pub fn go_root(&mut self) -> bool {
        if self.current == ROOT_ID {
            return false;
        }
        self.go_to(ROOT_ID).is_ok()
    }

    /// Pop the most recent history entry and make it the cursor. The
    /// position being left is not pushed back, so repeated calls rewind
    /// through older and older positions. `false` on empty history.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                self.touch();
                true
            }
            None => false,
        }
    }

    fn step_sibling(&mut self, forward: bool) -> bool {
        let Some(parent_id) = self.current_node().parent.clone() else {
            return false;
        };
        let Ok(parent) = self.get(&parent_id) else {
            return false;
        };
        let Some(pos) = parent.children.iter().position(|c| *c == self.current) else {
            return false;
        };
        let target = if forward {
            parent.children.get(pos + 1)
        } else if pos > 0 {
            parent.children.get(pos - 1)
        } else {
            None
        };
        match target.cloned() {
            Some(id) => self.go_to(&id).is_ok(),
            None => false,
        }
    }
}
