//! State machine behind the interactive UI.
//!
//! [`App`] owns a [`BurrowApi`] and a cached snapshot of the current tree.
//! Key events come in through [`App::handle_key`]; every mutation goes
//! through the command layer (which persists it) and is followed by a
//! refresh of the snapshot. The app never touches storage directly, so it
//! runs unchanged over the in-memory store in tests.
//!
//! Panel focus decides what edit keys act on: with the Nodes panel focused
//! they target the selected row, anywhere else they target the cursor.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};

use crate::api::{BurrowApi, CmdResult, TreeLine};
use crate::clipboard;
use crate::config::BurrowConfig;
use crate::editor;
use crate::error::Result;
use crate::model::{NodeStatus, Tree};
use crate::store::TreeStore;

use super::keys::{self, Action};
use super::theme::{self, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Trees,
    Nodes,
    Content,
}

impl Panel {
    fn left(self) -> Self {
        match self {
            Panel::Trees => Panel::Trees,
            Panel::Nodes => Panel::Trees,
            Panel::Content => Panel::Nodes,
        }
    }

    fn right(self) -> Self {
        match self {
            Panel::Trees => Panel::Nodes,
            Panel::Nodes => Panel::Content,
            Panel::Content => Panel::Content,
        }
    }
}

/// One row of the flattened outline in the Nodes panel.
#[derive(Debug, Clone)]
pub struct NodeRow {
    pub id: String,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    AddChild { anchor: String },
    AddSibling { anchor: String },
    EditTitle { id: String },
    AppendBody { id: String },
    GotoId,
    Search,
    LinkTo { from: String },
    UnlinkFrom { from: String },
    MoveTo { id: String },
    NewTree,
    RenameTree { old: String },
}

/// An open one-line input at the bottom of the screen.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub label: String,
    pub buffer: String,
}

pub struct App<S: TreeStore> {
    pub(crate) api: BurrowApi<S>,
    pub(crate) config: BurrowConfig,
    config_dir: PathBuf,
    pub(crate) tree: Option<Tree>,
    pub(crate) trees: Vec<TreeLine>,
    pub(crate) focus: Panel,
    pub(crate) tree_sel: usize,
    pub(crate) node_sel: usize,
    pub(crate) rows: Vec<NodeRow>,
    pub(crate) content_scroll: u16,
    link_pos: usize,
    pub(crate) prompt: Option<Prompt>,
    pub(crate) pending_delete: Option<String>,
    search_matches: Vec<String>,
    search_pos: usize,
    pub(crate) status_message: Option<String>,
    pub(crate) show_help: bool,
    pub(crate) show_stats: bool,
    pub(crate) theme: &'static Theme,
    editor_request: Option<String>,
}

impl<S: TreeStore> App<S> {
    pub fn new(api: BurrowApi<S>, config: BurrowConfig, config_dir: PathBuf) -> Result<Self> {
        let theme = theme::by_name(&config.theme);
        let mut app = Self {
            api,
            config,
            config_dir,
            tree: None,
            trees: Vec::new(),
            focus: Panel::Nodes,
            tree_sel: 0,
            node_sel: 0,
            rows: Vec::new(),
            content_scroll: 0,
            link_pos: 0,
            prompt: None,
            pending_delete: None,
            search_matches: Vec::new(),
            search_pos: 0,
            status_message: None,
            show_help: false,
            show_stats: false,
            theme,
            editor_request: None,
        };
        app.refresh()?;
        app.snap_to_cursor();
        if app.tree.is_none() {
            app.status_message = Some("No trees yet. Press n to create one.".to_string());
        }
        Ok(app)
    }

    /// Reload the tree list and the current tree snapshot. Keeps the node
    /// selection on the same id when it still exists, otherwise moves it
    /// to the cursor.
    fn refresh(&mut self) -> Result<()> {
        let tree_before = self.trees.get(self.tree_sel).map(|t| t.name.clone());
        self.trees = self.api.list_trees()?.listed_trees;

        if self.trees.is_empty() {
            self.tree = None;
            self.rows.clear();
            self.node_sel = 0;
            self.tree_sel = 0;
            return Ok(());
        }

        let current_pos = self.trees.iter().position(|t| t.is_current).unwrap_or(0);
        self.tree_sel = tree_before
            .and_then(|name| self.trees.iter().position(|t| t.name == name))
            .unwrap_or(current_pos);

        let selected_before = self.selected_id().map(str::to_string);
        let tree = self.api.current_tree()?;
        self.rows = tree
            .walk()
            .into_iter()
            .map(|(node, depth)| NodeRow {
                id: node.id.clone(),
                depth,
            })
            .collect();
        self.tree = Some(tree);

        self.node_sel = selected_before
            .and_then(|id| self.row_of(&id))
            .unwrap_or_else(|| self.cursor_row());
        if self.node_sel >= self.rows.len() {
            self.node_sel = self.rows.len().saturating_sub(1);
        }
        Ok(())
    }

    fn row_of(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    fn cursor_row(&self) -> usize {
        match &self.tree {
            Some(tree) => self.row_of(&tree.current).unwrap_or(0),
            None => 0,
        }
    }

    pub(crate) fn selected_id(&self) -> Option<&str> {
        self.rows.get(self.node_sel).map(|row| row.id.as_str())
    }

    fn snap_to_cursor(&mut self) {
        self.node_sel = self.cursor_row();
        self.link_pos = 0;
        self.content_scroll = 0;
    }

    /// Node that edit keys act on: the selected row while the Nodes panel
    /// has focus, the cursor otherwise.
    fn target_id(&self) -> Option<String> {
        match self.focus {
            Panel::Nodes => self.selected_id().map(str::to_string),
            _ => self.tree.as_ref().map(|t| t.current.clone()),
        }
    }

    fn require_target(&mut self) -> Option<String> {
        let target = self.target_id();
        if target.is_none() {
            self.status_message = Some("No tree open".to_string());
        }
        target
    }

    /// Tree that tree-level keys act on: the selected row while the Trees
    /// panel has focus, the open tree otherwise.
    fn tree_target(&self) -> Option<String> {
        match self.focus {
            Panel::Trees => self.trees.get(self.tree_sel).map(|t| t.name.clone()),
            _ => self.tree.as_ref().map(|t| t.name.clone()),
        }
    }

    fn absorb(&mut self, result: CmdResult) {
        let parts: Vec<&str> = result.messages.iter().map(|m| m.content.as_str()).collect();
        if !parts.is_empty() {
            self.status_message = Some(parts.join("  "));
        }
    }

    /// Run a command, route its messages (or error) to the status line,
    /// and refresh the snapshot. Returns whether the command succeeded.
    fn run_api<F>(&mut self, op: F) -> Result<bool>
    where
        F: FnOnce(&mut BurrowApi<S>) -> Result<CmdResult>,
    {
        match op(&mut self.api) {
            Ok(result) => {
                self.absorb(result);
                self.refresh()?;
                Ok(true)
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
                Ok(false)
            }
        }
    }

    /// Like [`Self::run_api`] but snaps the selection to the cursor, for
    /// commands that navigate.
    fn navigate<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&mut BurrowApi<S>) -> Result<CmdResult>,
    {
        if self.run_api(op)? {
            self.snap_to_cursor();
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.show_help || self.show_stats {
            self.show_help = false;
            self.show_stats = false;
            return Ok(false);
        }

        if let Some(name) = self.pending_delete.take() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    if self.run_api(|api| api.delete_tree(&name))? {
                        self.snap_to_cursor();
                    }
                }
                _ => self.status_message = Some("Aborted".to_string()),
            }
            return Ok(false);
        }

        let text_mode = self.prompt.is_some();
        let action = keys::action_for_key(key, text_mode);
        if text_mode {
            return self.handle_prompt_action(action);
        }

        self.status_message = None;

        match action {
            Action::Quit => return Ok(true),
            Action::ToggleHelp => self.show_help = true,
            Action::StatsOverlay => self.show_stats = true,
            Action::CycleTheme => self.cycle_theme()?,
            Action::ForceSave => self.force_save()?,
            Action::Cancel => {}

            Action::FocusLeft => self.focus = self.focus.left(),
            Action::FocusRight => self.focus = self.focus.right(),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::Activate => self.activate()?,

            Action::GoParent => self.navigate(|api| api.up())?,
            Action::GoBack => self.navigate(|api| api.back())?,
            Action::GoRoot => self.navigate(|api| api.root())?,
            Action::NextLink => self.follow_link(false)?,
            Action::PrevLink => self.follow_link(true)?,
            Action::GotoPrompt => self.open_prompt(PromptKind::GotoId, "Go to id", ""),
            Action::SearchPrompt => self.open_prompt(PromptKind::Search, "Search", ""),
            Action::NextMatch => self.next_match()?,

            Action::AddChild => {
                if let Some(id) = self.require_target() {
                    let label = format!("Add under [{}]", id);
                    self.open_prompt(PromptKind::AddChild { anchor: id }, &label, "");
                }
            }
            Action::AddSibling => {
                if let Some(id) = self.require_target() {
                    let label = format!("Add sibling of [{}]", id);
                    self.open_prompt(PromptKind::AddSibling { anchor: id }, &label, "");
                }
            }
            Action::EditTitle => {
                if let Some(id) = self.require_target() {
                    let title = self.title_of(&id);
                    let label = format!("Title of [{}]", id);
                    self.open_prompt(PromptKind::EditTitle { id }, &label, &title);
                }
            }
            Action::AppendPrompt => {
                if let Some(id) = self.require_target() {
                    let label = format!("Append to [{}]", id);
                    self.open_prompt(PromptKind::AppendBody { id }, &label, "");
                }
            }
            Action::OpenEditor => {
                if let Some(id) = self.require_target() {
                    self.editor_request = Some(id);
                }
            }

            Action::MarkDone => self.mark_closed(true)?,
            Action::MarkDropped => self.mark_closed(false)?,
            Action::MarkTodo => {
                if let Some(id) = self.require_target() {
                    self.run_api(|api| api.set_status(Some(&id), NodeStatus::Todo))?;
                }
            }

            Action::MovePrompt => {
                if let Some(id) = self.require_target() {
                    let label = format!("Move [{}] under", id);
                    self.open_prompt(PromptKind::MoveTo { id }, &label, "");
                }
            }
            Action::LinkPrompt => {
                if let Some(id) = self.require_target() {
                    let label = format!("Link [{}] to", id);
                    self.open_prompt(PromptKind::LinkTo { from: id }, &label, "");
                }
            }
            Action::UnlinkPrompt => {
                if let Some(id) = self.require_target() {
                    if self.links_of(&id).is_empty() {
                        self.status_message = Some(format!("[{}] has no links", id));
                    } else {
                        let label = format!("Unlink [{}] from", id);
                        self.open_prompt(PromptKind::UnlinkFrom { from: id }, &label, "");
                    }
                }
            }

            Action::Yank => self.yank(false)?,
            Action::YankId => self.yank(true)?,
            Action::Paste => self.paste()?,

            Action::NewTree => self.open_prompt(PromptKind::NewTree, "New tree name", ""),
            Action::RenameTree => {
                if let Some(old) = self.tree_target() {
                    let label = format!("Rename '{}' to", old);
                    let prefill = old.clone();
                    self.open_prompt(PromptKind::RenameTree { old }, &label, &prefill);
                }
            }
            Action::DeleteTree => {
                if let Some(name) = self.tree_target() {
                    self.status_message = Some(format!("Delete tree '{}'? (y/N)", name));
                    self.pending_delete = Some(name);
                }
            }

            Action::Noop | Action::SubmitText | Action::Backspace | Action::InputChar(_) => {}
        }
        Ok(false)
    }

    fn handle_prompt_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::SubmitText => {
                if let Some(prompt) = self.prompt.take() {
                    self.apply_prompt(prompt)?;
                }
            }
            Action::Cancel => self.prompt = None,
            Action::Backspace => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.buffer.pop();
                }
            }
            Action::InputChar(c) => {
                if let Some(prompt) = &mut self.prompt {
                    prompt.buffer.push(c);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn apply_prompt(&mut self, prompt: Prompt) -> Result<()> {
        let text = prompt.buffer.trim().to_string();
        if text.is_empty() {
            return Ok(());
        }
        match prompt.kind {
            PromptKind::AddChild { anchor } => {
                self.run_api(|api| api.add(Some(&anchor), &text, false))?;
            }
            PromptKind::AddSibling { anchor } => {
                self.run_api(|api| api.add(Some(&anchor), &text, true))?;
            }
            PromptKind::EditTitle { id } => {
                self.run_api(|api| api.set_title(Some(&id), &text))?;
            }
            PromptKind::AppendBody { id } => {
                self.run_api(|api| api.append(Some(&id), &text))?;
            }
            PromptKind::GotoId => self.navigate(|api| api.go(&text))?,
            PromptKind::Search => self.run_search(&text)?,
            PromptKind::LinkTo { from } => {
                self.run_api(|api| api.link(&text, Some(&from)))?;
            }
            PromptKind::UnlinkFrom { from } => {
                self.run_api(|api| api.unlink(&text, Some(&from)))?;
            }
            PromptKind::MoveTo { id } => {
                self.run_api(|api| api.move_node(&id, &text))?;
            }
            PromptKind::NewTree => {
                if self.run_api(|api| api.create_tree(&text))? {
                    self.focus = Panel::Nodes;
                    self.snap_to_cursor();
                }
            }
            PromptKind::RenameTree { old } => {
                self.run_api(|api| api.rename_tree(&old, &text))?;
            }
        }
        Ok(())
    }

    fn open_prompt(&mut self, kind: PromptKind, label: &str, prefill: &str) {
        self.prompt = Some(Prompt {
            kind,
            label: label.to_string(),
            buffer: prefill.to_string(),
        });
    }

    fn move_selection(&mut self, delta: i64) {
        match self.focus {
            Panel::Trees => self.tree_sel = step(self.tree_sel, delta, self.trees.len()),
            Panel::Nodes => {
                self.node_sel = step(self.node_sel, delta, self.rows.len());
                self.content_scroll = 0;
            }
            Panel::Content => {
                self.content_scroll = if delta > 0 {
                    self.content_scroll.saturating_add(1)
                } else {
                    self.content_scroll.saturating_sub(1)
                };
            }
        }
    }

    fn activate(&mut self) -> Result<()> {
        match self.focus {
            Panel::Trees => {
                if let Some(name) = self.trees.get(self.tree_sel).map(|t| t.name.clone()) {
                    if self.run_api(|api| api.open_tree(&name))? {
                        self.focus = Panel::Nodes;
                        self.snap_to_cursor();
                    }
                }
            }
            Panel::Nodes => {
                if let Some(id) = self.selected_id().map(str::to_string) {
                    self.navigate(|api| api.go(&id))?;
                }
            }
            Panel::Content => {}
        }
        Ok(())
    }

    fn follow_link(&mut self, backwards: bool) -> Result<()> {
        let (cursor, ids) = {
            let Some(tree) = &self.tree else {
                return Ok(());
            };
            let cursor = tree.current.clone();
            let nodes = if backwards {
                tree.backlinks_of(&cursor)?
            } else {
                tree.links_of(&cursor)?
            };
            let ids: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
            (cursor, ids)
        };

        if ids.is_empty() {
            self.status_message = Some(if backwards {
                format!("Nothing links to [{}]", cursor)
            } else {
                format!("[{}] has no links", cursor)
            });
            return Ok(());
        }

        let target = ids[self.link_pos % ids.len()].clone();
        let next_pos = self.link_pos + 1;
        if self.run_api(|api| api.go(&target))? {
            // keep cycling position across the jump
            self.node_sel = self.cursor_row();
            self.content_scroll = 0;
            self.link_pos = next_pos;
        }
        Ok(())
    }

    fn mark_closed(&mut self, done: bool) -> Result<()> {
        let Some(id) = self.require_target() else {
            return Ok(());
        };
        let at_cursor = self.tree.as_ref().map(|t| t.current == id).unwrap_or(false);
        if at_cursor {
            if done {
                self.navigate(|api| api.finish(None))?;
            } else {
                self.navigate(|api| api.abandon(None))?;
            }
        } else {
            let status = if done {
                NodeStatus::Done
            } else {
                NodeStatus::Dropped
            };
            self.run_api(|api| api.set_status(Some(&id), status))?;
        }
        Ok(())
    }

    fn run_search(&mut self, query: &str) -> Result<()> {
        let result = match self.api.grep(query) {
            Ok(result) => result,
            Err(e) => {
                self.status_message = Some(e.to_string());
                return Ok(());
            }
        };
        let mut matches: Vec<String> =
            result.listed_nodes.iter().map(|line| line.id.clone()).collect();
        matches.sort_by_key(|id| id.trim_start_matches('n').parse::<u64>().unwrap_or(u64::MAX));

        if matches.is_empty() {
            self.search_matches.clear();
            self.status_message = Some(format!("No matches for '{}'", query));
            return Ok(());
        }

        self.search_matches = matches;
        self.search_pos = 0;
        let target = self.search_matches[0].clone();
        self.navigate(move |api| api.go(&target))?;
        self.status_message = Some(format!(
            "{} match(es), f for next",
            self.search_matches.len()
        ));
        Ok(())
    }

    fn next_match(&mut self) -> Result<()> {
        if self.search_matches.is_empty() {
            self.status_message = Some("No search matches".to_string());
            return Ok(());
        }
        self.search_pos = (self.search_pos + 1) % self.search_matches.len();
        let target = self.search_matches[self.search_pos].clone();
        self.navigate(move |api| api.go(&target))
    }

    fn yank(&mut self, id_only: bool) -> Result<()> {
        let Some(id) = self.require_target() else {
            return Ok(());
        };
        let payload = {
            let Some(tree) = &self.tree else {
                return Ok(());
            };
            let node = tree.get(&id)?;
            if id_only {
                id.clone()
            } else {
                clipboard::yank_payload(&node.title, &node.body)
            }
        };
        self.status_message = Some(match clipboard::copy_to_clipboard(&payload) {
            Ok(()) => format!("Copied [{}] to clipboard", id),
            Err(e) => e.to_string(),
        });
        Ok(())
    }

    fn paste(&mut self) -> Result<()> {
        let Some(id) = self.require_target() else {
            return Ok(());
        };
        match clipboard::paste_from_clipboard() {
            Ok(text) => {
                self.run_api(|api| api.append(Some(&id), &text))?;
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
        Ok(())
    }

    fn cycle_theme(&mut self) -> Result<()> {
        self.theme = theme::next(self.theme.name);
        self.config.theme = self.theme.name.to_string();
        self.config.save(&self.config_dir)?;
        self.status_message = Some(format!("Theme: {}", self.theme.name));
        Ok(())
    }

    fn force_save(&mut self) -> Result<()> {
        if let Some(tree) = &self.tree {
            self.api.store_mut().save_tree(tree)?;
            self.status_message = Some(format!("Saved '{}'", tree.name));
        }
        Ok(())
    }

    fn title_of(&self, id: &str) -> String {
        self.tree
            .as_ref()
            .and_then(|tree| tree.get(id).ok())
            .map(|node| node.title.clone())
            .unwrap_or_default()
    }

    fn links_of(&self, id: &str) -> Vec<String> {
        self.tree
            .as_ref()
            .and_then(|tree| tree.links_of(id).ok())
            .map(|nodes| nodes.iter().map(|n| n.id.clone()).collect())
            .unwrap_or_default()
    }

    pub fn take_editor_request(&mut self) -> Option<String> {
        self.editor_request.take()
    }

    /// Round-trip one node through the external editor. The caller is
    /// responsible for suspending and restoring the terminal around this.
    pub fn edit_in_editor(&mut self, id: &str) -> Result<()> {
        let node = match &self.tree {
            Some(tree) => tree.get(id)?.clone(),
            None => return Ok(()),
        };
        let draft = editor::edit_node(&node, &self.config)?;
        self.run_api(|api| api.edit_apply(Some(id), draft))?;
        Ok(())
    }
}

fn step(current: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if delta < 0 {
        current.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (current + delta as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{fixtures, InMemoryStore};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App<InMemoryStore>, code: KeyCode) -> bool {
        app.handle_key(key(code)).unwrap()
    }

    fn type_text(app: &mut App<InMemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn branching_app() -> (App<InMemoryStore>, String, String, String, String) {
        let (store, a, a1, a2, b) = fixtures::store_with_branching_tree("research");
        let api = BurrowApi::new(store);
        let app = App::new(api, BurrowConfig::default(), std::env::temp_dir()).unwrap();
        (app, a, a1, a2, b)
    }

    fn current_id(app: &App<InMemoryStore>) -> String {
        app.tree.as_ref().unwrap().current.clone()
    }

    #[test]
    fn test_starts_with_selection_on_cursor() {
        let (app, _, _, _, _) = branching_app();
        assert_eq!(app.focus, Panel::Nodes);
        assert_eq!(app.selected_id(), Some("root"));
    }

    #[test]
    fn test_focus_clamps_at_both_edges() {
        let (mut app, _, _, _, _) = branching_app();
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.focus, Panel::Trees);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.focus, Panel::Trees);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.focus, Panel::Content);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.focus, Panel::Content);
    }

    #[test]
    fn test_selection_clamps_without_wraparound() {
        let (mut app, _, _, _, _) = branching_app();
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.node_sel, 0);
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.node_sel, app.rows.len() - 1);
    }

    #[test]
    fn test_enter_moves_cursor_to_selected_node() {
        let (mut app, a, _, _, _) = branching_app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_id(), Some(a.as_str()));
        press(&mut app, KeyCode::Enter);
        assert_eq!(current_id(&app), a);
        // selection follows the cursor after navigation
        assert_eq!(app.selected_id(), Some(a.as_str()));
    }

    #[test]
    fn test_add_child_targets_the_selected_node() {
        let (mut app, a, _, _, _) = branching_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        assert!(matches!(
            app.prompt.as_ref().map(|p| &p.kind),
            Some(PromptKind::AddChild { anchor }) if anchor == &a
        ));
        type_text(&mut app, "deeper question");
        press(&mut app, KeyCode::Enter);

        let tree = app.tree.as_ref().unwrap();
        let children = &tree.get(&a).unwrap().children;
        assert!(children.iter().any(|c| c == "n5"));
        // cursor did not move, selection stayed put
        assert_eq!(current_id(&app), "root");
        assert_eq!(app.selected_id(), Some(a.as_str()));
    }

    #[test]
    fn test_done_at_cursor_returns_to_parent() {
        let (mut app, a, a1, _, _) = branching_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(current_id(&app), a1);

        press(&mut app, KeyCode::Char('d'));
        let tree = app.tree.as_ref().unwrap();
        assert_eq!(tree.get(&a1).unwrap().status, NodeStatus::Done);
        assert_eq!(current_id(&app), a);
        assert_eq!(app.selected_id(), Some(a.as_str()));
    }

    #[test]
    fn test_done_on_other_node_keeps_cursor() {
        let (mut app, _, a1, _, _) = branching_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_id(), Some(a1.as_str()));

        press(&mut app, KeyCode::Char('d'));
        let tree = app.tree.as_ref().unwrap();
        assert_eq!(tree.get(&a1).unwrap().status, NodeStatus::Done);
        assert_eq!(current_id(&app), "root");
    }

    #[test]
    fn test_todo_never_moves_the_cursor() {
        let (mut app, a, _, _, _) = branching_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(current_id(&app), a);

        press(&mut app, KeyCode::Char('t'));
        let tree = app.tree.as_ref().unwrap();
        assert_eq!(tree.get(&a).unwrap().status, NodeStatus::Todo);
        assert_eq!(current_id(&app), a);
    }

    #[test]
    fn test_link_cycling_visits_targets_in_turn() {
        let (mut app, a, a1, _, b) = branching_app();
        // b links to a1; add a second link b -> a so ']' has two stops
        app.api.link(&a, Some(&b)).unwrap();
        app.refresh().unwrap();
        app.api.go(&b).unwrap();
        app.refresh().unwrap();
        app.snap_to_cursor();

        press(&mut app, KeyCode::Char(']'));
        assert_eq!(current_id(&app), a1);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(current_id(&app), b);
        // link_pos was reset by the back-navigation, so ']' starts over
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(current_id(&app), a1);
    }

    #[test]
    fn test_search_jumps_to_first_match_and_f_cycles() {
        let (mut app, a, a1, _, _) = branching_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "question");
        press(&mut app, KeyCode::Enter);
        // matches by ascending id: a ("first question") then a1 ("sub-question")
        assert_eq!(current_id(&app), a);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(current_id(&app), a1);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(current_id(&app), a);
    }

    #[test]
    fn test_delete_tree_asks_for_confirmation() {
        let (mut app, _, _, _, _) = branching_app();
        // a second tree, which also becomes current
        app.api.create_tree("scratch").unwrap();
        app.refresh().unwrap();

        press(&mut app, KeyCode::Char('D'));
        assert_eq!(app.pending_delete.as_deref(), Some("scratch"));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.trees.len(), 2);
        assert_eq!(app.status_message.as_deref(), Some("Aborted"));

        press(&mut app, KeyCode::Char('D'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.trees.len(), 1);
        assert_eq!(app.tree.as_ref().unwrap().name, "research");
    }

    #[test]
    fn test_delete_last_tree_is_refused() {
        let (mut app, _, _, _, _) = branching_app();
        press(&mut app, KeyCode::Char('D'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.trees.len(), 1, "the last tree survives");
        assert!(app
            .status_message
            .as_deref()
            .unwrap_or("")
            .contains("last remaining tree"));
    }

    #[test]
    fn test_new_tree_prompt_creates_and_opens() {
        let store = InMemoryStore::new();
        let api = BurrowApi::new(store);
        let mut app = App::new(api, BurrowConfig::default(), std::env::temp_dir()).unwrap();
        assert!(app.tree.is_none());

        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "thesis");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.trees.len(), 1);
        assert_eq!(app.tree.as_ref().unwrap().name, "thesis");
        assert_eq!(app.focus, Panel::Nodes);
    }

    #[test]
    fn test_escape_cancels_prompt_without_side_effect() {
        let (mut app, _, _, _, _) = branching_app();
        let nodes_before = app.rows.len();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "half-typed");
        press(&mut app, KeyCode::Esc);
        assert!(app.prompt.is_none());
        assert_eq!(app.rows.len(), nodes_before);
    }

    #[test]
    fn test_editor_key_records_a_request() {
        let (mut app, a, _, _, _) = branching_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.take_editor_request().as_deref(), Some(a.as_str()));
        assert!(app.take_editor_request().is_none());
    }

    #[test]
    fn test_bad_goto_lands_on_status_line_not_a_crash() {
        let (mut app, _, _, _, _) = branching_app();
        press(&mut app, KeyCode::Char('g'));
        type_text(&mut app, "n99");
        press(&mut app, KeyCode::Enter);
        assert_eq!(current_id(&app), "root");
        assert!(app.status_message.as_deref().unwrap_or("").contains("n99"));
    }

    #[test]
    fn test_quit_only_on_q() {
        let (mut app, _, _, _, _) = branching_app();
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(!press(&mut app, KeyCode::Char('z')));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let (mut app, _, _, _, _) = branching_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        // q closes the overlay instead of quitting
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(!app.show_help);
    }
}
