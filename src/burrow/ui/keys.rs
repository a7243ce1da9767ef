//! Key bindings for the interactive UI.
//!
//! Keys are translated to [`Action`]s in one place so the app logic never
//! matches on raw key codes. Prompt input gets its own mapping: while a
//! prompt is open, printable keys feed the buffer instead of triggering
//! commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FocusLeft,
    FocusRight,
    MoveUp,
    MoveDown,
    Activate,
    GoParent,
    GoBack,
    GoRoot,
    GotoPrompt,
    NextLink,
    PrevLink,
    AddChild,
    AddSibling,
    EditTitle,
    AppendPrompt,
    OpenEditor,
    MarkDone,
    MarkDropped,
    MarkTodo,
    MovePrompt,
    LinkPrompt,
    UnlinkPrompt,
    Yank,
    YankId,
    Paste,
    NewTree,
    RenameTree,
    DeleteTree,
    SearchPrompt,
    NextMatch,
    StatsOverlay,
    ToggleHelp,
    CycleTheme,
    ForceSave,
    Cancel,
    Quit,
    SubmitText,
    Backspace,
    InputChar(char),
    Noop,
}

pub fn action_for_key(key: KeyEvent, text_mode: bool) -> Action {
    if text_mode {
        return match key.code {
            KeyCode::Enter => Action::SubmitText,
            KeyCode::Esc => Action::Cancel,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Char(c) => Action::InputChar(c),
            _ => Action::Noop,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => Action::ForceSave,
            _ => Action::Noop,
        };
    }

    match key.code {
        KeyCode::Left => Action::FocusLeft,
        KeyCode::Right => Action::FocusRight,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Enter => Action::Activate,
        KeyCode::Backspace => Action::GoParent,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Char('h') => Action::FocusLeft,
        KeyCode::Char('l') => Action::FocusRight,
        KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Char('-') => Action::GoBack,
        KeyCode::Char('r') => Action::GoRoot,
        KeyCode::Char('g') => Action::GotoPrompt,
        KeyCode::Char(']') => Action::NextLink,
        KeyCode::Char('[') => Action::PrevLink,
        KeyCode::Char('a') => Action::AddChild,
        KeyCode::Char('A') => Action::AddSibling,
        KeyCode::Char('E') => Action::EditTitle,
        KeyCode::Char('i') => Action::AppendPrompt,
        KeyCode::Char('e') => Action::OpenEditor,
        KeyCode::Char('d') => Action::MarkDone,
        KeyCode::Char('x') => Action::MarkDropped,
        KeyCode::Char('t') => Action::MarkTodo,
        KeyCode::Char('m') => Action::MovePrompt,
        KeyCode::Char('L') => Action::LinkPrompt,
        KeyCode::Char('U') => Action::UnlinkPrompt,
        KeyCode::Char('y') => Action::Yank,
        KeyCode::Char('Y') => Action::YankId,
        KeyCode::Char('p') => Action::Paste,
        KeyCode::Char('n') => Action::NewTree,
        KeyCode::Char('R') => Action::RenameTree,
        KeyCode::Char('D') => Action::DeleteTree,
        KeyCode::Char('/') => Action::SearchPrompt,
        KeyCode::Char('f') => Action::NextMatch,
        KeyCode::Char('s') => Action::StatsOverlay,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('T') => Action::CycleTheme,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Noop,
    }
}
