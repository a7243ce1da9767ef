//! Color themes for the interactive UI.
//!
//! Themes are a fixed set of named palettes. The active theme is cycled
//! with `T` and the choice is persisted to the config file.

use ratatui::style::Color;

use crate::model::NodeStatus;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub border: Color,
    pub border_focus: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub active: Color,
    pub done: Color,
    pub dropped: Color,
    pub todo: Color,
}

pub const THEMES: [Theme; 3] = [
    Theme {
        name: "dark",
        border: Color::DarkGray,
        border_focus: Color::Cyan,
        selection_bg: Color::Blue,
        selection_fg: Color::White,
        text: Color::Reset,
        dim: Color::DarkGray,
        accent: Color::Magenta,
        active: Color::Green,
        done: Color::Blue,
        dropped: Color::Red,
        todo: Color::Yellow,
    },
    Theme {
        name: "light",
        border: Color::Gray,
        border_focus: Color::Blue,
        selection_bg: Color::LightBlue,
        selection_fg: Color::Black,
        text: Color::Black,
        dim: Color::Gray,
        accent: Color::Magenta,
        active: Color::Green,
        done: Color::Blue,
        dropped: Color::Red,
        todo: Color::Rgb(168, 110, 0),
    },
    Theme {
        name: "gruvbox",
        border: Color::Rgb(146, 131, 116),
        border_focus: Color::Rgb(250, 189, 47),
        selection_bg: Color::Rgb(80, 73, 69),
        selection_fg: Color::Rgb(251, 241, 199),
        text: Color::Rgb(235, 219, 178),
        dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(211, 134, 155),
        active: Color::Rgb(184, 187, 38),
        done: Color::Rgb(131, 165, 152),
        dropped: Color::Rgb(251, 73, 52),
        todo: Color::Rgb(250, 189, 47),
    },
];

/// Look up a theme by name, falling back to the first palette.
pub fn by_name(name: &str) -> &'static Theme {
    THEMES.iter().find(|t| t.name == name).unwrap_or(&THEMES[0])
}

/// The theme after `name` in cycle order.
pub fn next(name: &str) -> &'static Theme {
    let idx = THEMES.iter().position(|t| t.name == name).unwrap_or(0);
    &THEMES[(idx + 1) % THEMES.len()]
}

pub fn status_color(theme: &Theme, status: NodeStatus) -> Color {
    match status {
        NodeStatus::Active => theme.active,
        NodeStatus::Done => theme.done,
        NodeStatus::Dropped => theme.dropped,
        NodeStatus::Todo => theme.todo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_falls_back_to_default() {
        assert_eq!(by_name("solarized").name, "dark");
    }

    #[test]
    fn test_next_cycles_through_all_themes() {
        let mut theme = by_name("dark");
        let mut seen = Vec::new();
        for _ in 0..THEMES.len() {
            seen.push(theme.name);
            theme = next(theme.name);
        }
        assert_eq!(theme.name, "dark");
        assert_eq!(seen.len(), THEMES.len());
    }
}
