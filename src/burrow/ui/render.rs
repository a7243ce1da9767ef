//! Ratatui rendering for the three-panel layout.
//!
//! Left to right: Trees, Nodes (the outline), Detail. A one-line status
//! bar at the bottom doubles as the prompt input. Rendering is pure: it
//! reads the [`App`] state and never mutates it beyond widget scroll
//! state.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::store::TreeStore;

use super::app::{App, Panel};
use super::theme::{status_color, Theme};

pub fn draw<S: TreeStore>(frame: &mut Frame, app: &App<S>) {
    let outer = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(frame.area());
    let columns = Layout::horizontal([
        Constraint::Percentage(22),
        Constraint::Percentage(44),
        Constraint::Percentage(34),
    ])
    .split(outer[0]);

    draw_trees(frame, app, columns[0]);
    draw_nodes(frame, app, columns[1]);
    draw_content(frame, app, columns[2]);
    draw_status(frame, app, outer[1]);

    if app.show_help {
        draw_help(frame, app);
    }
    if app.show_stats {
        draw_stats(frame, app);
    }
}

fn panel_block<'a>(title: String, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        Style::default().fg(theme.border_focus)
    } else {
        Style::default().fg(theme.border)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", title))
}

fn draw_trees<S: TreeStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = app.theme;
    let focused = app.focus == Panel::Trees;
    let items: Vec<ListItem> = app
        .trees
        .iter()
        .map(|line| {
            let marker = if line.is_current { "► " } else { "  " };
            let style = if line.is_current {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(format!("{}{}", marker, line.name)).style(style)
        })
        .collect();

    let mut list = List::new(items).block(panel_block(
        format!("Trees ({})", app.trees.len()),
        focused,
        theme,
    ));
    if focused {
        list = list.highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg),
        );
    }
    let mut state = ListState::default();
    if !app.trees.is_empty() {
        state.select(Some(app.tree_sel.min(app.trees.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_nodes<S: TreeStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = app.theme;
    let focused = app.focus == Panel::Nodes;
    let block = panel_block("Nodes".to_string(), focused, theme);

    let Some(tree) = &app.tree else {
        let hint = Paragraph::new("No trees yet. Press n to create one.")
            .style(Style::default().fg(theme.dim))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let mut items: Vec<ListItem> = Vec::with_capacity(app.rows.len());
    for row in &app.rows {
        let Ok(node) = tree.get(&row.id) else { continue };
        let mut spans = vec![
            Span::raw("  ".repeat(row.depth)),
            Span::styled(format!("[{}] ", node.id), Style::default().fg(theme.dim)),
            Span::styled(
                format!("{} ", node.status.icon()),
                Style::default().fg(status_color(theme, node.status)),
            ),
            Span::styled(node.title.clone(), Style::default().fg(theme.text)),
        ];
        if node.id == tree.current {
            spans.push(Span::styled(
                " ← HERE",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    let mut list = List::new(items).block(block);
    if focused {
        list = list.highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg),
        );
    }
    // keep the cursor row in view when the panel is not focused
    let visible = if focused {
        app.node_sel
    } else {
        app.rows
            .iter()
            .position(|row| row.id == tree.current)
            .unwrap_or(0)
    };
    let mut state = ListState::default();
    if !app.rows.is_empty() {
        state.select(Some(visible.min(app.rows.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_content<S: TreeStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = app.theme;
    let focused = app.focus == Panel::Content;
    let block = panel_block("Detail".to_string(), focused, theme);

    let Some(tree) = &app.tree else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };
    let id = app.selected_id().unwrap_or(tree.current.as_str());
    let Ok(node) = tree.get(id) else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            node.title.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("[{}] ", node.id), Style::default().fg(theme.dim)),
            Span::styled(
                node.status.to_string(),
                Style::default().fg(status_color(theme, node.status)),
            ),
        ]),
        Line::default(),
    ];

    if node.body.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no notes)",
            Style::default().fg(theme.dim),
        )));
    } else {
        for text in node.body.lines() {
            lines.push(Line::from(text.to_string()));
        }
    }

    if let Ok(links) = tree.links_of(&node.id) {
        if !links.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "→ Links",
                Style::default().fg(theme.dim),
            )));
            for target in links {
                lines.push(Line::from(vec![
                    Span::styled(format!("  [{}] ", target.id), Style::default().fg(theme.accent)),
                    Span::raw(target.title.clone()),
                ]));
            }
        }
    }
    if let Ok(backlinks) = tree.backlinks_of(&node.id) {
        if !backlinks.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "← Backlinks",
                Style::default().fg(theme.dim),
            )));
            for source in backlinks {
                lines.push(Line::from(vec![
                    Span::styled(format!("  [{}] ", source.id), Style::default().fg(theme.accent)),
                    Span::raw(source.title.clone()),
                ]));
            }
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.content_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_status<S: TreeStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let theme = app.theme;
    let (text, style) = if let Some(prompt) = &app.prompt {
        (
            format!("{}: {}▏", prompt.label, prompt.buffer),
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection_bg),
        )
    } else if let Some(message) = &app.status_message {
        (message.clone(), Style::default().fg(theme.text))
    } else {
        (
            "a:add  e:edit  d:done  x:drop  /:search  ?:help  q:quit".to_string(),
            Style::default().fg(theme.dim),
        )
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

const HELP_LINES: [(&str, &str); 22] = [
    ("h/l", "move focus between panels"),
    ("j/k", "move selection / scroll detail"),
    ("Enter", "open tree / jump to node"),
    ("Backspace", "go to parent"),
    ("-", "go back in history"),
    ("r", "go to root"),
    ("g", "go to node by id"),
    ("]/[", "cycle links / backlinks"),
    ("a/A", "add child / sibling"),
    ("E", "edit title"),
    ("i", "append a note line"),
    ("e", "edit node in $EDITOR"),
    ("d/x", "done / dropped (at cursor: and return)"),
    ("t", "mark todo"),
    ("m", "move node under another"),
    ("L/U", "link / unlink"),
    ("y/Y/p", "yank body / yank id / paste"),
    ("n/R/D", "new / rename / delete tree"),
    ("/ f", "search, next match"),
    ("s", "statistics"),
    ("T", "cycle theme"),
    ("q", "quit"),
];

fn draw_help<S: TreeStore>(frame: &mut Frame, app: &App<S>) {
    let theme = app.theme;
    let area = centered_rect(frame.area(), 52, 80);
    let mut lines = Vec::with_capacity(HELP_LINES.len());
    for (key, what) in HELP_LINES {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>10}  ", key),
                Style::default().fg(theme.accent),
            ),
            Span::styled(what, Style::default().fg(theme.text)),
        ]));
    }
    let help = Paragraph::new(lines).block(panel_block("Keys".to_string(), true, theme));
    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn draw_stats<S: TreeStore>(frame: &mut Frame, app: &App<S>) {
    let theme = app.theme;
    let area = centered_rect(frame.area(), 40, 50);
    let Some(tree) = &app.tree else { return };
    let stats = tree.statistics();

    let entry = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<12}", label), Style::default().fg(theme.dim)),
            Span::styled(value, Style::default().fg(theme.text)),
        ])
    };
    let lines = vec![
        entry("Total", stats.total.to_string()),
        entry("Active", stats.active.to_string()),
        entry("Done", stats.done.to_string()),
        entry("Dropped", stats.dropped.to_string()),
        entry("Todo", stats.todo.to_string()),
        entry("Leaves", stats.leaves.to_string()),
        entry("Max depth", stats.max_depth.to_string()),
    ];
    let stats_panel =
        Paragraph::new(lines).block(panel_block(format!("{} ", tree.name), true, theme));
    frame.render_widget(Clear, area);
    frame.render_widget(stats_panel, area);
}

fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(height_percent)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
