use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::centered_rect;

const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j / ↓", "Next post"),
            ("k / ↑", "Previous post"),
            ("Enter", "Open thread"),
            ("p", "Author profile"),
            ("Esc", "Back / quit from feed"),
            ("g", "Reload feed"),
        ],
    ),
    (
        "Reactions",
        &[
            ("r", "Reply"),
            ("t", "Repost"),
            ("l", "Like"),
        ],
    ),
    (
        "General",
        &[("?", "Toggle this help"), ("q", "Quit")],
    ),
];

/// Render the keyboard shortcut overlay.
pub fn render_help_modal(frame: &mut Frame, area: Rect) {
    let theme = get_theme_colors();

    let modal_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, modal_area);

    let mut lines = vec![Line::from("")];
    for (category, items) in SHORTCUTS {
        lines.push(Line::from(Span::styled(
            *category,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        for (key, description) in *items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<15}", key), Style::default().fg(theme.success)),
                Span::styled(*description, Style::default().fg(theme.text)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let help_content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .title(" Keyboard Shortcuts ")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(theme.background)),
        )
        .wrap(ratatui::widgets::Wrap { trim: false });

    frame.render_widget(help_content, modal_area);
}
