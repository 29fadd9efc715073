use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::formatting::{display_handle, short_address};
use super::super::theme::get_theme_colors;
use super::centered_rect;
use crate::app::App;

/// Render the reply composer modal over the current view. Shows the
/// post being replied to, the draft textarea, the character counter,
/// and either the submission state or the key hints.
pub fn render_reply_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors();

    let Some(target) = app.composer.target.as_deref() else {
        return;
    };

    // Context: who and what the reply is bound to
    let context_lines = match app.store.posts.message(target) {
        Some(parent) => {
            let author = app
                .store
                .users
                .user(&parent.creator)
                .map(display_handle)
                .unwrap_or_else(|| short_address(&parent.creator));

            let context_width = area.width.saturating_sub(24).min(66) as usize;
            let content = &parent.payload.content;
            let truncated = if content.chars().count() > context_width {
                let head: String = content.chars().take(context_width.saturating_sub(1)).collect();
                format!("{}…", head)
            } else {
                content.clone()
            };

            vec![
                Line::from(vec![
                    Span::styled("Replying to ", Style::default().fg(theme.text_dim)),
                    Span::styled(
                        author,
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    truncated,
                    Style::default()
                        .fg(theme.text_dim)
                        .add_modifier(Modifier::ITALIC),
                )),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Replying",
            Style::default().fg(theme.text_dim),
        ))],
    };

    let modal_area = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal_area);

    let outer_block = Block::default()
        .title(" Reply ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(theme.background));

    let inner = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let modal_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Context
            Constraint::Min(0),    // Draft
            Constraint::Length(3), // Character counter
            Constraint::Length(3), // Status / instructions
        ])
        .split(inner);

    let context = Paragraph::new(context_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Context")
            .border_style(Style::default().fg(theme.text_dim)),
    );
    frame.render_widget(context, modal_chunks[0]);

    let content_block = Block::default()
        .borders(Borders::ALL)
        .title("Reply")
        .border_style(Style::default().fg(theme.primary));
    let inner_content_area = content_block.inner(modal_chunks[1]);
    frame.render_widget(content_block, modal_chunks[1]);
    frame.render_widget(&app.composer.textarea, inner_content_area);

    // Character counter
    let char_count = app.composer.char_count();
    let max_chars = app.composer.max_chars;
    let counter_style = if char_count >= max_chars {
        Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD)
    } else if char_count >= (max_chars * 9 / 10) {
        Style::default().fg(theme.warning)
    } else {
        Style::default().fg(theme.success)
    };
    let counter = Paragraph::new(format!("{}/{} characters", char_count, max_chars))
        .style(counter_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(counter, modal_chunks[2]);

    // Bottom row: in-flight state, failure (draft kept for retry), or
    // the normal key hints.
    let (status_text, status_style) = if app.store.drafts.is_submitting(target) {
        (
            "Submitting…".to_string(),
            Style::default().fg(theme.warning),
        )
    } else if let Some(error) = &app.composer.error {
        (
            format!("{} | Enter: Retry | Esc: Close", error),
            Style::default().fg(theme.error),
        )
    } else {
        (
            "Type to compose | Enter: Submit | Esc: Close".to_string(),
            Style::default().fg(theme.text),
        )
    };

    let status = Paragraph::new(status_text)
        .style(status_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(status, modal_chunks[3]);
}
