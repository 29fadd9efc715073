// UI module - split into cohesive submodules for maintainability
pub mod theme;
mod formatting;
mod modals;
pub mod post;

// Re-export main render function
pub use self::render_main::render;

// Main render logic
mod render_main {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout, Rect},
        style::{Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
        Frame,
    };

    use crate::app::{App, Route};

    use super::formatting::short_address;
    use super::modals::{render_help_modal, render_reply_modal};
    use super::post::{expanded_post_lines, regular_post_lines};
    use super::theme::{get_theme_colors, ThemeColors};

    /// Render the UI
    pub fn render(app: &mut App, frame: &mut Frame) {
        let area = frame.area();

        let theme = get_theme_colors();

        frame.render_widget(Clear, area);

        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, area);

        const MIN_WIDTH: u16 = 60;
        const MIN_HEIGHT: u16 = 20;

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let warning = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Terminal Too Small",
                    Style::default()
                        .fg(theme.error)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                    Style::default().fg(theme.text),
                )),
                Line::from(Span::styled(
                    format!("Current size: {}x{}", area.width, area.height),
                    Style::default().fg(theme.warning),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Please resize your terminal window",
                    Style::default().fg(theme.text_dim),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error)),
            );

            frame.render_widget(warning, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        render_header(frame, app, &theme, chunks[0]);

        match app.route.clone() {
            Route::Feed => render_feed(frame, app, &theme, chunks[1]),
            Route::Thread(root) => render_thread(frame, app, &theme, chunks[1], &root),
            Route::Profile(_) => render_profile(frame, app, &theme, chunks[1]),
        }

        render_status_bar(frame, app, &theme, chunks[2]);

        if app.composer.is_open() {
            render_reply_modal(frame, app, area);
        }

        if app.show_help {
            render_help_modal(frame, area);
        }
    }

    fn render_header(frame: &mut Frame, app: &App, theme: &ThemeColors, area: Rect) {
        let title = match &app.route {
            Route::Feed => " murmur ".to_string(),
            Route::Thread(_) => " Thread ".to_string(),
            Route::Profile(ens) => format!(" @{} ", ens),
        };

        let session = match app.store.web3.address() {
            Some(address) => {
                let label = app
                    .store
                    .web3
                    .ens()
                    .map(str::to_string)
                    .unwrap_or_else(|| short_address(address));
                Span::styled(format!("🔑 {} ", label), Style::default().fg(theme.success))
            }
            None => Span::styled("logged out ", Style::default().fg(theme.text_dim)),
        };

        let header = Paragraph::new(Line::from(session))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(theme.border)),
            );
        frame.render_widget(header, area);
    }

    fn render_feed(frame: &mut Frame, app: &mut App, theme: &ThemeColors, area: Rect) {
        if let Some(error) = app.feed_state.error.clone() {
            let widget = Paragraph::new(error)
                .style(Style::default().fg(theme.error))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Feed "));
            frame.render_widget(widget, area);
            return;
        }

        if app.store.snapshot.loading && app.store.snapshot.feed.is_empty() {
            let widget = Paragraph::new("Loading feed…")
                .style(Style::default().fg(theme.text_dim))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Feed "));
            frame.render_widget(widget, area);
            return;
        }

        let width = area.width.saturating_sub(4) as usize;
        let selected = app.feed_state.list_state.selected();
        let items: Vec<ListItem> = app
            .store
            .snapshot
            .feed
            .iter()
            .enumerate()
            .map(|(i, id)| {
                ListItem::new(regular_post_lines(app, id, width, selected == Some(i), false))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Feed ")
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_stateful_widget(list, area, &mut app.feed_state.list_state);
    }

    fn render_thread(frame: &mut Frame, app: &mut App, theme: &ThemeColors, area: Rect, root: &str) {
        let width = area.width.saturating_sub(4) as usize;
        let root_lines = expanded_post_lines(app, root, width);
        let root_height = root_lines.len() as u16 + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(root_height), Constraint::Min(0)])
            .split(area);

        let (selected, replies, loading, error) = match &app.thread_state {
            Some(thread) => (
                thread.list_state.selected(),
                thread.replies.clone(),
                thread.loading,
                thread.error.clone(),
            ),
            None => (None, Vec::new(), false, None),
        };

        let root_selected = matches!(selected, Some(0) | None);
        let root_border = if root_selected {
            Style::default().fg(theme.primary)
        } else {
            Style::default().fg(theme.border)
        };
        let root_widget = Paragraph::new(root_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Post ")
                .border_style(root_border),
        );
        frame.render_widget(root_widget, chunks[0]);

        if let Some(error) = error {
            let widget = Paragraph::new(error)
                .style(Style::default().fg(theme.error))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Replies "));
            frame.render_widget(widget, chunks[1]);
            return;
        }

        if loading {
            let widget = Paragraph::new("Loading replies…")
                .style(Style::default().fg(theme.text_dim))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Replies "));
            frame.render_widget(widget, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = replies
            .iter()
            .enumerate()
            .map(|(i, id)| {
                ListItem::new(regular_post_lines(app, id, width, selected == Some(i + 1), true))
            })
            .collect();

        let title = format!(" Replies ({}) ", replies.len());
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(theme.border)),
        );

        // The list's selection index is offset by one: slot 0 is the root.
        let mut reply_state = ratatui::widgets::ListState::default();
        if let Some(i) = selected {
            if i > 0 {
                reply_state.select(Some(i - 1));
            }
        }
        frame.render_stateful_widget(list, chunks[1], &mut reply_state);
    }

    fn render_profile(frame: &mut Frame, app: &mut App, theme: &ThemeColors, area: Rect) {
        let Some((ens, address, name, posts, selected)) = app.profile_view.as_ref().map(|p| {
            (
                p.ens.clone(),
                p.address.clone(),
                p.name.clone(),
                p.posts.clone(),
                p.list_state.selected(),
            )
        }) else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                name,
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("@{}", ens),
                Style::default().fg(theme.secondary),
            )),
            Line::from(Span::styled(
                short_address(&address),
                Style::default().fg(theme.text_dim),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Profile ")
                .border_style(Style::default().fg(theme.border)),
        );
        frame.render_widget(header, chunks[0]);

        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = posts
            .iter()
            .enumerate()
            .map(|(i, id)| {
                ListItem::new(regular_post_lines(app, id, width, selected == Some(i), false))
            })
            .collect();

        let title = format!(" Posts ({}) ", posts.len());
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(theme.border)),
        );
        if let Some(profile) = app.profile_view.as_mut() {
            frame.render_stateful_widget(list, chunks[1], &mut profile.list_state);
        }
    }

    fn render_status_bar(frame: &mut Frame, app: &App, theme: &ThemeColors, area: Rect) {
        let (text, style) = if let Some((message, _)) = &app.feed_state.message {
            (message.clone(), Style::default().fg(theme.warning))
        } else {
            (
                "j/k: Navigate | Enter: Thread | r: Reply | t: Repost | l: Like | p: Profile | ?: Help"
                    .to_string(),
                Style::default().fg(theme.text_dim),
            )
        };

        let status = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border)),
            );
        frame.render_widget(status, area);
    }
}
