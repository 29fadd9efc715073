use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::app::{App, CardPhase};
use crate::store::ResolvedPost;

use super::formatting::{
    display_handle, display_name, format_post_content_with_width, format_relative_time,
    format_timestamp, short_address,
};
use super::theme::{get_theme_colors, ThemeColors};

const SKELETON_FG: Color = Color::Rgb(60, 60, 75);

fn skeleton_bar(width: usize) -> Span<'static> {
    Span::styled("▆".repeat(width), Style::default().fg(SKELETON_FG))
}

/// Deterministic placeholder card shown while a post is unresolved or
/// loading. Pure function of `expand` so the compact and expanded
/// skeletons each render identically every frame.
pub fn loading_post_lines(expand: bool) -> Vec<Line<'static>> {
    if expand {
        vec![
            Line::from(vec![skeleton_bar(10)]),
            Line::from(vec![skeleton_bar(14)]),
            Line::from(""),
            Line::from(vec![Span::raw("  "), skeleton_bar(36)]),
            Line::from(vec![Span::raw("  "), skeleton_bar(28)]),
            Line::from(""),
            Line::from(vec![skeleton_bar(16)]),
            Line::from(vec![
                Span::raw("  "),
                skeleton_bar(6),
                Span::raw("   "),
                skeleton_bar(6),
                Span::raw("   "),
                skeleton_bar(6),
            ]),
        ]
    } else {
        vec![
            Line::from(vec![skeleton_bar(10), Span::raw(" "), skeleton_bar(14)]),
            Line::from(vec![Span::raw("  "), skeleton_bar(32)]),
            Line::from(vec![
                Span::raw("  "),
                skeleton_bar(5),
                Span::raw("   "),
                skeleton_bar(5),
                Span::raw("   "),
                skeleton_bar(5),
            ]),
            Line::from(""),
        ]
    }
}

/// Reaction footer: reply / repost / like counts for the resolved id.
/// Dimmed when no wallet session is connected, since the affordances
/// are inert then.
fn footer_line(app: &App, theme: &ThemeColors, display_id: &str) -> Line<'static> {
    let meta = app.store.posts.meta(display_id);
    let logged_in = app.store.web3.logged_in();

    let base = if logged_in {
        Style::default().fg(theme.text_dim)
    } else {
        Style::default().fg(theme.text_dim).add_modifier(Modifier::DIM)
    };
    let repost_style = if meta.reposted {
        Style::default().fg(theme.success)
    } else {
        base
    };
    let like_style = if meta.liked {
        Style::default().fg(theme.accent)
    } else {
        base
    };

    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("💬 {}", meta.reply_count), base),
        Span::raw("   "),
        Span::styled(format!("🔁 {}", meta.repost_count), repost_style),
        Span::raw("   "),
        Span::styled(format!("❤ {}", meta.like_count), like_style),
    ])
}

/// Compact card for feed, thread-reply, and profile lists. Falls back
/// to the skeleton until the card (and its one-hop repost target) has
/// fully loaded. `threaded` draws the connector line that ties a reply
/// card back to the thread root above it.
pub fn regular_post_lines(
    app: &App,
    id: &str,
    width: usize,
    is_selected: bool,
    threaded: bool,
) -> Vec<Line<'static>> {
    let theme = get_theme_colors();

    let mut lines = Vec::new();
    if threaded {
        lines.push(Line::from(Span::styled(
            "│",
            Style::default().fg(theme.border),
        )));
    }

    if app.card_phase(id) != CardPhase::Loaded {
        lines.extend(loading_post_lines(false));
        return lines;
    }
    let Some(resolved) = app.store.posts.resolve(id) else {
        lines.extend(loading_post_lines(false));
        return lines;
    };

    // Repost attribution above the embedded original
    if let ResolvedPost::RepostOf { outer, .. } = &resolved {
        let reposter = app
            .store
            .users
            .user(&outer.creator)
            .map(display_name)
            .unwrap_or_else(|| short_address(&outer.creator));
        lines.push(Line::from(Span::styled(
            format!("🔁 {} reposted", reposter),
            Style::default().fg(theme.text_dim),
        )));
    }

    let display = resolved.display();
    let display_id = resolved.display_id().to_string();
    let author = app.store.users.user(&display.creator);

    let name = author
        .map(display_name)
        .unwrap_or_else(|| short_address(&display.creator));
    let handle = author
        .map(display_handle)
        .unwrap_or_else(|| short_address(&display.creator));

    let name_style = if is_selected {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    };

    lines.push(Line::from(vec![
        Span::styled(name, name_style),
        Span::raw(" "),
        Span::styled(handle, Style::default().fg(theme.text_dim)),
        Span::styled(
            format!(" · {}", format_relative_time(&display.created_at)),
            Style::default().fg(theme.text_dim),
        ),
    ]));

    lines.extend(format_post_content_with_width(
        &display.payload.content,
        is_selected,
        &theme,
        width,
    ));

    lines.push(footer_line(app, &theme, &display_id));
    lines.push(Line::from(""));

    lines
}

/// Expanded card for the thread root: full header, unabridged content,
/// absolute timestamp, then the reaction footer.
pub fn expanded_post_lines(app: &App, id: &str, width: usize) -> Vec<Line<'static>> {
    let theme = get_theme_colors();

    if app.card_phase(id) != CardPhase::Loaded {
        return loading_post_lines(true);
    }
    let Some(resolved) = app.store.posts.resolve(id) else {
        return loading_post_lines(true);
    };

    let display = resolved.display();
    let display_id = resolved.display_id().to_string();
    let author = app.store.users.user(&display.creator);

    let name = author
        .map(display_name)
        .unwrap_or_else(|| short_address(&display.creator));
    let handle = author
        .map(display_handle)
        .unwrap_or_else(|| short_address(&display.creator));

    let mut lines = Vec::new();
    if let Some(reposter_address) = resolved.reposter() {
        let reposter = app
            .store
            .users
            .user(reposter_address)
            .map(display_name)
            .unwrap_or_else(|| short_address(reposter_address));
        lines.push(Line::from(Span::styled(
            format!("🔁 {} reposted", reposter),
            Style::default().fg(theme.text_dim),
        )));
    }

    lines.extend(vec![
        Line::from(Span::styled(
            name,
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(handle, Style::default().fg(theme.text_dim))),
        Line::from(""),
    ]);

    lines.extend(format_post_content_with_width(
        &display.payload.content,
        false,
        &theme,
        width,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format_timestamp(&display.created_at),
        Style::default().fg(theme.text_dim),
    )));
    lines.push(footer_line(app, &theme, &display_id));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_compact_skeleton_is_deterministic() {
        let a = rendered(&loading_post_lines(false));
        let b = rendered(&loading_post_lines(false));
        assert_eq!(a, b);
        assert_eq!(
            a,
            vec![
                "▆▆▆▆▆▆▆▆▆▆ ▆▆▆▆▆▆▆▆▆▆▆▆▆▆".to_string(),
                format!("  {}", "▆".repeat(32)),
                format!("  {0}   {0}   {0}", "▆".repeat(5)),
                String::new(),
            ]
        );
    }

    #[test]
    fn test_expanded_skeleton_differs_from_compact() {
        let compact = rendered(&loading_post_lines(false));
        let expanded = rendered(&loading_post_lines(true));
        assert_ne!(compact, expanded);
        assert_eq!(expanded.len(), 8);
    }

    #[test]
    fn test_skeleton_golden_render() {
        use ratatui::{backend::TestBackend, widgets::Paragraph, Terminal};

        let backend = TestBackend::new(40, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let widget = Paragraph::new(loading_post_lines(false));
                frame.render_widget(widget, frame.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..40)
                .map(|x| buffer.cell((x, y)).unwrap().symbol().to_string())
                .collect()
        };

        assert_eq!(row(0).trim_end(), "▆▆▆▆▆▆▆▆▆▆ ▆▆▆▆▆▆▆▆▆▆▆▆▆▆");
        assert_eq!(row(1).trim_end(), format!("  {}", "▆".repeat(32)));
        assert_eq!(
            row(2).trim_end(),
            format!("  {0}   {0}   {0}", "▆".repeat(5))
        );
        assert_eq!(row(3).trim_end(), "");
    }
}
