use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::state::{App, Route};
use crate::log_key_event;

/// Route a key press by surface priority: help modal, then the reply
/// composer, then the current view. Esc closes the topmost surface.
pub async fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    log_key_event!(app.log_config, "key {:?} route {:?}", key.code, app.route);

    // Priority 1: Help modal (highest priority)
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.toggle_help();
        }
        return Ok(());
    }

    // Priority 2: Reply composer. Every key belongs to it while open.
    if app.composer.is_open() {
        match key.code {
            KeyCode::Esc => app.close_composer(),
            KeyCode::Enter => app.submit_reply().await?,
            _ => app.handle_composer_input(key),
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('q') => app.running = false,
        KeyCode::Esc => {
            if app.route == Route::Feed {
                app.running = false;
            } else {
                app.close_route();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Enter => app.open_thread().await?,
        KeyCode::Char('r') => app.open_reply_composer(),
        KeyCode::Char('t') => app.toggle_repost().await?,
        KeyCode::Char('l') => app.toggle_like().await?,
        KeyCode::Char('p') => app.goto_profile(),
        KeyCode::Char('g') => {
            if app.route == Route::Feed {
                app.load_feed().await?;
            }
        }
        _ => {}
    }

    Ok(())
}
