use std::time::Instant;

use murmur_types::MessageId;
use ratatui::widgets::ListState;
use tui_textarea::TextArea;

use crate::api::Gateway;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Navigation, // Browsing cards, shortcuts active
    Typing,     // In the composer, shortcuts disabled
}

/// Lifecycle of a single post card. There is no explicit error state; a
/// failed fetch leaves the card on the skeleton and a later open retries
/// while the message is still absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardPhase {
    Unresolved,
    Loading,
    Loaded,
}

/// Where the client is looking. Esc from a thread or profile returns to
/// the feed; Esc from the feed quits.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Feed,
    /// Expanded view of one resolved message plus its replies.
    Thread(MessageId),
    /// Profile keyed by ENS handle.
    Profile(String),
}

/// Reply composer state. `target` is the resolved display id the reply
/// is bound to; the draft buffer itself lives in the drafts slice so it
/// survives close and reopen.
pub struct ComposerState {
    pub target: Option<MessageId>,
    pub textarea: TextArea<'static>,
    pub max_chars: usize,
    /// Submission failure surfaced inside the modal so the draft can be
    /// retried instead of silently lost.
    pub error: Option<String>,
}

impl ComposerState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_hard_tab_indent(true);
        Self {
            target: None,
            textarea,
            max_chars: 500,
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn get_content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn char_count(&self) -> usize {
        crate::emoji::count_characters(&self.get_content())
    }
}

/// Feed view state
pub struct FeedState {
    pub list_state: ListState,
    pub error: Option<String>,
    pub message: Option<(String, Instant)>, // (message, timestamp) - auto-clears after 3 seconds
}

/// Thread view state: the expanded root plus its reply ids in order.
pub struct ThreadState {
    pub root: MessageId,
    pub replies: Vec<MessageId>,
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
}

/// Profile view state for a user reached through their ENS handle.
pub struct ProfileViewState {
    pub ens: String,
    pub address: String,
    pub name: String,
    pub posts: Vec<MessageId>,
    pub list_state: ListState,
}

/// Main application state
pub struct App {
    pub running: bool,
    pub route: Route,
    pub gateway: Box<dyn Gateway>,
    pub store: Store,
    pub feed_state: FeedState,
    pub thread_state: Option<ThreadState>,
    pub profile_view: Option<ProfileViewState>,
    pub composer: ComposerState,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub log_config: crate::logging::LogConfig,
}
