use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use murmur_types::{MessageId, MessageSubtype, ModerationSubtype};
use ratatui::widgets::ListState;
use tui_textarea::TextArea;

use crate::api::Gateway;
use crate::store::{Action, Store};

pub mod state;
pub use state::*;
pub mod handlers;

#[cfg(test)]
mod tests;

impl App {
    pub fn new(gateway: Box<dyn Gateway>) -> Self {
        Self::with_store(gateway, Store::new())
    }

    pub fn with_store(gateway: Box<dyn Gateway>, store: Store) -> Self {
        Self {
            running: true,
            route: Route::Feed,
            gateway,
            store,
            feed_state: FeedState {
                list_state: ListState::default(),
                error: None,
                message: None,
            },
            thread_state: None,
            profile_view: None,
            composer: ComposerState::new(),
            input_mode: InputMode::Navigation,
            show_help: false,
            log_config: crate::logging::LogConfig::default(),
        }
    }

    /// Look up the wallet session. Failure is tolerated: the viewer just
    /// browses logged out and the reaction affordances stay inert.
    pub async fn connect_session(&mut self) -> Result<()> {
        let result = self.gateway.get_session().await;
        match result {
            Ok(session) => {
                let address = session.address.clone();
                self.store.dispatch(Action::SessionConnected {
                    address: session.address,
                    ens: session.ens,
                });
                self.ensure_user(&address).await;
            }
            Err(e) => {
                crate::log_api_call!(self.log_config, "no wallet session: {}", e);
            }
        }
        Ok(())
    }

    /// Load the ordered feed snapshot and warm each visible card.
    pub async fn load_feed(&mut self) -> Result<()> {
        self.store.dispatch(Action::FeedLoading);
        self.feed_state.error = None;

        let result = self.gateway.get_feed(Some(50)).await;
        match result {
            Ok(ids) => {
                self.store.dispatch(Action::FeedLoaded(ids.clone()));
                if ids.is_empty() {
                    self.feed_state.list_state.select(None);
                } else {
                    self.feed_state.list_state.select(Some(0));
                }
                for id in ids {
                    self.ensure_post(&id).await?;
                }
            }
            Err(e) => {
                self.store.dispatch(Action::FeedLoaded(Vec::new()));
                self.feed_state.error = Some(categorize_error(&e.to_string()));
            }
        }
        Ok(())
    }

    /// Fetch a card's message if it is neither cached nor already in
    /// flight, then pull the one-hop repost reference the same way.
    /// Opening a card twice for a cached id issues zero extra fetches.
    pub async fn ensure_post(&mut self, id: &str) -> Result<()> {
        self.fetch_message(id).await;

        let reference = self
            .store
            .posts
            .message(id)
            .filter(|m| m.subtype == MessageSubtype::Repost)
            .and_then(|m| m.payload.reference.clone());
        if let Some(reference) = reference {
            self.fetch_message(&reference).await;
        }
        Ok(())
    }

    /// Check-then-fetch for a single message id, guarded by the posts
    /// slice's in-flight table. Does not follow references.
    async fn fetch_message(&mut self, id: &str) {
        if self.store.posts.message(id).is_some() || self.store.posts.is_fetching(id) {
            return;
        }

        self.store.dispatch(Action::FetchStarted(id.to_string()));
        let result = self.gateway.get_message(id).await;
        self.store.dispatch(Action::FetchSettled(id.to_string()));

        match result {
            Ok(message) => {
                let creator = message.creator.clone();
                self.store.dispatch(Action::MessageLoaded(message));
                self.refresh_meta(id).await;
                self.ensure_user(&creator).await;
            }
            Err(e) => {
                // No explicit error state for a card: it stays on the
                // skeleton, and a later open retries while the message is
                // still absent.
                crate::log_api_call!(self.log_config, "fetch {} failed: {}", id, e);
            }
        }
    }

    /// Pull fresh counters for a message; a failed meta read leaves the
    /// cached (or all-zero) counters in place.
    async fn refresh_meta(&mut self, id: &str) {
        let result = self.gateway.get_meta(id).await;
        if let Ok(meta) = result {
            self.store.dispatch(Action::MetaLoaded {
                id: id.to_string(),
                meta,
            });
        }
    }

    /// Fetch a user record once per address. An absent user renders as
    /// the loading/incognito state, never an error.
    async fn ensure_user(&mut self, address: &str) {
        if self.store.users.user(address).is_some() || self.store.users.is_fetching(address) {
            return;
        }

        self.store
            .dispatch(Action::UserFetchStarted(address.to_string()));
        let result = self.gateway.get_user(address).await;
        self.store
            .dispatch(Action::UserFetchSettled(address.to_string()));

        match result {
            Ok(user) => self.store.dispatch(Action::UserLoaded(user)),
            Err(e) => {
                crate::log_api_call!(self.log_config, "user {} failed: {}", address, e)
            }
        }
    }

    /// Explicit per-card state machine: Unresolved until a fetch is
    /// issued, Loading until both the resolved message and its author
    /// are present, then Loaded.
    pub fn card_phase(&self, id: &str) -> CardPhase {
        match self.store.posts.resolve(id) {
            Some(resolved) => {
                if self.store.users.user(&resolved.display().creator).is_some() {
                    CardPhase::Loaded
                } else {
                    CardPhase::Loading
                }
            }
            None => {
                if self.store.posts.is_fetching(id) || self.store.posts.message(id).is_some() {
                    CardPhase::Loading
                } else {
                    CardPhase::Unresolved
                }
            }
        }
    }

    /// Resolved display id for a card, if it has loaded.
    pub fn display_id_of(&self, id: &str) -> Option<MessageId> {
        self.store
            .posts
            .resolve(id)
            .map(|r| r.display_id().to_string())
    }

    /// Message id under the cursor in the current view.
    pub fn selected_card_id(&self) -> Option<MessageId> {
        match &self.route {
            Route::Feed => {
                let idx = self.feed_state.list_state.selected()?;
                self.store.snapshot.feed.get(idx).cloned()
            }
            Route::Thread(root) => {
                let thread = self.thread_state.as_ref()?;
                match thread.list_state.selected() {
                    Some(0) | None => Some(root.clone()),
                    Some(i) => thread.replies.get(i - 1).cloned(),
                }
            }
            Route::Profile(_) => {
                let profile = self.profile_view.as_ref()?;
                let idx = profile.list_state.selected()?;
                profile.posts.get(idx).cloned()
            }
        }
    }

    fn current_list_len(&self) -> usize {
        match &self.route {
            Route::Feed => self.store.snapshot.feed.len(),
            Route::Thread(_) => self
                .thread_state
                .as_ref()
                .map(|t| t.replies.len() + 1)
                .unwrap_or(0),
            Route::Profile(_) => self
                .profile_view
                .as_ref()
                .map(|p| p.posts.len())
                .unwrap_or(0),
        }
    }

    fn current_list_state_mut(&mut self) -> &mut ListState {
        match &self.route {
            Route::Feed => &mut self.feed_state.list_state,
            Route::Thread(_) => match &mut self.thread_state {
                Some(thread) => &mut thread.list_state,
                None => &mut self.feed_state.list_state,
            },
            Route::Profile(_) => match &mut self.profile_view {
                Some(profile) => &mut profile.list_state,
                None => &mut self.feed_state.list_state,
            },
        }
    }

    pub fn select_next(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }
        let state = self.current_list_state_mut();
        let next = match state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            return;
        }
        let state = self.current_list_state_mut();
        let prev = match state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        state.select(Some(prev));
    }

    /// Open the thread view for the selected card's resolved message.
    pub async fn open_thread(&mut self) -> Result<()> {
        let Some(id) = self.selected_card_id() else {
            return Ok(());
        };
        let Some(display_id) = self.display_id_of(&id) else {
            return Ok(());
        };

        let mut list_state = ListState::default();
        list_state.select(Some(0));
        self.thread_state = Some(ThreadState {
            root: display_id.clone(),
            replies: Vec::new(),
            list_state,
            loading: true,
            error: None,
        });
        self.profile_view = None;
        self.route = Route::Thread(display_id.clone());

        self.load_replies(&display_id).await
    }

    async fn load_replies(&mut self, root: &str) -> Result<()> {
        let result = self.gateway.get_replies(root).await;
        match result {
            Ok(replies) => {
                let ids: Vec<MessageId> = replies.iter().map(|m| m.id.clone()).collect();
                for reply in replies {
                    let id = reply.id.clone();
                    let creator = reply.creator.clone();
                    self.store.dispatch(Action::MessageLoaded(reply));
                    self.refresh_meta(&id).await;
                    self.ensure_user(&creator).await;
                }
                if let Some(thread) = &mut self.thread_state {
                    thread.replies = ids;
                    thread.loading = false;
                }
            }
            Err(e) => {
                let error = categorize_error(&e.to_string());
                if let Some(thread) = &mut self.thread_state {
                    thread.error = Some(error);
                    thread.loading = false;
                }
            }
        }
        Ok(())
    }

    /// Navigate to the selected card author's profile, keyed by their ENS
    /// handle. With no handle this is a guarded no-op, not a broken route.
    pub fn goto_profile(&mut self) {
        let Some(id) = self.selected_card_id() else {
            return;
        };

        let target = {
            let Some(resolved) = self.store.posts.resolve(&id) else {
                return;
            };
            let creator = resolved.display().creator.clone();
            let Some(user) = self.store.users.user(&creator) else {
                return;
            };
            let Some(ens) = user.ens.clone().filter(|e| !e.is_empty()) else {
                return;
            };
            (creator, ens, user.name.clone())
        };
        let (address, ens, name) = target;

        let posts: Vec<MessageId> = self
            .store
            .posts
            .by_creator(&address)
            .iter()
            .map(|m| m.id.clone())
            .collect();

        let mut list_state = ListState::default();
        if !posts.is_empty() {
            list_state.select(Some(0));
        }
        self.thread_state = None;
        self.profile_view = Some(ProfileViewState {
            ens: ens.clone(),
            address,
            name,
            posts,
            list_state,
        });
        self.route = Route::Profile(ens);
    }

    /// Return from a thread or profile to the feed.
    pub fn close_route(&mut self) {
        self.thread_state = None;
        self.profile_view = None;
        self.route = Route::Feed;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Open the reply composer bound to the selected card's resolved id,
    /// prefilled from that id's draft buffer if one was left behind.
    pub fn open_reply_composer(&mut self) {
        let Some(id) = self.selected_card_id() else {
            return;
        };
        let Some(display_id) = self.display_id_of(&id) else {
            return;
        };

        let existing = self
            .store
            .drafts
            .draft(&display_id)
            .map(|d| d.content.clone())
            .unwrap_or_default();
        let mut textarea = TextArea::from(existing.lines());
        textarea.set_hard_tab_indent(true);
        self.composer.textarea = textarea;
        self.composer.target = Some(display_id);
        self.composer.error = None;
        self.input_mode = InputMode::Typing;
    }

    /// Close the composer. The draft buffer stays in the drafts slice so
    /// reopening restores it.
    pub fn close_composer(&mut self) {
        self.composer.target = None;
        self.composer.error = None;
        let mut textarea = TextArea::default();
        textarea.set_hard_tab_indent(true);
        self.composer.textarea = textarea;
        self.input_mode = InputMode::Navigation;
    }

    /// Feed a key into the composer and mirror the buffer into the drafts
    /// slice on every change (no debounce).
    pub fn handle_composer_input(&mut self, key: KeyEvent) {
        if let KeyCode::Char(_c) = key.code {
            if self.composer.char_count() >= self.composer.max_chars {
                // Limit reached; drop the character
                return;
            }
        }

        use tui_textarea::Input;
        let input = Input::from(crossterm::event::Event::Key(key));
        self.composer.textarea.input(input);

        crate::text_wrapper::wrap_textarea_if_needed(
            &mut self.composer.textarea,
            crate::text_wrapper::WrapConfig::COMPOSER,
        );

        if let Some(target) = self.composer.target.clone() {
            self.store.dispatch(Action::DraftChanged {
                id: target,
                content: self.composer.get_content(),
            });
        }
    }

    /// Submit the reply draft. While a submit for the target id is in
    /// flight further attempts are no-ops; on failure the error surfaces
    /// in the modal and the draft is retained for retry.
    pub async fn submit_reply(&mut self) -> Result<()> {
        let Some(target) = self.composer.target.clone() else {
            return Ok(());
        };
        if self.store.drafts.is_submitting(&target) {
            return Ok(());
        }

        let content = self.composer.get_content();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            self.composer.error = Some("Cannot post an empty reply.".to_string());
            return Ok(());
        }
        let parsed_content = crate::emoji::parse_emoji_shortcodes(trimmed);

        self.composer.error = None;
        self.store.dispatch(Action::SubmitStarted(target.clone()));
        let result = self.gateway.submit_post(Some(&target), parsed_content).await;
        self.store.dispatch(Action::SubmitSettled(target.clone()));

        match result {
            Ok(reply) => {
                let reply_id = reply.id.clone();
                let creator = reply.creator.clone();
                self.store.dispatch(Action::MessageLoaded(reply));
                self.refresh_meta(&reply_id).await;
                self.refresh_meta(&target).await;
                self.ensure_user(&creator).await;
                if let Some(thread) = &mut self.thread_state {
                    if thread.root == target && !thread.replies.contains(&reply_id) {
                        thread.replies.push(reply_id);
                    }
                }
                self.store.dispatch(Action::DraftCleared(target));
                self.close_composer();
            }
            Err(e) => {
                self.composer.error = Some(categorize_error(&e.to_string()));
            }
        }
        Ok(())
    }

    /// Like the selected card. Keys on the resolved display id; inert
    /// when logged out; optimistic count bump with rollback on failure.
    pub async fn toggle_like(&mut self) -> Result<()> {
        let Some(id) = self.selected_card_id() else {
            return Ok(());
        };
        if !self.store.web3.logged_in() {
            self.notify("Connect a wallet to react");
            return Ok(());
        }
        let Some(display_id) = self.display_id_of(&id) else {
            return Ok(());
        };

        let original = self.store.posts.meta(&display_id);
        if original.liked {
            // Already liked; reactions are immutable messages, not toggles
            return Ok(());
        }

        let mut optimistic = original.clone();
        optimistic.like_count += 1;
        optimistic.liked = true;
        self.store.dispatch(Action::MetaLoaded {
            id: display_id.clone(),
            meta: optimistic,
        });

        let result = self
            .gateway
            .submit_moderation(&display_id, ModerationSubtype::Like)
            .await;
        match result {
            Ok(meta) => self.store.dispatch(Action::MetaLoaded {
                id: display_id,
                meta,
            }),
            Err(e) => {
                // Revert optimistic update on error
                self.store.dispatch(Action::MetaLoaded {
                    id: display_id,
                    meta: original,
                });
                let error = categorize_error(&e.to_string());
                self.notify(&error);
            }
        }
        Ok(())
    }

    /// Repost the selected card. Same contract as [`App::toggle_like`]:
    /// resolved id, auth gate, optimistic update with rollback.
    pub async fn toggle_repost(&mut self) -> Result<()> {
        let Some(id) = self.selected_card_id() else {
            return Ok(());
        };
        if !self.store.web3.logged_in() {
            self.notify("Connect a wallet to react");
            return Ok(());
        }
        let Some(display_id) = self.display_id_of(&id) else {
            return Ok(());
        };

        let original = self.store.posts.meta(&display_id);
        if original.reposted {
            return Ok(());
        }

        let mut optimistic = original.clone();
        optimistic.repost_count += 1;
        optimistic.reposted = true;
        self.store.dispatch(Action::MetaLoaded {
            id: display_id.clone(),
            meta: optimistic,
        });

        let result = self.gateway.submit_repost(&display_id).await;
        match result {
            Ok(wrapper) => {
                self.store.dispatch(Action::MessageLoaded(wrapper));
                self.refresh_meta(&display_id).await;
            }
            Err(e) => {
                self.store.dispatch(Action::MetaLoaded {
                    id: display_id,
                    meta: original,
                });
                let error = categorize_error(&e.to_string());
                self.notify(&error);
            }
        }
        Ok(())
    }

    pub fn notify(&mut self, message: &str) {
        self.feed_state.message = Some((message.to_string(), Instant::now()));
    }

    /// Expire the transient status message.
    pub fn tick(&mut self) {
        if let Some((_, shown_at)) = &self.feed_state.message {
            if shown_at.elapsed() > Duration::from_secs(3) {
                self.feed_state.message = None;
            }
        }
    }
}

/// Map transport-level errors to user-facing text.
fn categorize_error(error_str: &str) -> String {
    let error_lower = error_str.to_lowercase();

    if error_lower.contains("connection")
        || error_lower.contains("timeout")
        || error_lower.contains("network")
    {
        return "Network Error: Connection failed. Check your network and try again".to_string();
    }

    if error_lower.contains("401")
        || error_lower.contains("403")
        || error_lower.contains("unauthorized")
        || error_lower.contains("forbidden")
    {
        return "Authorization Error: Wallet session expired or missing".to_string();
    }

    if error_lower.contains("400")
        || error_lower.contains("validation")
        || error_lower.contains("invalid")
    {
        return format!("Validation Error: {}", error_str);
    }

    if error_lower.contains("500") || error_lower.contains("502") || error_lower.contains("503") {
        return "Server Error: The relay hit a problem. Try again shortly".to_string();
    }

    error_str.to_string()
}
