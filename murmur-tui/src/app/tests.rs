use super::*;
use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use murmur_types::*;

use crate::api::{ApiError, ApiResult, Gateway};
use crate::app::handlers::handle_key_event;

/// Gateway stub that records call names and fails every request, so
/// tests can assert which collaborator calls a flow did (not) make.
struct StubGateway {
    calls: Mutex<Vec<String>>,
}

impl StubGateway {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }
}

#[async_trait]
impl Gateway for StubGateway {
    async fn get_session(&self) -> ApiResult<SessionResponse> {
        self.record("get_session");
        Err(ApiError::Unauthorized("no session".to_string()))
    }

    async fn get_feed(&self, _limit: Option<i32>) -> ApiResult<Vec<MessageId>> {
        self.record("get_feed");
        Ok(Vec::new())
    }

    async fn get_message(&self, id: &str) -> ApiResult<Message> {
        self.record(&format!("get_message:{}", id));
        Err(ApiError::NotFound(id.to_string()))
    }

    async fn get_meta(&self, id: &str) -> ApiResult<Meta> {
        self.record(&format!("get_meta:{}", id));
        Err(ApiError::NotFound(id.to_string()))
    }

    async fn get_replies(&self, id: &str) -> ApiResult<Vec<Message>> {
        self.record(&format!("get_replies:{}", id));
        Ok(Vec::new())
    }

    async fn get_user(&self, address: &str) -> ApiResult<User> {
        self.record(&format!("get_user:{}", address));
        Err(ApiError::NotFound(address.to_string()))
    }

    async fn submit_post(&self, _reference: Option<&str>, _content: String) -> ApiResult<Message> {
        self.record("submit_post");
        Err(ApiError::Unauthorized("not logged in".to_string()))
    }

    async fn submit_repost(&self, _reference: &str) -> ApiResult<Message> {
        self.record("submit_repost");
        Err(ApiError::Unauthorized("not logged in".to_string()))
    }

    async fn submit_moderation(
        &self,
        _reference: &str,
        _subtype: ModerationSubtype,
    ) -> ApiResult<Meta> {
        self.record("submit_moderation");
        Err(ApiError::Unauthorized("not logged in".to_string()))
    }
}

/// Helper to create a KeyEvent
fn key_event(code: KeyCode) -> KeyEvent {
    let mut event = KeyEvent::new(code, KeyModifiers::empty());
    event.kind = KeyEventKind::Press;
    event
}

fn message(id: &str, creator: &str, subtype: MessageSubtype, reference: Option<&str>) -> Message {
    Message {
        id: id.to_string(),
        creator: creator.to_string(),
        subtype,
        payload: MessagePayload {
            content: "gm world".to_string(),
            reference: reference.map(str::to_string),
        },
        created_at: Utc::now(),
    }
}

fn user(address: &str, ens: Option<&str>, name: &str) -> User {
    User {
        address: address.to_string(),
        ens: ens.map(str::to_string),
        name: name.to_string(),
    }
}

/// App with one loaded post ("m1" by alice) selected in the feed.
fn seeded_app() -> App {
    let mut app = App::new(Box::new(StubGateway::new()));
    app.store.dispatch(Action::MessageLoaded(message(
        "m1",
        "0xa11ce",
        MessageSubtype::Post,
        None,
    )));
    app.store.dispatch(Action::UserLoaded(user(
        "0xa11ce",
        Some("alice.eth"),
        "Alice",
    )));
    app.store
        .dispatch(Action::FeedLoaded(vec!["m1".to_string()]));
    app.feed_state.list_state.select(Some(0));
    app
}

#[tokio::test]
async fn test_escape_closes_help_first() {
    let mut app = seeded_app();
    app.show_help = true;

    handle_key_event(&mut app, key_event(KeyCode::Esc))
        .await
        .unwrap();

    assert!(!app.show_help, "Help modal should be closed");
    assert!(app.running, "App should still be running");
}

#[tokio::test]
async fn test_question_mark_toggles_help() {
    let mut app = seeded_app();

    handle_key_event(&mut app, key_event(KeyCode::Char('?')))
        .await
        .unwrap();
    assert!(app.show_help, "Help modal should be open");

    handle_key_event(&mut app, key_event(KeyCode::Char('?')))
        .await
        .unwrap();
    assert!(!app.show_help, "Help modal should be closed");
}

#[tokio::test]
async fn test_escape_closes_composer_before_exiting() {
    let mut app = seeded_app();
    app.open_reply_composer();
    assert!(app.composer.is_open());

    handle_key_event(&mut app, key_event(KeyCode::Esc))
        .await
        .unwrap();

    assert!(!app.composer.is_open(), "Composer should be closed");
    assert!(app.running, "App should still be running");
}

#[tokio::test]
async fn test_escape_exits_at_feed_root() {
    let mut app = seeded_app();

    handle_key_event(&mut app, key_event(KeyCode::Esc))
        .await
        .unwrap();

    assert!(!app.running, "App should stop running");
}

#[tokio::test]
async fn test_escape_returns_from_profile_to_feed() {
    let mut app = seeded_app();
    app.goto_profile();
    assert!(matches!(app.route, Route::Profile(_)));

    handle_key_event(&mut app, key_event(KeyCode::Esc))
        .await
        .unwrap();

    assert_eq!(app.route, Route::Feed);
    assert!(app.profile_view.is_none());
    assert!(app.running);
}

#[test]
fn test_composer_binds_to_resolved_id() {
    let mut app = seeded_app();
    app.store.dispatch(Action::MessageLoaded(message(
        "m2",
        "0xb0b",
        MessageSubtype::Repost,
        Some("m1"),
    )));
    app.store
        .dispatch(Action::FeedLoaded(vec!["m2".to_string()]));
    app.feed_state.list_state.select(Some(0));

    app.open_reply_composer();

    // The reply targets the referenced message, not the repost wrapper.
    assert_eq!(app.composer.target.as_deref(), Some("m1"));
}

#[test]
fn test_composer_input_mirrors_draft_slice() {
    let mut app = seeded_app();
    app.open_reply_composer();

    app.handle_composer_input(key_event(KeyCode::Char('h')));
    app.handle_composer_input(key_event(KeyCode::Char('i')));

    assert_eq!(
        app.store.drafts.draft("m1").map(|d| d.content.as_str()),
        Some("hi")
    );
}

#[test]
fn test_draft_retained_across_close_and_reopen() {
    let mut app = seeded_app();
    app.open_reply_composer();
    app.handle_composer_input(key_event(KeyCode::Char('w')));
    app.handle_composer_input(key_event(KeyCode::Char('i')));
    app.handle_composer_input(key_event(KeyCode::Char('p')));

    app.close_composer();
    assert!(!app.composer.is_open());

    app.open_reply_composer();
    assert_eq!(app.composer.get_content(), "wip");
}

#[tokio::test]
async fn test_submit_is_noop_while_in_flight() {
    let mut app = seeded_app();
    app.open_reply_composer();
    app.handle_composer_input(key_event(KeyCode::Char('x')));
    app.store
        .dispatch(Action::SubmitStarted("m1".to_string()));

    app.submit_reply().await.unwrap();

    // Still marked in flight, modal still open, no error from a second
    // attempt: the guard swallowed it.
    assert!(app.store.drafts.is_submitting("m1"));
    assert!(app.composer.is_open());
    assert!(app.composer.error.is_none());
}

#[tokio::test]
async fn test_submit_failure_surfaces_in_modal_and_keeps_draft() {
    let mut app = seeded_app();
    app.open_reply_composer();
    app.handle_composer_input(key_event(KeyCode::Char('y')));
    app.handle_composer_input(key_event(KeyCode::Char('o')));

    app.submit_reply().await.unwrap();

    assert!(app.composer.is_open(), "Modal stays open for retry");
    assert!(app.composer.error.is_some(), "Failure must be visible");
    assert_eq!(
        app.store.drafts.draft("m1").map(|d| d.content.as_str()),
        Some("yo"),
        "Draft must not be lost on failure"
    );
    assert!(
        !app.store.drafts.is_submitting("m1"),
        "In-flight guard must settle"
    );
}

#[tokio::test]
async fn test_empty_reply_rejected_locally() {
    let mut app = seeded_app();
    app.open_reply_composer();

    app.submit_reply().await.unwrap();

    assert!(app.composer.error.is_some());
    assert!(app.composer.is_open());
}

#[tokio::test]
async fn test_like_logged_out_leaves_counts_unchanged() {
    let mut app = seeded_app();
    let before = app.store.posts.meta("m1");

    app.toggle_like().await.unwrap();

    assert_eq!(app.store.posts.meta("m1"), before);
    assert!(
        app.feed_state.message.is_some(),
        "Viewer is told to connect a wallet"
    );
}

#[tokio::test]
async fn test_repost_rollback_on_failure() {
    let mut app = seeded_app();
    app.store.dispatch(Action::SessionConnected {
        address: "0xv1ewer".to_string(),
        ens: None,
    });
    let before = app.store.posts.meta("m1");

    // StubGateway rejects the submit, so the optimistic bump must revert.
    app.toggle_repost().await.unwrap();

    assert_eq!(app.store.posts.meta("m1"), before);
}

#[test]
fn test_goto_profile_noop_without_ens() {
    let mut app = seeded_app();
    app.store.dispatch(Action::MessageLoaded(message(
        "m9",
        "0xanon",
        MessageSubtype::Post,
        None,
    )));
    app.store
        .dispatch(Action::UserLoaded(user("0xanon", None, "anon")));
    app.store
        .dispatch(Action::FeedLoaded(vec!["m9".to_string()]));
    app.feed_state.list_state.select(Some(0));

    app.goto_profile();

    assert_eq!(app.route, Route::Feed, "Missing handle must not navigate");
    assert!(app.profile_view.is_none());
}

#[test]
fn test_repost_card_renders_attribution_line() {
    let mut app = seeded_app();
    app.store.dispatch(Action::MessageLoaded(message(
        "m2",
        "0xb0b",
        MessageSubtype::Repost,
        Some("m1"),
    )));
    app.store
        .dispatch(Action::UserLoaded(user("0xb0b", Some("bob.eth"), "Bob")));

    let text_of = |line: &ratatui::text::Line<'_>| -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    };

    let compact = crate::ui::post::regular_post_lines(&app, "m2", 80, false, false);
    assert!(
        text_of(&compact[0]).contains("Bob reposted"),
        "compact card must open with the reposter attribution"
    );

    let expanded = crate::ui::post::expanded_post_lines(&app, "m2", 80);
    assert!(
        text_of(&expanded[0]).contains("Bob reposted"),
        "expanded card must open with the reposter attribution"
    );
    // The body below the attribution is the referenced post's content.
    let body: String = expanded.iter().map(|l| text_of(l)).collect();
    assert!(body.contains("gm world"));
}

#[test]
fn test_card_phase_state_machine() {
    let mut app = App::new(Box::new(StubGateway::new()));
    assert_eq!(app.card_phase("m1"), CardPhase::Unresolved);

    app.store
        .dispatch(Action::FetchStarted("m1".to_string()));
    assert_eq!(app.card_phase("m1"), CardPhase::Loading);

    app.store.dispatch(Action::FetchSettled("m1".to_string()));
    app.store.dispatch(Action::MessageLoaded(message(
        "m1",
        "0xa11ce",
        MessageSubtype::Post,
        None,
    )));
    // Message present but the author is still unresolved
    assert_eq!(app.card_phase("m1"), CardPhase::Loading);

    app.store.dispatch(Action::UserLoaded(user(
        "0xa11ce",
        Some("alice.eth"),
        "Alice",
    )));
    assert_eq!(app.card_phase("m1"), CardPhase::Loaded);
}
