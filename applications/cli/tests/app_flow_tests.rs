//! End-to-end flows of the front end against mock services
//!
//! The identity provider and the catalog backend are wiremock servers; audio
//! goes to an in-memory output.

use soundboard_cli::{App, AppConfig, Command, Flow, PreferencesStore, Target, Theme};
use soundboard_core::SessionToken;
use soundboard_playback::{
    AudioOutput, PlaybackError, PlaybackEvent, PlaybackState, Result as PlaybackResult,
};
use soundboard_session::{FileSessionStore, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sources named `rejected.mp3` fail on `play`; `missing.mp3` fails while loading
#[derive(Default)]
struct MemoryOutput {
    source: Option<String>,
    load_error: Option<String>,
}

impl AudioOutput for MemoryOutput {
    fn play(&mut self, url: &str) -> PlaybackResult<()> {
        if url == "rejected.mp3" {
            return Err(PlaybackError::OutputUnavailable("device gone".into()));
        }
        if url == "missing.mp3" {
            self.load_error = Some("file not found".into());
        }
        self.source = Some(url.to_string());
        Ok(())
    }

    fn stop(&mut self) {
        self.source = None;
    }

    fn take_error(&mut self) -> Option<String> {
        self.load_error.take()
    }

    fn source(&self) -> Option<String> {
        self.source.clone()
    }

    fn position(&self) -> Duration {
        Duration::ZERO
    }

    fn duration(&self) -> Option<Duration> {
        None
    }

    fn is_finished(&self) -> bool {
        false
    }
}

struct Harness {
    _dir: TempDir,
    store: Arc<FileSessionStore>,
    app: App<MemoryOutput>,
}

fn catalog_body() -> serde_json::Value {
    serde_json::json!({
        "soundList": {
            "Air Horn": {"messageId": "m1", "url": "a.mp3", "volume": 0, "channelId": "c1"},
            "Boo":      {"messageId": "m2", "url": "b.mp3", "volume": 5, "channelId": "c1"}
        }
    })
}

fn profile_body() -> serde_json::Value {
    serde_json::json!({"id": "42", "username": "alice", "avatar": null})
}

fn harness(server: &MockServer, clear_on_unauthorized: bool, stored: Option<&str>) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::from_toml(&format!(
        r#"
        [oauth]
        client_id = "1234"

        [identity]
        api_base = "{uri}"

        [catalog]
        backend_url = "{uri}"
        guild_id = "g1"

        [session]
        clear_on_unauthorized = {clear}
        "#,
        uri = server.uri(),
        clear = clear_on_unauthorized,
    ))
    .unwrap();
    config.validate().unwrap();

    let store = Arc::new(FileSessionStore::in_dir(dir.path()));
    if let Some(token) = stored {
        store.save(&SessionToken::new(token)).unwrap();
    }

    let app = App::new(
        config,
        store.clone(),
        PreferencesStore::in_dir(dir.path()),
        MemoryOutput::default(),
    )
    .unwrap();

    Harness {
        _dir: dir,
        store,
        app,
    }
}

async fn mount_happy_services(server: &MockServer) {
    mount_services(server, catalog_body()).await;
}

async fn mount_services(server: &MockServer, catalog: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("guildID", "g1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_stored_token_logs_in_without_redirect() {
    let server = MockServer::start().await;
    mount_happy_services(&server).await;
    let mut h = harness(&server, false, Some("stored-token"));

    h.app.start(None).unwrap();
    h.app.settle().await.unwrap();

    let view = h.app.view();
    assert!(view.is_logged_in());
    assert_eq!(view.cards().len(), 2);
    assert_eq!(h.app.context().user().unwrap().username, "alice");
    assert!(view.to_string().contains("alice"));
}

#[tokio::test]
async fn test_no_token_renders_only_login_control() {
    let server = MockServer::start().await;
    let mut h = harness(&server, false, None);

    h.app.start(None).unwrap();

    let view = h.app.view();
    assert!(!view.is_logged_in());
    assert!(view.to_string().contains("client_id=1234"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_redirect_at_startup_is_saved_and_used() {
    let server = MockServer::start().await;
    mount_happy_services(&server).await;
    let mut h = harness(&server, false, None);

    h.app
        .start(Some("http://localhost:3000/#token_type=Bearer&access_token=stored-token"))
        .unwrap();
    h.app.settle().await.unwrap();

    assert_eq!(h.store.load().unwrap().unwrap().as_str(), "stored-token");
    assert_eq!(h.app.context().catalog().len(), 2);
}

#[tokio::test]
async fn test_denied_redirect_stays_logged_out() {
    let server = MockServer::start().await;
    let mut h = harness(&server, false, None);

    h.app
        .start(Some("http://localhost:3000/#error=access_denied"))
        .unwrap();

    assert!(!h.app.context().is_logged_in());
    assert!(h.store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_search_and_play_by_position() {
    let server = MockServer::start().await;
    mount_happy_services(&server).await;
    let mut h = harness(&server, false, Some("stored-token"));
    h.app.start(None).unwrap();
    h.app.settle().await.unwrap();

    let mut out = Vec::new();
    h.app
        .handle_command(Command::Search("air".into()), &mut out)
        .unwrap();
    let cards = h.app.view().cards().to_vec();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].key, "Air Horn");
    assert_eq!(cards[0].volume_label, "Default");

    h.app
        .handle_command(Command::Play(Target::Index(1)), &mut out)
        .unwrap();
    assert_eq!(
        h.app.controller().state(),
        &PlaybackState::Playing {
            key: "Air Horn".into()
        }
    );
    assert_eq!(h.app.controller().output().source().as_deref(), Some("a.mp3"));

    // Switching replaces the source
    h.app.select(&Target::Key("Boo".into())).unwrap();
    assert_eq!(h.app.controller().output().source().as_deref(), Some("b.mp3"));

    // Selecting it again stops it
    h.app.select(&Target::Key("Boo".into())).unwrap();
    assert_eq!(h.app.controller().state(), &PlaybackState::Idle);
    assert_eq!(h.app.controller().progress(), 0.0);

    assert!(h.app.select(&Target::Index(5)).is_err());
    assert!(h.app.select(&Target::Key("Nope".into())).is_err());
}

#[tokio::test]
async fn test_logout_clears_state_and_storage() {
    let server = MockServer::start().await;
    mount_happy_services(&server).await;
    let mut h = harness(&server, false, Some("stored-token"));
    h.app.start(None).unwrap();
    h.app.settle().await.unwrap();
    h.app.select(&Target::Key("Boo".into())).unwrap();

    let mut out = Vec::new();
    h.app.handle_command(Command::Logout, &mut out).unwrap();

    assert!(!h.app.context().is_logged_in());
    assert!(h.app.context().catalog().is_empty());
    assert!(h.app.context().user().is_none());
    assert!(h.app.context().error().is_none());
    assert!(h.app.controller().output().source().is_none());
    assert!(h.store.load().unwrap().is_none());
    assert!(!h.app.view().is_logged_in());
}

#[tokio::test]
async fn test_results_arriving_after_logout_are_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(profile_body())
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(catalog_body())
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    let mut h = harness(&server, false, Some("stored-token"));

    h.app.start(None).unwrap();
    h.app.logout().unwrap();
    h.app.settle().await.unwrap();

    assert!(h.app.context().catalog().is_empty());
    assert!(h.app.context().user().is_none());
    assert!(!h.app.view().is_logged_in());
}

#[tokio::test]
async fn test_catalog_failure_shows_banner_and_keeps_catalog() {
    let server = MockServer::start().await;
    mount_happy_services(&server).await;
    let mut h = harness(&server, false, Some("stored-token"));
    h.app.start(None).unwrap();
    h.app.settle().await.unwrap();
    assert_eq!(h.app.context().catalog().len(), 2);

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    assert!(h.app.refresh());
    h.app.settle().await.unwrap();

    let view = h.app.view();
    assert!(view.error().is_some());
    assert_eq!(view.cards().len(), 2);
}

#[tokio::test]
async fn test_profile_failure_is_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_body()))
        .mount(&server)
        .await;
    let mut h = harness(&server, false, Some("stored-token"));

    h.app.start(None).unwrap();
    h.app.settle().await.unwrap();

    let view = h.app.view();
    assert!(view.is_logged_in());
    assert!(view.error().is_none());
    assert!(h.app.context().user().is_none());
    assert_eq!(view.cards().len(), 2);
}

#[tokio::test]
async fn test_unauthorized_keeps_session_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let mut h = harness(&server, false, Some("stored-token"));

    h.app.start(None).unwrap();
    h.app.settle().await.unwrap();

    assert!(h.app.context().is_logged_in());
    assert!(h.app.view().error().is_some());
    assert!(h.store.load().unwrap().is_some());
}

#[tokio::test]
async fn test_unauthorized_logs_out_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let mut h = harness(&server, true, Some("stored-token"));

    h.app.start(None).unwrap();
    h.app.settle().await.unwrap();

    assert!(!h.app.context().is_logged_in());
    assert!(h.store.load().unwrap().is_none());
    assert!(!h.app.view().is_logged_in());
}

#[tokio::test]
async fn test_login_command_with_redirect() {
    let server = MockServer::start().await;
    mount_happy_services(&server).await;
    let mut h = harness(&server, false, None);
    h.app.start(None).unwrap();

    let mut out = Vec::new();
    let flow = h
        .app
        .handle_command(
            Command::Login(Some("#access_token=stored-token".into())),
            &mut out,
        )
        .unwrap();
    h.app.settle().await.unwrap();

    assert_eq!(flow, Flow::Continue);
    assert_eq!(h.app.context().catalog().len(), 2);
    assert!(h
        .app
        .handle_command(Command::Login(Some("http://localhost:3000/".into())), &mut out)
        .is_err());
}

#[tokio::test]
async fn test_theme_toggle_persists() {
    let server = MockServer::start().await;
    let mut h = harness(&server, false, None);
    assert_eq!(h.app.theme(), Theme::Light);

    let mut out = Vec::new();
    h.app.handle_command(Command::Theme, &mut out).unwrap();

    assert_eq!(h.app.theme(), Theme::Dark);
    let saved = PreferencesStore::in_dir(h.store.path().parent().unwrap()).load();
    assert_eq!(saved.theme, Theme::Dark);
}

#[tokio::test]
async fn test_quit_and_logged_out_errors() {
    let server = MockServer::start().await;
    let mut h = harness(&server, false, None);
    let mut out = Vec::new();

    assert!(h.app.handle_command(Command::Refresh, &mut out).is_err());
    assert!(h
        .app
        .handle_command(Command::Play(Target::Index(1)), &mut out)
        .is_err());
    assert_eq!(
        h.app.handle_command(Command::Quit, &mut out).unwrap(),
        Flow::Quit
    );
}

fn failing_catalog_body() -> serde_json::Value {
    serde_json::json!({
        "soundList": {
            "Gone":   {"messageId": "m1", "url": "missing.mp3", "channelId": "c1"},
            "Broken": {"messageId": "m2", "url": "rejected.mp3", "channelId": "c1"}
        }
    })
}

#[tokio::test]
async fn test_failed_load_is_reported_as_error_once() {
    let server = MockServer::start().await;
    mount_services(&server, failing_catalog_body()).await;
    let mut h = harness(&server, false, Some("stored-token"));
    h.app.start(None).unwrap();
    h.app.settle().await.unwrap();

    h.app.select(&Target::Key("Gone".into())).unwrap();
    let events = h.app.tick();

    assert!(events
        .iter()
        .all(|event| !matches!(event, PlaybackEvent::Finished { .. })));
    let errors: Vec<&PlaybackEvent> = events
        .iter()
        .filter(|event| matches!(event, PlaybackEvent::Error { .. }))
        .collect();
    assert_eq!(
        errors,
        vec![&PlaybackEvent::Error {
            key: "Gone".into(),
            message: "file not found".into()
        }]
    );
    assert_eq!(h.app.controller().state(), &PlaybackState::Idle);
    assert!(h.app.tick().is_empty());
}

#[tokio::test]
async fn test_rejected_play_is_returned_not_queued() {
    let server = MockServer::start().await;
    mount_services(&server, failing_catalog_body()).await;
    let mut h = harness(&server, false, Some("stored-token"));
    h.app.start(None).unwrap();
    h.app.settle().await.unwrap();

    let mut out = Vec::new();
    let result = h
        .app
        .handle_command(Command::Play(Target::Key("Broken".into())), &mut out);

    assert!(result.is_err());
    assert_eq!(h.app.controller().state(), &PlaybackState::Idle);
    assert!(h
        .app
        .tick()
        .iter()
        .all(|event| !matches!(event, PlaybackEvent::Error { .. })));
}
