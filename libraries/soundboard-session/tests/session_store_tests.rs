//! Tests for the file-backed session store and the startup redirect handshake.

use soundboard_core::SessionToken;
use soundboard_session::{
    consume_redirect, FileSessionStore, MemorySessionStore, SessionError, SessionStore,
    SESSION_FILE_NAME,
};
use tempfile::TempDir;

// =============================================================================
// File Store Tests
// =============================================================================

mod file_store {
    use super::*;

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());

        store.save(&SessionToken::new("token-1")).unwrap();

        assert_eq!(store.path(), dir.path().join(SESSION_FILE_NAME));
        assert_eq!(store.load().unwrap().unwrap().as_str(), "token-1");
    }

    #[test]
    fn test_survives_new_store_instance() {
        let dir = TempDir::new().unwrap();
        FileSessionStore::in_dir(dir.path())
            .save(&SessionToken::new("persisted"))
            .unwrap();

        // A fresh instance stands in for a process restart
        let reopened = FileSessionStore::in_dir(dir.path());
        assert_eq!(reopened.load().unwrap().unwrap().as_str(), "persisted");
    }

    #[test]
    fn test_save_replaces_previous_token() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());

        store.save(&SessionToken::new("old")).unwrap();
        store.save(&SessionToken::new("new")).unwrap();

        assert_eq!(store.load().unwrap().unwrap().as_str(), "new");
    }

    #[test]
    fn test_clear_removes_token() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());

        store.save(&SessionToken::new("token")).unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_without_token_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());

        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileSessionStore::in_dir(&nested);

        store.save(&SessionToken::new("token")).unwrap();
        assert!(nested.join(SESSION_FILE_NAME).exists());
    }

    #[test]
    fn test_corrupt_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_empty_token_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());
        std::fs::write(store.path(), r#"{"token": "  "}"#).unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());
        store.save(&SessionToken::new("token")).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

// =============================================================================
// Redirect Handshake Tests
// =============================================================================

mod redirect {
    use super::*;

    #[test]
    fn test_consume_saves_token() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());

        let token = consume_redirect(
            &store,
            Some("http://localhost:3000/#token_type=Bearer&access_token=from-redirect"),
        )
        .unwrap();

        assert_eq!(token.unwrap().as_str(), "from-redirect");
        assert_eq!(store.load().unwrap().unwrap().as_str(), "from-redirect");
    }

    #[test]
    fn test_consume_without_input_is_noop() {
        let store = MemorySessionStore::with_token("existing");

        let token = consume_redirect(&store, None).unwrap();

        assert!(token.is_none());
        assert_eq!(store.load().unwrap().unwrap().as_str(), "existing");
    }

    #[test]
    fn test_consume_without_fragment_keeps_existing_token() {
        let store = MemorySessionStore::with_token("existing");

        let token = consume_redirect(&store, Some("http://localhost:3000/")).unwrap();

        assert!(token.is_none());
        assert_eq!(store.load().unwrap().unwrap().as_str(), "existing");
    }

    #[test]
    fn test_consume_is_idempotent() {
        let store = MemorySessionStore::new();
        let redirect = "http://localhost:3000/#access_token=abc";

        consume_redirect(&store, Some(redirect)).unwrap();
        consume_redirect(&store, Some(redirect)).unwrap();

        assert_eq!(store.load().unwrap().unwrap().as_str(), "abc");
    }

    #[test]
    fn test_consume_error_leaves_store_untouched() {
        let store = MemorySessionStore::new();

        let result = consume_redirect(&store, Some("http://localhost:3000/#error=access_denied"));

        assert!(matches!(result, Err(SessionError::OAuthDenied(_))));
        assert!(store.load().unwrap().is_none());
    }
}
