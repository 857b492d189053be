use std::fmt::{Debug, Formatter};
use std::sync::Mutex;

use crate::utils::Redact;

/// SessionStore keeps the per-session state the client reads on every call.
///
/// The client only reads from the store while performing a request; writes
/// come from session lifecycle flows such as [`crate::Session`]. Implementations
/// shared between tasks must provide their own synchronization.
pub trait SessionStore: Debug + Send + Sync + 'static {
    /// Current session token, if any.
    fn session_token(&self) -> Option<String>;

    /// Username bound to the current session, if any.
    fn username(&self) -> Option<String>;

    /// Unix timestamp at which the current session expires, if known.
    fn session_expires(&self) -> Option<i64>;

    /// Replace the session token.
    fn set_session_token(&self, token: &str);

    /// Replace the session expiry.
    fn set_session_expires(&self, expires: i64);

    /// Replace the username.
    fn set_username(&self, username: &str);

    /// Forget the token, the username and the expiry.
    fn purge_session(&self);

    /// Check if there is no usable session token.
    fn is_session_empty(&self) -> bool {
        self.session_token().map_or(true, |v| v.is_empty())
    }

    /// Check if there is no username.
    fn is_username_empty(&self) -> bool {
        self.username().map_or(true, |v| v.is_empty())
    }
}

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    username: Option<String>,
    expires: Option<i64>,
}

/// MemorySessionStore keeps the session in process memory.
///
/// This is the store a [`crate::Client`] starts with.
#[derive(Default)]
pub struct MemorySessionStore {
    state: Mutex<SessionState>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an existing session token.
    pub fn with_session_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.state.lock().expect("lock poisoned").token = Some(token.into());
        store
    }
}

impl Debug for MemorySessionStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().expect("lock poisoned");
        f.debug_struct("MemorySessionStore")
            .field("token", &state.token.as_ref().map(Redact::from))
            .field("username", &state.username)
            .field("expires", &state.expires)
            .finish()
    }
}

impl SessionStore for MemorySessionStore {
    fn session_token(&self) -> Option<String> {
        self.state.lock().expect("lock poisoned").token.clone()
    }

    fn username(&self) -> Option<String> {
        self.state.lock().expect("lock poisoned").username.clone()
    }

    fn session_expires(&self) -> Option<i64> {
        self.state.lock().expect("lock poisoned").expires
    }

    fn set_session_token(&self, token: &str) {
        self.state.lock().expect("lock poisoned").token = Some(token.to_string());
    }

    fn set_session_expires(&self, expires: i64) {
        self.state.lock().expect("lock poisoned").expires = Some(expires);
    }

    fn set_username(&self, username: &str) {
        self.state.lock().expect("lock poisoned").username = Some(username.to_string());
    }

    fn purge_session(&self) {
        *self.state.lock().expect("lock poisoned") = SessionState::default();
    }
}
