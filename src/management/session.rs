use std::{collections::HashMap, future::Future, sync::Arc};

use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    spotify::{self, SpotifyError},
    types::Token,
    utils,
};

/// Lifetime of a web session, counted from its last login.
pub const SESSION_LIFETIME_SECS: u64 = 60 * 60;

/// Seconds before expiry at which a session token is refreshed.
pub const TOKEN_REFRESH_BUFFER_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Session {
    /// PKCE verifier of a login that has not reached the callback yet.
    pub code_verifier: Option<String>,
    pub token: Option<Token>,
    login_state: Option<String>,
    touched_at: u64,
}

/// A login waiting for Spotify's callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLogin {
    /// Cookie value. Only ever sent in `Set-Cookie`.
    pub session_id: String,
    /// OAuth `state` of the authorization URL.
    pub state: String,
}

#[derive(Debug, Default)]
struct Sessions {
    by_id: HashMap<String, Session>,
    // OAuth state -> session id
    logins: HashMap<String, String>,
}

/// In-memory store of web sessions keyed by session id.
///
/// A login gets its own random OAuth `state`, so the callback can find the
/// session without a cookie and the session id never shows up in a URL.
/// Expired sessions and their pending logins are dropped whenever the store
/// is accessed.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Sessions>>,
    refreshing: Arc<Mutex<()>>,
    lifetime_secs: u64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_lifetime(SESSION_LIFETIME_SECS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifetime(lifetime_secs: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Sessions::default())),
            refreshing: Arc::new(Mutex::new(())),
            lifetime_secs,
        }
    }

    /// Records the verifier of a new login.
    ///
    /// A live `session_id` is reused, anything else gets a fresh id. Each call
    /// issues a new `state` and retires the session's previous one.
    pub async fn begin_login(
        &self,
        session_id: Option<String>,
        code_verifier: String,
    ) -> PendingLogin {
        let mut guard = self.lock().await;
        let Sessions { by_id, logins } = &mut *guard;

        let id = match session_id {
            Some(id) if by_id.contains_key(&id) => id,
            _ => utils::generate_session_id(),
        };
        let state = utils::generate_login_state();

        let session = by_id.entry(id.clone()).or_insert_with(|| Session {
            code_verifier: None,
            token: None,
            login_state: None,
            touched_at: now(),
        });
        if let Some(previous) = session.login_state.replace(state.clone()) {
            logins.remove(&previous);
        }
        session.code_verifier = Some(code_verifier);
        session.touched_at = now();
        logins.insert(state.clone(), id.clone());

        PendingLogin {
            session_id: id,
            state,
        }
    }

    /// Resolves the OAuth `state` of a callback into the session id and its
    /// verifier. A state is good for one call only.
    pub async fn take_login(&self, state: &str) -> Option<(String, String)> {
        let mut guard = self.lock().await;
        let Sessions { by_id, logins } = &mut *guard;

        let id = logins.remove(state)?;
        let session = by_id.get_mut(&id)?;
        session.login_state = None;
        let verifier = session.code_verifier.take()?;
        Some((id, verifier))
    }

    /// Stores `token` in an existing session. Returns `false` for unknown ids.
    pub async fn store_token(&self, session_id: &str, token: Token) -> bool {
        let mut sessions = self.lock().await;
        match sessions.by_id.get_mut(session_id) {
            Some(session) => {
                session.token = Some(token);
                session.touched_at = now();
                true
            }
            None => false,
        }
    }

    pub async fn token(&self, session_id: &str) -> Option<Token> {
        let sessions = self.lock().await;
        sessions.by_id.get(session_id).and_then(|s| s.token.clone())
    }

    pub async fn is_authenticated(&self, session_id: &str) -> bool {
        self.token(session_id).await.is_some()
    }

    /// Returns the session's token, refreshed first when it is within
    /// [`TOKEN_REFRESH_BUFFER_SECS`] of expiry.
    ///
    /// # Errors
    ///
    /// [`SpotifyError::Unauthorized`] when the session has no token; the
    /// refresh error when refreshing fails.
    pub async fn valid_token(&self, session_id: &str) -> Result<Token, SpotifyError> {
        self.valid_token_with(session_id, |refresh| async move {
            spotify::auth::refresh_token(&refresh).await
        })
        .await
    }

    /// [`SessionStore::valid_token`] with the refresh call supplied by the
    /// caller. Refreshes are serialized: a request that waited for another
    /// one's refresh reuses its token.
    pub async fn valid_token_with<F, Fut>(
        &self,
        session_id: &str,
        refresh: F,
    ) -> Result<Token, SpotifyError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Token, SpotifyError>>,
    {
        let token = self
            .token(session_id)
            .await
            .ok_or(SpotifyError::Unauthorized)?;
        if !token.expires_within(TOKEN_REFRESH_BUFFER_SECS) {
            return Ok(token);
        }

        let _refreshing = self.refreshing.lock().await;
        let token = self
            .token(session_id)
            .await
            .ok_or(SpotifyError::Unauthorized)?;
        if !token.expires_within(TOKEN_REFRESH_BUFFER_SECS) {
            return Ok(token);
        }

        let refreshed = refresh(token.refresh_token).await?;
        self.store_token(session_id, refreshed.clone()).await;
        Ok(refreshed)
    }

    pub async fn remove(&self, session_id: &str) -> Option<Session> {
        let mut sessions = self.lock().await;
        let removed = sessions.by_id.remove(session_id)?;
        if let Some(state) = &removed.login_state {
            sessions.logins.remove(state);
        }
        Some(removed)
    }

    pub async fn len(&self) -> usize {
        self.lock().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn lock(&self) -> MutexGuard<'_, Sessions> {
        let mut guard = self.inner.lock().await;
        let now = now();
        let lifetime = self.lifetime_secs;

        let Sessions { by_id, logins } = &mut *guard;
        by_id.retain(|_, s| now < s.touched_at + lifetime);
        logins.retain(|_, id| by_id.contains_key(id));
        guard
    }
}

fn now() -> u64 {
    Utc::now().timestamp() as u64
}
