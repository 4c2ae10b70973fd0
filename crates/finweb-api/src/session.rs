//! Cookie-identified sessions, each owning one ledger
//!
//! A session is created the first time a browser without a known cookie hits
//! a ledger route, and destroyed on explicit reset or when it has been idle
//! longer than the configured timeout. Eviction happens lazily whenever a new
//! session is created.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use finweb_config::SessionConfig;
use finweb_core::Ledger;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::AppState;

/// One browser session and its ledger
#[derive(Debug)]
pub struct Session {
    ledger: Ledger,
    created_at: Instant,
    last_seen: Instant,
}

impl Session {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            ledger: Ledger::new(),
            created_at: now,
            last_seen: now,
        }
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }
}

/// All live sessions, keyed by cookie value
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    cookie_name: String,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_limits(
            &config.cookie_name,
            Duration::from_secs(config.idle_timeout_minutes.saturating_mul(60)),
            config.max_sessions,
        )
    }

    pub fn with_limits(cookie_name: &str, idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            cookie_name: cookie_name.to_string(),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Find the session named by the cookie, or start a new one
    pub async fn resolve(&self, cookie_id: Option<&str>) -> SessionHandle {
        let mut sessions = self.sessions.write().await;

        if let Some(id) = cookie_id {
            if let Some(session) = sessions.get_mut(id) {
                session.touch();
                return SessionHandle::existing(id, &self.cookie_name);
            }
            log::debug!("Unknown session cookie, starting a new session");
        }

        self.evict(&mut sessions);

        let id = uuid::Uuid::new_v4().to_string();
        sessions.insert(id.clone(), Session::new());
        log::info!("Session started ({} active)", sessions.len());
        SessionHandle::created(id, &self.cookie_name)
    }

    fn evict(&self, sessions: &mut HashMap<String, Session>) {
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for() < self.idle_timeout);

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_seen)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        let evicted = before - sessions.len();
        if evicted > 0 {
            log::debug!("Evicted {} idle session(s)", evicted);
        }
    }

    /// Run `f` against the session's ledger with write access
    ///
    /// A session evicted since it was resolved is recreated empty.
    pub async fn with_ledger<R>(&self, handle: &SessionHandle, f: impl FnOnce(&mut Ledger) -> R) -> R {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(handle.id.clone()).or_insert_with(Session::new);
        session.touch();
        f(&mut session.ledger)
    }

    /// Run `f` against the session's ledger with read access
    pub async fn read_ledger<R>(&self, handle: &SessionHandle, f: impl FnOnce(&Ledger) -> R) -> R {
        let sessions = self.sessions.read().await;
        match sessions.get(&handle.id) {
            Some(session) => f(&session.ledger),
            None => f(&Ledger::new()),
        }
    }

    /// End a session, dropping its ledger
    pub async fn end(&self, id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.remove(id) {
            Some(session) => {
                log::info!(
                    "Session ended after {}s with {} transaction(s)",
                    session.created_at.elapsed().as_secs(),
                    session.ledger.len()
                );
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Read the session id from the request's `Cookie` headers
pub fn session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// The session a request belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: String,
    pub is_new: bool,
    cookie_name: String,
}

impl SessionHandle {
    fn existing(id: &str, cookie_name: &str) -> Self {
        Self { id: id.to_string(), is_new: false, cookie_name: cookie_name.to_string() }
    }

    fn created(id: String, cookie_name: &str) -> Self {
        Self { id, is_new: true, cookie_name: cookie_name.to_string() }
    }

    /// `Set-Cookie` value binding the browser to this session
    pub fn cookie(&self) -> String {
        format!("{}={}; HttpOnly; SameSite=Lax; Path=/", self.cookie_name, self.id)
    }

    /// Add the session cookie to a response if the session was just created
    pub fn attach(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.is_new {
            if let Ok(value) = HeaderValue::from_str(&self.cookie()) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
        response
    }
}

/// `Set-Cookie` value that removes the session cookie from the browser
pub fn expired_cookie(cookie_name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", cookie_name)
}

#[async_trait]
impl FromRequestParts<AppState> for SessionHandle {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let cookie = session_cookie(&parts.headers, state.sessions.cookie_name());
        Ok(state.sessions.resolve(cookie.as_deref()).await)
    }
}
