//! Server-side sessions keyed by an opaque cookie value.
//!
//! Sessions live in a [`SessionStore`] injected through [`AppState`]; the default
//! [`MemorySessionStore`] keeps them in process memory with no expiry.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::routes::AppState;
use crate::template::{ServerErrorTemplate, render_error};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub username: Option<String>,
}

impl Session {
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            username: Some(username.into()),
        }
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session for `id`, storing a fresh anonymous one if unseen.
    async fn get(&self, id: &str) -> anyhow::Result<Session>;

    async fn set(&self, id: &str, session: Session) -> anyhow::Result<()>;

    /// Removes the session; a later `get` starts over as anonymous.
    async fn destroy(&self, id: &str) -> anyhow::Result<()>;

    async fn authenticate(&self, id: &str, username: String) -> anyhow::Result<()> {
        self.set(id, Session::authenticated(username)).await
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &str) -> anyhow::Result<Session> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return Ok(session.clone());
        }

        Ok(self
            .sessions
            .write()
            .await
            .entry(id.to_owned())
            .or_default()
            .clone())
    }

    async fn set(&self, id: &str, session: Session) -> anyhow::Result<()> {
        self.sessions.write().await.insert(id.to_owned(), session);

        Ok(())
    }

    async fn destroy(&self, id: &str) -> anyhow::Result<()> {
        self.sessions.write().await.remove(id);

        Ok(())
    }
}

/// Session id of the current request, set by [`session_middleware`].
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// Makes sure every request carries a session id, issuing the cookie when the
/// client did not send one.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session.cookie_name.to_owned();

    let existing = jar
        .get(&cookie_name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty());

    if let Some(id) = existing {
        req.extensions_mut().insert(SessionId(id));
        return next.run(req).await;
    }

    let id = Ulid::new().to_string();
    req.extensions_mut().insert(SessionId(id.to_owned()));

    let cookie = Cookie::build((cookie_name, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.session.secure)
        .build();

    let response = next.run(req).await;

    (jar.add(cookie), response).into_response()
}

impl<S: Send + Sync> FromRequestParts<S> for SessionId {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<SessionId>().cloned().ok_or_else(|| {
            tracing::error!(path = %parts.uri.path(), "session middleware is not installed");
            render_error(ServerErrorTemplate)
        })
    }
}

/// The current request's session id together with its stored state.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub id: String,
    pub data: Session,
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionId(id) = SessionId::from_request_parts(parts, state).await?;

        let data = state.sessions.get(&id).await.map_err(|e| {
            tracing::error!(error = %e, "failed to load session");
            render_error(ServerErrorTemplate)
        })?;

        Ok(Self { id, data })
    }
}
