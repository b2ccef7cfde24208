use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::routes::AppState;
use crate::session::{CurrentSession, Session};

/// Allows authenticated sessions and yields their username; anything else is sent
/// to the login page.
pub fn require_auth(session: &Session) -> Result<&str, Redirect> {
    match (session.is_authenticated, session.username.as_deref()) {
        (true, Some(username)) => Ok(username),
        _ => Err(Redirect::to("/login")),
    }
}

/// Extractor for routes that need a logged-in user.
pub struct RequireAuth(pub String);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = CurrentSession::from_request_parts(parts, state).await?;

        match require_auth(&session.data) {
            Ok(username) => Ok(RequireAuth(username.to_owned())),
            Err(redirect) => {
                tracing::debug!(session = %session.id, "unauthenticated session, redirecting to login");
                Err(redirect.into_response())
            }
        }
    }
}
