use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::get,
};
use usergate_user::TokenIssuer;

use crate::session::{SessionStore, session_middleware};

mod api;
mod dashboard;
mod health;
mod index;
mod login;
mod register;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub user_command: usergate_user::Command,
    pub tokens: TokenIssuer,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(
        config: crate::config::Config,
        user_command: usergate_user::Command,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let tokens = TokenIssuer::new(config.jwt.secret.to_owned(), config.jwt.ttl());

        Self {
            config,
            user_command,
            tokens,
            sessions,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    // Browser pages share the session cookie; the JSON endpoints stay stateless.
    let pages = Router::new()
        .route("/", get(index::page))
        .route("/register", get(register::page).post(register::action))
        .route("/login", get(login::page).post(login::action))
        .route("/logout", get(login::logout))
        .route("/dashboard", get(dashboard::page))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/users", get(api::users))
        .merge(pages)
        .layer(middleware::from_fn(
            crate::middleware::cache_control_middleware,
        ))
        .with_state(app_state)
}
