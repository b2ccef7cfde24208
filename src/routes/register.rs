use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use usergate_user::{Error, RegisterInput};

use crate::extract::FormOrJson;
use crate::routes::AppState;
use crate::template::render;

#[derive(askama::Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

pub async fn page() -> Response {
    render(RegisterTemplate { error: None })
}

#[derive(Deserialize)]
pub struct ActionInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn action(State(state): State<AppState>, FormOrJson(input): FormOrJson<ActionInput>) -> Response {
    let result = state
        .user_command
        .register(RegisterInput {
            username: input.username,
            password: input.password,
        })
        .await;

    let error = match result {
        Ok(_) => return Redirect::to("/login").into_response(),
        Err(e @ (Error::Validation(_) | Error::DuplicateUsername)) => e.to_string(),
        Err(e) => {
            tracing::error!(error = %e, "failed to create user");
            format!("Error creating user: {e}")
        }
    };

    render(RegisterTemplate { error: Some(error) })
}
