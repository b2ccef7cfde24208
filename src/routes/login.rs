use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use usergate_user::{Error, LoginInput};

use crate::extract::FormOrJson;
use crate::routes::AppState;
use crate::session::SessionId;
use crate::template::{ServerErrorTemplate, render, render_error};

#[derive(askama::Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

pub async fn page() -> Response {
    render(LoginTemplate { error: None })
}

#[derive(Deserialize)]
pub struct ActionInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn action(
    SessionId(sid): SessionId,
    State(state): State<AppState>,
    FormOrJson(input): FormOrJson<ActionInput>,
) -> Response {
    let result = state
        .user_command
        .login(LoginInput {
            username: input.username,
            password: input.password,
        })
        .await;

    let user = match result {
        Ok(user) => user,
        Err(Error::Authentication) => {
            return render(LoginTemplate {
                error: Some("Invalid credentials".to_owned()),
            });
        }
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            return render(LoginTemplate {
                error: Some("Error during login".to_owned()),
            });
        }
    };

    if let Err(e) = state.sessions.authenticate(&sid, user.username).await {
        tracing::error!(error = %e, "failed to store session");
        return render(LoginTemplate {
            error: Some("Error during login".to_owned()),
        });
    }

    tracing::info!(user_id = %user.id, "user logged in");

    Redirect::to("/dashboard").into_response()
}

pub async fn logout(SessionId(sid): SessionId, State(state): State<AppState>) -> Response {
    if let Err(e) = state.sessions.destroy(&sid).await {
        tracing::error!(error = %e, "failed to destroy session");
        return render_error(ServerErrorTemplate);
    }

    Redirect::to("/login").into_response()
}
