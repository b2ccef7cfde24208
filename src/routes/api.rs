use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use usergate_user::UserClaims;

use crate::routes::AppState;

#[derive(Serialize)]
pub struct UserWithToken {
    pub id: String,
    pub username: String,
    pub token: String,
}

/// GET /api/users - Every user with a freshly minted bearer token
pub async fn users(State(state): State<AppState>) -> Response {
    match list_with_tokens(&state).await {
        Ok(data) => (StatusCode::OK, Json(json!({"success": true, "data": data}))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch users");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": "Failed to fetch users"})),
            )
                .into_response()
        }
    }
}

async fn list_with_tokens(state: &AppState) -> usergate_user::Result<Vec<UserWithToken>> {
    let users = state.user_command.list().await?;

    users
        .into_iter()
        .map(|user| {
            let token = state.tokens.issue(&UserClaims {
                id: user.id.to_owned(),
                username: user.username.to_owned(),
            })?;

            Ok(UserWithToken {
                id: user.id,
                username: user.username,
                token,
            })
        })
        .collect()
}
