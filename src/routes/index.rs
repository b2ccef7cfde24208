use axum::response::{IntoResponse, Redirect, Response};

use crate::session::CurrentSession;
use crate::template::render;

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

pub async fn page(session: CurrentSession) -> Response {
    if session.data.is_authenticated {
        return Redirect::to("/dashboard").into_response();
    }

    render(IndexTemplate)
}
