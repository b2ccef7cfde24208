use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerErrorTemplate;

fn render_with_status<T: askama::Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render template");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template. Error: {err}"),
            )
                .into_response()
        }
    }
}

/// Render a page with `200 OK`.
pub fn render<T: askama::Template>(template: T) -> Response {
    render_with_status(StatusCode::OK, template)
}

/// Render an error page with `500 Internal Server Error`.
pub fn render_error<T: askama::Template>(template: T) -> Response {
    render_with_status(StatusCode::INTERNAL_SERVER_ERROR, template)
}
