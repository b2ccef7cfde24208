use axum::response::Response;

use crate::auth::RequireAuth;
use crate::template::render;

#[derive(askama::Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
}

pub async fn page(RequireAuth(username): RequireAuth) -> Response {
    render(DashboardTemplate { username })
}
