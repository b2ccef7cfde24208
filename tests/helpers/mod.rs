//! Shared setup for HTTP-level tests: an in-memory database, a router wired
//! with a memory session store, and small request/response helpers.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use tower::ServiceExt;
use usergate::{
    AppState, Config,
    config::{DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig, SessionConfig},
    session::MemorySessionStore,
};
use usergate_user::{Command, Error, NewUser, SqliteUserStore, User, UserStore, UserView};

pub const TEST_SECRET: &str = "test_secret_key_minimum_32_characters_long";

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiration_hours: 24,
        },
        session: SessionConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

/// In-memory database with migrations applied. A single connection that is
/// never recycled keeps the database alive for the whole test.
pub async fn setup_test_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    usergate::migrate::run_migrations(&pool).await?;

    Ok(pool)
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub sessions: Arc<MemorySessionStore>,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let pool = setup_test_pool().await?;

        Ok(Self::with_store(SqliteUserStore::new(pool)))
    }

    pub fn with_store(store: impl UserStore + 'static) -> Self {
        let sessions = Arc::new(MemorySessionStore::new());
        let state = AppState::new(test_config(), Command::new(store), sessions.clone());

        Self {
            router: usergate::router(state.clone()),
            state,
            sessions,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        form: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = serde_urlencoded::to_string(form).unwrap();

        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Visit a page without a cookie and return the `name=value` pair issued.
    pub async fn new_session(&self) -> String {
        let response = self.get("/login", None).await;

        session_cookie(&response).expect("session cookie should be issued")
    }

    pub async fn register(&self, username: &str, password: &str) {
        self.state
            .user_command
            .register(usergate_user::RegisterInput {
                username: username.to_owned(),
                password: password.to_owned(),
            })
            .await
            .unwrap();
    }
}

/// `name=value` of the Set-Cookie header, without attributes.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.trim().to_owned())
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A user store whose backend is always unavailable.
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn find_by_username(&self, _username: &str) -> usergate_user::Result<Option<User>> {
        Err(Error::Store(sqlx::Error::PoolClosed))
    }

    async fn create(&self, _user: NewUser) -> usergate_user::Result<User> {
        Err(Error::Store(sqlx::Error::PoolClosed))
    }

    async fn list(&self) -> usergate_user::Result<Vec<UserView>> {
        Err(Error::Store(sqlx::Error::PoolClosed))
    }
}
