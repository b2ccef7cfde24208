use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;
use ulid::{Generator, Ulid};
use usergate_db::table;

use crate::{Error, Result};

/// Stored user record. `password` holds the Argon2 PHC hash, never the plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub created_at: i64,
}

/// Listing projection of a user, without credentials.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserView {
    pub id: String,
    pub username: String,
}

pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Persistence boundary for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Insert a new record; the store assigns the id.
    async fn create(&self, user: NewUser) -> Result<User>;

    async fn list(&self) -> Result<Vec<UserView>>;
}

#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
    ids: Arc<Mutex<Generator>>,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            ids: Arc::new(Mutex::new(Generator::new())),
        }
    }

    /// Ids increase strictly within this store, even inside one millisecond.
    fn next_id(&self) -> Ulid {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);

        // Overflow needs 2^80 ids in one millisecond; fall back to a fresh one.
        ids.generate().unwrap_or_else(|_| Ulid::new())
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let statement = Query::select()
            .columns([
                table::User::Id,
                table::User::Username,
                table::User::Password,
                table::User::CreatedAt,
            ])
            .from(table::User::Table)
            .and_where(Expr::col(table::User::Username).eq(username))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, User, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let user = User {
            id: self.next_id().to_string(),
            username: user.username,
            password: user.password_hash,
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
        };

        let statement = Query::insert()
            .into_table(table::User::Table)
            .columns([
                table::User::Id,
                table::User::Username,
                table::User::Password,
                table::User::CreatedAt,
            ])
            .values_panic([
                user.id.to_owned().into(),
                user.username.to_owned().into(),
                user.password.to_owned().into(),
                user.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.pool).await {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(Error::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<UserView>> {
        let statement = Query::select()
            .columns([table::User::Id, table::User::Username])
            .from(table::User::Table)
            .order_by(table::User::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserView, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?)
    }
}
