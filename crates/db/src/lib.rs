use sqlx_migrator::{Info, Migrator};

mod m0001;
pub mod table;

/// Every schema migration of the service, in application order.
pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(sqlx_migrator::vec_box![m0001::Migration])?;

    Ok(migrator)
}

#[cfg(test)]
mod tests {
    use sqlx::SqlitePool;
    use sqlx_migrator::{Migrate, Plan};

    #[tokio::test]
    async fn test_migrator_creates_user_table_with_unique_username() -> anyhow::Result<()> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;
        let mut conn = pool.acquire().await?;
        super::migrator()?
            .run(&mut conn, &Plan::apply_all())
            .await?;

        sqlx::query(r#"INSERT INTO "user" ("id", "username", "password", "created_at") VALUES ('a', 'alice', 'x', 0)"#)
            .execute(&mut *conn)
            .await?;

        let duplicate = sqlx::query(r#"INSERT INTO "user" ("id", "username", "password", "created_at") VALUES ('b', 'alice', 'y', 0)"#)
            .execute(&mut *conn)
            .await;

        let err = duplicate.unwrap_err();
        assert!(
            err.as_database_error()
                .map(|e| e.is_unique_violation())
                .unwrap_or(false)
        );

        // usernames are matched exactly, case included
        sqlx::query(r#"INSERT INTO "user" ("id", "username", "password", "created_at") VALUES ('c', 'Alice', 'z', 0)"#)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
