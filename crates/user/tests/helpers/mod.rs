use std::{path::PathBuf, str::FromStr};

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use usergate_user::{Command, RegisterInput, SqliteUserStore, User};

pub async fn setup_test_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    usergate_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

pub async fn setup_test_command(path: PathBuf) -> anyhow::Result<Command> {
    let pool = setup_test_pool(path).await?;

    Ok(Command::new(SqliteUserStore::new(pool)))
}

#[allow(dead_code)]
pub async fn create_user(cmd: &Command, name: impl Into<String>) -> anyhow::Result<User> {
    let user = cmd
        .register(RegisterInput {
            username: name.into(),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(user)
}
