use temp_dir::TempDir;
use usergate_user::{Error, LoginInput};

mod helpers;

#[tokio::test]
async fn test_login_failure() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_command(dir.child("db.sqlite3")).await?;

    let resp = cmd
        .login(LoginInput {
            username: "john.doe".to_owned(),
            password: "my_password".to_owned(),
        })
        .await;

    assert!(matches!(resp, Err(Error::Authentication)));

    let user = helpers::create_user(&cmd, "john.doe").await?;

    let wrong_password = cmd
        .login(LoginInput {
            username: "john.doe".to_owned(),
            password: "my_password3".to_owned(),
        })
        .await;

    let unknown_user = cmd
        .login(LoginInput {
            username: "john.do".to_owned(),
            password: "my_password".to_owned(),
        })
        .await;

    assert_eq!(
        wrong_password.unwrap_err().to_string(),
        unknown_user.unwrap_err().to_string()
    );

    let empty = cmd
        .login(LoginInput {
            username: "john.doe".to_owned(),
            password: "".to_owned(),
        })
        .await;

    assert!(matches!(empty, Err(Error::Authentication)));

    let resp = cmd
        .login(LoginInput {
            username: "john.doe".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;

    assert_eq!(resp.id, user.id);

    Ok(())
}

#[tokio::test]
async fn test_username_match_is_exact() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let cmd = helpers::setup_test_command(dir.child("db.sqlite3")).await?;

    helpers::create_user(&cmd, "john.doe").await?;

    let resp = cmd
        .login(LoginInput {
            username: "John.Doe".to_owned(),
            password: "my_password".to_owned(),
        })
        .await;

    assert!(matches!(resp, Err(Error::Authentication)));

    Ok(())
}
