use std::sync::Arc;

use validator::Validate;

use crate::{Error, NewUser, Result, User, UserStore, UserView, password};

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Validate)]
pub struct LoginInput {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Registration, credential checks and listing on top of a [`UserStore`].
#[derive(Clone)]
pub struct Command {
    store: Arc<dyn UserStore>,
}

impl Command {
    pub fn new(store: impl UserStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn register(&self, input: RegisterInput) -> Result<User> {
        input.validate()?;

        if self.store.find_by_username(&input.username).await?.is_some() {
            return Err(Error::DuplicateUsername);
        }

        let password_hash = password::hash(&input.password).await?;

        let user = self
            .store
            .create(NewUser {
                username: input.username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");

        Ok(user)
    }

    /// Unknown usernames and wrong passwords both end in [`Error::Authentication`].
    pub async fn login(&self, input: LoginInput) -> Result<User> {
        if input.validate().is_err() {
            return Err(Error::Authentication);
        }

        let Some(user) = self.store.find_by_username(&input.username).await? else {
            tracing::warn!(username = %input.username, "login for unknown user");
            return Err(Error::Authentication);
        };

        if !password::verify(&input.password, &user.password).await? {
            tracing::warn!(username = %input.username, "login with wrong password");
            return Err(Error::Authentication);
        }

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.store.find_by_username(username).await
    }

    pub async fn list(&self) -> Result<Vec<UserView>> {
        self.store.list().await
    }
}
