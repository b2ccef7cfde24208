#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Username and password are required")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    Authentication,

    #[error("{0}")]
    Store(#[from] sqlx::Error),

    #[error("{0}")]
    Hash(String),

    #[error("{0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Configuration(String),

    #[error("system clock is before the unix epoch: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::Hash(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn test_clock_error_keeps_its_own_kind() {
        let err = UNIX_EPOCH
            .duration_since(SystemTime::now())
            .map_err(Error::from)
            .unwrap_err();

        assert!(matches!(err, Error::Clock(_)));
    }
}
