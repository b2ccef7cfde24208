use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::{Error, Result};

/// Hash a password with Argon2id and a random salt, returning a PHC string.
///
/// Runs on the blocking pool so other tasks keep making progress.
pub async fn hash(password: &str) -> Result<String> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    })
    .await
    .map_err(|e| Error::Hash(e.to_string()))?
}

/// Verify a password against a PHC hash.
///
/// A mismatch is `Ok(false)`; only a hash that cannot be parsed is an error.
pub async fn verify(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || -> Result<bool> {
        let parsed_hash = PasswordHash::new(&hash)?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    })
    .await
    .map_err(|e| Error::Hash(e.to_string()))?
}
