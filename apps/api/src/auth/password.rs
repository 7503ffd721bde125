use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::errors::AppError;

/// Hashes a password into a PHC string with a fresh random salt.
///
/// Argon2 is CPU-bound, so the work runs on the blocking pool.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password_sync(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in hashing: {e}")))?
}

/// Returns false for a wrong password or an unparseable stored hash.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let stored_hash = stored_hash.to_owned();
    tokio::task::spawn_blocking(move || verify_password_sync(&password, &stored_hash))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in verification: {e}"))
        })
}

fn hash_password_sync(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

fn verify_password_sync(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("correct horse").await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash).await.unwrap());
        assert!(!verify_password("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        assert_ne!(
            hash_password("pw").await.unwrap(),
            hash_password("pw").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("pw", "plaintext").await.unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_leaves_the_runtime_responsive() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        // A single-threaded runtime can only poll the sibling task while the
        // hash is parked on the blocking pool.
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let sibling = tokio::spawn(async move { flag.store(true, Ordering::SeqCst) });

        let hash = hash_password("pw").await.unwrap();
        assert!(ran.load(Ordering::SeqCst));
        assert!(verify_password_sync("pw", &hash));
        sibling.await.unwrap();
    }
}
