//! argon2 password hashing
//!
//! Hashing is CPU-bound; async callers go through the `*_async` variants,
//! which run on tokio's blocking pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AdminError;

/// Hashes a password into a PHC string with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AdminError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AdminError::Hashing(e.to_string()))
}

/// Checks a password against a stored PHC string
///
/// A malformed stored hash verifies as false.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Hashes on the blocking pool
pub async fn hash_password_async(password: String) -> Result<String, AdminError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AdminError::Hashing(e.to_string()))?
}

/// Verifies on the blocking pool; a panicked worker verifies as false
pub async fn verify_password_async(password: String, password_hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("S3cret", &hash));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn test_async_variants_agree_with_sync() {
        let hash = hash_password_async("s3cret".to_string()).await.unwrap();
        assert!(verify_password("s3cret", &hash));
        assert!(verify_password_async("s3cret".to_string(), hash.clone()).await);
        assert!(!verify_password_async("wrong".to_string(), hash).await);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_leaves_the_runtime_free() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = {
            let ticks = Arc::clone(&ticks);
            tokio::spawn(async move {
                loop {
                    ticks.fetch_add(1, Ordering::Relaxed);
                    tokio::task::yield_now().await;
                }
            })
        };

        hash_password_async("s3cret".to_string()).await.unwrap();
        ticker.abort();
        assert!(ticks.load(Ordering::Relaxed) > 0);
    }
}
