//! Password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use std::sync::OnceLock;

use crate::errors::Error;

/// Stand-in hash verified when a login names an unknown email, with the parameters it was built with.
static DUMMY_HASH: OnceLock<(Argon2Params, String)> = OnceLock::new();

/// Argon2 hashing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Argon2Params {
    /// Create Argon2 instance with these parameters.
    fn to_argon2(self) -> Result<Argon2<'static>, Error> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None).map_err(|e| Error::Internal {
            operation: format!("create argon2 params: {e}"),
        })?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for Argon2Params {
    /// Secure defaults for production (Argon2id RFC recommendations)
    fn default() -> Self {
        Self {
            memory_kib: 19456, // 19 MB
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Hash a password with a fresh random salt.
///
/// The returned PHC string embeds algorithm, parameters and salt.
pub fn hash_password(password: &str, params: Argon2Params) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = params.to_argon2()?;

    let hash = argon2.hash_password(password.as_bytes(), &salt).map_err(|e| Error::Internal {
        operation: format!("hash password: {e}"),
    })?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Note: Verification uses the parameters embedded in the hash itself.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::Internal {
        operation: format!("parse hash: {e}"),
    })?;

    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed_hash).is_ok())
}

/// A hash with `params` that no submitted password is accepted against.
///
/// Built once per process; callers passing other parameters get a fresh hash.
fn dummy_hash(params: Argon2Params) -> Result<String, Error> {
    if let Some((_, hash)) = DUMMY_HASH.get().filter(|(cached, _)| *cached == params) {
        return Ok(hash.clone());
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = hash_password(salt.as_str(), params)?;
    let _ = DUMMY_HASH.set((params, hash.clone()));
    Ok(hash)
}

/// Check a login attempt against the stored hash of the named user, if there is one.
///
/// Without a user the password is still run through argon2 (against a dummy hash with the same
/// parameters) and rejected, so an unknown email costs as much as a wrong password.
pub fn verify_login(password: &str, stored_hash: Option<&str>, params: Argon2Params) -> Result<bool, Error> {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            let dummy = dummy_hash(params)?;
            verify_password(password, &dummy)?;
            Ok(false)
        }
    }
}

/// [`hash_password`] on a blocking thread, keeping the async runtime responsive.
pub async fn hash_password_blocking(password: String, params: Argon2Params) -> Result<String, Error> {
    tokio::task::spawn_blocking(move || hash_password(&password, params))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password hashing task: {e}"),
        })?
}

/// [`verify_login`] on a blocking thread.
pub async fn verify_login_blocking(password: String, stored_hash: Option<String>, params: Argon2Params) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || verify_login(&password, stored_hash.as_deref(), params))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cheap parameters keep the tests fast
    fn test_params() -> Argon2Params {
        Argon2Params {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_password_hashing() {
        let hash = hash_password("pw", test_params()).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_same_input_different_hashes() {
        let hash1 = hash_password("same_password", test_params()).unwrap();
        let hash2 = hash_password("same_password", test_params()).unwrap();

        // Same input should produce different hashes due to salt
        assert_ne!(hash1, hash2);
        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(verify_password("pw", "not-a-phc-string"), Err(Error::Internal { .. })));
    }

    #[test]
    fn test_login_without_user_verifies_dummy_hash() {
        assert!(!verify_login("pw", None, test_params()).unwrap());

        let (params, hash) = DUMMY_HASH.get().expect("dummy hash is built on first use");
        assert_eq!(*params, test_params());
        let parsed = PasswordHash::new(hash).unwrap();
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert_eq!(parsed.params.get_decimal("m"), Some(1024));
        assert_eq!(parsed.params.get_decimal("t"), Some(1));

        // The cached hash is reused, and still rejects everything
        assert_eq!(dummy_hash(test_params()).unwrap(), *hash);
        assert!(!verify_login("", None, test_params()).unwrap());
    }

    #[test]
    fn test_login_with_user_checks_stored_hash() {
        let hash = hash_password("pw", test_params()).unwrap();

        assert!(verify_login("pw", Some(&hash), test_params()).unwrap());
        assert!(!verify_login("nope", Some(&hash), test_params()).unwrap());
    }

    #[tokio::test]
    async fn test_blocking_wrappers() {
        let hash = hash_password_blocking("pw".to_string(), test_params()).await.unwrap();
        assert!(verify_login_blocking("pw".to_string(), Some(hash), test_params()).await.unwrap());
        assert!(!verify_login_blocking("pw".to_string(), None, test_params()).await.unwrap());
    }
}
