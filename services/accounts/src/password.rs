use anyhow::anyhow;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AccountsServiceError;

/// Hash a raw password into a PHC string with Argon2id and a fresh salt.
pub fn hash_password(raw: &str) -> Result<String, AccountsServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| AccountsServiceError::Internal(anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Check a raw password against a stored PHC string.
/// An unparseable hash counts as a mismatch rather than an error.
pub fn verify_password(raw: &str, phc: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(phc) else {
        return false;
    };
    Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok()
}
