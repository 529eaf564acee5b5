//! Password hashing utilities

use bcrypt::{hash_with_salt, verify, BcryptError, Version};
use rand::RngCore;

/// Work factor used unless configured otherwise.
pub const DEFAULT_COST: u32 = 10;

/// 16 random bytes, drawn fresh for every hash.
pub fn generate_salt() -> [u8; 16] {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Hash a password using bcrypt with a freshly generated salt
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    let parts = hash_with_salt(password, cost, generate_salt())?;
    Ok(parts.format_for_version(Version::TwoB))
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let password = "secret1";
        let hashed = hash_password(password, TEST_COST).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_hashes() {
        let first = hash_password("secret1", TEST_COST).unwrap();
        let second = hash_password("secret1", TEST_COST).unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$2b$04$"));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("secret1", "not-a-bcrypt-hash").is_err());
    }
}
