//! Admin secret verification.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

/// Admin configuration holding the argon2 hash of the admin secret.
///
/// The plaintext secret is only ever seen in request headers; the config
/// file stores the hash (the server hashes and rewrites a plaintext
/// secret on first load).
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub secret_hash: String,
}

impl AdminConfig {
    pub fn new(secret_hash: String) -> Self {
        Self { secret_hash }
    }

    /// Check a plaintext secret against the stored hash.
    pub fn verify_secret(&self, plaintext: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.secret_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{
        Argon2, PasswordHasher,
        password_hash::{SaltString, rand_core::OsRng},
    };

    #[test]
    fn test_verify_secret() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"vault-admin-secret", &salt)
            .unwrap()
            .to_string();

        let admin = AdminConfig::new(hash);

        assert!(admin.verify_secret("vault-admin-secret"));
        assert!(!admin.verify_secret("wrong-secret"));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let admin = AdminConfig::new("not-an-argon2-hash".into());
        assert!(!admin.verify_secret("anything"));
    }
}
