//! Password verification using Argon2id.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::error::AuthError;

/// Check a plaintext password against a stored Argon2id PHC string.
///
/// The pepper, when set, is prepended to the password and must be the
/// same one the hash was produced with. Cost parameters are read from
/// the PHC string itself.
///
/// A mismatch is `Ok(false)`; a hash that cannot be parsed is
/// `Err(AuthError::Crypto)`.
pub fn verify_password(
    password: &str,
    hash: &str,
    pepper: Option<&str>,
) -> Result<bool, AuthError> {
    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(input, &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("verify error: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Algorithm, Params, PasswordHasher, Version};

    fn hash(password: &str) -> String {
        // Same cost parameters the user repository stores with.
        let params = Params::new(19_456, 2, 1, None).unwrap();
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        argon2
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    #[test]
    fn matching_password_verifies() {
        let stored = hash("password");
        assert!(verify_password("password", &stored, None).unwrap());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let stored = hash("password");
        assert!(!verify_password("Password", &stored, None).unwrap());
        assert!(!verify_password("", &stored, None).unwrap());
    }

    #[test]
    fn pepper_is_prepended() {
        let stored = hash("s3cret!password");
        assert!(verify_password("password", &stored, Some("s3cret!")).unwrap());
        assert!(!verify_password("password", &stored, None).unwrap());
        assert!(!verify_password("password", &stored, Some("other")).unwrap());
    }

    #[test]
    fn unparseable_hash_is_a_crypto_error() {
        let err = verify_password("password", "plaintext", None).unwrap_err();
        assert!(matches!(err, AuthError::Crypto(_)));
    }
}
