use super::AuthError;

/// Hash a password for storage in the administrator credentials table
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Compare a plain text password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash itself is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Well-formed bcrypt hash at the default cost; no password is expected to match it.
const DUMMY_HASH: &str = "$2b$12$saltsaltsaltsaltsaltsehashhashhashhashhashhashhashhaC";

/// Run a full bcrypt comparison for a username that has no credential, so the
/// unknown-user path costs the same as a wrong password.
pub fn verify_unknown_user(password: &str) {
    if let Err(e) = bcrypt::verify(password, DUMMY_HASH) {
        tracing::error!("dummy password hash unusable: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password_with_cost("Qm8#nXp3Tv", 4).unwrap();
        assert!(verify_password("Qm8#nXp3Tv", &hash).unwrap());
        assert!(!verify_password("qm8#nXp3Tv", &hash).unwrap());
    }

    #[test]
    fn dummy_hash_is_well_formed_and_matches_nothing() {
        assert_eq!(DUMMY_HASH.len(), 60);
        assert!(!verify_password("Qm8#nXp3Tv", DUMMY_HASH).unwrap());
        assert!(!verify_password("", DUMMY_HASH).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
