use super::AuthError;

pub fn hash_password(plain: &str, rounds: u32) -> Result<String, AuthError> {
    bcrypt::hash(plain, rounds).map_err(|err| AuthError::Hashing(err.to_string()))
}

/// A malformed stored hash counts as a mismatch rather than an error.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}
