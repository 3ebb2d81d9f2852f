use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password checks and session tokens.
///
/// Built once at startup from the process-wide signing secret and shared
/// behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    session_lifetime_hours: i64,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing and verification
    /// * `session_lifetime_hours` - Hours until issued tokens expire
    pub fn new(jwt_secret: &[u8], session_lifetime_hours: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            session_lifetime_hours,
        }
    }

    /// Handle to the hasher, for moving onto a blocking thread.
    pub fn password_hasher(&self) -> PasswordHasher {
        self.password_hasher.clone()
    }

    pub fn session_lifetime_hours(&self) -> i64 {
        self.session_lifetime_hours
    }

    /// Sign a fresh token for the given account id and role.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, id: &str, role: &str) -> Result<String, JwtError> {
        let claims = SessionClaims::issue(id, role, self.session_lifetime_hours);
        self.jwt_handler.encode(&claims)
    }

    /// Validate and decode a session token.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, expired or signed with another secret
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::StoredPassword;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = Authenticator::new(SECRET, 8);

        let token = authenticator
            .issue_token("660001", "student")
            .expect("Failed to issue token");
        let claims = authenticator
            .validate_token(&token)
            .expect("Token validation failed");

        assert_eq!(claims.id, "660001");
        assert_eq!(claims.role, "student");
        assert_eq!(claims.exp - claims.iat, 8 * 60 * 60);
    }

    #[test]
    fn test_validate_with_other_secret_fails() {
        let issuer = Authenticator::new(SECRET, 8);
        let other = Authenticator::new(b"another_secret_key_at_least_32_bytes", 8);

        let token = issuer.issue_token("1", "admin").unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_password_hasher_handle() {
        let hasher = Authenticator::new(SECRET, 8).password_hasher();
        let hash = hasher.hash("my_password").expect("Failed to hash password");

        assert!(hasher
            .verify("my_password", StoredPassword::parse(&hash))
            .unwrap());
        assert!(!hasher.verify("wrong", StoredPassword::parse(&hash)).unwrap());
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET, 8);
        assert!(authenticator.validate_token("invalid.token.here").is_err());
    }
}
