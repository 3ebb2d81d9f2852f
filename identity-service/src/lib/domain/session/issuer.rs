use std::sync::Arc;

use auth::Authenticator;

use crate::account::models::AccountId;
use crate::account::models::AccountProfile;
use crate::account::models::Role;
use crate::session::models::SessionError;
use crate::session::models::SessionView;

/// Signs session tokens for authenticated accounts and reads them back.
///
/// A token embeds exactly `{id, role, iat, exp}`; name and avatar stay out.
#[derive(Clone)]
pub struct SessionIssuer {
    authenticator: Arc<Authenticator>,
}

impl SessionIssuer {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Hours until a freshly issued token expires.
    pub fn lifetime_hours(&self) -> i64 {
        self.authenticator.session_lifetime_hours()
    }

    /// Issue a signed token for a sanitized account projection.
    ///
    /// # Errors
    /// * `SigningFailed` - Token could not be encoded
    pub fn issue(&self, account: &AccountProfile) -> Result<String, SessionError> {
        self.authenticator
            .issue_token(account.id.as_str(), account.role.as_str())
            .map_err(SessionError::from)
    }

    /// Validate a token and project its claims.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `Invalid` - Bad signature, malformed token, or unknown role
    pub fn read(&self, token: &str) -> Result<SessionView, SessionError> {
        let claims = self.authenticator.validate_token(token)?;
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|e| SessionError::Invalid(e.to_string()))?;

        Ok(SessionView {
            id: AccountId::new(claims.id),
            role,
        })
    }
}
