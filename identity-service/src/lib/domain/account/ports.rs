use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AccountProfile;
use crate::account::models::Credentials;
use crate::account::models::ProfileUpdate;
use crate::account::models::Role;
use crate::account::models::UpdateProfileCommand;
use crate::session::models::SessionView;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Resolve an identifier across the stores and check the password.
    ///
    /// # Arguments
    /// * `credentials` - Submitted identifier and password
    ///
    /// # Returns
    /// Sanitized projection of the matched account
    ///
    /// # Errors
    /// * `InvalidCredentials` - No store knows the identifier, or the password is wrong
    async fn authenticate(&self, credentials: Credentials) -> Result<AccountProfile, AccountError>;

    /// Read the signed-in account fresh from its store.
    ///
    /// # Errors
    /// * `NotFound` - Account no longer exists
    /// * `StoreUnavailable` - Store lookup failed
    async fn get_profile(&self, session: &SessionView) -> Result<AccountProfile, AccountError>;

    /// Update the signed-in account's name, avatar and optionally password.
    ///
    /// # Errors
    /// * `NotFound` - Account no longer exists
    /// * `Password` - New password could not be hashed
    /// * `ProfileWriteFailed` - Store rejected the write
    async fn update_profile(
        &self,
        session: &SessionView,
        command: UpdateProfileCommand,
    ) -> Result<(), AccountError>;
}

/// One role's backing collection of accounts.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Role tag stamped on every account this store produces.
    fn role(&self) -> Role;

    /// Retrieve an account by its external login identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store could not be queried
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account by its primary record id.
    ///
    /// # Errors
    /// * `StoreUnavailable` - Store could not be queried
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Overwrite name, avatar and (when present) password hash of one record.
    ///
    /// Last writer wins; no ordering between concurrent updates.
    ///
    /// # Errors
    /// * `NotFound` - No record with this id
    /// * `ProfileWriteFailed` - Write was rejected
    async fn update_profile(
        &self,
        id: &AccountId,
        update: &ProfileUpdate,
    ) -> Result<(), AccountError>;

    /// Replace only the stored password with a new hash.
    ///
    /// # Errors
    /// * `NotFound` - No record with this id
    /// * `ProfileWriteFailed` - Write was rejected
    async fn update_password(&self, id: &AccountId, password_hash: &str)
        -> Result<(), AccountError>;
}
