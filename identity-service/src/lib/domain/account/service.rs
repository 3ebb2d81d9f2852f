use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountProfile;
use crate::account::models::Credentials;
use crate::account::models::ProfileUpdate;
use crate::account::models::UpdateProfileCommand;
use crate::account::policy::PasswordVerifier;
use crate::account::policy::Verdict;
use crate::account::ports::AccountServicePort;
use crate::account::ports::IdentityStore;
use crate::account::resolver::IdentityResolver;
use crate::session::models::SessionView;

/// Domain service implementation for account operations.
///
/// Resolves identifiers across the identity stores, applies the role's
/// password policy on the blocking pool, and performs profile writes.
pub struct AccountService {
    resolver: IdentityResolver,
    password_hasher: PasswordHasher,
    verifier: PasswordVerifier,
    rehash_legacy_passwords: bool,
}

impl AccountService {
    /// Create a new account service.
    ///
    /// # Arguments
    /// * `resolver` - Identity resolver over the three stores
    /// * `password_hasher` - Hasher used for verification and for new hashes
    /// * `rehash_legacy_passwords` - Rewrite plaintext/bcrypt values as Argon2 after a login
    pub fn new(
        resolver: IdentityResolver,
        password_hasher: PasswordHasher,
        rehash_legacy_passwords: bool,
    ) -> Self {
        Self {
            resolver,
            verifier: PasswordVerifier::new(password_hasher.clone()),
            password_hasher,
            rehash_legacy_passwords,
        }
    }

    fn store_for(&self, session: &SessionView) -> Result<&Arc<dyn IdentityStore>, AccountError> {
        self.resolver.store_for(session.role).ok_or_else(|| {
            AccountError::Unknown(format!("No identity store registered for {}", session.role))
        })
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let hasher = self.password_hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    /// Rewrite a legacy stored value as Argon2 in the background.
    ///
    /// Failures are logged; the login that triggered it is unaffected.
    fn spawn_rehash(&self, account: &Account, password: String) {
        let Some(store) = self.resolver.store_for(account.role).cloned() else {
            return;
        };
        let hasher = self.password_hasher.clone();
        let id = account.id.clone();
        let role = account.role;

        tokio::spawn(async move {
            let hashed = match tokio::task::spawn_blocking(move || hasher.hash(&password)).await {
                Ok(Ok(hash)) => hash,
                Ok(Err(e)) => {
                    tracing::warn!(%role, account_id = %id, error = %e, "Rehash failed");
                    return;
                }
                Err(e) => {
                    tracing::warn!(%role, account_id = %id, error = %e, "Rehash task failed");
                    return;
                }
            };

            match store.update_password(&id, &hashed).await {
                Ok(()) => tracing::info!(%role, account_id = %id, "Legacy password rehashed"),
                Err(e) => tracing::warn!(
                    %role,
                    account_id = %id,
                    error = %e,
                    "Failed to store rehashed password"
                ),
            }
        });
    }
}

#[async_trait]
impl AccountServicePort for AccountService {
    async fn authenticate(&self, credentials: Credentials) -> Result<AccountProfile, AccountError> {
        let Credentials {
            identifier,
            password,
        } = credentials;

        let verifier = self.verifier.clone();

        let Some(account) = self.resolver.resolve(&identifier).await else {
            let _ = tokio::task::spawn_blocking(move || verifier.reject_unknown(&password)).await;
            tracing::info!(identifier = %identifier, "Login rejected");
            return Err(AccountError::InvalidCredentials);
        };

        let (account, password, verdict) = tokio::task::spawn_blocking(move || {
            let verdict = verifier.verify(&account, &password);
            (account, password, verdict)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            AccountError::InvalidCredentials
        })?;

        match verdict {
            Verdict::Accepted(rule) => {
                tracing::info!(
                    role = %account.role,
                    account_id = %account.id,
                    rule = ?rule,
                    "Login accepted"
                );
                if self.rehash_legacy_passwords && rule.needs_rehash() {
                    self.spawn_rehash(&account, password);
                }
                Ok(account.sanitized())
            }
            Verdict::Rejected => {
                tracing::info!(identifier = %identifier, "Login rejected");
                Err(AccountError::InvalidCredentials)
            }
        }
    }

    async fn get_profile(&self, session: &SessionView) -> Result<AccountProfile, AccountError> {
        let store = self.store_for(session)?;

        let lookup = store.find_by_id(&session.id);
        let account = tokio::time::timeout(self.resolver.lookup_timeout(), lookup)
            .await
            .map_err(|_| AccountError::StoreUnavailable {
                role: session.role,
                reason: "lookup timed out".to_string(),
            })??
            .ok_or_else(|| AccountError::NotFound(session.id.to_string()))?;

        Ok(account.profile())
    }

    async fn update_profile(
        &self,
        session: &SessionView,
        command: UpdateProfileCommand,
    ) -> Result<(), AccountError> {
        let store = self.store_for(session)?;

        let password_hash = match command.password.filter(|p| !p.trim().is_empty()) {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let update = ProfileUpdate {
            name: command.name.as_str().to_string(),
            avatar: command.avatar,
            password_hash,
        };

        store.update_profile(&session.id, &update).await?;

        tracing::info!(
            role = %session.role,
            account_id = %session.id,
            password_changed = update.password_hash.is_some(),
            "Profile updated"
        );

        Ok(())
    }
}
