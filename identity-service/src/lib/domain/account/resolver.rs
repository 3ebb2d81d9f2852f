use std::sync::Arc;
use std::time::Duration;

use crate::account::models::Account;
use crate::account::models::Role;
use crate::account::ports::IdentityStore;

/// Finds which store owns a login identifier.
///
/// Stores are consulted in role precedence order (Admin, Student, Teacher)
/// and the first match wins. A store that fails or exceeds the lookup
/// timeout is skipped as if it had no match.
pub struct IdentityResolver {
    stores: Vec<Arc<dyn IdentityStore>>,
    lookup_timeout: Duration,
}

impl IdentityResolver {
    /// Create a resolver over the given stores.
    ///
    /// # Arguments
    /// * `stores` - Identity stores, in any order; sorted by role precedence
    /// * `lookup_timeout` - Upper bound for a single store lookup
    pub fn new(mut stores: Vec<Arc<dyn IdentityStore>>, lookup_timeout: Duration) -> Self {
        stores.sort_by_key(|store| store.role());
        Self {
            stores,
            lookup_timeout,
        }
    }

    /// Store that owns accounts of the given role.
    pub fn store_for(&self, role: Role) -> Option<&Arc<dyn IdentityStore>> {
        self.stores.iter().find(|store| store.role() == role)
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Return the first account matching `identifier`, stamped with its store's role.
    pub async fn resolve(&self, identifier: &str) -> Option<Account> {
        if identifier.is_empty() {
            return None;
        }

        for store in &self.stores {
            let role = store.role();
            let lookup = store.find_by_identifier(identifier);

            match tokio::time::timeout(self.lookup_timeout, lookup).await {
                Ok(Ok(Some(mut account))) => {
                    account.role = role;
                    tracing::debug!(%role, account_id = %account.id, "Identifier resolved");
                    return Some(account);
                }
                Ok(Ok(None)) => continue,
                Ok(Err(e)) => {
                    tracing::warn!(%role, error = %e, "Identity store lookup failed, skipping");
                }
                Err(_) => {
                    tracing::warn!(
                        %role,
                        timeout_ms = self.lookup_timeout.as_millis() as u64,
                        "Identity store lookup timed out, skipping"
                    );
                }
            }
        }

        None
    }
}
