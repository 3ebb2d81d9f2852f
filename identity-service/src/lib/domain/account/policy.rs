//! Per-role password policy.
//!
//! - Admin: stored value only (hash or legacy plaintext).
//! - Student: while the stored value is unset or still the default, only the
//!   default chain (default literal, birth date) is accepted; afterwards only
//!   the stored value.
//! - Teacher: the default chain (default literal, own identifier, birth date)
//!   is always accepted, then the stored value.

use auth::PasswordHasher;
use auth::StoredPassword;
use chrono::NaiveDate;

use crate::account::models::Account;
use crate::account::models::Role;

/// Password every account starts with, and the student "not yet changed" sentinel.
pub const DEFAULT_PASSWORD: &str = "1234";

/// Well-formed Argon2id PHC string with the hasher's default cost that no
/// password matches. Checked when no account owns the identifier so an
/// unknown identifier costs as much as a wrong password.
const UNKNOWN_IDENTITY_HASH: &str = concat!(
    "$argon2id$v=19$m=19456,t=2,p=1",
    "$c29tZXNhbHRzb21lc2FsdA",
    "$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
);

/// Which rule accepted a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedRule {
    DefaultPassword,
    Identifier,
    BirthDate,
    StoredHash,
    StoredLegacyHash,
    StoredPlaintext,
}

impl MatchedRule {
    /// True when the account's stored value should be rewritten as Argon2.
    pub fn needs_rehash(&self) -> bool {
        matches!(
            self,
            MatchedRule::StoredLegacyHash | MatchedRule::StoredPlaintext
        )
    }
}

/// Outcome of a password check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted(MatchedRule),
    Rejected,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

/// Birth date rendered as the fallback password: DDMMYYYY.
pub fn birth_date_password(birth_date: NaiveDate) -> String {
    birth_date.format("%d%m%Y").to_string()
}

/// Applies the role's policy to a single resolved account.
///
/// CPU-bound when the stored value is hashed.
#[derive(Clone, Default)]
pub struct PasswordVerifier {
    hasher: PasswordHasher,
}

impl PasswordVerifier {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self { hasher }
    }

    pub fn verify(&self, account: &Account, submitted: &str) -> Verdict {
        match account.role {
            Role::Admin => self.check_stored(account, submitted),
            Role::Student => {
                if has_default_password(account) {
                    default_chain(account, submitted, false)
                } else {
                    self.check_stored(account, submitted)
                }
            }
            Role::Teacher => match default_chain(account, submitted, true) {
                Verdict::Rejected => self.check_stored(account, submitted),
                accepted => accepted,
            },
        }
    }

    /// Spend one full hash verification and reject.
    pub fn reject_unknown(&self, submitted: &str) -> Verdict {
        if let Err(e) = self
            .hasher
            .verify(submitted, StoredPassword::Argon2(UNKNOWN_IDENTITY_HASH))
        {
            tracing::warn!(error = %e, "Placeholder hash could not be checked");
        }
        Verdict::Rejected
    }

    fn check_stored(&self, account: &Account, submitted: &str) -> Verdict {
        let Some(raw) = stored_password(account) else {
            return Verdict::Rejected;
        };

        let stored = StoredPassword::parse(raw);
        match self.hasher.verify(submitted, stored) {
            Ok(true) => Verdict::Accepted(match stored {
                StoredPassword::Argon2(_) => MatchedRule::StoredHash,
                StoredPassword::Bcrypt(_) => MatchedRule::StoredLegacyHash,
                StoredPassword::Plaintext(_) => MatchedRule::StoredPlaintext,
            }),
            Ok(false) => Verdict::Rejected,
            Err(e) => {
                tracing::warn!(
                    role = %account.role,
                    account_id = %account.id,
                    error = %e,
                    "Stored password could not be checked"
                );
                Verdict::Rejected
            }
        }
    }
}

/// Stored value, with an empty string treated as unset.
fn stored_password(account: &Account) -> Option<&str> {
    account.password.as_deref().filter(|p| !p.is_empty())
}

fn has_default_password(account: &Account) -> bool {
    stored_password(account).map_or(true, |p| p == DEFAULT_PASSWORD)
}

fn default_chain(account: &Account, submitted: &str, accept_identifier: bool) -> Verdict {
    if submitted == DEFAULT_PASSWORD {
        return Verdict::Accepted(MatchedRule::DefaultPassword);
    }

    if accept_identifier && !account.identifier.is_empty() && submitted == account.identifier {
        return Verdict::Accepted(MatchedRule::Identifier);
    }

    match account.birth_date {
        Some(birth_date) if submitted == birth_date_password(birth_date) => {
            Verdict::Accepted(MatchedRule::BirthDate)
        }
        _ => Verdict::Rejected,
    }
}
