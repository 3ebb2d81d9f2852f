use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::account::errors::DisplayNameError;
use crate::account::errors::RoleError;

/// Role tag of an account.
///
/// Determined solely by which identity store produced the account. Variant
/// order is the resolution precedence: Admin, then Student, then Teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Primary record id of an account within its store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account record as read from one of the identity stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    /// External login identifier: username, studentId or teacherId
    pub identifier: String,
    pub name: String,
    pub role: Role,
    /// Raw stored password: plaintext, hash, sentinel default, or unset
    pub password: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub avatar: Option<String>,
}

impl Account {
    /// Projection safe to hand to the session layer.
    ///
    /// Inline `data:` avatars are dropped so bulky binary content never
    /// rides along with session data.
    pub fn sanitized(&self) -> AccountProfile {
        AccountProfile {
            avatar: self.avatar.clone().filter(|avatar| !is_inline_avatar(avatar)),
            ..self.profile()
        }
    }

    /// Full caller-facing projection, avatar included as stored.
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            role: self.role,
            avatar: self.avatar.clone(),
        }
    }
}

fn is_inline_avatar(avatar: &str) -> bool {
    avatar.starts_with("data:")
}

/// Caller-facing view of an account: no password, no birth date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub id: AccountId,
    pub name: String,
    pub role: Role,
    pub avatar: Option<String>,
}

/// Login credentials as submitted.
#[derive(Clone)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Display name value type
///
/// Non-blank, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 255;

    /// Create a validated display name.
    ///
    /// # Errors
    /// * `Blank` - Name is empty or whitespace only
    /// * `TooLong` - Name exceeds 255 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DisplayNameError::Blank);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to update the signed-in account's own profile.
#[derive(Debug)]
pub struct UpdateProfileCommand {
    pub name: DisplayName,
    /// New avatar reference; `None` leaves the stored one untouched
    pub avatar: Option<String>,
    /// New plaintext password; hashed by the service before storage
    pub password: Option<String>,
}

/// Record-level write handed to an identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub avatar: Option<String>,
    pub password_hash: Option<String>,
}
