//! Authentication utilities library
//!
//! Provides the credential primitives used by the identity service:
//! - Password hashing (Argon2id) and verification of legacy values (bcrypt, plaintext)
//! - Session token signing and validation (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Stored passwords
//! ```
//! use auth::{PasswordHasher, StoredPassword};
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", StoredPassword::parse(&hash)).unwrap());
//! assert!(hasher.verify("legacy", StoredPassword::parse("legacy")).unwrap());
//! ```
//!
//! ## Session tokens
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 24);
//! let token = auth.issue_token("660001", "student").unwrap();
//! let claims = auth.validate_token(&token).unwrap();
//! assert_eq!(claims.role, "student");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::StoredPassword;
