pub mod errors;
pub mod hasher;
pub mod stored;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
pub use stored::StoredPassword;
