pub mod issuer;
pub mod models;
