pub mod gate;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod session;
