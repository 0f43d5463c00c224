//! Consult HTTP module - submission, listing, and code issuance endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ConsultAppState;
pub use routes::consult_routes;
