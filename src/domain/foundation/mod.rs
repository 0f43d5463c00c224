//! Foundation value objects shared across the domain.
//!
//! - `errors` - DomainError, ErrorCode, ValidationError
//! - `ids` - strongly-typed identifiers
//! - `timestamp` - UTC point-in-time value object

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AnimalId, ConsultRequestId, EmergencyCodeId, ProfessionalId, UserId};
pub use timestamp::Timestamp;
