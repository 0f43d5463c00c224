//! Admission domain module.
//!
//! Decides whether new consult requests are accepted, based on a
//! per-professional pending cap, an operator block switch, and single-use
//! emergency override codes.
//!
//! # Module Structure
//!
//! - `settings` - per-professional admission settings
//! - `consult_request` - ConsultRequest entity and lifecycle states
//! - `emergency_code` - single-use bypass codes
//! - `controller` - the admission decision and persistence flow
//! - `issuer` - emergency code issuance
//! - `errors` - admission error taxonomy

mod consult_request;
mod controller;
mod emergency_code;
mod errors;
mod issuer;
mod settings;

pub use consult_request::{ConsultRequest, ConsultRequestDetails, ConsultStatus};
pub use controller::{AdmissionController, AdmissionPolicy, SubmitConsult, DEFAULT_REQUEST_TTL_HOURS};
pub use emergency_code::{
    generate_code, normalize_code, EmergencyCode, CODE_LENGTH, DEFAULT_CODE_TTL_MINUTES,
};
pub use errors::AdmissionError;
pub use issuer::EmergencyCodeIssuer;
pub use settings::{ProfessionalSettings, DEFAULT_CAP_PENDING};
