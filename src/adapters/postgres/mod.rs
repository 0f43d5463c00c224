//! PostgreSQL adapters implementing the repository ports via sqlx.

mod consult_request_repository;
mod emergency_code_repository;
mod professional_settings_reader;
mod subscription_repository;

pub use consult_request_repository::PostgresConsultRequestRepository;
pub use emergency_code_repository::PostgresEmergencyCodeRepository;
pub use professional_settings_reader::PostgresProfessionalSettingsReader;
pub use subscription_repository::PostgresSubscriptionRepository;
