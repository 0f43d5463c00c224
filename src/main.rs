//! Pawbridge server binary.
//!
//! Wires configuration, the connection pool, repositories, and the two
//! domain services into an axum application.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pawbridge::adapters::http::billing::{billing_webhook_routes, BillingAppState};
use pawbridge::adapters::http::consult::{consult_routes, ConsultAppState};
use pawbridge::adapters::postgres::{
    PostgresConsultRequestRepository, PostgresEmergencyCodeRepository,
    PostgresProfessionalSettingsReader, PostgresSubscriptionRepository,
};
use pawbridge::config::AppConfig;
use pawbridge::domain::admission::{AdmissionController, AdmissionPolicy, EmergencyCodeIssuer};
use pawbridge::domain::billing::{SubscriptionSynchronizer, WebhookSignatureVerifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    // Repositories
    let settings_reader = Arc::new(PostgresProfessionalSettingsReader::new(pool.clone()));
    let request_repository = Arc::new(PostgresConsultRequestRepository::new(pool.clone()));
    let code_repository = Arc::new(PostgresEmergencyCodeRepository::new(pool.clone()));
    let subscription_repository = Arc::new(PostgresSubscriptionRepository::new(pool));

    // Domain services
    let admission = Arc::new(AdmissionController::new(
        settings_reader,
        request_repository.clone(),
        code_repository.clone(),
        AdmissionPolicy {
            request_ttl_hours: config.admission.request_ttl_hours,
        },
    ));
    let issuer = Arc::new(EmergencyCodeIssuer::new(
        code_repository,
        config.admission.code_ttl_minutes,
    ));
    let synchronizer = Arc::new(SubscriptionSynchronizer::new(
        WebhookSignatureVerifier::new(config.payment.webhook_secret.clone()),
        subscription_repository,
    ));

    let consult_state = ConsultAppState {
        admission,
        issuer,
        requests: request_repository,
    };
    let billing_state = BillingAppState { synchronizer };

    let app = Router::new()
        .nest("/api/consults", consult_routes().with_state(consult_state))
        .nest(
            "/api/webhooks",
            billing_webhook_routes().with_state(billing_state),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    info!(%addr, "pawbridge listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the CORS layer from configured origins.
///
/// With no origins configured (development), the layer is permissive.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(origins)
    }
}
