//! Production wiring: `PostgreSQL` stores, the HTTP model client and the
//! link fetcher behind one [`ReviewGateway`].

use crate::config::AssessorConfig;
use crate::gateway::{AdminGuard, ApiKeyGuard, GatewayAdapters, ReviewGateway};
use crate::review::adapters::{
    http::{HttpContentFetcher, ModelSettings, OpenAiCompatibleModel},
    postgres::PostgresReviewRepository,
};
use crate::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Gateway over the production adapters.
pub type Assessor = ReviewGateway<
    PostgresTaskRepository,
    PostgresReviewRepository,
    OpenAiCompatibleModel,
    HttpContentFetcher,
    DefaultClock,
>;

/// Failures while constructing the production gateway.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The outbound HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Builds the connection pool without opening connections eagerly.
#[must_use]
pub fn connection_pool(config: &AssessorConfig) -> TaskPgPool {
    Pool::builder()
        .max_size(config.database_pool_size)
        .build_unchecked(ConnectionManager::<PgConnection>::new(&config.database_url))
}

/// Wires the production gateway from configuration.
///
/// Connections are opened lazily on first use, so a missing database is
/// reported by the first operation rather than here.
///
/// # Errors
///
/// Returns [`BootstrapError::HttpClient`] when the HTTP client cannot be
/// constructed.
pub fn build_assessor(config: &AssessorConfig) -> Result<Assessor, BootstrapError> {
    let pool = connection_pool(config);
    let client = reqwest::Client::builder().build()?;
    let model = OpenAiCompatibleModel::new(
        client.clone(),
        ModelSettings {
            endpoint: config.model_endpoint.clone(),
            api_key: config.model_api_key.clone(),
            model: config.model_name.clone(),
            temperature: config.model_temperature,
        },
    );

    let assessor = ReviewGateway::new(
        ApiKeyGuard::new(&config.agent_api_key),
        AdminGuard::new(config.admin_password.as_deref()),
        GatewayAdapters {
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            reviews: Arc::new(PostgresReviewRepository::new(pool)),
            model: Arc::new(model),
            fetcher: Arc::new(HttpContentFetcher::new(client)),
            clock: Arc::new(DefaultClock),
        },
    );
    info!(
        model = %config.model_name,
        pool_size = config.database_pool_size,
        "assessor initialised"
    );
    Ok(assessor)
}
