//! Infrastructure wiring: store selection + the failure pipeline.

use std::sync::Arc;

use storefront_infra::catalog::{CatalogStore, InMemoryCatalog};
use storefront_infra::directory::{DirectoryStore, InMemoryDirectory};
use storefront_infra::postgres::{PostgresCatalog, PostgresDirectory};

use crate::app::failure::FailurePipeline;

pub struct AppServices {
    pub catalog: Arc<dyn CatalogStore>,
    pub directory: Arc<dyn DirectoryStore>,
    pub failures: FailurePipeline,
}

/// Build services from the environment: Postgres stores when `DATABASE_URL`
/// is set and reachable, in-memory stores otherwise.
pub async fn build_services() -> AppServices {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        match sqlx::postgres::PgPoolOptions::new().connect(&url).await {
            Ok(pool) => {
                tracing::info!("using postgres stores");
                return AppServices {
                    catalog: Arc::new(PostgresCatalog::new(pool.clone())),
                    directory: Arc::new(PostgresDirectory::new(pool)),
                    failures: FailurePipeline::standard(),
                };
            }
            Err(err) => {
                tracing::warn!(error = %err, "DATABASE_URL set but connection failed; using in-memory stores");
            }
        }
    }

    AppServices {
        catalog: Arc::new(InMemoryCatalog::new()),
        directory: Arc::new(InMemoryDirectory::new()),
        failures: FailurePipeline::standard(),
    }
}
