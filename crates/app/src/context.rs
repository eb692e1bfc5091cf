//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    clock::Clock,
    database,
    domain::{
        departments::{DepartmentsRepository, DepartmentsService, StoreDepartmentsService},
        employees::{EmployeesRepository, EmployeesService, StoreEmployeesService},
        jobs::{JobsRepository, JobsService, StoreJobsService},
    },
    store::{MemoryStore, PgStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),
}

/// Services shared by every request.
#[derive(Clone)]
pub struct AppContext {
    pub departments: Arc<dyn DepartmentsService>,
    pub jobs: Arc<dyn JobsService>,
    pub employees: Arc<dyn EmployeesService>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Build services over a store that holds all three record kinds.
    pub fn from_store<S>(store: Arc<S>, clock: Arc<dyn Clock>, export_limit: u64) -> Self
    where
        S: DepartmentsRepository + JobsRepository + EmployeesRepository + 'static,
    {
        Self {
            departments: Arc::new(StoreDepartmentsService::new(
                store.clone(),
                store.clone(),
                clock.clone(),
            )),
            jobs: Arc::new(StoreJobsService::new(store.clone(), store.clone(), clock.clone())),
            employees: Arc::new(
                StoreEmployeesService::new(store.clone(), store.clone(), store, clock.clone())
                    .with_export_limit(export_limit),
            ),
            clock,
        }
    }

    /// Build services over a fresh in-memory store.
    pub fn in_memory(clock: Arc<dyn Clock>, export_limit: u64) -> Self {
        Self::from_store(Arc::new(MemoryStore::new()), clock, export_limit)
    }

    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        clock: Arc<dyn Clock>,
        export_limit: u64,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_store(
            Arc::new(PgStore::new(pool)),
            clock,
            export_limit,
        ))
    }
}
