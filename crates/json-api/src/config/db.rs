//! Database Config

use clap::Args;

/// Record store settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string; pending migrations run at startup
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Insert the default departments and jobs into empty tables at startup
    #[arg(long, env = "SEED_DEFAULTS", default_value_t = false)]
    pub seed_defaults: bool,
}
