use std::sync::Arc;

use clap::Args;
use tamweely_app::{
    clock::SystemClock, context::AppContext, domain::employees::DEFAULT_EXPORT_LIMIT, seed,
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

#[expect(clippy::print_stdout, reason = "Command output for the operator")]
pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let ctx = AppContext::from_database_url(
        &args.database_url,
        Arc::new(SystemClock),
        DEFAULT_EXPORT_LIMIT,
    )
    .await
    .map_err(|error| format!("failed to initialize app: {error}"))?;

    let report = seed::seed(&ctx)
        .await
        .map_err(|error| format!("failed to seed: {error}"))?;

    println!("departments_created: {}", report.departments);
    println!("jobs_created: {}", report.jobs);

    Ok(())
}
