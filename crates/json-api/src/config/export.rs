//! Export Config

use clap::Args;
use tamweely_app::domain::employees::DEFAULT_EXPORT_LIMIT;

/// Spreadsheet export settings.
#[derive(Debug, Args)]
pub struct ExportConfig {
    /// Largest number of employees a single export may contain
    #[arg(long, env = "EXPORT_LIMIT", default_value_t = DEFAULT_EXPORT_LIMIT)]
    pub export_limit: u64,
}
