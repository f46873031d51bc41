//! Run the enquiry reminder job once and print the summary as JSON.
//!
//! Usage: `enquiry-reminders [CONFIG_PATH]`

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;

use livestock_core::telemetry::init_tracing;
use livestock_core::{Database, PortalConfig};
use livestock_functions::run_enquiry_reminders;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = PortalConfig::load(config_path.as_deref()).context("loading configuration")?;
    init_tracing(&config.log_filter);

    let db = Database::open(&config.database_path).with_context(|| {
        format!("opening database at {}", config.database_path.display())
    })?;

    let summary = run_enquiry_reminders(&db, Utc::now(), config.enquiry_reminder_after_hours)
        .context("running enquiry reminders")?;

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
