use std::sync::Arc;

use tracing::{debug, info};

use crate::app::App;
use crate::cli::commands::Cli;
use crate::client::HttpRiskClient;
use crate::config::{self, Settings, SettingsOverrides};
use crate::db::Database;
use crate::errors::RiskError;
use crate::store::{MemorySlot, SlotStorage, SubmissionStore};

/// Resolve settings from the command line, environment and config file.
pub async fn load_settings(cli: &Cli) -> Result<Settings, RiskError> {
    let overrides = SettingsOverrides {
        base_url: cli.base_url.clone(),
        db_path: cli.db.clone(),
        ephemeral: cli.ephemeral,
    };
    config::load_settings(cli.config.as_deref(), &overrides).await
}

/// Wire the HTTP client and submission storage into an `App`.
pub fn build_app(settings: &Settings) -> Result<App, RiskError> {
    let client = Arc::new(HttpRiskClient::new(&settings.base_url, settings.timeout)?);
    info!(base_url = %client.base_url(), "Using reputation service");

    let storage: Arc<dyn SlotStorage> = if settings.ephemeral {
        debug!("Submission history kept in memory only");
        Arc::new(MemorySlot::new())
    } else {
        debug!(path = %settings.db_path, "Opening submission history");
        Arc::new(Database::new(&settings.db_path)?)
    };

    Ok(App::new(client.clone(), client, SubmissionStore::new(storage)))
}
