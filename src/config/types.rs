use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{Platform, DEFAULT_REGION_CODE};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_DB_PATH: &str = "./data/riskscope.db";
pub const DEFAULT_CONFIG_FILE: &str = "riskscope.yaml";

pub const ENV_BASE_URL: &str = "RISKSCOPE_BASE_URL";
pub const ENV_DB_PATH: &str = "RISKSCOPE_DB";

/// On-disk configuration file. Every section is optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RiskscopeConfig {
    pub service: Option<ServiceConfig>,
    pub storage: Option<StorageConfig>,
    pub submission: Option<SubmissionDefaults>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServiceConfig {
    /// Host serving `/api/scan`, `/api/submit` and `/api/submission/{id}`
    pub base_url: Option<String>,
    /// Client-side request timeout; unset waits indefinitely
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StorageConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SubmissionDefaults {
    pub default_platform: Option<Platform>,
    pub default_region_codes: Option<Vec<String>>,
}

/// Command-line values that take precedence over the environment and the file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub db_path: Option<String>,
    pub ephemeral: bool,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub db_path: String,
    /// Keep submissions in memory only
    pub ephemeral: bool,
    pub default_platform: Platform,
    pub default_region_codes: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            db_path: DEFAULT_DB_PATH.to_string(),
            ephemeral: false,
            default_platform: Platform::default(),
            default_region_codes: vec![DEFAULT_REGION_CODE.to_string()],
        }
    }
}
