use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use crate::errors::RiskError;
use crate::models::SubmissionForm;
use super::credentials::{env_value, resolve_env_reference};
use super::schema::CONFIG_SCHEMA;
use super::types::*;

pub async fn parse_config(path: &Path) -> Result<RiskscopeConfig, RiskError> {
    if !path.exists() {
        return Err(RiskError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(RiskError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

    // An empty file parses as null; treat it as an empty config
    if yaml.is_null() {
        return Ok(RiskscopeConfig::default());
    }

    validate_schema(&yaml)?;

    let mut config: RiskscopeConfig = serde_yaml::from_value(yaml)?;
    resolve_references(&mut config);
    validate_semantics(&config)?;

    Ok(config)
}

/// Resolve settings: command line, then environment, then config file, then defaults.
///
/// With no explicit path, `riskscope.yaml` in the working directory is used if present.
pub async fn load_settings(
    config_path: Option<&str>,
    overrides: &SettingsOverrides,
) -> Result<Settings, RiskError> {
    let file_config = match config_path {
        Some(path) => Some(parse_config(Path::new(path)).await?),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            debug!(path = DEFAULT_CONFIG_FILE, "Using config file from working directory");
            Some(parse_config(Path::new(DEFAULT_CONFIG_FILE)).await?)
        }
        None => None,
    };

    let env = SettingsOverrides {
        base_url: env_value(ENV_BASE_URL),
        db_path: env_value(ENV_DB_PATH),
        ephemeral: false,
    };

    resolve_settings(file_config.as_ref(), &env, overrides)
}

pub(crate) fn resolve_settings(
    file: Option<&RiskscopeConfig>,
    env: &SettingsOverrides,
    cli: &SettingsOverrides,
) -> Result<Settings, RiskError> {
    let defaults = Settings::default();
    let service = file.and_then(|c| c.service.as_ref());
    let storage = file.and_then(|c| c.storage.as_ref());
    let submission = file.and_then(|c| c.submission.as_ref());

    let base_url = cli.base_url.clone()
        .or_else(|| env.base_url.clone())
        .or_else(|| service.and_then(|s| s.base_url.clone()))
        .unwrap_or(defaults.base_url);
    validate_base_url(&base_url)?;

    let db_path = cli.db_path.clone()
        .or_else(|| env.db_path.clone())
        .or_else(|| storage.and_then(|s| s.path.clone()))
        .unwrap_or(defaults.db_path);

    Ok(Settings {
        base_url,
        timeout: service.and_then(|s| s.timeout_secs).map(Duration::from_secs),
        db_path,
        ephemeral: cli.ephemeral,
        default_platform: submission
            .and_then(|s| s.default_platform)
            .unwrap_or(defaults.default_platform),
        default_region_codes: submission
            .and_then(|s| s.default_region_codes.clone())
            .filter(|codes| !codes.is_empty())
            .unwrap_or(defaults.default_region_codes),
    })
}

fn resolve_references(config: &mut RiskscopeConfig) {
    if let Some(url) = config.service.as_mut().and_then(|s| s.base_url.as_mut()) {
        *url = resolve_env_reference(url);
    }
    if let Some(path) = config.storage.as_mut().and_then(|s| s.path.as_mut()) {
        *path = resolve_env_reference(path);
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), RiskError> {
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| RiskError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| RiskError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| RiskError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; the typed parse and semantic checks are authoritative
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

fn validate_base_url(base_url: &str) -> Result<(), RiskError> {
    let url = Url::parse(base_url)
        .map_err(|e| RiskError::Config(format!("Invalid base_url {}: {}", base_url, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(RiskError::Config(format!(
            "base_url must use http or https, got {}",
            url.scheme()
        )));
    }
    Ok(())
}

/// Hard checks on values the typed parse cannot express.
fn validate_semantics(config: &RiskscopeConfig) -> Result<(), RiskError> {
    if let Some(url) = config.service.as_ref().and_then(|s| s.base_url.as_deref()) {
        validate_base_url(url)?;
    }

    if config.service.as_ref().and_then(|s| s.timeout_secs) == Some(0) {
        return Err(RiskError::Config("service.timeout_secs must be at least 1".into()));
    }

    if let Some(path) = config.storage.as_ref().and_then(|s| s.path.as_deref()) {
        if path.trim().is_empty() {
            return Err(RiskError::Config("storage.path must not be empty".into()));
        }
    }

    if let Some(codes) = config.submission.as_ref().and_then(|s| s.default_region_codes.clone()) {
        // Reuse the submission form's own region rules
        let mut sample = SubmissionForm::new("https://region.check", "region check", crate::models::ThreatType::Malware);
        sample.region_codes = codes;
        sample.validate()
            .map_err(|e| RiskError::Config(format!("submission.default_region_codes: {}", e)))?;
    }

    Ok(())
}
