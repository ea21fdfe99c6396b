//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! metadata and company leave settings from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::sources::SettingsSource;

use super::types::{CompanySettings, EngineConfig, EngineMetadata};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Rule set metadata
/// └── companies/
///     └── acme.yaml        # Leave settings for one company
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let settings = loader.get_settings("acme").unwrap();
/// println!("Annual leave: {} days", settings.annual_leave_days_per_year);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` or the `companies` directory is missing
    /// - The `companies` directory holds no YAML files
    /// - Any file contains invalid YAML or misses a required field
    /// - Any company's settings fail [`CompanySettings::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let companies = Self::load_companies(&path.join("companies"))?;

        Ok(Self {
            config: EngineConfig::new(metadata, companies),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every company settings file from the companies directory.
    fn load_companies(companies_dir: &Path) -> EngineResult<Vec<CompanySettings>> {
        let dir_str = companies_dir.display().to_string();

        let entries = fs::read_dir(companies_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut companies = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                let settings = Self::load_yaml::<CompanySettings>(&path)?;
                settings
                    .validate()
                    .map_err(|e| EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?;
                companies.push(settings);
            }
        }

        if companies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no company settings found)", dir_str),
            });
        }

        Ok(companies)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Gets the settings of a company.
    ///
    /// # Returns
    ///
    /// Returns the settings if configured, or `SettingsNotFound`.
    pub fn get_settings(&self, company_id: &str) -> EngineResult<&CompanySettings> {
        self.config
            .companies()
            .get(company_id)
            .ok_or_else(|| EngineError::SettingsNotFound {
                company_id: company_id.to_string(),
            })
    }
}

impl SettingsSource for ConfigLoader {
    fn get_company_settings(&self, company_id: &str) -> EngineResult<Option<CompanySettings>> {
        Ok(self.config.companies().get(company_id).cloned())
    }
}
