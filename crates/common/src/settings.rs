//! Settings loading.
//!
//! Settings come from TOML merged with environment variables prefixed with
//! `PREBID_MOBILE__`, e.g. `PREBID_MOBILE__SERVER__ACCOUNT_ID` overrides
//! `server.account_id`.

use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{ENV_PREFIX, ENV_SEPARATOR};
use crate::error::RequestBuilderError;
use crate::parameters::app_info::AppInfo;
use crate::parameters::device_info::DeviceInfo;
use crate::parameters::user_consent::UserConsent;
use crate::plugin::PluginRenderer;
use crate::sdk::{SdkSettings, ServerSettings};
use crate::targeting::TargetingParams;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub sdk: SdkSettings,
    #[validate(nested)]
    pub app: AppInfo,
    #[validate(nested)]
    pub device: DeviceInfo,
    pub consent: UserConsent,
    pub targeting: TargetingParams,
    pub plugins: Vec<PluginRenderer>,
}

impl Settings {
    /// Parses settings from TOML and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`RequestBuilderError::Configuration`] if the TOML is invalid
    /// or does not match the settings schema.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<RequestBuilderError>> {
        let environment = Environment::default()
            .prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(RequestBuilderError::Configuration {
                message: "Failed to build configuration".to_string(),
            })?;

        config
            .try_deserialize()
            .change_context(RequestBuilderError::Configuration {
                message: "Failed to deserialize configuration".to_string(),
            })
    }

    /// Parses, then validates, settings.
    ///
    /// # Errors
    ///
    /// Returns [`RequestBuilderError::Configuration`] on parse or validation
    /// failure.
    pub fn from_toml_validated(toml_str: &str) -> Result<Self, Report<RequestBuilderError>> {
        let settings = Self::from_toml(toml_str)?;
        settings
            .validate()
            .change_context(RequestBuilderError::Configuration {
                message: "Settings validation failed".to_string(),
            })?;
        Ok(settings)
    }

    /// Serializes the effective settings (after environment overrides).
    ///
    /// # Errors
    ///
    /// Returns [`RequestBuilderError::Serialization`] if TOML encoding fails.
    pub fn to_canonical_toml(&self) -> Result<String, Report<RequestBuilderError>> {
        toml::to_string(self).change_context(RequestBuilderError::Serialization {
            message: "Failed to serialize settings to TOML".to_string(),
        })
    }
}
