//! SDK-wide state read by the parameter builders.
//!
//! Everything the mobile SDK keeps in process-wide mutable statics lives in
//! an explicit [`SdkContext`] value that callers pass to the builders.

use std::collections::BTreeMap;
use std::fmt;

use error_stack::Report;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{HOST_APPNEXUS, HOST_RUBICON};
use crate::error::RequestBuilderError;
use crate::parameters::app_info::AppInfo;
use crate::parameters::device_info::DeviceInfo;
use crate::parameters::user_consent::UserConsent;
use crate::plugin::PluginRendererRegistry;
use crate::settings::Settings;
use crate::targeting::TargetingParams;

/// Prebid Server auction endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ServerHost {
    #[default]
    Appnexus,
    Rubicon,
    Custom(String),
}

impl ServerHost {
    /// Validates and wraps a custom auction endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RequestBuilderError::Configuration`] unless `url` is an
    /// absolute http(s) URL.
    pub fn custom(url: &str) -> Result<Self, Report<RequestBuilderError>> {
        let parsed = Url::parse(url).map_err(|e| {
            Report::new(RequestBuilderError::Configuration {
                message: format!("invalid server host '{url}': {e}"),
            })
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Report::new(RequestBuilderError::Configuration {
                message: format!("server host '{url}' must use http or https"),
            }));
        }
        Ok(ServerHost::Custom(url.to_string()))
    }

    #[must_use]
    pub fn host_url(&self) -> &str {
        match self {
            ServerHost::Appnexus => HOST_APPNEXUS,
            ServerHost::Rubicon => HOST_RUBICON,
            ServerHost::Custom(url) => url,
        }
    }
}

impl TryFrom<String> for ServerHost {
    type Error = Report<RequestBuilderError>;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "appnexus" => Ok(ServerHost::Appnexus),
            "rubicon" => Ok(ServerHost::Rubicon),
            _ => ServerHost::custom(&value),
        }
    }
}

impl From<ServerHost> for String {
    fn from(host: ServerHost) -> String {
        match host {
            ServerHost::Appnexus => "appnexus".to_string(),
            ServerHost::Rubicon => "rubicon".to_string(),
            ServerHost::Custom(url) => url,
        }
    }
}

impl fmt::Display for ServerHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_url())
    }
}

/// Prebid Server account and stored-request identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: ServerHost,
    pub account_id: String,
    /// Takes precedence over `account_id` for `ext.prebid.storedrequest.id`
    /// when non-empty.
    pub auction_settings_id: Option<String>,
    pub stored_auction_response: Option<String>,
    /// Bidder name to stored bid response id.
    pub stored_bid_responses: BTreeMap<String, String>,
}

impl ServerSettings {
    /// Stored request id for the request-level `ext.prebid`.
    #[must_use]
    pub fn stored_request_id(&self) -> &str {
        match self.auction_settings_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => &self.account_id,
        }
    }

    pub fn add_stored_bid_response(&mut self, bidder: impl Into<String>, response_id: impl Into<String>) {
        self.stored_bid_responses
            .insert(bidder.into(), response_id.into());
    }

    pub fn clear_stored_bid_responses(&mut self) {
        self.stored_bid_responses.clear();
    }
}

/// Behavioural switches of the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkSettings {
    pub coppa_enabled: bool,
    pub use_external_browser: bool,
    pub send_mraid_support_params: bool,
    pub use_cache_for_reporting_with_rendering_api: bool,
}

impl Default for SdkSettings {
    fn default() -> Self {
        Self {
            coppa_enabled: false,
            use_external_browser: false,
            send_mraid_support_params: true,
            use_cache_for_reporting_with_rendering_api: false,
        }
    }
}

/// All SDK state a bid request is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SdkContext {
    pub server: ServerSettings,
    pub sdk: SdkSettings,
    pub app: AppInfo,
    pub device: DeviceInfo,
    pub consent: UserConsent,
    pub targeting: TargetingParams,
    pub plugins: PluginRendererRegistry,
}

impl SdkContext {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let mut plugins = PluginRendererRegistry::default();
        for renderer in &settings.plugins {
            plugins.register(renderer.clone());
        }

        Self {
            server: settings.server.clone(),
            sdk: settings.sdk.clone(),
            app: settings.app.clone(),
            device: settings.device.clone(),
            consent: settings.consent.clone(),
            targeting: settings.targeting.clone(),
            plugins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::PluginRenderer;

    #[test]
    fn named_hosts_resolve_to_urls() {
        assert_eq!(ServerHost::Appnexus.host_url(), HOST_APPNEXUS);
        assert_eq!(ServerHost::Rubicon.host_url(), HOST_RUBICON);
        assert_eq!(
            ServerHost::try_from("Rubicon".to_string()).expect("should parse"),
            ServerHost::Rubicon
        );
    }

    #[test]
    fn custom_host_requires_http_url() {
        let host = ServerHost::custom("https://prebid.customhost.net/openrtb2/auction")
            .expect("should accept https url");
        assert_eq!(
            host.host_url(),
            "https://prebid.customhost.net/openrtb2/auction"
        );

        assert!(ServerHost::custom("not a url").is_err());
        assert!(ServerHost::custom("ftp://prebid.example/auction").is_err());
    }

    #[test]
    fn stored_request_id_prefers_auction_settings_id() {
        let mut server = ServerSettings {
            account_id: "account".to_string(),
            ..ServerSettings::default()
        };
        assert_eq!(server.stored_request_id(), "account");

        server.auction_settings_id = Some(String::new());
        assert_eq!(server.stored_request_id(), "account");

        server.auction_settings_id = Some("settings".to_string());
        assert_eq!(server.stored_request_id(), "settings");
    }

    #[test]
    fn context_registers_configured_plugins() {
        let mut settings = Settings::default();
        settings.plugins.push(PluginRenderer::new("FakePlugin", "1.0"));

        let context = SdkContext::from_settings(&settings);
        assert!(context.plugins.contains("FakePlugin"));
        assert!(context.sdk.send_mraid_support_params);
    }
}
