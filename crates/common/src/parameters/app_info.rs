//! `app` object.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::constants::{APP_EXT_SOURCE_VALUE, SDK_VERSION};
use crate::sdk::SdkContext;

use super::{AdRequestInput, ParameterBuilder};

/// Host application details supplied by the embedding app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppInfo {
    pub name: Option<String>,
    pub bundle: Option<String>,
    pub version: Option<String>,
    #[validate(url)]
    pub store_url: Option<String>,
    pub domain: Option<String>,
}

pub struct AppInfoParameterBuilder<'a> {
    sdk: &'a SdkContext,
}

impl<'a> AppInfoParameterBuilder<'a> {
    #[must_use]
    pub fn new(sdk: &'a SdkContext) -> Self {
        Self { sdk }
    }
}

impl ParameterBuilder for AppInfoParameterBuilder<'_> {
    fn append_builder_parameters(&self, input: &mut AdRequestInput) {
        let info = &self.sdk.app;
        let app = input.bid_request_mut().app_mut();

        app.name.clone_from(&info.name);
        app.bundle.clone_from(&info.bundle);
        app.ver.clone_from(&info.version);
        app.storeurl.clone_from(&info.store_url);
        app.domain.clone_from(&info.domain);

        let account_id = &self.sdk.server.account_id;
        if !account_id.is_empty() {
            app.publisher_mut().id = Some(account_id.clone());
        }

        app.keywords = self.sdk.targeting.context_keywords_joined();

        app.ext.insert(
            "prebid".to_string(),
            json!({"source": APP_EXT_SOURCE_VALUE, "version": SDK_VERSION}),
        );
        if let Some(data) = self.sdk.targeting.context_data_json() {
            app.ext.insert("data".to_string(), data);
        }
    }
}
