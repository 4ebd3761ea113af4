//! Parameter builders.
//!
//! Each builder fills one facet of the bid request. [`RequestParametersBuilder`]
//! runs them in order and merges the global ORTB config last.

pub mod app_info;
pub mod basic;
pub mod device_info;
pub mod ortb_config;
pub mod prebid_ext;
pub mod user_consent;

use error_stack::{Report, ResultExt};
use serde_json::Value as Json;

use crate::configuration::AdUnitConfiguration;
use crate::error::RequestBuilderError;
use crate::openrtb::BidRequest;
use crate::sdk::SdkContext;

use self::app_info::AppInfoParameterBuilder;
use self::basic::BasicParameterBuilder;
use self::device_info::DeviceInfoParameterBuilder;
use self::user_consent::UserConsentParameterBuilder;

/// Top-level keys the global ORTB config may not override.
const PROTECTED_REQUEST_KEYS: &[&str] = &["id", "imp"];

/// Bid request under construction.
#[derive(Debug, Clone, Default)]
pub struct AdRequestInput {
    bid_request: BidRequest,
}

impl AdRequestInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bid_request(&self) -> &BidRequest {
        &self.bid_request
    }

    pub fn bid_request_mut(&mut self) -> &mut BidRequest {
        &mut self.bid_request
    }

    #[must_use]
    pub fn into_bid_request(self) -> BidRequest {
        self.bid_request
    }
}

/// Populates one facet of a bid request.
pub trait ParameterBuilder {
    fn append_builder_parameters(&self, input: &mut AdRequestInput);
}

/// Runs the standard builder chain for one ad unit.
pub struct RequestParametersBuilder<'a> {
    sdk: &'a SdkContext,
    builders: Vec<Box<dyn ParameterBuilder + 'a>>,
}

impl<'a> RequestParametersBuilder<'a> {
    /// `browser_activity_available` tells whether the host can open clicks in
    /// an in-app browser.
    #[must_use]
    pub fn new(
        config: &'a AdUnitConfiguration,
        sdk: &'a SdkContext,
        browser_activity_available: bool,
    ) -> Self {
        let builders: Vec<Box<dyn ParameterBuilder + 'a>> = vec![
            Box::new(BasicParameterBuilder::new(
                config,
                sdk,
                browser_activity_available,
            )),
            Box::new(AppInfoParameterBuilder::new(sdk)),
            Box::new(DeviceInfoParameterBuilder::new(sdk)),
            Box::new(UserConsentParameterBuilder::new(sdk)),
        ];
        Self { sdk, builders }
    }

    /// Appends an extra builder that runs after the standard ones.
    #[must_use]
    pub fn with_builder(mut self, builder: Box<dyn ParameterBuilder + 'a>) -> Self {
        self.builders.push(builder);
        self
    }

    /// Runs every builder and returns the request before ORTB config merging.
    #[must_use]
    pub fn assemble(&self) -> AdRequestInput {
        let mut input = AdRequestInput::new();
        for builder in &self.builders {
            builder.append_builder_parameters(&mut input);
        }
        input
    }

    /// Builds the final JSON document, including the global ORTB config.
    ///
    /// # Errors
    ///
    /// Returns [`RequestBuilderError::Serialization`] if the request cannot
    /// be serialized.
    pub fn build_json(&self) -> Result<Json, Report<RequestBuilderError>> {
        let input = self.assemble();
        let mut json = serde_json::to_value(input.bid_request()).change_context(
            RequestBuilderError::Serialization {
                message: "Failed to serialize bid request".to_string(),
            },
        )?;

        if let Some(raw) = self.sdk.targeting.global_ortb_config.as_deref() {
            if let (Some(overlay), Some(request)) = (
                ortb_config::parse_ortb_config(raw, "global"),
                json.as_object_mut(),
            ) {
                ortb_config::merge_objects(request, overlay, PROTECTED_REQUEST_KEYS);
            }
        }

        log::debug!("Assembled bid request {}", json["id"]);
        Ok(json)
    }

    /// Builds the final request as a typed value. Keys merged from the ORTB
    /// config that the model does not name land in `extra`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestBuilderError::Serialization`] if the merged document
    /// no longer matches the bid request schema.
    pub fn build(&self) -> Result<BidRequest, Report<RequestBuilderError>> {
        let json = self.build_json()?;
        serde_json::from_value(json).change_context(RequestBuilderError::Serialization {
            message: "Merged bid request does not match the OpenRTB model".to_string(),
        })
    }
}

/// Builds the bid request for `config` with the standard builder chain.
///
/// # Errors
///
/// Returns an error if the request cannot be serialized.
pub fn build_bid_request(
    config: &AdUnitConfiguration,
    sdk: &SdkContext,
    browser_activity_available: bool,
) -> Result<BidRequest, Report<RequestBuilderError>> {
    RequestParametersBuilder::new(config, sdk, browser_activity_available).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ad_format::AdFormat;
    use crate::configuration::AdSize;
    use crate::test_support::tests::create_test_context;
    use serde_json::json;

    fn banner_config() -> AdUnitConfiguration {
        let mut config = AdUnitConfiguration::new("config");
        config.set_ad_format(AdFormat::Banner);
        config.add_size(AdSize::new(320, 50));
        config
    }

    #[test]
    fn global_ortb_config_is_merged_into_request() {
        let config = banner_config();
        let mut sdk = create_test_context();
        sdk.targeting.global_ortb_config = Some(
            r#"{"arbitraryparamkey1":"arbitraryparamvalue1","ext":{"otherExtParam":"otherParam"}}"#
                .to_string(),
        );

        let json = RequestParametersBuilder::new(&config, &sdk, true)
            .build_json()
            .expect("should build request");

        assert_eq!(json["arbitraryparamkey1"], "arbitraryparamvalue1");
        assert_eq!(json["ext"]["otherExtParam"], "otherParam");
        assert!(json["ext"]["prebid"].is_object(), "generated ext is kept");
    }

    #[test]
    fn global_ortb_config_cannot_replace_id_or_imps() {
        let config = banner_config();
        let mut sdk = create_test_context();
        sdk.targeting.global_ortb_config = Some(r#"{"id":"forced","imp":[]}"#.to_string());

        let request = build_bid_request(&config, &sdk, true).expect("should build request");
        assert_ne!(request.id, "forced");
        assert_eq!(request.imp.len(), 1);
    }

    #[test]
    fn invalid_global_ortb_config_is_ignored() {
        let config = banner_config();
        let mut sdk = create_test_context();
        sdk.targeting.global_ortb_config =
            Some(r#""arbitraryparamkey1":"arbitraryparamvalue1"}"#.to_string());

        let json = RequestParametersBuilder::new(&config, &sdk, true)
            .build_json()
            .expect("should build request");
        assert!(json.get("arbitraryparamkey1").is_none());
    }

    #[test]
    fn typed_build_keeps_merged_keys_in_extra() {
        let config = banner_config();
        let mut sdk = create_test_context();
        sdk.targeting.global_ortb_config = Some(r#"{"tmax":500}"#.to_string());

        let request = build_bid_request(&config, &sdk, true).expect("should build request");
        assert_eq!(request.extra.get("tmax"), Some(&json!(500)));
    }

    #[test]
    fn global_ortb_config_keys_inside_nested_objects_are_kept() {
        let config = banner_config();
        let mut sdk = create_test_context();
        sdk.targeting.global_ortb_config =
            Some(r#"{"app":{"cat":["IAB1"]},"device":{"dnt":1}}"#.to_string());

        let json = RequestParametersBuilder::new(&config, &sdk, true)
            .build_json()
            .expect("should build request");
        assert_eq!(json["app"]["cat"], json!(["IAB1"]));
        assert_eq!(json["device"]["dnt"], 1);

        let request = build_bid_request(&config, &sdk, true).expect("should build request");
        let app = request.app.expect("should have app");
        assert_eq!(app.extra.get("cat"), Some(&json!(["IAB1"])));
        let device = request.device.expect("should have device");
        assert_eq!(device.extra.get("dnt"), Some(&json!(1)));
    }

    #[test]
    fn imp_ortb_config_keys_inside_nested_objects_are_kept() {
        let mut config = banner_config();
        config.imp_ortb_config =
            Some(r#"{"banner":{"battr":[1,2],"btype":[4]}}"#.to_string());
        let sdk = create_test_context();

        let json = RequestParametersBuilder::new(&config, &sdk, true)
            .build_json()
            .expect("should build request");
        assert_eq!(json["imp"][0]["banner"]["battr"], json!([1, 2]));
        assert_eq!(json["imp"][0]["banner"]["btype"], json!([4]));
        assert_eq!(json["imp"][0]["banner"]["format"], json!([{"w": 320, "h": 50}]));

        let request = build_bid_request(&config, &sdk, true).expect("should build request");
        let banner = request.imp[0].banner.as_ref().expect("should have banner");
        assert_eq!(banner.extra.get("battr"), Some(&json!([1, 2])));
        assert_eq!(banner.extra.get("btype"), Some(&json!([4])));
    }

    struct TagBuilder;

    impl ParameterBuilder for TagBuilder {
        fn append_builder_parameters(&self, input: &mut AdRequestInput) {
            input
                .bid_request_mut()
                .extra
                .insert("test".to_string(), json!(1));
        }
    }

    #[test]
    fn extra_builders_run_after_standard_chain() {
        let config = banner_config();
        let sdk = create_test_context();

        let input = RequestParametersBuilder::new(&config, &sdk, true)
            .with_builder(Box::new(TagBuilder))
            .assemble();
        let request = input.into_bid_request();
        assert_eq!(request.extra.get("test"), Some(&json!(1)));
        assert_eq!(request.imp.len(), 1);
    }
}
