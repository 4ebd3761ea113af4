//! `ext.prebid` objects for the request and the impression.

use serde_json::{json, Map, Value as Json};

use crate::ad_format::AdFormat;
use crate::configuration::AdUnitConfiguration;
use crate::sdk::SdkContext;

/// Request-level `ext.prebid`.
#[must_use]
pub fn request_prebid_ext(config: &AdUnitConfiguration, sdk: &SdkContext) -> Json {
    let mut prebid = Map::new();

    let cache = if config.is_ad_type(AdFormat::Vast) {
        json!({"vastxml": {}})
    } else if config.original_ad_unit || sdk.sdk.use_cache_for_reporting_with_rendering_api {
        json!({"bids": {}})
    } else {
        json!({})
    };
    prebid.insert("cache".to_string(), cache);

    prebid.insert(
        "storedrequest".to_string(),
        json!({"id": sdk.server.stored_request_id()}),
    );
    prebid.insert("targeting".to_string(), json!({}));

    if !sdk.targeting.access_control_list.is_empty() {
        prebid.insert(
            "data".to_string(),
            json!({"bidders": sdk.targeting.access_control_list}),
        );
    }

    if !config.original_ad_unit {
        if let Some(renderers) = sdk.plugins.sdk_json() {
            prebid.insert("sdk".to_string(), renderers);
        }
    }

    Json::Object(prebid)
}

/// Impression-level `ext.prebid`.
#[must_use]
pub fn imp_prebid_ext(config: &AdUnitConfiguration, sdk: &SdkContext) -> Json {
    let mut prebid = Map::new();

    prebid.insert(
        "storedrequest".to_string(),
        json!({"id": config.config_id.as_deref().unwrap_or_default()}),
    );

    let stored_bid_responses: Vec<Json> = sdk
        .server
        .stored_bid_responses
        .iter()
        .map(|(bidder, id)| json!({"bidder": bidder, "id": id}))
        .collect();
    if !stored_bid_responses.is_empty() {
        prebid.insert(
            "storedbidresponse".to_string(),
            Json::Array(stored_bid_responses),
        );
    }

    if let Some(id) = sdk
        .server
        .stored_auction_response
        .as_deref()
        .filter(|id| !id.is_empty())
    {
        prebid.insert("storedauctionresponse".to_string(), json!({"id": id}));
    }

    if config.rewarded {
        prebid.insert("is_rewarded_inventory".to_string(), json!(1));
    }

    Json::Object(prebid)
}
