/// Version reported in `displaymanagerver`, `app.ext.prebid.version` and the
/// default OMID partner version.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DISPLAY_MANAGER_VALUE: &str = "prebid-mobile";
pub const APP_EXT_SOURCE_VALUE: &str = "prebid-mobile";

/// Default OM SDK partner name for rendering ad units.
pub const OM_PARTNER_NAME: &str = "Prebid";

pub const KEY_OM_PARTNER_NAME: &str = "omidpn";
pub const KEY_OM_PARTNER_VERSION: &str = "omidpv";

pub const SUPPORTED_VIDEO_MIME_TYPES: &[&str] =
    &["video/mp4", "video/3gpp", "video/webm", "video/mkv"];
/// VAST 2.0 and VAST 2.0 Wrapper.
pub const SUPPORTED_VIDEO_PROTOCOLS: &[i32] = &[2, 5];

pub const VIDEO_INTERSTITIAL_PLACEMENT: i32 = 5;
pub const VIDEO_DELIVERY_DOWNLOAD: i32 = 3;
pub const VIDEO_LINEARITY_LINEAR: i32 = 1;
/// On leaving viewport or when terminated by user.
pub const VIDEO_INTERSTITIAL_PLAYBACK_END: i32 = 2;

pub const NATIVE_REQUEST_VERSION: &str = "1.2";

/// Custom native identifiers must be at or above this value.
pub const NATIVE_CUSTOM_ID_MIN: i32 = 500;

pub const HOST_APPNEXUS: &str = "https://prebid.adnxs.com/pbs/v1/openrtb2/auction";
pub const HOST_RUBICON: &str = "https://prebid-server.rubiconproject.com/openrtb2/auction";

pub const ENV_PREFIX: &str = "PREBID_MOBILE";
pub const ENV_SEPARATOR: &str = "__";
