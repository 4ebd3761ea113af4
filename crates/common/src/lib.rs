//! OpenRTB bid request assembly for Prebid Mobile ad units.
//!
//! The crate turns an ad unit configuration plus SDK state into the JSON
//! document sent to Prebid Server. It performs no I/O.
//!
//! # Modules
//!
//! - [`ad_format`]: Ad formats and their mapping from public unit formats
//! - [`configuration`]: Ad unit configuration, banner and video parameters
//! - [`constants`]: Wire constants and default endpoints
//! - [`error`]: Error types
//! - [`logging`]: Logger setup for binaries
//! - [`native`]: Native 1.2 request configuration
//! - [`openrtb`]: Serde model of the emitted bid request
//! - [`parameters`]: Parameter builders that populate the bid request
//! - [`plugin`]: Plugin renderer registry
//! - [`sdk`]: SDK context passed to the builders
//! - [`settings`]: TOML and environment backed settings
//! - [`signals`]: OpenRTB enumerations
//! - [`targeting`]: User and context targeting
//! - [`test_support`]: Testing fixtures
//! - [`url_builder`]: Auction endpoint resolution

pub mod ad_format;
pub mod configuration;
pub mod constants;
pub mod error;
pub mod logging;
pub mod native;
pub mod openrtb;
pub mod parameters;
pub mod plugin;
pub mod sdk;
pub mod settings;
pub mod signals;
pub mod targeting;
pub mod test_support;
pub mod url_builder;
