//! Auction endpoint and request body assembly.

use error_stack::Report;
use serde_json::Value as Json;

use crate::configuration::AdUnitConfiguration;
use crate::error::RequestBuilderError;
use crate::parameters::RequestParametersBuilder;
use crate::sdk::{SdkContext, ServerHost};

/// Resolves the path a request is sent to.
pub trait UrlPathBuilder {
    fn build_url_path(&self, domain: Option<&str>) -> String;
}

/// Path builder for bid requests. Always resolves to the configured Prebid
/// Server host; the domain argument is accepted for interface parity only.
#[derive(Debug, Clone)]
pub struct BidPathBuilder {
    host: ServerHost,
}

impl BidPathBuilder {
    #[must_use]
    pub fn new(host: ServerHost) -> Self {
        Self { host }
    }
}

impl UrlPathBuilder for BidPathBuilder {
    fn build_url_path(&self, _domain: Option<&str>) -> String {
        self.host.host_url().to_string()
    }
}

/// Endpoint plus JSON body of a bid request.
#[derive(Debug, Clone, PartialEq)]
pub struct BidUrlComponents {
    pub url: String,
    pub body: Json,
}

/// Combines a path builder with the parameter builder chain.
pub struct UrlBuilder<'a, P: UrlPathBuilder> {
    path_builder: P,
    parameters: RequestParametersBuilder<'a>,
}

impl<'a> UrlBuilder<'a, BidPathBuilder> {
    /// Bid request builder targeting the context's server host.
    #[must_use]
    pub fn for_bid_request(
        config: &'a AdUnitConfiguration,
        sdk: &'a SdkContext,
        browser_activity_available: bool,
    ) -> Self {
        Self::new(
            BidPathBuilder::new(sdk.server.host.clone()),
            RequestParametersBuilder::new(config, sdk, browser_activity_available),
        )
    }
}

impl<'a, P: UrlPathBuilder> UrlBuilder<'a, P> {
    #[must_use]
    pub fn new(path_builder: P, parameters: RequestParametersBuilder<'a>) -> Self {
        Self {
            path_builder,
            parameters,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the request body cannot be serialized.
    pub fn build(&self) -> Result<BidUrlComponents, Report<RequestBuilderError>> {
        Ok(BidUrlComponents {
            url: self.path_builder.build_url_path(None),
            body: self.parameters.build_json()?,
        })
    }
}
