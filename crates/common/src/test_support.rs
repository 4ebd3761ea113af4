#[cfg(test)]
pub mod tests {
    use crate::parameters::AdRequestInput;
    use crate::sdk::SdkContext;

    pub fn crate_test_settings_str() -> String {
        r#"
            [server]
            host = "https://prebid.customhost.net/openrtb2/auction"
            account_id = "test-account"

            [server.stored_bid_responses]
            bidder = "stored-response"

            [sdk]
            coppa_enabled = false
            use_external_browser = false

            [app]
            name = "Test App"
            bundle = "org.prebid.testapp"
            version = "1.0.0"
            store_url = "https://play.google.com/store/apps/details?id=org.prebid.testapp"

            [device]
            ua = "Mozilla/5.0 (Linux; Android 14)"
            make = "Google"
            model = "Pixel 8"
            os = "Android"
            osv = "14"
            w = 1080
            h = 2400

            [targeting]
            context_keywords = ["contextKeyword1", "contextKeyword2"]
            "#
        .to_string()
    }

    /// Context with an empty account and every switch at its default.
    pub fn create_test_context() -> SdkContext {
        SdkContext::default()
    }

    /// Serialized form of the assembled request.
    pub fn request_json(input: &AdRequestInput) -> serde_json::Value {
        serde_json::to_value(input.bid_request()).expect("should serialize bid request")
    }
}
