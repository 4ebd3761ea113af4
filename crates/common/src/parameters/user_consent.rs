//! Privacy signals: GDPR, US privacy and GPP.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::sdk::SdkContext;

use super::{AdRequestInput, ParameterBuilder};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConsent {
    /// `None` when GDPR applicability is unknown.
    pub subject_to_gdpr: Option<bool>,
    /// TCF consent string.
    pub gdpr_consent: Option<String>,
    /// CCPA string, e.g. `1YNN`.
    pub us_privacy: Option<String>,
    pub gpp_string: Option<String>,
    pub gpp_sid: Vec<i32>,
}

impl UserConsent {
    /// Parses an underscore separated section id list such as `"2_6"`.
    /// Entries that are not integers are skipped.
    pub fn set_gpp_sid_str(&mut self, sid: &str) {
        self.gpp_sid = sid
            .split('_')
            .filter_map(|part| part.trim().parse().ok())
            .collect();
    }
}

pub struct UserConsentParameterBuilder<'a> {
    sdk: &'a SdkContext,
}

impl<'a> UserConsentParameterBuilder<'a> {
    #[must_use]
    pub fn new(sdk: &'a SdkContext) -> Self {
        Self { sdk }
    }
}

impl ParameterBuilder for UserConsentParameterBuilder<'_> {
    fn append_builder_parameters(&self, input: &mut AdRequestInput) {
        let consent = &self.sdk.consent;
        let request = input.bid_request_mut();

        if let Some(subject_to_gdpr) = consent.subject_to_gdpr {
            request
                .regs_mut()
                .ext
                .insert("gdpr".to_string(), json!(i32::from(subject_to_gdpr)));

            if let Some(consent_string) = consent.gdpr_consent.as_deref().filter(|c| !c.is_empty()) {
                request
                    .user_mut()
                    .ext
                    .insert("consent".to_string(), json!(consent_string));
            }
        }

        if let Some(us_privacy) = consent.us_privacy.as_deref().filter(|s| !s.is_empty()) {
            request
                .regs_mut()
                .ext
                .insert("us_privacy".to_string(), json!(us_privacy));
        }

        if let Some(gpp) = consent.gpp_string.as_deref().filter(|s| !s.is_empty()) {
            request.regs_mut().gpp = Some(gpp.to_string());
        }
        if !consent.gpp_sid.is_empty() {
            request.regs_mut().gpp_sid.clone_from(&consent.gpp_sid);
        }
    }
}
