//! Ad unit formats.
//!
//! [`AdUnitFormat`] is what integrators pick when creating an ad unit;
//! [`AdFormat`] is the internal classification the parameter builders
//! branch on.

use std::collections::BTreeSet;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::error::RequestBuilderError;

/// Format requested by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdUnitFormat {
    #[serde(alias = "display")]
    Banner,
    Video,
}

/// Internal ad format. Must only be derived inside the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdFormat {
    Banner,
    Interstitial,
    Native,
    Vast,
}

impl AdFormat {
    /// Maps integrator-facing formats to internal ones.
    ///
    /// # Errors
    ///
    /// Returns [`RequestBuilderError::InvalidAdUnit`] if `formats` is empty.
    pub fn from_set(
        formats: &BTreeSet<AdUnitFormat>,
        is_interstitial: bool,
    ) -> Result<BTreeSet<AdFormat>, Report<RequestBuilderError>> {
        if formats.is_empty() {
            return Err(Report::new(RequestBuilderError::InvalidAdUnit {
                message: "List of ad unit formats must contain at least one item.".to_string(),
            }));
        }

        Ok(formats
            .iter()
            .map(|format| match format {
                AdUnitFormat::Banner if is_interstitial => AdFormat::Interstitial,
                AdUnitFormat::Banner => AdFormat::Banner,
                AdUnitFormat::Video => AdFormat::Vast,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<T: Ord, const N: usize>(items: [T; N]) -> BTreeSet<T> {
        items.into_iter().collect()
    }

    #[test]
    fn banner_not_interstitial() {
        let formats = AdFormat::from_set(&set([AdUnitFormat::Banner]), false)
            .expect("should map formats");
        assert_eq!(formats, set([AdFormat::Banner]));
    }

    #[test]
    fn banner_interstitial() {
        let formats = AdFormat::from_set(&set([AdUnitFormat::Banner]), true)
            .expect("should map formats");
        assert_eq!(formats, set([AdFormat::Interstitial]));
    }

    #[test]
    fn video_and_banner() {
        let input = set([AdUnitFormat::Video, AdUnitFormat::Banner]);

        let formats = AdFormat::from_set(&input, false).expect("should map formats");
        assert_eq!(formats, set([AdFormat::Vast, AdFormat::Banner]));

        let formats = AdFormat::from_set(&input, true).expect("should map formats");
        assert_eq!(formats, set([AdFormat::Vast, AdFormat::Interstitial]));
    }

    #[test]
    fn video_only() {
        let formats = AdFormat::from_set(&set([AdUnitFormat::Video]), false)
            .expect("should map formats");
        assert_eq!(formats, set([AdFormat::Vast]));
    }

    #[test]
    fn empty_set_is_rejected() {
        let err = AdFormat::from_set(&BTreeSet::new(), false).expect_err("should reject empty");
        assert!(matches!(
            err.current_context(),
            RequestBuilderError::InvalidAdUnit { .. }
        ));
    }

    #[test]
    fn display_alias_deserializes_as_banner() {
        let format: AdUnitFormat =
            serde_json::from_str("\"display\"").expect("should parse display alias");
        assert_eq!(format, AdUnitFormat::Banner);
    }
}
