//! Ad unit configuration consumed by the parameter builders.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use error_stack::Report;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::ad_format::{AdFormat, AdUnitFormat};
use crate::error::RequestBuilderError;
use crate::native::NativeAdUnitConfiguration;
use crate::signals::{
    AdPosition, Api, CreativeAttribute, PlacementType, PlaybackMethod, Plcmt, Protocol,
    StartDelay, VideoPlacement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdSize {
    pub width: u32,
    pub height: u32,
}

impl AdSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Banner parameters for ad units created through the original API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerParameters {
    pub api: Vec<Api>,
    pub ad_sizes: Vec<AdSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoParameters {
    pub mimes: Vec<String>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    pub min_bitrate: Option<i32>,
    pub max_bitrate: Option<i32>,
    pub placement: Option<VideoPlacement>,
    pub plcmt: Option<Plcmt>,
    pub linearity: Option<i32>,
    pub start_delay: Option<StartDelay>,
    pub protocols: Vec<Protocol>,
    pub api: Vec<Api>,
    pub playback_method: Vec<PlaybackMethod>,
    pub battr: Vec<CreativeAttribute>,
    pub ad_size: Option<AdSize>,
}

impl VideoParameters {
    #[must_use]
    pub fn new(mimes: Vec<String>) -> Self {
        Self {
            mimes,
            ..Self::default()
        }
    }
}

/// Segment of a [`DataObject`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Json>,
}

/// OpenRTB `user.data` entry describing a first-party data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segment: Vec<DataSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Json>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Json>,
}

/// Everything an ad unit contributes to a bid request.
///
/// `original_ad_unit` marks units created through the original (GAM-style)
/// API; those get their banner and video objects from the explicit
/// parameters instead of the rendering defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdUnitConfiguration {
    pub config_id: Option<String>,
    pub ad_formats: BTreeSet<AdFormat>,
    pub sizes: Vec<AdSize>,
    pub ad_position: Option<AdPosition>,
    pub placement_type: Option<PlacementType>,
    pub banner_parameters: Option<BannerParameters>,
    pub video_parameters: Option<VideoParameters>,
    pub native_configuration: Option<NativeAdUnitConfiguration>,
    pub interstitial: bool,
    pub rewarded: bool,
    pub original_ad_unit: bool,
    pub pb_ad_slot: Option<String>,
    pub gpid: Option<String>,
    pub imp_ortb_config: Option<String>,
    pub ext_data: BTreeMap<String, BTreeSet<String>>,
    pub ext_keywords: BTreeSet<String>,
    pub user_data: Vec<DataObject>,
    pub min_size_percentage: Option<AdSize>,
}

impl AdUnitConfiguration {
    #[must_use]
    pub fn new(config_id: impl Into<String>) -> Self {
        Self {
            config_id: Some(config_id.into()),
            ..Self::default()
        }
    }

    /// Appends a size unless it is already present.
    pub fn add_size(&mut self, size: AdSize) {
        if !self.sizes.contains(&size) {
            self.sizes.push(size);
        }
    }

    pub fn add_ad_format(&mut self, format: AdFormat) {
        self.ad_formats.insert(format);
    }

    /// Replaces the ad formats with a single one.
    pub fn set_ad_format(&mut self, format: AdFormat) {
        self.ad_formats.clear();
        self.ad_formats.insert(format);
    }

    pub fn set_ad_formats(&mut self, formats: impl IntoIterator<Item = AdFormat>) {
        self.ad_formats = formats.into_iter().collect();
    }

    /// Replaces the ad formats with the internal equivalent of `formats`.
    ///
    /// # Errors
    ///
    /// Returns an error if `formats` is empty.
    pub fn set_ad_unit_formats(
        &mut self,
        formats: &BTreeSet<AdUnitFormat>,
    ) -> Result<(), Report<RequestBuilderError>> {
        self.ad_formats = AdFormat::from_set(formats, self.interstitial)?;
        Ok(())
    }

    #[must_use]
    pub fn is_ad_type(&self, format: AdFormat) -> bool {
        self.ad_formats.contains(&format)
    }

    pub fn add_ext_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.ext_data
            .entry(key.into())
            .or_default()
            .insert(value.into());
    }

    pub fn add_ext_keyword(&mut self, keyword: impl Into<String>) {
        self.ext_keywords.insert(keyword.into());
    }

    pub fn add_user_data(&mut self, data: DataObject) {
        self.user_data.push(data);
    }

    /// Size used for video `w`/`h` when nothing more specific is set.
    #[must_use]
    pub fn first_size(&self) -> Option<AdSize> {
        self.sizes.first().copied()
    }
}
