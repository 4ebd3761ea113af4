//! Request skeleton: ids, the impression, user targeting and source.

use serde_json::{json, Value as Json};
use uuid::Uuid;

use crate::ad_format::AdFormat;
use crate::configuration::{AdUnitConfiguration, VideoParameters};
use crate::constants::{
    DISPLAY_MANAGER_VALUE, KEY_OM_PARTNER_NAME, KEY_OM_PARTNER_VERSION, NATIVE_REQUEST_VERSION,
    OM_PARTNER_NAME, SDK_VERSION, SUPPORTED_VIDEO_MIME_TYPES, SUPPORTED_VIDEO_PROTOCOLS,
    VIDEO_DELIVERY_DOWNLOAD, VIDEO_INTERSTITIAL_PLACEMENT, VIDEO_INTERSTITIAL_PLAYBACK_END,
    VIDEO_LINEARITY_LINEAR,
};
use crate::openrtb::{Banner, Geo, Imp, Native, Source, User, Video};
use crate::sdk::SdkContext;
use crate::signals::Api;
use crate::targeting::{dictionary_json, join_non_empty};

use super::ortb_config;
use super::prebid_ext::{imp_prebid_ext, request_prebid_ext};
use super::{AdRequestInput, ParameterBuilder};

const PROTECTED_IMP_KEYS: &[&str] = &["id"];

pub struct BasicParameterBuilder<'a> {
    config: &'a AdUnitConfiguration,
    sdk: &'a SdkContext,
    browser_activity_available: bool,
}

impl<'a> BasicParameterBuilder<'a> {
    #[must_use]
    pub fn new(
        config: &'a AdUnitConfiguration,
        sdk: &'a SdkContext,
        browser_activity_available: bool,
    ) -> Self {
        Self {
            config,
            sdk,
            browser_activity_available,
        }
    }

    fn source(&self, id: &str) -> Source {
        let targeting = &self.sdk.targeting;
        let (name, version) = if self.config.original_ad_unit {
            (
                targeting.omid_partner_name.clone(),
                targeting.omid_partner_version.clone(),
            )
        } else {
            (
                Some(
                    targeting
                        .omid_partner_name
                        .clone()
                        .unwrap_or_else(|| OM_PARTNER_NAME.to_string()),
                ),
                Some(
                    targeting
                        .omid_partner_version
                        .clone()
                        .unwrap_or_else(|| SDK_VERSION.to_string()),
                ),
            )
        };

        let mut source = Source {
            tid: Some(id.to_string()),
            ..Source::default()
        };
        if let Some(name) = name {
            source.ext.insert(KEY_OM_PARTNER_NAME.to_string(), json!(name));
        }
        if let Some(version) = version {
            source
                .ext
                .insert(KEY_OM_PARTNER_VERSION.to_string(), json!(version));
        }
        source
    }

    fn user(&self) -> Option<User> {
        let targeting = &self.sdk.targeting;
        let mut user = User {
            id: targeting.user_id.clone(),
            yob: targeting.year_of_birth,
            gender: targeting.gender.key().map(str::to_string),
            keywords: targeting.user_keywords_joined(),
            customdata: targeting.user_custom_data.clone(),
            buyeruid: targeting.buyer_id.clone(),
            geo: targeting.user_lat_lng.map(|location| Geo {
                lat: Some(location.lat),
                lon: Some(location.lon),
                ..Geo::default()
            }),
            data: self.config.user_data.clone(),
            ext: targeting.user_ext.clone().unwrap_or_default(),
            ..User::default()
        };

        if let Some(data) = targeting.user_data_json() {
            user.ext.insert("data".to_string(), data);
        }
        if let Some(eids) = targeting.external_user_ids_json() {
            user.ext.insert("eids".to_string(), eids);
        }

        (user != User::default()).then_some(user)
    }

    fn imp(&self, id: &str) -> Imp {
        let config = self.config;
        let mut imp = Imp {
            id: id.to_string(),
            ..Imp::default()
        };

        if !config.original_ad_unit {
            imp.displaymanager = Some(DISPLAY_MANAGER_VALUE.to_string());
            imp.displaymanagerver = Some(SDK_VERSION.to_string());
        }
        if !config.is_ad_type(AdFormat::Vast) {
            imp.secure = Some(1);
        }
        imp.instl = Some(i32::from(config.is_ad_type(AdFormat::Interstitial)));
        imp.clickbrowser = Some(
            if !self.sdk.sdk.use_external_browser && self.browser_activity_available {
                0
            } else {
                1
            },
        );
        if config.rewarded {
            imp.rwdd = Some(1);
        }

        if config.is_ad_type(AdFormat::Banner) || config.is_ad_type(AdFormat::Interstitial) {
            imp.banner = Some(self.banner());
        }
        if config.is_ad_type(AdFormat::Vast) {
            imp.video = Some(if config.original_ad_unit {
                self.original_video()
            } else {
                self.rendering_video()
            });
        }
        if config.is_ad_type(AdFormat::Native) {
            imp.native = self.native();
        }

        self.append_imp_ext(&mut imp);
        self.merge_imp_ortb_config(imp)
    }

    fn banner(&self) -> Banner {
        let config = self.config;
        let mut banner = Banner::default();

        if config.original_ad_unit {
            if let Some(parameters) = &config.banner_parameters {
                banner.api = parameters.api.iter().map(|api| api.value()).collect();
                for size in &parameters.ad_sizes {
                    banner.add_format(size.width, size.height);
                }
            }
            for size in &config.sizes {
                banner.add_format(size.width, size.height);
            }
        } else {
            banner.api = if self.sdk.sdk.send_mraid_support_params {
                [Api::MRAID_1, Api::MRAID_2, Api::MRAID_3, Api::OMID_1]
                    .iter()
                    .map(|api| api.value())
                    .collect()
            } else {
                vec![Api::OMID_1.value()]
            };
            if config.is_ad_type(AdFormat::Banner) {
                for size in &config.sizes {
                    banner.add_format(size.width, size.height);
                }
            }
        }

        banner.pos = config.ad_position.map(|position| position.value());
        banner
    }

    fn rendering_video(&self) -> Video {
        let config = self.config;
        let mut video = Video {
            mimes: SUPPORTED_VIDEO_MIME_TYPES
                .iter()
                .map(|mime| (*mime).to_string())
                .collect(),
            protocols: SUPPORTED_VIDEO_PROTOCOLS.to_vec(),
            linearity: Some(VIDEO_LINEARITY_LINEAR),
            playbackend: Some(VIDEO_INTERSTITIAL_PLAYBACK_END),
            delivery: vec![VIDEO_DELIVERY_DOWNLOAD],
            pos: config.ad_position.map(|position| position.value()),
            ..Video::default()
        };

        match config.placement_type {
            Some(placement_type) => {
                video.placement = Some(placement_type.value());
                if let Some(size) = config.first_size() {
                    video.w = Some(size.width);
                    video.h = Some(size.height);
                }
            }
            None => video.placement = Some(VIDEO_INTERSTITIAL_PLACEMENT),
        }

        if let Some(parameters) = &config.video_parameters {
            if let Some(size) = parameters.ad_size {
                video.w = Some(size.width);
                video.h = Some(size.height);
            }
            video.plcmt = parameters.plcmt.map(|plcmt| plcmt.value());
        }

        video
    }

    fn original_video(&self) -> Video {
        let config = self.config;
        let mut video = Video {
            delivery: vec![VIDEO_DELIVERY_DOWNLOAD],
            ..Video::default()
        };

        if let Some(parameters) = &config.video_parameters {
            copy_video_parameters(parameters, &mut video);
        }

        let size = config
            .video_parameters
            .as_ref()
            .and_then(|parameters| parameters.ad_size)
            .or_else(|| config.first_size());
        if let Some(size) = size {
            video.w = Some(size.width);
            video.h = Some(size.height);
        }

        video
    }

    fn native(&self) -> Option<Native> {
        let Some(native) = &self.config.native_configuration else {
            log::warn!("Native ad unit without a native configuration");
            return None;
        };
        Some(Native {
            request: native.to_request_json().to_string(),
            ver: NATIVE_REQUEST_VERSION.to_string(),
            ..Native::default()
        })
    }

    fn append_imp_ext(&self, imp: &mut Imp) {
        let config = self.config;
        imp.ext
            .insert("prebid".to_string(), imp_prebid_ext(config, self.sdk));

        if let Some(gpid) = &config.gpid {
            imp.ext.insert("gpid".to_string(), json!(gpid));
        }

        // A non-empty ext data dictionary replaces the slot object.
        let data = dictionary_json(&config.ext_data).or_else(|| {
            config
                .pb_ad_slot
                .as_ref()
                .map(|slot| json!({"adslot": slot, "pbadslot": slot}))
        });
        if let Some(data) = data {
            imp.ext.insert("data".to_string(), data);
        }

        if let Some(keywords) = join_non_empty(&config.ext_keywords) {
            imp.ext.insert("keywords".to_string(), json!(keywords));
        }
    }

    fn merge_imp_ortb_config(&self, imp: Imp) -> Imp {
        let Some(overlay) = self
            .config
            .imp_ortb_config
            .as_deref()
            .and_then(|raw| ortb_config::parse_ortb_config(raw, "impression"))
        else {
            return imp;
        };

        let mut merged = match serde_json::to_value(&imp) {
            Ok(Json::Object(object)) => object,
            _ => return imp,
        };
        ortb_config::merge_objects(&mut merged, overlay, PROTECTED_IMP_KEYS);

        match serde_json::from_value(Json::Object(merged)) {
            Ok(merged) => merged,
            Err(e) => {
                log::warn!("Ignoring impression ORTB config: {e}");
                imp
            }
        }
    }
}

fn copy_video_parameters(parameters: &VideoParameters, video: &mut Video) {
    video.mimes.clone_from(&parameters.mimes);
    video.minduration = parameters.min_duration;
    video.maxduration = parameters.max_duration;
    video.minbitrate = parameters.min_bitrate;
    video.maxbitrate = parameters.max_bitrate;
    video.placement = parameters.placement.map(|placement| placement.value());
    video.plcmt = parameters.plcmt.map(|plcmt| plcmt.value());
    video.linearity = parameters.linearity;
    video.startdelay = parameters.start_delay.map(|delay| delay.value());
    video.protocols = parameters.protocols.iter().map(|p| p.value()).collect();
    video.api = parameters.api.iter().map(|api| api.value()).collect();
    video.playbackmethod = parameters
        .playback_method
        .iter()
        .map(|method| method.value())
        .collect();
    video.battr = parameters.battr.iter().map(|attr| attr.value()).collect();
}

impl ParameterBuilder for BasicParameterBuilder<'_> {
    fn append_builder_parameters(&self, input: &mut AdRequestInput) {
        let id = Uuid::new_v4().to_string();
        let request = input.bid_request_mut();

        request.id.clone_from(&id);
        request
            .ext
            .insert("prebid".to_string(), request_prebid_ext(self.config, self.sdk));

        if self.sdk.sdk.coppa_enabled {
            request.regs_mut().coppa = Some(1);
        }

        if self.config.is_ad_type(AdFormat::Interstitial) {
            if let Some(min_size) = self.config.min_size_percentage {
                request.device_mut().ext.insert(
                    "prebid".to_string(),
                    json!({"interstitial": {
                        "minwidthperc": min_size.width,
                        "minheightperc": min_size.height,
                    }}),
                );
            }
        }

        request.source = Some(self.source(&id));
        if let Some(user) = self.user() {
            request.user = Some(user);
        }
        request.imp = vec![self.imp(&id)];
    }
}
