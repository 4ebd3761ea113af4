//! Native ad unit configuration and the OpenRTB Native 1.2 request it
//! produces.
//!
//! Every identifier list supports a `Custom` value for exchange-specific
//! extensions. Custom ids live in the exchange-reserved range and are
//! rejected below [`NATIVE_CUSTOM_ID_MIN`].

use error_stack::Report;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as Json};

use crate::constants::{NATIVE_CUSTOM_ID_MIN, NATIVE_REQUEST_VERSION};
use crate::error::RequestBuilderError;

/// Exchange-specific identifier. Only constructible through the `custom`
/// constructors, which enforce the reserved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomId(i32);

impl CustomId {
    fn new(kind: &str, id: i32) -> Result<Self, Report<RequestBuilderError>> {
        if id < NATIVE_CUSTOM_ID_MIN {
            return Err(Report::new(RequestBuilderError::InvalidNative {
                message: format!("custom {kind} id {id} must be >= {NATIVE_CUSTOM_ID_MIN}"),
            }));
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }
}

macro_rules! native_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident = $value:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            $($variant,)*
            Custom(CustomId),
        }

        impl $name {
            /// Creates a custom value.
            ///
            /// # Errors
            ///
            /// Returns [`RequestBuilderError::InvalidNative`] if `id` is below
            /// the exchange-reserved range.
            pub fn custom(id: i32) -> Result<Self, Report<RequestBuilderError>> {
                CustomId::new($kind, id).map($name::Custom)
            }

            #[must_use]
            pub fn id(self) -> i32 {
                match self {
                    $($name::$variant => $value,)*
                    $name::Custom(id) => id.value(),
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = Report<RequestBuilderError>;

            fn try_from(id: i32) -> Result<Self, Self::Error> {
                match id {
                    $($value => Ok($name::$variant),)*
                    other => $name::custom(other),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value.id()
            }
        }
    };
}

native_id!(
    /// Context in which the ad appears.
    ContextType, "context type" {
        ContentCentric = 1,
        SocialCentric = 2,
        Product = 3,
    }
);

native_id!(
    ContextSubtype, "context subtype" {
        General = 10,
        Article = 11,
        Video = 12,
        Audio = 13,
        Image = 14,
        UserGenerated = 15,
        GeneralSocial = 20,
        Email = 21,
        ChatIm = 22,
        Selling = 30,
        ApplicationStore = 31,
        ProductReviewSites = 32,
    }
);

native_id!(
    /// Design/format of the native placement.
    NativePlacementType, "placement type" {
        ContentFeed = 1,
        ContentAtomicUnit = 2,
        OutsideCoreContent = 3,
        RecommendationWidget = 4,
    }
);

native_id!(
    EventType, "event type" {
        Impression = 1,
        ViewableMrc50 = 2,
        ViewableMrc100 = 3,
        ViewableVideo50 = 4,
    }
);

native_id!(
    EventTrackingMethod, "event tracking method" {
        Image = 1,
        Js = 2,
    }
);

native_id!(
    ImageType, "image type" {
        Icon = 1,
        Main = 3,
    }
);

native_id!(
    DataType, "data type" {
        Sponsored = 1,
        Description = 2,
        Rating = 3,
        Likes = 4,
        Downloads = 5,
        Price = 6,
        SalePrice = 7,
        Phone = 8,
        Address = 9,
        Description2 = 10,
        DisplayUrl = 11,
        CtaText = 12,
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeEventTracker {
    pub event: EventType,
    pub methods: Vec<EventTrackingMethod>,
    #[serde(default)]
    pub ext: Option<Json>,
}

impl NativeEventTracker {
    #[must_use]
    pub fn new(event: EventType, methods: Vec<EventTrackingMethod>) -> Self {
        Self {
            event,
            methods,
            ext: None,
        }
    }

    fn to_json(&self) -> Json {
        let mut tracker = json!({
            "event": self.event.id(),
            "methods": self.methods.iter().map(|m| m.id()).collect::<Vec<_>>(),
        });
        if let Some(ext) = &self.ext {
            tracker["ext"] = ext.clone();
        }
        tracker
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeTitleAsset {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub len: Option<u32>,
    #[serde(default)]
    pub ext: Option<Json>,
}

impl NativeTitleAsset {
    #[must_use]
    pub fn with_length(len: u32) -> Self {
        Self {
            len: Some(len),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeImageAsset {
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "type")]
    pub image_type: Option<ImageType>,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
    #[serde(default)]
    pub wmin: Option<u32>,
    #[serde(default)]
    pub hmin: Option<u32>,
    #[serde(default)]
    pub mimes: Vec<String>,
    #[serde(default)]
    pub ext: Option<Json>,
}

impl NativeImageAsset {
    /// Image asset constrained by minimum dimensions.
    #[must_use]
    pub fn with_min_size(wmin: u32, hmin: u32) -> Self {
        Self {
            wmin: Some(wmin),
            hmin: Some(hmin),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeDataAsset {
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "type")]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub len: Option<u32>,
    #[serde(default)]
    pub ext: Option<Json>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NativeAsset {
    Title(NativeTitleAsset),
    Image(NativeImageAsset),
    Data(NativeDataAsset),
}

fn insert_opt<T: Into<Json>>(obj: &mut Map<String, Json>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        obj.insert(key.to_string(), value.into());
    }
}

impl NativeAsset {
    fn to_json(&self, id: usize) -> Json {
        let mut asset = Map::new();
        asset.insert("id".to_string(), json!(id));

        let (required, key, mut body, ext) = match self {
            NativeAsset::Title(title) => {
                let mut body = Map::new();
                insert_opt(&mut body, "len", title.len);
                (title.required, "title", body, &title.ext)
            }
            NativeAsset::Image(image) => {
                let mut body = Map::new();
                insert_opt(&mut body, "type", image.image_type.map(ImageType::id));
                insert_opt(&mut body, "w", image.w);
                insert_opt(&mut body, "h", image.h);
                insert_opt(&mut body, "wmin", image.wmin);
                insert_opt(&mut body, "hmin", image.hmin);
                if !image.mimes.is_empty() {
                    body.insert("mimes".to_string(), json!(image.mimes));
                }
                (image.required, "img", body, &image.ext)
            }
            NativeAsset::Data(data) => {
                let mut body = Map::new();
                insert_opt(&mut body, "type", data.data_type.map(DataType::id));
                insert_opt(&mut body, "len", data.len);
                (data.required, "data", body, &data.ext)
            }
        };

        if let Some(ext) = ext {
            body.insert("ext".to_string(), ext.clone());
        }
        asset.insert("required".to_string(), json!(i32::from(required)));
        asset.insert(key.to_string(), Json::Object(body));
        Json::Object(asset)
    }
}

/// Native request parameters of an ad unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeAdUnitConfiguration {
    pub context_type: Option<ContextType>,
    pub context_subtype: Option<ContextSubtype>,
    pub placement_type: Option<NativePlacementType>,
    pub placement_count: u32,
    pub seq: u32,
    pub a_url_support: bool,
    pub d_url_support: bool,
    pub privacy: bool,
    pub ext: Option<Json>,
    pub assets: Vec<NativeAsset>,
    pub event_trackers: Vec<NativeEventTracker>,
}

impl Default for NativeAdUnitConfiguration {
    fn default() -> Self {
        Self {
            context_type: None,
            context_subtype: None,
            placement_type: None,
            placement_count: 1,
            seq: 0,
            a_url_support: false,
            d_url_support: false,
            privacy: false,
            ext: None,
            assets: Vec::new(),
            event_trackers: Vec::new(),
        }
    }
}

impl NativeAdUnitConfiguration {
    pub fn add_asset(&mut self, asset: NativeAsset) {
        self.assets.push(asset);
    }

    pub fn add_event_tracker(&mut self, tracker: NativeEventTracker) {
        self.event_trackers.push(tracker);
    }

    /// Builds the Native 1.2 request object. Asset ids are assigned in
    /// insertion order starting at 1.
    #[must_use]
    pub fn to_request_json(&self) -> Json {
        let mut request = Map::new();
        request.insert("ver".to_string(), json!(NATIVE_REQUEST_VERSION));
        insert_opt(&mut request, "context", self.context_type.map(ContextType::id));
        insert_opt(
            &mut request,
            "contextsubtype",
            self.context_subtype.map(ContextSubtype::id),
        );
        insert_opt(
            &mut request,
            "plcmttype",
            self.placement_type.map(NativePlacementType::id),
        );
        request.insert("plcmtcnt".to_string(), json!(self.placement_count));
        request.insert("seq".to_string(), json!(self.seq));

        if !self.assets.is_empty() {
            let assets: Vec<Json> = self
                .assets
                .iter()
                .enumerate()
                .map(|(index, asset)| asset.to_json(index + 1))
                .collect();
            request.insert("assets".to_string(), Json::Array(assets));
        }
        if !self.event_trackers.is_empty() {
            let trackers: Vec<Json> = self
                .event_trackers
                .iter()
                .map(NativeEventTracker::to_json)
                .collect();
            request.insert("eventtrackers".to_string(), Json::Array(trackers));
        }

        if self.a_url_support {
            request.insert("aurlsupport".to_string(), json!(1));
        }
        if self.d_url_support {
            request.insert("durlsupport".to_string(), json!(1));
        }
        if self.privacy {
            request.insert("privacy".to_string(), json!(1));
        }
        if let Some(ext) = &self.ext {
            request.insert("ext".to_string(), ext.clone());
        }

        Json::Object(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_native_request_defaults() {
        let config = NativeAdUnitConfiguration::default();
        assert_eq!(config.placement_count, 1);
        assert_eq!(config.seq, 0);
        assert!(!config.a_url_support);
        assert!(!config.d_url_support);
        assert!(!config.privacy);
        assert!(config.context_type.is_none());
        assert!(config.assets.is_empty());
        assert!(config.event_trackers.is_empty());
    }

    #[test]
    fn context_type_ids() {
        assert_eq!(ContextType::ContentCentric.id(), 1);
        assert_eq!(ContextType::SocialCentric.id(), 2);
        assert_eq!(ContextType::Product.id(), 3);
        assert_eq!(
            ContextType::custom(600).expect("should accept custom id").id(),
            600
        );
    }

    #[test]
    fn custom_ids_below_reserved_range_are_rejected() {
        assert!(ContextType::custom(1).is_err());
        assert!(ContextSubtype::custom(10).is_err());
        assert!(NativePlacementType::custom(499).is_err());
        assert!(EventTrackingMethod::custom(500).is_ok());
    }

    #[test]
    fn context_subtype_ids() {
        let expected = [
            (ContextSubtype::General, 10),
            (ContextSubtype::Article, 11),
            (ContextSubtype::Video, 12),
            (ContextSubtype::Audio, 13),
            (ContextSubtype::Image, 14),
            (ContextSubtype::UserGenerated, 15),
            (ContextSubtype::GeneralSocial, 20),
            (ContextSubtype::Email, 21),
            (ContextSubtype::ChatIm, 22),
            (ContextSubtype::Selling, 30),
            (ContextSubtype::ApplicationStore, 31),
            (ContextSubtype::ProductReviewSites, 32),
        ];
        for (subtype, id) in expected {
            assert_eq!(subtype.id(), id, "{subtype:?}");
        }
    }

    #[test]
    fn known_ids_round_trip_through_integers() {
        assert_eq!(
            NativePlacementType::try_from(4).expect("should map id"),
            NativePlacementType::RecommendationWidget
        );
        assert_eq!(
            EventType::try_from(700).expect("should map custom id"),
            EventType::custom(700).expect("should accept custom id")
        );
        assert!(EventType::try_from(42).is_err());
    }

    #[test]
    fn event_trackers_keep_order_and_method_ids() {
        let mut config = NativeAdUnitConfiguration::default();
        config.add_event_tracker(NativeEventTracker::new(
            EventType::Impression,
            vec![EventTrackingMethod::Image, EventTrackingMethod::Js],
        ));
        config.add_event_tracker(NativeEventTracker::new(
            EventType::ViewableMrc50,
            vec![
                EventTrackingMethod::custom(500).expect("should accept custom id"),
                EventTrackingMethod::Image,
            ],
        ));

        let request = config.to_request_json();
        assert_eq!(
            request["eventtrackers"],
            json!([
                {"event": 1, "methods": [1, 2]},
                {"event": 2, "methods": [500, 1]}
            ])
        );
    }

    #[test]
    fn assets_serialize_with_sequential_ids() {
        let mut config = NativeAdUnitConfiguration::default();
        config.add_asset(NativeAsset::Title(NativeTitleAsset {
            required: true,
            ..NativeTitleAsset::with_length(25)
        }));
        config.add_asset(NativeAsset::Image(NativeImageAsset::with_min_size(20, 30)));
        config.add_asset(NativeAsset::Data(NativeDataAsset {
            data_type: Some(DataType::Sponsored),
            ..NativeDataAsset::default()
        }));

        let request = config.to_request_json();
        assert_eq!(
            request["assets"],
            json!([
                {"id": 1, "required": 1, "title": {"len": 25}},
                {"id": 2, "required": 0, "img": {"wmin": 20, "hmin": 30}},
                {"id": 3, "required": 0, "data": {"type": 1}}
            ])
        );
    }

    #[test]
    fn request_flags_and_ext() {
        let config = NativeAdUnitConfiguration {
            context_type: Some(ContextType::Product),
            context_subtype: Some(ContextSubtype::Selling),
            placement_type: Some(NativePlacementType::ContentFeed),
            placement_count: 123,
            seq: 1,
            a_url_support: true,
            d_url_support: true,
            privacy: true,
            ext: Some(json!({"key": "value"})),
            ..NativeAdUnitConfiguration::default()
        };

        assert_eq!(
            config.to_request_json(),
            json!({
                "ver": "1.2",
                "context": 3,
                "contextsubtype": 30,
                "plcmttype": 1,
                "plcmtcnt": 123,
                "seq": 1,
                "aurlsupport": 1,
                "durlsupport": 1,
                "privacy": 1,
                "ext": {"key": "value"}
            })
        );
    }

    #[test]
    fn deserializes_from_toml() {
        let config: NativeAdUnitConfiguration = toml::from_str(
            r#"
            context_type = 1
            placement_type = 600

            [[assets]]
            kind = "title"
            len = 90
            required = true

            [[event_trackers]]
            event = 1
            methods = [1]
            "#,
        )
        .expect("should parse native config");

        assert_eq!(config.context_type, Some(ContextType::ContentCentric));
        assert_eq!(
            config.placement_type.map(NativePlacementType::id),
            Some(600)
        );
        assert_eq!(config.placement_count, 1);
        assert_eq!(config.assets.len(), 1);
    }

    #[test]
    fn custom_variant_only_holds_reserved_ids() {
        let context = ContextType::custom(500).expect("should accept reserved id");
        match context {
            ContextType::Custom(id) => assert_eq!(id.value(), 500),
            other => unreachable!("expected custom context, got {other:?}"),
        }

        assert!(ContextType::custom(2).is_err());
        assert!(ContextSubtype::custom(499).is_err());
        assert_eq!(
            ContextType::try_from(2).expect("should map known id"),
            ContextType::SocialCentric
        );
    }

    #[test]
    fn custom_ids_below_range_fail_deserialization() {
        let result: Result<NativeAdUnitConfiguration, _> =
            toml::from_str("placement_type = 42");
        assert!(result.is_err());
    }
}
