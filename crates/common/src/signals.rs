//! OpenRTB enumerations used by banner and video parameters.
//!
//! Open lists (APIs, protocols, ...) are newtypes over the wire integer so
//! callers can pass values the SDK does not name. Closed lists are enums.

use serde::{Deserialize, Serialize};

macro_rules! wire_value {
    ($(#[$meta:meta])* $name:ident { $($(#[$cmeta:meta])* $const:ident = $value:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl $name {
            $($(#[$cmeta])* pub const $const: $name = $name($value);)*

            #[must_use]
            pub fn value(self) -> i32 {
                self.0
            }
        }
    };
}

wire_value!(
    /// API frameworks supported by the placement.
    Api {
        VPAID_1 = 1,
        VPAID_2 = 2,
        MRAID_1 = 3,
        ORMMA = 4,
        MRAID_2 = 5,
        MRAID_3 = 6,
        OMID_1 = 7,
    }
);

wire_value!(
    /// Video bid response protocols.
    Protocol {
        VAST_1_0 = 1,
        VAST_2_0 = 2,
        VAST_3_0 = 3,
        VAST_1_0_WRAPPER = 4,
        VAST_2_0_WRAPPER = 5,
        VAST_3_0_WRAPPER = 6,
        VAST_4_0 = 7,
        VAST_4_0_WRAPPER = 8,
        DAAST_1_0 = 9,
        DAAST_1_0_WRAPPER = 10,
    }
);

wire_value!(
    PlaybackMethod {
        AUTO_PLAY_SOUND_ON = 1,
        AUTO_PLAY_SOUND_OFF = 2,
        CLICK_TO_PLAY = 3,
        MOUSE_OVER = 4,
        ENTER_SOUND_ON = 5,
        ENTER_SOUND_OFF = 6,
    }
);

wire_value!(
    /// Start delay in seconds for pre-roll, mid-roll, or post-roll placements.
    StartDelay {
        PRE_ROLL = 0,
        GENERIC_MID_ROLL = -1,
        GENERIC_POST_ROLL = -2,
    }
);

wire_value!(
    /// Legacy `video.placement` values.
    VideoPlacement {
        IN_STREAM = 1,
        IN_BANNER = 2,
        IN_ARTICLE = 3,
        IN_FEED = 4,
        INTERSTITIAL = 5,
    }
);

wire_value!(
    /// `video.plcmt` values from OpenRTB 2.6.
    Plcmt {
        INSTREAM = 1,
        ACCOMPANYING_CONTENT = 2,
        INTERSTITIAL = 3,
        NO_CONTENT = 4,
        STANDALONE = 4,
    }
);

wire_value!(
    CreativeAttribute {
        AUDIO_AUTO_PLAY = 1,
        AUDIO_USER_INITIATED = 2,
        EXPANDABLE_AUTOMATIC = 3,
        EXPANDABLE_USER_INITIATED_CLICK = 4,
        EXPANDABLE_USER_INITIATED_ROLLOVER = 5,
        IN_BANNER_VIDEO_AUTO_PLAY = 6,
        IN_BANNER_VIDEO_USER_INITIATED = 7,
        POP = 8,
        PROVOCATIVE_OR_SUGGESTIVE = 9,
        ANNOYING = 10,
        SURVEYS = 11,
        TEXT_ONLY = 12,
        USER_INTERACTIVE = 13,
        WINDOWS_DIALOG_OR_ALERT = 14,
        HAS_AUDIO_ON_OFF_BUTTON = 15,
        AD_PROVIDES_SKIP_BUTTON = 16,
        ADOBE_FLASH = 17,
    }
);

/// Position of the ad on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdPosition {
    Unknown,
    AboveTheFold,
    Locked,
    BelowTheFold,
    Header,
    Footer,
    Sidebar,
    Fullscreen,
}

impl AdPosition {
    #[must_use]
    pub fn value(self) -> i32 {
        match self {
            AdPosition::Unknown => 0,
            AdPosition::AboveTheFold => 1,
            AdPosition::Locked => 2,
            AdPosition::BelowTheFold => 3,
            AdPosition::Header => 4,
            AdPosition::Footer => 5,
            AdPosition::Sidebar => 6,
            AdPosition::Fullscreen => 7,
        }
    }
}

/// Placement of an embedded video unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementType {
    InBanner,
    InArticle,
    InFeed,
}

impl PlacementType {
    #[must_use]
    pub fn value(self) -> i32 {
        match self {
            PlacementType::InBanner => 2,
            PlacementType::InArticle => 3,
            PlacementType::InFeed => 4,
        }
    }
}
