//! `device` object.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::openrtb::Geo;
use crate::sdk::SdkContext;
use crate::targeting::LatLng;

use super::{AdRequestInput, ParameterBuilder};

/// Location source reported in `device.geo.type`.
const GEO_TYPE_GPS: u8 = 1;

/// Device details supplied by the host platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DeviceInfo {
    pub ua: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub os: Option<String>,
    pub osv: Option<String>,
    pub w: Option<u32>,
    pub h: Option<u32>,
    #[validate(range(exclusive_min = 0.0))]
    pub pxratio: Option<f64>,
    #[validate(length(min = 2, max = 3))]
    pub language: Option<String>,
    pub carrier: Option<String>,
    /// OpenRTB connection type (0 unknown, 2 wifi, 3-7 cellular).
    #[validate(range(min = 0, max = 7))]
    pub connection_type: Option<i32>,
    pub ifa: Option<String>,
    /// Limit ad tracking. Suppresses `ifa` when set.
    pub lmt: bool,
    /// Device location fix, sent as `device.geo`.
    pub location: Option<LatLng>,
}

pub struct DeviceInfoParameterBuilder<'a> {
    sdk: &'a SdkContext,
}

impl<'a> DeviceInfoParameterBuilder<'a> {
    #[must_use]
    pub fn new(sdk: &'a SdkContext) -> Self {
        Self { sdk }
    }
}

impl ParameterBuilder for DeviceInfoParameterBuilder<'_> {
    fn append_builder_parameters(&self, input: &mut AdRequestInput) {
        let info = &self.sdk.device;
        let device = input.bid_request_mut().device_mut();

        device.ua.clone_from(&info.ua);
        device.make.clone_from(&info.make);
        device.model.clone_from(&info.model);
        device.os.clone_from(&info.os);
        device.osv.clone_from(&info.osv);
        device.w = info.w;
        device.h = info.h;
        device.pxratio = info.pxratio;
        device.language.clone_from(&info.language);
        device.carrier.clone_from(&info.carrier);
        device.connectiontype = info.connection_type;
        device.lmt = Some(i32::from(info.lmt));

        if info.lmt || self.sdk.sdk.coppa_enabled {
            device.ifa = None;
        } else {
            device.ifa.clone_from(&info.ifa);
        }

        if let Some(location) = info.location {
            device.geo = Some(Geo {
                lat: Some(location.lat),
                lon: Some(location.lon),
                geo_type: Some(GEO_TYPE_GPS),
                ..Geo::default()
            });
        }
    }
}
