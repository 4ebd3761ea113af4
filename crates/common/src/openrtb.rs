//! Serde model of the emitted OpenRTB bid request.
//!
//! Every object keeps keys it does not name in a flattened `extra` map, so
//! caller ORTB config merged into nested objects survives a typed round trip.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::configuration::DataObject;

/// Free-form `ext` object.
pub type Ext = Map<String, Value>;

/// Subset of the OpenRTB 2.6 bid request emitted by the mobile SDK.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidRequest {
    /// Unique ID of the bid request; also used as `source.tid` and `imp.id`.
    pub id: String,
    #[serde(default)]
    pub imp: Vec<Imp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regs: Option<Regs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub ext: Ext,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

impl BidRequest {
    pub fn app_mut(&mut self) -> &mut App {
        self.app.get_or_insert_with(App::default)
    }

    pub fn device_mut(&mut self) -> &mut Device {
        self.device.get_or_insert_with(Device::default)
    }

    pub fn regs_mut(&mut self) -> &mut Regs {
        self.regs.get_or_insert_with(Regs::default)
    }

    pub fn user_mut(&mut self) -> &mut User {
        self.user.get_or_insert_with(User::default)
    }

    pub fn source_mut(&mut self) -> &mut Source {
        self.source.get_or_insert_with(Source::default)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Imp {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(rename = "native", skip_serializing_if = "Option::is_none")]
    pub native: Option<Native>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displaymanager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displaymanagerver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instl: Option<i32>,
    /// 0 = embedded browser, 1 = native browser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clickbrowser: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rwdd: Option<i32>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub ext: Ext,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub format: Vec<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api: Vec<i32>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

impl Banner {
    /// Adds a format unless an identical one is present.
    pub fn add_format(&mut self, w: u32, h: u32) {
        if !self.format.iter().any(|f| f.w == w && f.h == h) {
            self.format.push(Format {
                w,
                h,
                extra: HashMap::new(),
            });
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Format {
    pub w: u32,
    pub h: u32,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mimes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minduration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxduration: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startdelay: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plcmt: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linearity: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub battr: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minbitrate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxbitrate: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub playbackmethod: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playbackend: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delivery: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api: Vec<i32>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

/// Native impression; `request` holds the serialized Native 1.2 request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Native {
    pub request: String,
    pub ver: String,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct App {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storeurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Publisher>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub ext: Ext,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

impl App {
    pub fn publisher_mut(&mut self) -> &mut Publisher {
        self.publisher.get_or_insert_with(Publisher::default)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lmt: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pxratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectiontype: Option<i32>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub ext: Ext,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub geo_type: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Regs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coppa: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpp: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gpp_sid: Vec<i32>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub ext: Ext,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yob: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyeruid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataObject>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub ext: Ext,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub ext: Ext,
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}
