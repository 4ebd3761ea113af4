//! User and context targeting.
//!
//! Holds what the SDK exposes as process-wide targeting setters. The value is
//! owned by [`crate::sdk::SdkContext`] and read by the parameter builders.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use error_stack::Report;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value as Json};

use crate::error::RequestBuilderError;

const MIN_YEAR_OF_BIRTH: i32 = 1900;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

impl Gender {
    /// OpenRTB `user.gender` value; `None` when unknown.
    #[must_use]
    pub fn key(self) -> Option<&'static str> {
        match self {
            Gender::Male => Some("M"),
            Gender::Female => Some("F"),
            Gender::Other => Some("O"),
            Gender::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueId {
    pub id: String,
    pub atype: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Map<String, Json>>,
}

impl UniqueId {
    #[must_use]
    pub fn new(id: impl Into<String>, atype: i32) -> Self {
        Self {
            id: id.into(),
            atype,
            ext: None,
        }
    }
}

/// Extended identifier (`user.ext.eids` entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalUserId {
    pub source: String,
    #[serde(default)]
    pub uids: Vec<UniqueId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Map<String, Json>>,
}

impl ExternalUserId {
    #[must_use]
    pub fn new(source: impl Into<String>, uids: Vec<UniqueId>) -> Self {
        Self {
            source: source.into(),
            uids,
            ext: None,
        }
    }

    /// JSON form of the identifier, or `None` when it carries no uids.
    #[must_use]
    pub fn to_json(&self) -> Option<Json> {
        if self.uids.is_empty() || self.source.is_empty() {
            return None;
        }
        serde_json::to_value(self).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingParams {
    pub user_id: Option<String>,
    #[serde(deserialize_with = "deserialize_year_of_birth")]
    pub year_of_birth: Option<i32>,
    pub gender: Gender,
    pub user_keywords: BTreeSet<String>,
    pub user_custom_data: Option<String>,
    pub buyer_id: Option<String>,
    pub user_ext: Option<Map<String, Json>>,
    pub user_lat_lng: Option<LatLng>,
    pub external_user_ids: Vec<ExternalUserId>,
    pub user_data: BTreeMap<String, BTreeSet<String>>,
    pub access_control_list: BTreeSet<String>,
    pub context_keywords: BTreeSet<String>,
    /// First-party app data sent as `app.ext.data`.
    pub context_data: BTreeMap<String, BTreeSet<String>>,
    pub omid_partner_name: Option<String>,
    pub omid_partner_version: Option<String>,
    pub global_ortb_config: Option<String>,
}

impl TargetingParams {
    /// Sets the year of birth; `0` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`RequestBuilderError::InvalidTargeting`] if the year lies
    /// before 1900 or in the future.
    pub fn set_year_of_birth(&mut self, year: i32) -> Result<(), Report<RequestBuilderError>> {
        self.year_of_birth = checked_year_of_birth(year)?;
        Ok(())
    }

    /// Stores the year of birth derived from `age` and the current year.
    ///
    /// # Errors
    ///
    /// Returns an error if the derived year is out of range.
    pub fn set_user_age(&mut self, age: u32) -> Result<(), Report<RequestBuilderError>> {
        let age = i32::try_from(age).map_err(|_| {
            Report::new(RequestBuilderError::InvalidTargeting {
                message: format!("age {age} is out of range"),
            })
        })?;
        self.set_year_of_birth(chrono::Utc::now().year() - age)
    }

    pub fn set_user_lat_lng(&mut self, lat: Option<f64>, lon: Option<f64>) {
        self.user_lat_lng = match (lat, lon) {
            (Some(lat), Some(lon)) => Some(LatLng { lat, lon }),
            _ => None,
        };
    }

    pub fn add_user_keyword(&mut self, keyword: impl Into<String>) {
        self.user_keywords.insert(keyword.into());
    }

    pub fn clear_user_keywords(&mut self) {
        self.user_keywords.clear();
    }

    /// Comma-joined user keywords, `None` when there are none.
    #[must_use]
    pub fn user_keywords_joined(&self) -> Option<String> {
        join_non_empty(&self.user_keywords)
    }

    pub fn add_user_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.user_data
            .entry(key.into())
            .or_default()
            .insert(value.into());
    }

    pub fn clear_user_data(&mut self) {
        self.user_data.clear();
    }

    pub fn add_bidder_to_access_control_list(&mut self, bidder: impl Into<String>) {
        self.access_control_list.insert(bidder.into());
    }

    pub fn add_context_keyword(&mut self, keyword: impl Into<String>) {
        self.context_keywords.insert(keyword.into());
    }

    #[must_use]
    pub fn context_keywords_joined(&self) -> Option<String> {
        join_non_empty(&self.context_keywords)
    }

    pub fn add_context_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.context_data
            .entry(key.into())
            .or_default()
            .insert(value.into());
    }

    pub fn clear_context_data(&mut self) {
        self.context_data.clear();
    }

    #[must_use]
    pub fn context_data_json(&self) -> Option<Json> {
        dictionary_json(&self.context_data)
    }

    /// `eids` array for `user.ext`; identifiers without uids are skipped.
    #[must_use]
    pub fn external_user_ids_json(&self) -> Option<Json> {
        let ids: Vec<Json> = self
            .external_user_ids
            .iter()
            .filter_map(ExternalUserId::to_json)
            .collect();
        if ids.is_empty() {
            None
        } else {
            Some(Json::Array(ids))
        }
    }

    /// `user.ext.data` object built from the user data dictionary.
    #[must_use]
    pub fn user_data_json(&self) -> Option<Json> {
        dictionary_json(&self.user_data)
    }
}

/// `None` for `0`, otherwise the year if it lies in 1900..=current year.
fn checked_year_of_birth(year: i32) -> Result<Option<i32>, Report<RequestBuilderError>> {
    if year == 0 {
        return Ok(None);
    }

    let current_year = chrono::Utc::now().year();
    if !(MIN_YEAR_OF_BIRTH..=current_year).contains(&year) {
        return Err(Report::new(RequestBuilderError::InvalidTargeting {
            message: format!(
                "year of birth {year} must be between {MIN_YEAR_OF_BIRTH} and {current_year}"
            ),
        }));
    }
    Ok(Some(year))
}

fn deserialize_year_of_birth<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i32>::deserialize(deserializer)? {
        Some(year) => checked_year_of_birth(year)
            .map_err(|report| serde::de::Error::custom(report.current_context())),
        None => Ok(None),
    }
}

pub(crate) fn join_non_empty(values: &BTreeSet<String>) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().cloned().collect::<Vec<_>>().join(","))
    }
}

pub(crate) fn dictionary_json(dictionary: &BTreeMap<String, BTreeSet<String>>) -> Option<Json> {
    if dictionary.is_empty() {
        return None;
    }
    let object: Map<String, Json> = dictionary
        .iter()
        .map(|(key, values)| (key.clone(), json!(values)))
        .collect();
    Some(Json::Object(object))
}
