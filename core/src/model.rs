//! Building blocks shared by every typed model.
//!
//! # Design
//! `Field<T>` separates "not provided" from "explicitly null". Model structs
//! mark each optional field with
//! `#[serde(default, skip_serializing_if = "Field::is_unset")]`, so an unset
//! field never reaches the wire while `Field::Null` serializes as `null`.
//! Keys the model does not know about land in a flattened `extra` map and
//! are written back verbatim by `to_dict`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A model value that may be unset, explicitly null, or present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field<T> {
    Unset,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unset
    }
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// The present value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Unset => Field::Unset,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Unset => Field::Unset,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Value(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Field::Value(value.to_string())
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            Field::Unset | Field::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A missing key never reaches this point: `#[serde(default)]` yields Unset.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}

/// Conversion between a typed model and its JSON mapping.
pub trait Model: Serialize + DeserializeOwned {
    /// Every field that is not unset, plus any captured unknown keys.
    fn to_dict(&self) -> Result<Map<String, Value>, ApiError> {
        match serde_json::to_value(self).map_err(ApiError::Model)? {
            Value::Object(map) => Ok(map),
            other => Err(ApiError::InvalidArgument(format!(
                "model serialized to a non-object value: {other}"
            ))),
        }
    }

    /// Missing keys become unset; unknown keys are kept for `to_dict`.
    fn from_dict(map: Map<String, Value>) -> Result<Self, ApiError> {
        serde_json::from_value(Value::Object(map)).map_err(ApiError::Model)
    }
}

impl<T: Serialize + DeserializeOwned> Model for T {}

/// Turn a query model into flat string pairs, dropping unset and null entries.
pub fn query_pairs<M: Model>(model: &M) -> Result<Vec<(String, String)>, ApiError> {
    Ok(model
        .to_dict()?
        .into_iter()
        .filter_map(|(key, value)| scalar_text(&value).map(|text| (key, text)))
        .collect())
}

/// Text form of a JSON value as sent in query strings and form fields.
/// `None` for null.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// A point in time as returned by the API.
///
/// The API mixes RFC 3339 (`2023-04-30T16:43:53Z`) with a naive
/// `2023-04-30 16:43:53` form; naive values are read as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Timestamp(dt.with_timezone(&Utc)));
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Timestamp(naive.and_utc()));
            }
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        Ok(Timestamp(date.and_time(NaiveTime::MIN).and_utc()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}

/// A boolean the API sometimes sends as `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flag(pub bool);

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag(value)
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(b) => Ok(Flag(b)),
            Value::Number(n) => Ok(Flag(n.as_f64().is_some_and(|v| v != 0.0))),
            Value::String(s) => match s.as_str() {
                "1" | "true" => Ok(Flag(true)),
                "0" | "false" | "" => Ok(Flag(false)),
                _ => Err(serde::de::Error::custom(format!("invalid flag {s:?}"))),
            },
            other => Err(serde::de::Error::custom(format!("invalid flag {other}"))),
        }
    }
}

/// A boolean sent on the wire as `1`/`0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bit(pub bool);

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        Bit(value)
    }
}

impl Serialize for Bit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(self.0))
    }
}

impl<'de> Deserialize<'de> for Bit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Flag::deserialize(deserializer).map(|flag| Bit(flag.0))
    }
}

/// An identifier the API sends either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseId {
    Int(i64),
    Text(String),
}

impl fmt::Display for LooseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseId::Int(n) => write!(f, "{n}"),
            LooseId::Text(s) => f.write_str(s),
        }
    }
}

/// The `{status, data}` wrapper every JSON response uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub status: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub data: Field<T>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status.value().is_some_and(|s| s == "success")
    }

    pub fn data(&self) -> Option<&T> {
        self.data.value()
    }
}

/// `data` member of an error envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub code: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub message: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of every documented failure status.
pub type ErrorResponse = ApiResponse<ErrorBody>;

/// A Laravel-style paginated listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub current_page: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub data: Field<Vec<T>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub first_page_url: Field<String>,
    #[serde(default, rename = "from", skip_serializing_if = "Field::is_unset")]
    pub from_: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub last_page: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub last_page_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub next_page_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub path: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub per_page: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub prev_page_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub to: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub total: Field<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> Paginated<T> {
    pub fn items(&self) -> &[T] {
        self.data.value().map(Vec::as_slice).unwrap_or_default()
    }
}

/// `{"deleted": true}` payload of delete operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Deleted {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub deleted: Field<Flag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `{"updated": true}` payload of update-only operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Updated {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub updated: Field<Flag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sort direction accepted by listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}
