use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::Field;

/// Open Graph card for a source cited in an answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub page_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub image: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub image_width: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub image_height: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub favicon: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub site_name: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
