use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Field, Flag, Timestamp};

/// The ChatGPT plugin manifest of a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub project_id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub model_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub human_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub keywords: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub is_active: Field<Flag>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub updated_at: Field<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JSON body of plugin create and update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PluginBody {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub model_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub human_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub keywords: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub is_active: Field<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
