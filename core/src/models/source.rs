use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Page;
use crate::error::ApiError;
use crate::model::{Field, Flag, Model, Timestamp};
use crate::multipart::{not_a_file_field, push_file, text_parts, File, FormPart, MultipartForm};

/// A sitemap or an upload batch feeding a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectSource {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub updated_at: Field<Timestamp>,
    /// `sitemap` or `upload`.
    #[serde(default, rename = "type", skip_serializing_if = "Field::is_unset")]
    pub kind: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub settings: Field<SourceSettings>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub pages: Field<Vec<Page>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub data_refresh: Field<Flag>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub executive_js: Field<Flag>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub data_refresh_frequency: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub sitemap_path: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Every source of a project: sitemaps plus the single upload bucket.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectSources {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub sitemaps: Field<Vec<ProjectSource>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub uploads: Field<ProjectSource>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateSource {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub sitemap_path: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub file_data_retension: Field<bool>,
    #[serde(skip)]
    pub file: Option<File>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MultipartForm for CreateSource {
    const FILE_FIELDS: &'static [&'static str] = &["file"];

    fn to_multipart(&self) -> Result<Vec<FormPart>, ApiError> {
        let mut parts = text_parts(self.to_dict()?);
        push_file(&mut parts, "file", self.file.as_ref());
        Ok(parts)
    }

    fn attach(&mut self, name: &str, file: File) -> Result<(), ApiError> {
        match name {
            "file" => self.file = Some(file),
            other => return Err(not_a_file_field("CreateSource", other)),
        }
        Ok(())
    }
}
