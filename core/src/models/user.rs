use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::model::{Field, Model, Timestamp};
use crate::multipart::{not_a_file_field, push_file, text_parts, File, FormPart, MultipartForm};

/// The account owning the API key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub email: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub profile_photo_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub updated_at: Field<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    #[serde(skip)]
    pub profile_photo: Option<File>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MultipartForm for UpdateUser {
    const FILE_FIELDS: &'static [&'static str] = &["profile_photo"];

    fn to_multipart(&self) -> Result<Vec<FormPart>, ApiError> {
        let mut parts = Vec::new();
        push_file(&mut parts, "profile_photo", self.profile_photo.as_ref());
        parts.extend(text_parts(self.to_dict()?));
        Ok(parts)
    }

    fn attach(&mut self, name: &str, file: File) -> Result<(), ApiError> {
        match name {
            "profile_photo" => self.profile_photo = Some(file),
            other => return Err(not_a_file_field("UpdateUser", other)),
        }
        Ok(())
    }
}
