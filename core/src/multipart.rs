//! `multipart/form-data` bodies.
//!
//! Scalar fields become `text/plain` parts without a filename; files keep
//! their name and content type. Lists expand to repeated `name[]` parts.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::scalar_text;

/// A file attached to a multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub file_name: String,
    pub payload: Vec<u8>,
    pub mime_type: Option<String>,
}

impl File {
    pub fn new(file_name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            payload: payload.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub(crate) fn to_part(&self, name: &str) -> FormPart {
        FormPart {
            name: name.to_string(),
            file_name: Some(self.file_name.clone()),
            content_type: self
                .mime_type
                .clone()
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            data: self.payload.clone(),
        }
    }
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: "text/plain".to_string(),
            data: value.into().into_bytes(),
        }
    }

    pub fn text_value(&self) -> Option<&str> {
        match self.file_name {
            None => std::str::from_utf8(&self.data).ok(),
            Some(_) => None,
        }
    }
}

/// A multipart body with its boundary fixed at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    boundary: String,
    parts: Vec<FormPart>,
}

impl MultipartBody {
    pub fn new(parts: Vec<FormPart>) -> Self {
        Self::with_boundary(format!("customgpt-{}", Uuid::new_v4().simple()), parts)
    }

    pub fn with_boundary(boundary: impl Into<String>, parts: Vec<FormPart>) -> Self {
        Self {
            boundary: boundary.into(),
            parts,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Parts named `name`, in order.
    pub fn get(&self, name: &str) -> impl Iterator<Item = &FormPart> {
        let name = name.to_string();
        self.parts.iter().filter(move |part| part.name == name)
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            let disposition = match &part.file_name {
                Some(file_name) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    escape_quoted(&part.name),
                    escape_quoted(file_name)
                ),
                None => format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n",
                    escape_quoted(&part.name)
                ),
            };
            out.extend_from_slice(disposition.as_bytes());
            out.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
            out.extend_from_slice(&part.data);
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        out
    }
}

/// A request model sent as `multipart/form-data`.
pub trait MultipartForm {
    /// Names of the fields that carry files rather than text.
    const FILE_FIELDS: &'static [&'static str];

    fn to_multipart(&self) -> Result<Vec<FormPart>, ApiError>;

    /// Set the file field `name`.
    fn attach(&mut self, name: &str, file: File) -> Result<(), ApiError>;
}

/// The error `attach` returns for a name outside `FILE_FIELDS`.
pub fn not_a_file_field(form: &'static str, name: &str) -> ApiError {
    ApiError::InvalidArgument(format!("{form} has no file field `{name}`"))
}

/// Text parts for every entry of a model's JSON mapping.
///
/// Explicit null becomes an empty part so the server sees the field cleared.
pub fn text_parts(dict: Map<String, Value>) -> Vec<FormPart> {
    let mut parts = Vec::with_capacity(dict.len());
    for (name, value) in dict {
        match value {
            Value::Array(items) => {
                let list_name = format!("{name}[]");
                for item in items {
                    parts.push(FormPart::text(&list_name, scalar_text(&item).unwrap_or_default()));
                }
            }
            other => parts.push(FormPart::text(name, scalar_text(&other).unwrap_or_default())),
        }
    }
    parts
}

/// Append a file part when the file is present.
pub fn push_file(parts: &mut Vec<FormPart>, name: &str, file: Option<&File>) {
    if let Some(file) = file {
        parts.push(file.to_part(name));
    }
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
