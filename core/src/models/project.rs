use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::QueryFields;
use crate::error::ApiError;
use crate::model::{Field, Flag, Model, SortOrder, Timestamp};
use crate::multipart::{not_a_file_field, push_file, text_parts, File, FormPart, MultipartForm};

/// A chatbot project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub project_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub sitemap_path: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub is_chat_active: Field<Flag>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub user_id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub updated_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub deleted_at: Field<Timestamp>,
    /// `SITEMAP` or `UPLOAD`.
    #[serde(default, rename = "type", skip_serializing_if = "Field::is_unset")]
    pub kind: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub is_shared: Field<Flag>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub shareable_slug: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub shareable_link: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub embed_code: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub live_chat_code: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Crawl and credit counters of a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectStats {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub pages_found: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub pages_crawled: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub pages_indexed: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub crawl_credits_used: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub query_credits_used: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub index_credits_used: Field<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Multipart body of project creation. Either `sitemap_path` or `file`
/// seeds the project's content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateProject {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub project_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub sitemap_path: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub file_data_retension: Field<bool>,
    #[serde(skip)]
    pub file: Option<File>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MultipartForm for CreateProject {
    const FILE_FIELDS: &'static [&'static str] = &["file"];

    fn to_multipart(&self) -> Result<Vec<FormPart>, ApiError> {
        let mut parts = text_parts(self.to_dict()?);
        push_file(&mut parts, "file", self.file.as_ref());
        Ok(parts)
    }

    fn attach(&mut self, name: &str, file: File) -> Result<(), ApiError> {
        match name {
            "file" => self.file = Some(file),
            other => return Err(not_a_file_field("CreateProject", other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub project_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub is_shared: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub sitemap_path: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub file_data_retension: Field<bool>,
    #[serde(skip)]
    pub file: Option<File>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MultipartForm for UpdateProject {
    const FILE_FIELDS: &'static [&'static str] = &["file"];

    fn to_multipart(&self) -> Result<Vec<FormPart>, ApiError> {
        let mut parts = text_parts(self.to_dict()?);
        push_file(&mut parts, "file", self.file.as_ref());
        Ok(parts)
    }

    fn attach(&mut self, name: &str, file: File) -> Result<(), ApiError> {
        match name {
            "file" => self.file = Some(file),
            other => return Err(not_a_file_field("UpdateProject", other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListProjectsQuery {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub page: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub order: Field<SortOrder>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub width: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub height: Field<String>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub duration: Field<i64>,
}

impl Default for ListProjectsQuery {
    fn default() -> Self {
        Self {
            page: Field::Value(1),
            order: Field::Value(SortOrder::Desc),
            width: "100%".into(),
            height: "auto".into(),
            duration: Field::Unset,
        }
    }
}

impl QueryFields for ListProjectsQuery {
    const FIELDS: &'static [&'static str] = &["page", "order", "width", "height", "duration"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::query_pairs;
    use serde_json::json;

    fn dict(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn project_reads_api_payload() {
        let project = Project::from_dict(dict(json!({
            "id": 1,
            "project_name": "demo",
            "is_chat_active": 1,
            "created_at": "2023-04-30 16:43:53",
            "deleted_at": null,
            "type": "SITEMAP",
            "team_id": 9
        })))
        .unwrap();
        assert_eq!(project.id, Field::Value(1));
        assert_eq!(project.is_chat_active, Field::Value(Flag(true)));
        assert!(project.deleted_at.is_null());
        assert!(project.updated_at.is_unset());
        assert_eq!(project.kind.value().map(String::as_str), Some("SITEMAP"));
        assert_eq!(project.extra.get("team_id"), Some(&json!(9)));
    }

    #[test]
    fn project_with_malformed_date_fails() {
        let result = Project::from_dict(dict(json!({"created_at": "yesterday"})));
        assert!(matches!(result, Err(ApiError::Model(_))));
    }

    #[test]
    fn set_fields_survive_round_trip() {
        let project = Project {
            id: Field::Value(3),
            project_name: "demo".into(),
            shareable_slug: Field::Null,
            ..Default::default()
        };
        let again = Project::from_dict(project.to_dict().unwrap()).unwrap();
        assert_eq!(again, project);
    }

    #[test]
    fn create_form_carries_text_and_file() {
        let form = CreateProject {
            project_name: "demo".into(),
            sitemap_path: "https://example.com/sitemap.xml".into(),
            file: Some(File::new("a.pdf", b"%PDF".to_vec()).with_mime_type("application/pdf")),
            ..Default::default()
        };
        let parts = form.to_multipart().unwrap();
        let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["project_name", "sitemap_path", "file"]);
        assert_eq!(parts[2].file_name.as_deref(), Some("a.pdf"));
        assert_eq!(parts[2].content_type, "application/pdf");
    }

    #[test]
    fn file_is_not_part_of_the_mapping() {
        let mut form = UpdateProject::default();
        form.attach("file", File::new("x.txt", b"x".to_vec())).unwrap();
        assert!(form.to_dict().unwrap().is_empty());
        assert!(form.attach("photo", File::new("y", Vec::new())).is_err());
    }

    #[test]
    fn list_query_defaults() {
        let pairs = query_pairs(&ListProjectsQuery::default()).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "1".to_string()),
                ("order".to_string(), "desc".to_string()),
                ("width".to_string(), "100%".to_string()),
                ("height".to_string(), "auto".to_string()),
            ]
        );
    }

    #[test]
    fn list_query_overrides_and_unknown_names() {
        let query = ListProjectsQuery::from_dict(dict(json!({"page": 3, "width": null}))).unwrap();
        assert_eq!(query.page, Field::Value(3));
        assert!(query.width.is_null());
        assert_eq!(query.height, Field::Value("auto".to_string()));
        assert!(ListProjectsQuery::from_dict(dict(json!({"colour": 1}))).is_err());
    }
}
