use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Project, QueryFields};
use crate::model::{Field, Flag, Paginated, SortOrder, Timestamp};

/// A crawled or uploaded document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub page_url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub page_url_hash: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub project_id: Field<i64>,
    /// `queued`, `ok`, `failed`, `n/a` or `limited`.
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub crawl_status: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub index_status: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub is_file: Field<Flag>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub is_file_kept: Field<Flag>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub filename: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub filesize: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub updated_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub deleted_at: Field<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A project with one page of its documents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectPages {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub project: Field<Project>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub pages: Field<Paginated<Page>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Open Graph metadata shown for a page in citations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub image: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JSON body of the metadata update. `image` may be sent as null to clear it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdatePageMetadata {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub title: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub url: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub image: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListPagesQuery {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub page: Field<i64>,
    /// Days of history to include.
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub duration: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub order: Field<SortOrder>,
}

impl Default for ListPagesQuery {
    fn default() -> Self {
        Self {
            page: Field::Value(1),
            duration: Field::Value(90),
            order: Field::Value(SortOrder::Desc),
        }
    }
}

impl QueryFields for ListPagesQuery {
    const FIELDS: &'static [&'static str] = &["page", "duration", "order"];
}
