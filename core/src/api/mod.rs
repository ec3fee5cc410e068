//! Endpoint operations, one module per resource.
//!
//! Each operation is a struct holding its path parameters, query and body,
//! paired with an outcome enum whose variants mirror the documented status
//! codes. Path parameters are fields; everything optional has a default.

mod citations;
mod conversations;
mod page_metadata;
mod pages;
mod plugins;
mod projects;
mod settings;
mod sources;
mod users;

pub use citations::{GetCitation, GetCitationOutcome};
pub use conversations::{
    CreateConversation, CreateConversationOutcome, DeleteConversation, DeleteConversationOutcome,
    ListConversations, ListConversationsOutcome, ListMessages, ListMessagesOutcome, SendMessage,
    SendMessageOutcome, UpdateConversation, UpdateConversationOutcome,
};
pub use page_metadata::{
    GetPageMetadata, GetPageMetadataOutcome, UpdatePageMetadata, UpdatePageMetadataOutcome,
};
pub use pages::{
    DeletePage, DeletePageOutcome, ListPages, ListPagesOutcome, PreviewPage, PreviewPageOutcome,
    ReindexPage, ReindexPageOutcome,
};
pub use plugins::{CreatePlugin, CreatePluginOutcome, GetPlugin, GetPluginOutcome, UpdatePlugin, UpdatePluginOutcome};
pub use projects::{
    CreateProject, CreateProjectOutcome, DeleteProject, DeleteProjectOutcome, GetProject,
    GetProjectOutcome, GetProjectStats, ListProjects, ListProjectsOutcome, ProjectStatsOutcome,
    UpdateProject, UpdateProjectOutcome,
};
pub use settings::{GetSettings, GetSettingsOutcome, UpdateSettings, UpdateSettingsOutcome};
pub use sources::{
    CreateSource, CreateSourceOutcome, DeleteSource, DeleteSourceOutcome, ListSources, ListSourcesOutcome,
};
pub use users::{GetUser, GetUserOutcome, UpdateUser, UpdateUserOutcome};

use serde_json::Value;

use crate::error::ApiError;
use crate::http::RequestBody;
use crate::model::Model;
use crate::multipart::{MultipartBody, MultipartForm};

fn json_body<M: Model>(model: &M) -> Result<RequestBody, ApiError> {
    Ok(RequestBody::Json(Value::Object(model.to_dict()?)))
}

fn multipart_body<F: MultipartForm>(form: &F) -> Result<RequestBody, ApiError> {
    Ok(RequestBody::Multipart(MultipartBody::new(form.to_multipart()?)))
}
