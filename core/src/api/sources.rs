use super::multipart_body;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, RequestBody};
use crate::model::{ApiResponse, Deleted, ErrorResponse};
use crate::models::{self, ProjectSource, ProjectSources};
use crate::outcome;

outcome! {
    pub enum ListSourcesOutcome {
        200 => Ok(ApiResponse<ProjectSources>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum CreateSourceOutcome {
        201 => Created(ApiResponse<ProjectSource>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum DeleteSourceOutcome {
        200 => Ok(ApiResponse<Deleted>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

/// `GET /api/v1/projects/{projectId}/sources`
#[derive(Debug, Clone)]
pub struct ListSources {
    pub project_id: i64,
}

impl Endpoint for ListSources {
    type Outcome = ListSourcesOutcome;
    const NAME: &'static str = "list_sources";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/sources", self.project_id)
    }
}

/// `POST /api/v1/projects/{projectId}/sources`
#[derive(Debug, Clone)]
pub struct CreateSource {
    pub project_id: i64,
    pub body: models::CreateSource,
}

impl Endpoint for CreateSource {
    type Outcome = CreateSourceOutcome;
    const NAME: &'static str = "create_source";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/sources", self.project_id)
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        multipart_body(&self.body)
    }
}

/// `DELETE /api/v1/projects/{projectId}/sources/{sourceId}`
#[derive(Debug, Clone)]
pub struct DeleteSource {
    pub project_id: i64,
    pub source_id: i64,
}

impl Endpoint for DeleteSource {
    type Outcome = DeleteSourceOutcome;
    const NAME: &'static str = "delete_source";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/sources/{}", self.project_id, self.source_id)
    }
}
