use super::json_body;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, RequestBody};
use crate::model::{ApiResponse, ErrorResponse};
use crate::models::{self, PageMetadata};
use crate::outcome;

outcome! {
    pub enum GetPageMetadataOutcome {
        200 => Ok(ApiResponse<PageMetadata>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum UpdatePageMetadataOutcome {
        200 => Ok(ApiResponse<PageMetadata>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

fn metadata_path(project_id: i64, page_id: i64) -> String {
    format!("/api/v1/projects/{project_id}/pages/{page_id}/metadata")
}

/// `GET /api/v1/projects/{projectId}/pages/{pageId}/metadata`
#[derive(Debug, Clone)]
pub struct GetPageMetadata {
    pub project_id: i64,
    pub page_id: i64,
}

impl Endpoint for GetPageMetadata {
    type Outcome = GetPageMetadataOutcome;
    const NAME: &'static str = "get_page_metadata";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        metadata_path(self.project_id, self.page_id)
    }
}

/// `PUT /api/v1/projects/{projectId}/pages/{pageId}/metadata`
#[derive(Debug, Clone)]
pub struct UpdatePageMetadata {
    pub project_id: i64,
    pub page_id: i64,
    pub body: models::UpdatePageMetadata,
}

impl Endpoint for UpdatePageMetadata {
    type Outcome = UpdatePageMetadataOutcome;
    const NAME: &'static str = "update_page_metadata";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        metadata_path(self.project_id, self.page_id)
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        json_body(&self.body)
    }
}
