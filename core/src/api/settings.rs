use super::multipart_body;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, RequestBody};
use crate::model::{ApiResponse, ErrorResponse, Updated};
use crate::models::{self, ProjectSettings};
use crate::outcome;

outcome! {
    pub enum GetSettingsOutcome {
        200 => Ok(ApiResponse<ProjectSettings>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum UpdateSettingsOutcome {
        200 => Ok(ApiResponse<Updated>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

/// `GET /api/v1/projects/{projectId}/settings`
#[derive(Debug, Clone)]
pub struct GetSettings {
    pub project_id: i64,
}

impl Endpoint for GetSettings {
    type Outcome = GetSettingsOutcome;
    const NAME: &'static str = "get_settings";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/settings", self.project_id)
    }
}

/// `POST /api/v1/projects/{projectId}/settings`
#[derive(Debug, Clone)]
pub struct UpdateSettings {
    pub project_id: i64,
    pub body: models::UpdateSettings,
}

impl Endpoint for UpdateSettings {
    type Outcome = UpdateSettingsOutcome;
    const NAME: &'static str = "update_settings";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/settings", self.project_id)
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        multipart_body(&self.body)
    }
}
