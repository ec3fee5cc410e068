use super::json_body;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, RequestBody};
use crate::model::{ApiResponse, ErrorResponse};
use crate::models::{Plugin, PluginBody};
use crate::outcome;

outcome! {
    pub enum GetPluginOutcome {
        200 => Ok(ApiResponse<Plugin>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum CreatePluginOutcome {
        201 => Created(ApiResponse<Plugin>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum UpdatePluginOutcome {
        200 => Ok(ApiResponse<Plugin>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

fn plugins_path(project_id: i64) -> String {
    format!("/api/v1/projects/{project_id}/plugins")
}

/// `GET /api/v1/projects/{projectId}/plugins`
#[derive(Debug, Clone)]
pub struct GetPlugin {
    pub project_id: i64,
}

impl Endpoint for GetPlugin {
    type Outcome = GetPluginOutcome;
    const NAME: &'static str = "get_plugin";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        plugins_path(self.project_id)
    }
}

/// `POST /api/v1/projects/{projectId}/plugins`
#[derive(Debug, Clone)]
pub struct CreatePlugin {
    pub project_id: i64,
    pub body: PluginBody,
}

impl Endpoint for CreatePlugin {
    type Outcome = CreatePluginOutcome;
    const NAME: &'static str = "create_plugin";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        plugins_path(self.project_id)
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        json_body(&self.body)
    }
}

/// `PUT /api/v1/projects/{projectId}/plugins`
#[derive(Debug, Clone)]
pub struct UpdatePlugin {
    pub project_id: i64,
    pub body: PluginBody,
}

impl Endpoint for UpdatePlugin {
    type Outcome = UpdatePluginOutcome;
    const NAME: &'static str = "update_plugin";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        plugins_path(self.project_id)
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        json_body(&self.body)
    }
}
