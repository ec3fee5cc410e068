use super::multipart_body;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, RequestBody};
use crate::model::{ApiResponse, ErrorResponse};
use crate::models::{self, User};
use crate::outcome;

outcome! {
    pub enum GetUserOutcome {
        200 => Ok(ApiResponse<User>),
        401 => Unauthorized(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum UpdateUserOutcome {
        200 => Ok(ApiResponse<User>),
        401 => Unauthorized(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

/// `GET /api/v1/user`
#[derive(Debug, Clone, Default)]
pub struct GetUser;

impl Endpoint for GetUser {
    type Outcome = GetUserOutcome;
    const NAME: &'static str = "get_user";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/v1/user".to_string()
    }
}

/// `POST /api/v1/user`
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub body: models::UpdateUser,
}

impl Endpoint for UpdateUser {
    type Outcome = UpdateUserOutcome;
    const NAME: &'static str = "update_user";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/user".to_string()
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        multipart_body(&self.body)
    }
}
