use crate::endpoint::Endpoint;
use crate::http::HttpMethod;
use crate::model::{ApiResponse, ErrorResponse};
use crate::models::Citation;
use crate::outcome;

outcome! {
    pub enum GetCitationOutcome {
        200 => Ok(ApiResponse<Citation>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
    }
}

/// `GET /api/v1/projects/{projectId}/citations/{citationId}`
#[derive(Debug, Clone)]
pub struct GetCitation {
    pub project_id: i64,
    pub citation_id: i64,
}

impl Endpoint for GetCitation {
    type Outcome = GetCitationOutcome;
    const NAME: &'static str = "get_citation";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/citations/{}", self.project_id, self.citation_id)
    }
}
