use crate::endpoint::{segment, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::model::{query_pairs, ApiResponse, Deleted, ErrorResponse, Updated};
use crate::models::{ListPagesQuery, ProjectPages};
use crate::outcome;

outcome! {
    pub enum ListPagesOutcome {
        200 => Ok(ApiResponse<ProjectPages>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum DeletePageOutcome {
        200 => Ok(ApiResponse<Deleted>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum ReindexPageOutcome {
        200 => Ok(ApiResponse<Updated>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        403 => Forbidden(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    /// A successful preview returns the raw document, which stays in the
    /// envelope's content unclassified.
    pub enum PreviewPageOutcome {
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

/// `GET /api/v1/projects/{projectId}/pages`
#[derive(Debug, Clone)]
pub struct ListPages {
    pub project_id: i64,
    pub query: ListPagesQuery,
}

impl Endpoint for ListPages {
    type Outcome = ListPagesOutcome;
    const NAME: &'static str = "get_pages";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/pages", self.project_id)
    }

    fn query(&self) -> Result<Vec<(String, String)>, ApiError> {
        query_pairs(&self.query)
    }
}

/// `DELETE /api/v1/projects/{projectId}/pages/{pageId}`
#[derive(Debug, Clone)]
pub struct DeletePage {
    pub project_id: i64,
    pub page_id: i64,
}

impl Endpoint for DeletePage {
    type Outcome = DeletePageOutcome;
    const NAME: &'static str = "delete_page";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/pages/{}", self.project_id, self.page_id)
    }
}

/// `POST /api/v1/projects/{projectId}/pages/{pageId}/reindex`
#[derive(Debug, Clone)]
pub struct ReindexPage {
    pub project_id: i64,
    pub page_id: i64,
}

impl Endpoint for ReindexPage {
    type Outcome = ReindexPageOutcome;
    const NAME: &'static str = "reindex_page";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/pages/{}/reindex", self.project_id, self.page_id)
    }
}

/// `GET /api/v1/preview/{id}`
#[derive(Debug, Clone)]
pub struct PreviewPage {
    pub id: String,
}

impl Endpoint for PreviewPage {
    type Outcome = PreviewPageOutcome;
    const NAME: &'static str = "preview_citation";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/preview/{}", segment(&self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::endpoint::{build_request, build_response};
    use crate::http::HttpResponse;

    #[test]
    fn list_pages_defaults_to_ninety_days() {
        let endpoint = ListPages {
            project_id: 2,
            query: ListPagesQuery::default(),
        };
        let req = build_request(&ClientConfig::new("http://h", "k"), &endpoint).unwrap();
        assert_eq!(req.full_url().unwrap(), "http://h/api/v1/projects/2/pages?page=1&duration=90&order=desc");
    }

    #[test]
    fn preview_body_stays_raw() {
        let raw = HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/pdf".to_string())],
            body: b"%PDF-1.4".to_vec(),
        };
        let response = build_response::<PreviewPageOutcome>(&ClientConfig::new("http://h", "k"), raw).unwrap();
        assert!(response.parsed().is_none());
        assert_eq!(response.content(), b"%PDF-1.4");
    }
}
