use super::multipart_body;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, RequestBody};
use crate::model::{query_pairs, ApiResponse, Deleted, ErrorResponse, Paginated};
use crate::models::{self, ListProjectsQuery, Project};
use crate::outcome;

outcome! {
    pub enum ListProjectsOutcome {
        200 => Ok(ApiResponse<Paginated<Project>>),
        401 => Unauthorized(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum CreateProjectOutcome {
        201 => Created(ApiResponse<Project>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum GetProjectOutcome {
        200 => Ok(ApiResponse<Project>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum UpdateProjectOutcome {
        200 => Ok(ApiResponse<Project>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum DeleteProjectOutcome {
        200 => Ok(ApiResponse<Deleted>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum ProjectStatsOutcome {
        200 => Ok(ApiResponse<models::ProjectStats>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

/// `GET /api/v1/projects`
#[derive(Debug, Clone, Default)]
pub struct ListProjects {
    pub query: ListProjectsQuery,
}

impl Endpoint for ListProjects {
    type Outcome = ListProjectsOutcome;
    const NAME: &'static str = "list_projects";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/v1/projects".to_string()
    }

    fn query(&self) -> Result<Vec<(String, String)>, ApiError> {
        query_pairs(&self.query)
    }
}

/// `POST /api/v1/projects`
#[derive(Debug, Clone, Default)]
pub struct CreateProject {
    pub body: models::CreateProject,
}

impl Endpoint for CreateProject {
    type Outcome = CreateProjectOutcome;
    const NAME: &'static str = "create_project";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/projects".to_string()
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        multipart_body(&self.body)
    }
}

/// `GET /api/v1/projects/{projectId}`
#[derive(Debug, Clone)]
pub struct GetProject {
    pub project_id: i64,
}

impl Endpoint for GetProject {
    type Outcome = GetProjectOutcome;
    const NAME: &'static str = "get_project";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}", self.project_id)
    }
}

/// `POST /api/v1/projects/{projectId}`
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub project_id: i64,
    pub body: models::UpdateProject,
}

impl Endpoint for UpdateProject {
    type Outcome = UpdateProjectOutcome;
    const NAME: &'static str = "update_project";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}", self.project_id)
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        multipart_body(&self.body)
    }
}

/// `DELETE /api/v1/projects/{projectId}`
#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub project_id: i64,
}

impl Endpoint for DeleteProject {
    type Outcome = DeleteProjectOutcome;
    const NAME: &'static str = "delete_project";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}", self.project_id)
    }
}

/// `GET /api/v1/projects/{projectId}/stats`
#[derive(Debug, Clone)]
pub struct GetProjectStats {
    pub project_id: i64,
}

impl Endpoint for GetProjectStats {
    type Outcome = ProjectStatsOutcome;
    const NAME: &'static str = "stats_project";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/stats", self.project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::endpoint::{build_request, classify_response, Outcome};
    use crate::http::HttpResponse;
    use crate::model::Field;

    fn config() -> ClientConfig {
        ClientConfig::new("https://app.customgpt.ai", "key")
    }

    #[test]
    fn list_sends_default_query() {
        let req = build_request(&config(), &ListProjects::default()).unwrap();
        assert_eq!(
            req.full_url().unwrap(),
            "https://app.customgpt.ai/api/v1/projects?page=1&order=desc&width=100%25&height=auto"
        );
        assert!(req.body.is_empty());
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn unset_query_parameter_is_not_sent() {
        let endpoint = ListProjects {
            query: ListProjectsQuery {
                width: Field::Unset,
                height: Field::Null,
                ..Default::default()
            },
        };
        let req = build_request(&config(), &endpoint).unwrap();
        assert!(req.query.iter().all(|(k, _)| k != "width" && k != "height"));
    }

    #[test]
    fn create_is_multipart_only() {
        let endpoint = CreateProject {
            body: models::CreateProject {
                project_name: "demo".into(),
                ..Default::default()
            },
        };
        let req = build_request(&config(), &endpoint).unwrap();
        match &req.body {
            RequestBody::Multipart(form) => {
                assert_eq!(form.get("project_name").next().and_then(|p| p.text_value()), Some("demo"));
                let content_type = req.header("content-type").unwrap();
                assert_eq!(content_type, form.content_type());
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn every_documented_code_classifies() {
        let bodies = [
            (200, r#"{"status":"success","data":{"id":1,"project_name":"demo"}}"#),
            (400, r#"{"status":"error","data":{"code":400,"message":"bad"}}"#),
            (401, r#"{"status":"error","data":{"code":401,"message":"no"}}"#),
            (404, r#"{"status":"error","data":{"code":404,"message":"gone"}}"#),
            (500, r#"{"status":"error","data":{"code":500,"message":"boom"}}"#),
        ];
        for (status, body) in bodies {
            let response = HttpResponse {
                status,
                headers: Vec::new(),
                body: body.as_bytes().to_vec(),
            };
            let outcome: GetProjectOutcome = classify_response(&config(), &response).unwrap().unwrap();
            assert_eq!(outcome.status(), status);
        }
        assert_eq!(GetProjectOutcome::DOCUMENTED, &[200, 400, 401, 404, 500]);
    }
}
