use super::json_body;
use crate::endpoint::{segment, Endpoint};
use crate::error::ApiError;
use crate::http::{HttpMethod, RequestBody};
use crate::model::{query_pairs, ApiResponse, Deleted, ErrorResponse, Paginated};
use crate::models::{
    Conversation, ConversationBody, ConversationMessages, ListConversationsQuery, Message, MessagesQuery,
    SendMessageBody, SendMessageQuery,
};
use crate::outcome;

outcome! {
    pub enum ListConversationsOutcome {
        200 => Ok(ApiResponse<Paginated<Conversation>>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum CreateConversationOutcome {
        201 => Created(ApiResponse<Conversation>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum UpdateConversationOutcome {
        200 => Ok(ApiResponse<Conversation>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum DeleteConversationOutcome {
        200 => Ok(ApiResponse<Deleted>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
    }
}

outcome! {
    pub enum ListMessagesOutcome {
        200 => Ok(ApiResponse<ConversationMessages>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

outcome! {
    pub enum SendMessageOutcome {
        200 => Ok(ApiResponse<Message>),
        400 => BadRequest(ErrorResponse),
        401 => Unauthorized(ErrorResponse),
        404 => NotFound(ErrorResponse),
        500 => ServerError(ErrorResponse),
    }
}

fn conversation_path(project_id: i64, session_id: &str) -> String {
    format!("/api/v1/projects/{project_id}/conversations/{}", segment(session_id))
}

/// `GET /api/v1/projects/{projectId}/conversations`
#[derive(Debug, Clone)]
pub struct ListConversations {
    pub project_id: i64,
    pub query: ListConversationsQuery,
}

impl Endpoint for ListConversations {
    type Outcome = ListConversationsOutcome;
    const NAME: &'static str = "get_conversations";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/conversations", self.project_id)
    }

    fn query(&self) -> Result<Vec<(String, String)>, ApiError> {
        query_pairs(&self.query)
    }
}

/// `POST /api/v1/projects/{projectId}/conversations`
#[derive(Debug, Clone)]
pub struct CreateConversation {
    pub project_id: i64,
    pub body: ConversationBody,
}

impl Endpoint for CreateConversation {
    type Outcome = CreateConversationOutcome;
    const NAME: &'static str = "create_conversation";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/v1/projects/{}/conversations", self.project_id)
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        json_body(&self.body)
    }
}

/// `PUT /api/v1/projects/{projectId}/conversations/{sessionId}`
#[derive(Debug, Clone)]
pub struct UpdateConversation {
    pub project_id: i64,
    pub session_id: String,
    pub body: ConversationBody,
}

impl Endpoint for UpdateConversation {
    type Outcome = UpdateConversationOutcome;
    const NAME: &'static str = "update_conversation";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        conversation_path(self.project_id, &self.session_id)
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        json_body(&self.body)
    }
}

/// `DELETE /api/v1/projects/{projectId}/conversations/{sessionId}`
#[derive(Debug, Clone)]
pub struct DeleteConversation {
    pub project_id: i64,
    pub session_id: String,
}

impl Endpoint for DeleteConversation {
    type Outcome = DeleteConversationOutcome;
    const NAME: &'static str = "delete_conversation";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        conversation_path(self.project_id, &self.session_id)
    }
}

/// `GET /api/v1/projects/{projectId}/conversations/{sessionId}/messages`
#[derive(Debug, Clone)]
pub struct ListMessages {
    pub project_id: i64,
    pub session_id: String,
    pub query: MessagesQuery,
}

impl Endpoint for ListMessages {
    type Outcome = ListMessagesOutcome;
    const NAME: &'static str = "messages_conversation";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/messages", conversation_path(self.project_id, &self.session_id))
    }

    fn query(&self) -> Result<Vec<(String, String)>, ApiError> {
        query_pairs(&self.query)
    }
}

/// `POST /api/v1/projects/{projectId}/conversations/{sessionId}/messages`
///
/// With `stream=1` the reply is an event stream; the request then asks for
/// `text/event-stream` and is marked streaming so transports do not buffer it.
#[derive(Debug, Clone)]
pub struct SendMessage {
    pub project_id: i64,
    pub session_id: String,
    pub body: SendMessageBody,
    pub query: SendMessageQuery,
}

impl Endpoint for SendMessage {
    type Outcome = SendMessageOutcome;
    const NAME: &'static str = "send_message";
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/messages", conversation_path(self.project_id, &self.session_id))
    }

    fn query(&self) -> Result<Vec<(String, String)>, ApiError> {
        query_pairs(&self.query)
    }

    fn body(&self) -> Result<RequestBody, ApiError> {
        json_body(&self.body)
    }

    fn headers(&self) -> Vec<(String, String)> {
        if self.query.is_streaming() {
            vec![("Accept".to_string(), "text/event-stream".to_string())]
        } else {
            Vec::new()
        }
    }

    fn is_streaming(&self) -> bool {
        self.query.is_streaming()
    }
}
