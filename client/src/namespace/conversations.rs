use customgpt_core::api::{
    CreateConversation, CreateConversationOutcome, DeleteConversation, DeleteConversationOutcome,
    GetCitation, GetCitationOutcome, ListConversations, ListConversationsOutcome, ListMessages,
    ListMessagesOutcome, SendMessage, SendMessageOutcome, UpdateConversation, UpdateConversationOutcome,
};
use customgpt_core::model::Bit;
use customgpt_core::{ApiError, Endpoint, Field, Response};

use crate::error::Error;
use crate::kwargs::Kwargs;
use crate::stream::{AsyncMessageStream, MessageStream, StreamReply};

const CONVERSATION_FIELDS: &[&str] = &["name"];
const SEND_FIELDS: &[&str] = &["prompt", "custom_persona"];

namespace! {
    /// `session.conversations()`
    Conversations
}

impl Conversations<'_> {
    /// Accepts `page`, `order` and `userFilter`.
    pub fn list(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<ListConversationsOutcome>, Error> {
        self.target.call(&list_request(project_id, kwargs)?)
    }

    pub async fn list_async(
        &self,
        project_id: i64,
        kwargs: Kwargs,
    ) -> Result<Response<ListConversationsOutcome>, Error> {
        self.target.call_async(&list_request(project_id, kwargs)?).await
    }

    pub fn create(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<CreateConversationOutcome>, Error> {
        self.target.call(&create_request(project_id, kwargs)?)
    }

    pub async fn create_async(
        &self,
        project_id: i64,
        kwargs: Kwargs,
    ) -> Result<Response<CreateConversationOutcome>, Error> {
        self.target.call_async(&create_request(project_id, kwargs)?).await
    }

    pub fn update(
        &self,
        project_id: i64,
        session_id: &str,
        kwargs: Kwargs,
    ) -> Result<Response<UpdateConversationOutcome>, Error> {
        self.target.call(&update_request(project_id, session_id, kwargs)?)
    }

    pub async fn update_async(
        &self,
        project_id: i64,
        session_id: &str,
        kwargs: Kwargs,
    ) -> Result<Response<UpdateConversationOutcome>, Error> {
        self.target.call_async(&update_request(project_id, session_id, kwargs)?).await
    }

    pub fn delete(&self, project_id: i64, session_id: &str) -> Result<Response<DeleteConversationOutcome>, Error> {
        self.target.call(&delete_request(project_id, session_id))
    }

    pub async fn delete_async(
        &self,
        project_id: i64,
        session_id: &str,
    ) -> Result<Response<DeleteConversationOutcome>, Error> {
        self.target.call_async(&delete_request(project_id, session_id)).await
    }

    /// Message history; accepts `page` and `order`.
    pub fn messages(
        &self,
        project_id: i64,
        session_id: &str,
        kwargs: Kwargs,
    ) -> Result<Response<ListMessagesOutcome>, Error> {
        self.target.call(&messages_request(project_id, session_id, kwargs)?)
    }

    pub async fn messages_async(
        &self,
        project_id: i64,
        session_id: &str,
        kwargs: Kwargs,
    ) -> Result<Response<ListMessagesOutcome>, Error> {
        self.target.call_async(&messages_request(project_id, session_id, kwargs)?).await
    }

    /// Send `prompt` (and optionally `custom_persona`) and wait for the whole
    /// answer. `stream=1` is refused here; see [`Conversations::send_stream`].
    pub fn send(&self, project_id: i64, session_id: &str, kwargs: Kwargs) -> Result<Response<SendMessageOutcome>, Error> {
        self.target.call(&send_request(project_id, session_id, kwargs)?)
    }

    pub async fn send_async(
        &self,
        project_id: i64,
        session_id: &str,
        kwargs: Kwargs,
    ) -> Result<Response<SendMessageOutcome>, Error> {
        self.target.call_async(&send_request(project_id, session_id, kwargs)?).await
    }

    /// Send with `stream=1` and return the event stream.
    pub fn send_stream(
        &self,
        project_id: i64,
        session_id: &str,
        kwargs: Kwargs,
    ) -> Result<StreamReply<MessageStream>, Error> {
        self.target.stream(&stream_request(project_id, session_id, kwargs)?)
    }

    pub async fn send_stream_async(
        &self,
        project_id: i64,
        session_id: &str,
        kwargs: Kwargs,
    ) -> Result<StreamReply<AsyncMessageStream>, Error> {
        self.target.stream_async(&stream_request(project_id, session_id, kwargs)?).await
    }
}

fn list_request(project_id: i64, kwargs: Kwargs) -> Result<ListConversations, ApiError> {
    Ok(ListConversations {
        project_id,
        query: kwargs.into_query(ListConversations::NAME)?,
    })
}

fn create_request(project_id: i64, mut kwargs: Kwargs) -> Result<CreateConversation, ApiError> {
    let body = kwargs.pluck_json(CreateConversation::NAME, CONVERSATION_FIELDS)?;
    kwargs.finish(CreateConversation::NAME)?;
    Ok(CreateConversation { project_id, body })
}

fn update_request(project_id: i64, session_id: &str, mut kwargs: Kwargs) -> Result<UpdateConversation, ApiError> {
    let body = kwargs.pluck_json(UpdateConversation::NAME, CONVERSATION_FIELDS)?;
    kwargs.finish(UpdateConversation::NAME)?;
    Ok(UpdateConversation {
        project_id,
        session_id: session_id.to_string(),
        body,
    })
}

fn delete_request(project_id: i64, session_id: &str) -> DeleteConversation {
    DeleteConversation {
        project_id,
        session_id: session_id.to_string(),
    }
}

fn messages_request(project_id: i64, session_id: &str, kwargs: Kwargs) -> Result<ListMessages, ApiError> {
    Ok(ListMessages {
        project_id,
        session_id: session_id.to_string(),
        query: kwargs.into_query(ListMessages::NAME)?,
    })
}

fn send_request(project_id: i64, session_id: &str, mut kwargs: Kwargs) -> Result<SendMessage, ApiError> {
    let body = kwargs.pluck_json(SendMessage::NAME, SEND_FIELDS)?;
    Ok(SendMessage {
        project_id,
        session_id: session_id.to_string(),
        body,
        query: kwargs.into_query(SendMessage::NAME)?,
    })
}

fn stream_request(project_id: i64, session_id: &str, kwargs: Kwargs) -> Result<SendMessage, ApiError> {
    let mut endpoint = send_request(project_id, session_id, kwargs)?;
    endpoint.query.stream = Field::Value(Bit(true));
    Ok(endpoint)
}

namespace! {
    /// `session.citations()`
    Citations
}

impl Citations<'_> {
    pub fn get(&self, project_id: i64, citation_id: i64) -> Result<Response<GetCitationOutcome>, Error> {
        self.target.call(&GetCitation { project_id, citation_id })
    }

    pub async fn get_async(&self, project_id: i64, citation_id: i64) -> Result<Response<GetCitationOutcome>, Error> {
        self.target.call_async(&GetCitation { project_id, citation_id }).await
    }
}
