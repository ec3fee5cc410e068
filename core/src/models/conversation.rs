use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::QueryFields;
use crate::model::{Bit, Field, LooseId, Paginated, SortOrder, Timestamp};

/// A chat session inside a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub project_id: Field<LooseId>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub created_by: Field<LooseId>,
    /// Identifier used in conversation paths.
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub session_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub updated_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub deleted_at: Field<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One prompt and the answer given to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub user_id: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub user_query: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub openai_response: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub created_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub updated_at: Field<Timestamp>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub conversation_id: Field<i64>,
    /// Citation ids, resolvable through the citations endpoint.
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub citations: Field<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub metadata: Field<MessageMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub user_ip: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub user_agent: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub external_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub request_source: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A conversation together with a page of its messages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversationMessages {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub conversation: Field<Conversation>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub messages: Field<Paginated<Message>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JSON body of conversation create and update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversationBody {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SendMessageBody {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub prompt: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub custom_persona: Field<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which conversations a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserFilter {
    #[default]
    All,
    Anonymous,
    TeamMember,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConversationsQuery {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub page: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub order: Field<SortOrder>,
    #[serde(rename = "userFilter", skip_serializing_if = "Field::is_unset")]
    pub user_filter: Field<UserFilter>,
}

impl Default for ListConversationsQuery {
    fn default() -> Self {
        Self {
            page: Field::Value(1),
            order: Field::Value(SortOrder::Desc),
            user_filter: Field::Value(UserFilter::All),
        }
    }
}

impl QueryFields for ListConversationsQuery {
    const FIELDS: &'static [&'static str] = &["page", "order", "userFilter"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessagesQuery {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub page: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub order: Field<SortOrder>,
}

impl Default for MessagesQuery {
    fn default() -> Self {
        Self {
            page: Field::Value(1),
            order: Field::Value(SortOrder::Desc),
        }
    }
}

impl QueryFields for MessagesQuery {
    const FIELDS: &'static [&'static str] = &["page", "order"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SendMessageQuery {
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub stream: Field<Bit>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub lang: Field<String>,
}

impl Default for SendMessageQuery {
    fn default() -> Self {
        Self {
            stream: Field::Value(Bit(false)),
            lang: "en".into(),
        }
    }
}

impl SendMessageQuery {
    pub fn is_streaming(&self) -> bool {
        self.stream.value().is_some_and(|bit| bit.0)
    }
}

impl QueryFields for SendMessageQuery {
    const FIELDS: &'static [&'static str] = &["stream", "lang"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{query_pairs, Model};
    use serde_json::json;

    fn dict(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn messages_page_parses_nested_models() {
        let data = ConversationMessages::from_dict(dict(json!({
            "conversation": {"id": 5, "session_id": "abc", "project_id": "1"},
            "messages": {
                "current_page": 1,
                "data": [{
                    "id": 10,
                    "user_query": "hi",
                    "openai_response": "hello",
                    "citations": [1, 2],
                    "metadata": {"request_source": "api"}
                }],
                "total": 1
            }
        })))
        .unwrap();
        let conversation = data.conversation.value().unwrap();
        assert_eq!(conversation.project_id, Field::Value(LooseId::Text("1".into())));
        let messages = data.messages.value().unwrap().items();
        assert_eq!(messages[0].citations, Field::Value(vec![1, 2]));
        let source = messages[0].metadata.value().and_then(|m| m.request_source.value().cloned());
        assert_eq!(source.as_deref(), Some("api"));
    }

    #[test]
    fn body_unset_vs_null() {
        let unset = SendMessageBody {
            prompt: "hi".into(),
            ..Default::default()
        };
        assert_eq!(Value::Object(unset.to_dict().unwrap()), json!({"prompt": "hi"}));

        let null = SendMessageBody {
            custom_persona: Field::Null,
            ..unset
        };
        assert_eq!(
            Value::Object(null.to_dict().unwrap()),
            json!({"prompt": "hi", "custom_persona": null})
        );
    }

    #[test]
    fn conversation_query_uses_wire_names() {
        let query = ListConversationsQuery {
            user_filter: Field::Value(UserFilter::TeamMember),
            ..Default::default()
        };
        let pairs = query_pairs(&query).unwrap();
        assert!(pairs.contains(&("userFilter".to_string(), "team_member".to_string())));
    }

    #[test]
    fn send_query_writes_stream_as_digit() {
        let pairs = query_pairs(&SendMessageQuery::default()).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("stream".to_string(), "0".to_string()),
                ("lang".to_string(), "en".to_string()),
            ]
        );
        let streaming = SendMessageQuery::from_dict(dict(json!({"stream": true}))).unwrap();
        assert!(streaming.is_streaming());
    }
}
