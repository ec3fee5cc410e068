use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::model::{Field, Flag, Model};
use crate::multipart::{not_a_file_field, push_file, text_parts, File, FormPart, MultipartForm};

/// Where answers may draw their content from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    Default,
    #[default]
    OwnContent,
    OpenaiContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationsViewType {
    #[default]
    User,
    Show,
    Hide,
}

/// Chatbot appearance and behaviour of a project.
///
/// Enumerated members stay strings so values added server-side still parse;
/// `UpdateSettings` uses the closed enums.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub chatbot_avatar: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub chatbot_background: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub default_prompt: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub example_questions: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub response_source: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub chatbot_msg_lang: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub chatbot_color: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub persona_instructions: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub citations_answer_source_label_msg: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub citations_sources_label_msg: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub hang_in_there_msg: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub chatbot_siesta_msg: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub is_loading_indicator_enabled: Field<Flag>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub enable_citations: Field<Flag>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub citations_view_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub no_answer_message: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub ending_message: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub remove_branding: Field<Flag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Multipart body of the settings update. Avatar and background are files.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateSettings {
    #[serde(skip)]
    pub chat_bot_avatar: Option<File>,
    #[serde(skip)]
    pub chat_bot_bg: Option<File>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub default_prompt: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub example_questions: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub response_source: Field<ResponseSource>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub chatbot_msg_lang: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub chatbot_color: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub persona_instructions: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub citations_answer_source_label_msg: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub citations_sources_label_msg: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub hang_in_there_msg: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub chatbot_siesta_msg: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub is_loading_indicator_enabled: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub enable_citations: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub citations_view_type: Field<CitationsViewType>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub no_answer_message: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub ending_message: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub remove_branding: Field<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MultipartForm for UpdateSettings {
    const FILE_FIELDS: &'static [&'static str] = &["chat_bot_avatar", "chat_bot_bg"];

    fn to_multipart(&self) -> Result<Vec<FormPart>, ApiError> {
        let mut parts = Vec::new();
        push_file(&mut parts, "chat_bot_avatar", self.chat_bot_avatar.as_ref());
        push_file(&mut parts, "chat_bot_bg", self.chat_bot_bg.as_ref());
        parts.extend(text_parts(self.to_dict()?));
        Ok(parts)
    }

    fn attach(&mut self, name: &str, file: File) -> Result<(), ApiError> {
        match name {
            "chat_bot_avatar" => self.chat_bot_avatar = Some(file),
            "chat_bot_bg" => self.chat_bot_bg = Some(file),
            other => return Err(not_a_file_field("UpdateSettings", other)),
        }
        Ok(())
    }
}
