//! Request and response models, one module per resource.
//!
//! Every optional member is a `Field`, every struct keeps unknown keys in
//! `extra`. Query structs carry the API's defaults in their `Default` impl
//! and reject names they do not know.

mod citation;
mod conversation;
mod page;
mod plugin;
mod project;
mod settings;
mod source;
mod user;

pub use citation::Citation;
pub use conversation::{
    Conversation, ConversationBody, ConversationMessages, ListConversationsQuery, Message,
    MessageMetadata, MessagesQuery, SendMessageBody, SendMessageQuery, UserFilter,
};
pub use page::{ListPagesQuery, Page, PageMetadata, ProjectPages, UpdatePageMetadata};
pub use plugin::{Plugin, PluginBody};
pub use project::{CreateProject, ListProjectsQuery, Project, ProjectStats, UpdateProject};
pub use settings::{CitationsViewType, ProjectSettings, ResponseSource, UpdateSettings};
pub use source::{CreateSource, ProjectSource, ProjectSources, SourceSettings};
pub use user::{UpdateUser, User};

/// Names a query struct accepts, in wire spelling.
pub trait QueryFields {
    const FIELDS: &'static [&'static str];
}
