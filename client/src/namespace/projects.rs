use customgpt_core::api::{
    CreatePlugin, CreatePluginOutcome, CreateProject, CreateProjectOutcome, DeleteProject,
    DeleteProjectOutcome, GetPlugin, GetPluginOutcome, GetProject, GetProjectOutcome, GetProjectStats,
    GetSettings, GetSettingsOutcome, ListProjects, ListProjectsOutcome, ProjectStatsOutcome,
    UpdatePlugin, UpdatePluginOutcome, UpdateProject, UpdateProjectOutcome, UpdateSettings,
    UpdateSettingsOutcome,
};
use customgpt_core::{ApiError, Endpoint, Response};

use crate::error::Error;
use crate::kwargs::Kwargs;

const CREATE_FIELDS: &[&str] = &["project_name", "sitemap_path", "file_data_retension", "file"];
const UPDATE_FIELDS: &[&str] = &["project_name", "is_shared", "sitemap_path", "file_data_retension", "file"];
const PLUGIN_FIELDS: &[&str] = &["model_name", "human_name", "keywords", "description", "is_active"];
const SETTINGS_FIELDS: &[&str] = &[
    "chat_bot_avatar",
    "chat_bot_bg",
    "default_prompt",
    "example_questions",
    "response_source",
    "chatbot_msg_lang",
    "chatbot_color",
    "persona_instructions",
    "citations_answer_source_label_msg",
    "citations_sources_label_msg",
    "hang_in_there_msg",
    "chatbot_siesta_msg",
    "is_loading_indicator_enabled",
    "enable_citations",
    "citations_view_type",
    "no_answer_message",
    "ending_message",
    "remove_branding",
];

namespace! {
    /// `session.projects()`
    Projects
}

impl Projects<'_> {
    /// Accepts the listing query: `page`, `order`, `width`, `height`, `duration`.
    pub fn list(&self, kwargs: Kwargs) -> Result<Response<ListProjectsOutcome>, Error> {
        self.target.call(&list_request(kwargs)?)
    }

    pub async fn list_async(&self, kwargs: Kwargs) -> Result<Response<ListProjectsOutcome>, Error> {
        self.target.call_async(&list_request(kwargs)?).await
    }

    /// `project_name` plus either `sitemap_path` or a `file`.
    pub fn create(&self, kwargs: Kwargs) -> Result<Response<CreateProjectOutcome>, Error> {
        self.target.call(&create_request(kwargs)?)
    }

    pub async fn create_async(&self, kwargs: Kwargs) -> Result<Response<CreateProjectOutcome>, Error> {
        self.target.call_async(&create_request(kwargs)?).await
    }

    pub fn get(&self, project_id: i64) -> Result<Response<GetProjectOutcome>, Error> {
        self.target.call(&GetProject { project_id })
    }

    pub async fn get_async(&self, project_id: i64) -> Result<Response<GetProjectOutcome>, Error> {
        self.target.call_async(&GetProject { project_id }).await
    }

    pub fn update(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<UpdateProjectOutcome>, Error> {
        self.target.call(&update_request(project_id, kwargs)?)
    }

    pub async fn update_async(
        &self,
        project_id: i64,
        kwargs: Kwargs,
    ) -> Result<Response<UpdateProjectOutcome>, Error> {
        self.target.call_async(&update_request(project_id, kwargs)?).await
    }

    pub fn delete(&self, project_id: i64) -> Result<Response<DeleteProjectOutcome>, Error> {
        self.target.call(&DeleteProject { project_id })
    }

    pub async fn delete_async(&self, project_id: i64) -> Result<Response<DeleteProjectOutcome>, Error> {
        self.target.call_async(&DeleteProject { project_id }).await
    }

    pub fn stats(&self, project_id: i64) -> Result<Response<ProjectStatsOutcome>, Error> {
        self.target.call(&GetProjectStats { project_id })
    }

    pub async fn stats_async(&self, project_id: i64) -> Result<Response<ProjectStatsOutcome>, Error> {
        self.target.call_async(&GetProjectStats { project_id }).await
    }
}

fn list_request(kwargs: Kwargs) -> Result<ListProjects, ApiError> {
    Ok(ListProjects {
        query: kwargs.into_query(ListProjects::NAME)?,
    })
}

fn create_request(mut kwargs: Kwargs) -> Result<CreateProject, ApiError> {
    let body = kwargs.pluck_form(CreateProject::NAME, CREATE_FIELDS)?;
    kwargs.finish(CreateProject::NAME)?;
    Ok(CreateProject { body })
}

fn update_request(project_id: i64, mut kwargs: Kwargs) -> Result<UpdateProject, ApiError> {
    let body = kwargs.pluck_form(UpdateProject::NAME, UPDATE_FIELDS)?;
    kwargs.finish(UpdateProject::NAME)?;
    Ok(UpdateProject { project_id, body })
}

namespace! {
    /// `session.plugins()`
    Plugins
}

impl Plugins<'_> {
    pub fn get(&self, project_id: i64) -> Result<Response<GetPluginOutcome>, Error> {
        self.target.call(&GetPlugin { project_id })
    }

    pub async fn get_async(&self, project_id: i64) -> Result<Response<GetPluginOutcome>, Error> {
        self.target.call_async(&GetPlugin { project_id }).await
    }

    pub fn create(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<CreatePluginOutcome>, Error> {
        self.target.call(&create_plugin_request(project_id, kwargs)?)
    }

    pub async fn create_async(
        &self,
        project_id: i64,
        kwargs: Kwargs,
    ) -> Result<Response<CreatePluginOutcome>, Error> {
        self.target.call_async(&create_plugin_request(project_id, kwargs)?).await
    }

    pub fn update(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<UpdatePluginOutcome>, Error> {
        self.target.call(&update_plugin_request(project_id, kwargs)?)
    }

    pub async fn update_async(
        &self,
        project_id: i64,
        kwargs: Kwargs,
    ) -> Result<Response<UpdatePluginOutcome>, Error> {
        self.target.call_async(&update_plugin_request(project_id, kwargs)?).await
    }
}

fn create_plugin_request(project_id: i64, mut kwargs: Kwargs) -> Result<CreatePlugin, ApiError> {
    let body = kwargs.pluck_json(CreatePlugin::NAME, PLUGIN_FIELDS)?;
    kwargs.finish(CreatePlugin::NAME)?;
    Ok(CreatePlugin { project_id, body })
}

fn update_plugin_request(project_id: i64, mut kwargs: Kwargs) -> Result<UpdatePlugin, ApiError> {
    let body = kwargs.pluck_json(UpdatePlugin::NAME, PLUGIN_FIELDS)?;
    kwargs.finish(UpdatePlugin::NAME)?;
    Ok(UpdatePlugin { project_id, body })
}

namespace! {
    /// `session.project_settings()`
    ProjectSettings
}

impl ProjectSettings<'_> {
    pub fn get(&self, project_id: i64) -> Result<Response<GetSettingsOutcome>, Error> {
        self.target.call(&GetSettings { project_id })
    }

    pub async fn get_async(&self, project_id: i64) -> Result<Response<GetSettingsOutcome>, Error> {
        self.target.call_async(&GetSettings { project_id }).await
    }

    /// Avatar and background go in as files (`chat_bot_avatar`, `chat_bot_bg`).
    pub fn update(&self, project_id: i64, kwargs: Kwargs) -> Result<Response<UpdateSettingsOutcome>, Error> {
        self.target.call(&update_settings_request(project_id, kwargs)?)
    }

    pub async fn update_async(
        &self,
        project_id: i64,
        kwargs: Kwargs,
    ) -> Result<Response<UpdateSettingsOutcome>, Error> {
        self.target.call_async(&update_settings_request(project_id, kwargs)?).await
    }
}

fn update_settings_request(project_id: i64, mut kwargs: Kwargs) -> Result<UpdateSettings, ApiError> {
    let body = kwargs.pluck_form(UpdateSettings::NAME, SETTINGS_FIELDS)?;
    kwargs.finish(UpdateSettings::NAME)?;
    Ok(UpdateSettings { project_id, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use customgpt_core::{build_request, ClientConfig, File, RequestBody};

    fn config() -> ClientConfig {
        ClientConfig::new("http://localhost", "k")
    }

    #[test]
    fn create_request_is_multipart_with_file() {
        let endpoint = create_request(
            Kwargs::new()
                .set("project_name", "docs")
                .file("file", File::new("handbook.pdf", b"%PDF".to_vec()).with_mime_type("application/pdf")),
        )
        .unwrap();
        let req = build_request(&config(), &endpoint).unwrap();
        let RequestBody::Multipart(form) = &req.body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.get("project_name").next().unwrap().text_value(), Some("docs"));
        let file = form.get("file").next().unwrap();
        assert_eq!(file.file_name.as_deref(), Some("handbook.pdf"));
        assert_eq!(file.content_type, "application/pdf");
    }

    #[test]
    fn get_style_arguments_are_rejected_on_create() {
        let err = create_request(Kwargs::new().set("project_name", "x").set("page", 2)).unwrap_err();
        assert!(matches!(err, ApiError::UnknownArgument { operation: "create_project", .. }));
    }

    #[test]
    fn plugin_body_is_json() {
        let endpoint = create_plugin_request(
            4,
            Kwargs::new().set("model_name", "helper").set("is_active", true),
        )
        .unwrap();
        let req = build_request(&config(), &endpoint).unwrap();
        assert_eq!(
            req.body,
            RequestBody::Json(serde_json::json!({"model_name": "helper", "is_active": true}))
        );
    }

    #[test]
    fn settings_take_lists_and_files() {
        let endpoint = update_settings_request(
            9,
            Kwargs::new()
                .set("example_questions", vec!["Who?", "Why?"])
                .set("response_source", "own_content")
                .file("chat_bot_avatar", File::new("a.png", vec![1, 2, 3])),
        )
        .unwrap();
        let req = build_request(&config(), &endpoint).unwrap();
        let RequestBody::Multipart(form) = &req.body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.get("example_questions[]").count(), 2);
        assert_eq!(form.get("response_source").next().unwrap().text_value(), Some("own_content"));
        assert!(form.get("chat_bot_avatar").next().is_some());
    }
}
