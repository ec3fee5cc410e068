//! In-memory stub of the CustomGPT REST API.
//!
//! Covers projects, conversations (including the event-stream reply of
//! send-message), page previews and the current user. Every route sits
//! behind a bearer-token check that answers with the API's 401 envelope.

use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, error, info};
use uuid::Uuid;

const TIMESTAMP: &str = "2023-05-08 13:06:55";
const PER_PAGE: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub project_name: String,
    pub sitemap_path: Option<String>,
    pub is_chat_active: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_shared: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    pub session_id: String,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub user_query: String,
    pub openai_response: String,
    pub citations: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Default)]
pub struct Store {
    projects: BTreeMap<i64, Project>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    files: HashMap<i64, Vec<(String, usize)>>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub order: Option<String>,
}

#[derive(Deserialize)]
pub struct SendParams {
    pub stream: Option<String>,
    pub lang: Option<String>,
}

#[derive(Deserialize)]
pub struct ConversationInput {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct PromptInput {
    pub prompt: Option<String>,
    pub custom_persona: Option<String>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/v1/projects", get(list_projects).post(create_project))
        .route(
            "/api/v1/projects/{project_id}",
            get(get_project).post(update_project).delete(delete_project),
        )
        .route("/api/v1/projects/{project_id}/stats", get(project_stats))
        .route(
            "/api/v1/projects/{project_id}/conversations",
            get(list_conversations).post(create_conversation),
        )
        .route(
            "/api/v1/projects/{project_id}/conversations/{session_id}/messages",
            get(list_messages).post(send_message),
        )
        .route("/api/v1/preview/{id}", get(preview))
        .route("/api/v1/user", get(get_user))
        .layer(middleware::from_fn(require_bearer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve on a random local port from a background thread.
pub fn spawn() -> std::io::Result<SocketAddr> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;

    std::thread::spawn(move || {
        let served = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .and_then(|rt| {
                rt.block_on(async {
                    let listener = TcpListener::from_std(std_listener)?;
                    run(listener).await
                })
            });
        if let Err(err) = served {
            error!(%err, "mock server stopped");
        }
    });
    Ok(addr)
}

fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(json!({"status": "success", "data": data}))).into_response()
}

fn failure(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "status": "error",
        "data": {"code": status.as_u16(), "message": message},
    });
    (status, Json(body)).into_response()
}

fn paginate<T: Serialize + Clone>(items: &[T], params: &ListParams, path: &str) -> Value {
    let page = params.page.unwrap_or(1).max(1);
    let mut items = items.to_vec();
    if params.order.as_deref() != Some("asc") {
        items.reverse();
    }
    let total = items.len();
    let start = ((page - 1) * PER_PAGE).min(total);
    let end = (start + PER_PAGE).min(total);
    let last_page = total.div_ceil(PER_PAGE).max(1);
    let bounds = (start < end).then_some((start + 1, end));
    json!({
        "current_page": page,
        "data": &items[start..end],
        "from": bounds.map(|(from, _)| from),
        "to": bounds.map(|(_, to)| to),
        "last_page": last_page,
        "per_page": PER_PAGE,
        "total": total,
        "path": path,
    })
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        debug!(uri = %request.uri(), "rejecting request without bearer token");
        return failure(StatusCode::UNAUTHORIZED, "API Token is either missing or invalid");
    }
    next.run(request).await
}

/// Text fields and uploaded file names of a multipart body.
#[derive(Default)]
struct Form {
    text: HashMap<String, String>,
    files: Vec<(String, usize)>,
}

async fn read_form(mut multipart: Multipart) -> Result<Form, Response> {
    let mut form = Form::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return Err(failure(StatusCode::BAD_REQUEST, &err.body_text())),
        };
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| failure(StatusCode::BAD_REQUEST, &err.body_text()))?;
                form.files.push((file_name, bytes.len()));
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| failure(StatusCode::BAD_REQUEST, &err.body_text()))?;
                form.text.insert(name, text);
            }
        }
    }
    Ok(form)
}

fn truthy(value: Option<&String>) -> Option<bool> {
    value.map(|v| matches!(v.as_str(), "1" | "true"))
}

async fn list_projects(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    let store = db.read().await;
    let projects: Vec<Project> = store.projects.values().cloned().collect();
    success(StatusCode::OK, paginate(&projects, &params, "/api/v1/projects"))
}

async fn create_project(State(db): State<Db>, multipart: Multipart) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(rejection) => return rejection,
    };
    let Some(project_name) = form.text.get("project_name").filter(|name| !name.is_empty()) else {
        return failure(StatusCode::BAD_REQUEST, "project_name is required");
    };
    let sitemap_path = form.text.get("sitemap_path").filter(|p| !p.is_empty()).cloned();
    if sitemap_path.is_none() && form.files.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "sitemap_path or file is required");
    }

    let mut store = db.write().await;
    let id = store.next_id();
    let project = Project {
        id,
        project_name: project_name.clone(),
        kind: if sitemap_path.is_some() { "SITEMAP" } else { "UPLOAD" }.to_string(),
        sitemap_path,
        is_chat_active: false,
        is_shared: false,
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
    };
    store.projects.insert(id, project.clone());
    store.files.insert(id, form.files);
    info!(id, name = %project.project_name, "project created");
    success(StatusCode::CREATED, project)
}

async fn get_project(State(db): State<Db>, Path(project_id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.projects.get(&project_id) {
        Some(project) => success(StatusCode::OK, project),
        None => failure(StatusCode::NOT_FOUND, &format!("Project with id {project_id} not found")),
    }
}

async fn update_project(State(db): State<Db>, Path(project_id): Path<i64>, multipart: Multipart) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(rejection) => return rejection,
    };
    let mut store = db.write().await;
    let Some(project) = store.projects.get_mut(&project_id) else {
        return failure(StatusCode::NOT_FOUND, &format!("Project with id {project_id} not found"));
    };
    if let Some(name) = form.text.get("project_name") {
        project.project_name = name.clone();
    }
    if let Some(shared) = truthy(form.text.get("is_shared")) {
        project.is_shared = shared;
    }
    if let Some(path) = form.text.get("sitemap_path") {
        project.sitemap_path = Some(path.clone());
    }
    let updated = project.clone();
    store.files.entry(project_id).or_default().extend(form.files);
    success(StatusCode::OK, updated)
}

async fn delete_project(State(db): State<Db>, Path(project_id): Path<i64>) -> Response {
    let mut store = db.write().await;
    if store.projects.remove(&project_id).is_none() {
        return failure(StatusCode::NOT_FOUND, &format!("Project with id {project_id} not found"));
    }
    store.conversations.retain(|c| c.project_id != project_id);
    store.files.remove(&project_id);
    success(StatusCode::OK, json!({"deleted": true}))
}

async fn project_stats(State(db): State<Db>, Path(project_id): Path<i64>) -> Response {
    let store = db.read().await;
    if !store.projects.contains_key(&project_id) {
        return failure(StatusCode::NOT_FOUND, &format!("Project with id {project_id} not found"));
    }
    let files = store.files.get(&project_id).map(Vec::len).unwrap_or_default();
    let queries = store
        .conversations
        .iter()
        .filter(|c| c.project_id == project_id)
        .map(|c| store.messages.iter().filter(|m| m.conversation_id == c.id).count())
        .sum::<usize>();
    success(
        StatusCode::OK,
        json!({
            "pages_found": files,
            "pages_crawled": files,
            "pages_indexed": files,
            "crawl_credits_used": files,
            "query_credits_used": queries,
            "index_credits_used": files,
        }),
    )
}

async fn list_conversations(
    State(db): State<Db>,
    Path(project_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Response {
    let store = db.read().await;
    if !store.projects.contains_key(&project_id) {
        return failure(StatusCode::NOT_FOUND, &format!("Project with id {project_id} not found"));
    }
    let conversations: Vec<Conversation> = store
        .conversations
        .iter()
        .filter(|c| c.project_id == project_id)
        .cloned()
        .collect();
    let path = format!("/api/v1/projects/{project_id}/conversations");
    success(StatusCode::OK, paginate(&conversations, &params, &path))
}

async fn create_conversation(
    State(db): State<Db>,
    Path(project_id): Path<i64>,
    Json(input): Json<ConversationInput>,
) -> Response {
    let mut store = db.write().await;
    if !store.projects.contains_key(&project_id) {
        return failure(StatusCode::NOT_FOUND, &format!("Project with id {project_id} not found"));
    }
    let id = store.next_id();
    let conversation = Conversation {
        id,
        name: input.name.unwrap_or_else(|| format!("Conversation {id}")),
        project_id,
        session_id: Uuid::new_v4().to_string(),
        created_by: 1,
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
    };
    store.conversations.push(conversation.clone());
    success(StatusCode::CREATED, conversation)
}

fn find_conversation<'a>(store: &'a Store, project_id: i64, session_id: &str) -> Result<&'a Conversation, Response> {
    if !store.projects.contains_key(&project_id) {
        return Err(failure(StatusCode::NOT_FOUND, &format!("Project with id {project_id} not found")));
    }
    store
        .conversations
        .iter()
        .find(|c| c.project_id == project_id && c.session_id == session_id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, &format!("Conversation {session_id} not found")))
}

async fn list_messages(
    State(db): State<Db>,
    Path((project_id, session_id)): Path<(i64, String)>,
    Query(params): Query<ListParams>,
) -> Response {
    let store = db.read().await;
    let conversation = match find_conversation(&store, project_id, &session_id) {
        Ok(conversation) => conversation,
        Err(rejection) => return rejection,
    };
    let messages: Vec<Message> = store
        .messages
        .iter()
        .filter(|m| m.conversation_id == conversation.id)
        .cloned()
        .collect();
    let path = format!("/api/v1/projects/{project_id}/conversations/{session_id}/messages");
    success(
        StatusCode::OK,
        json!({
            "conversation": conversation,
            "messages": paginate(&messages, &params, &path),
        }),
    )
}

/// Answer a prompt by echoing it. With `stream=1` the answer arrives as one
/// `progress` event per word followed by a `finish` event.
async fn send_message(
    State(db): State<Db>,
    Path((project_id, session_id)): Path<(i64, String)>,
    Query(params): Query<SendParams>,
    Json(input): Json<PromptInput>,
) -> Response {
    let Some(prompt) = input.prompt.filter(|p| !p.is_empty()) else {
        return failure(StatusCode::BAD_REQUEST, "prompt is required");
    };
    let mut store = db.write().await;
    let conversation_id = match find_conversation(&store, project_id, &session_id) {
        Ok(conversation) => conversation.id,
        Err(rejection) => return rejection,
    };
    let persona = input.custom_persona.map(|p| format!("[{p}] ")).unwrap_or_default();
    let answer = format!("{persona}You said: {prompt}");
    let id = store.next_id();
    let message = Message {
        id,
        conversation_id,
        user_query: prompt,
        openai_response: answer.clone(),
        citations: vec![1],
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
    };
    store.messages.push(message.clone());
    debug!(id, lang = ?params.lang, "message answered");

    if !truthy(params.stream.as_ref()).unwrap_or(false) {
        return success(StatusCode::OK, message);
    }

    let mut events: Vec<Result<Event, Infallible>> = answer
        .split_inclusive(' ')
        .map(|word| Ok(Event::default().data(json!({"status": "progress", "message": word}).to_string())))
        .collect();
    events.push(Ok(Event::default().data(
        json!({"status": "finish", "id": id, "citations": message.citations}).to_string(),
    )));
    Sse::new(futures::stream::iter(events)).into_response()
}

/// The raw page text; the real API serves the original file here.
async fn preview(Path(id): Path<String>) -> Response {
    if id.is_empty() {
        return failure(StatusCode::BAD_REQUEST, "id is required");
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("preview of {id}"),
    )
        .into_response()
}

async fn get_user() -> Response {
    success(
        StatusCode::OK,
        json!({
            "id": 1,
            "name": "Mock User",
            "email": "mock@example.com",
            "profile_photo_url": null,
            "created_at": TIMESTAMP,
            "updated_at": TIMESTAMP,
        }),
    )
}
