//! Blocking transport and namespaces against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port so state never
//! leaks between tests, then drives the public namespace API over real HTTP.

use customgpt_client::{Client, Error, Kwargs, Session, Settings, StreamEnd, StreamReply, StreamState};
use customgpt_core::api::{
    CreateConversationOutcome, CreateProjectOutcome, GetProjectOutcome, GetUser, GetUserOutcome,
    ListMessagesOutcome, ListProjectsOutcome, ProjectStatsOutcome, SendMessageOutcome, UpdateProjectOutcome,
};
use customgpt_core::model::Flag;
use customgpt_core::{ApiError, ClientConfig, Field};
use serde_json::Value;

fn base_url() -> String {
    let addr = mock_server::spawn().unwrap();
    format!("http://{addr}")
}

fn session_for(base_url: &str, api_key: &str) -> Session {
    Session::new(Settings {
        api_key: api_key.to_string(),
        base_url: base_url.to_string(),
        ..Settings::default()
    })
}

fn session() -> Session {
    session_for(&base_url(), "test-key")
}

fn create_project(session: &Session, name: &str) -> i64 {
    let created = session
        .projects()
        .create(
            Kwargs::new()
                .set("project_name", name)
                .set("sitemap_path", "https://example.com/sitemap.xml"),
        )
        .unwrap();
    match created.into_parsed() {
        Some(CreateProjectOutcome::Created(body)) => body.data().unwrap().id.value().copied().unwrap(),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

fn create_conversation(session: &Session, project_id: i64) -> String {
    let created = session
        .conversations()
        .create(project_id, Kwargs::new().set("name", "chat"))
        .unwrap();
    match created.into_parsed() {
        Some(CreateConversationOutcome::Created(body)) => body.data.into_value().unwrap().session_id.into_value().unwrap(),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn create_then_fetch() {
    let session = session();
    let project_id = create_project(&session, "demo");

    let fetched = session.projects().get(project_id).unwrap();
    assert_eq!(fetched.status(), 200);
    match fetched.parsed() {
        Some(GetProjectOutcome::Ok(body)) => {
            let project = body.data().unwrap();
            assert_eq!(project.id, Field::Value(project_id));
            assert_eq!(project.project_name, Field::Value("demo".to_string()));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn unauthorized_is_the_401_outcome() {
    let session = session_for(&base_url(), "");
    let response = session.users().get().unwrap();
    assert_eq!(response.status(), 401);
    assert!(matches!(response.parsed(), Some(GetUserOutcome::Unauthorized(_))));
}

#[test]
fn list_update_and_stats() {
    let session = session();
    for name in ["a", "b", "c"] {
        create_project(&session, name);
    }

    let listed = session
        .projects()
        .list(Kwargs::new().set("order", "asc").set("page", 1))
        .unwrap();
    let Some(ListProjectsOutcome::Ok(body)) = listed.into_parsed() else {
        panic!("expected a listing");
    };
    let page = body.data.into_value().unwrap();
    assert_eq!(page.total, Field::Value(3));
    let names: Vec<_> = page.items().iter().map(|p| p.project_name.value().cloned().unwrap()).collect();
    assert_eq!(names, ["a", "b", "c"]);

    let first = page.items()[0].id.value().copied().unwrap();
    let updated = session
        .projects()
        .update(first, Kwargs::new().set("project_name", "renamed").set("is_shared", true))
        .unwrap();
    match updated.parsed() {
        Some(UpdateProjectOutcome::Ok(body)) => {
            let project = body.data().unwrap();
            assert_eq!(project.project_name, Field::Value("renamed".to_string()));
            assert_eq!(project.is_shared, Field::Value(Flag(true)));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let stats = session.projects().stats(first).unwrap();
    assert!(matches!(stats.parsed(), Some(ProjectStatsOutcome::Ok(_))));
}

#[test]
fn send_and_read_back_messages() {
    let session = session();
    let project_id = create_project(&session, "chat");
    let session_id = create_conversation(&session, project_id);

    let sent = session
        .conversations()
        .send(project_id, &session_id, Kwargs::new().set("prompt", "hello").set("custom_persona", "bot"))
        .unwrap();
    match sent.parsed() {
        Some(SendMessageOutcome::Ok(body)) => {
            assert_eq!(body.data().unwrap().openai_response, Field::Value("[bot] You said: hello".to_string()));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let history = session.conversations().messages(project_id, &session_id, Kwargs::new()).unwrap();
    match history.parsed() {
        Some(ListMessagesOutcome::Ok(body)) => {
            let messages = body.data().unwrap().messages.value().unwrap();
            assert_eq!(messages.total, Field::Value(1));
            assert_eq!(messages.items()[0].user_query, Field::Value("hello".to_string()));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn streaming_is_exhausted_once() {
    let session = session();
    let project_id = create_project(&session, "stream");
    let session_id = create_conversation(&session, project_id);

    let reply = session
        .conversations()
        .send_stream(project_id, &session_id, Kwargs::new().set("prompt", "hi there"))
        .unwrap();
    let mut stream = reply.events().expect("2xx reply streams");
    assert_eq!(stream.state(), StreamState::Connected);

    let events: Vec<Value> = stream.by_ref().map(|e| e.json().unwrap()).collect();
    let (finish, progress) = events.split_last().unwrap();
    let answer: String = progress.iter().map(|e| e["message"].as_str().unwrap()).collect();
    assert_eq!(answer, "You said: hi there");
    assert_eq!(finish["status"], "finish");

    assert_eq!(stream.state(), StreamState::Closed);
    assert_eq!(stream.end(), Some(StreamEnd::Finished));
    assert_eq!(stream.by_ref().count(), 0);
}

#[test]
fn streaming_can_be_closed_early() {
    let session = session();
    let project_id = create_project(&session, "stream");
    let session_id = create_conversation(&session, project_id);

    let mut stream = session
        .conversations()
        .send_stream(project_id, &session_id, Kwargs::new().set("prompt", "one two three four"))
        .unwrap()
        .events()
        .unwrap();
    assert!(stream.next().is_some());
    assert_eq!(stream.state(), StreamState::Receiving);

    stream.close();
    assert_eq!(stream.next(), None);
    assert_eq!(stream.end(), Some(StreamEnd::ClosedByCaller));
}

#[test]
fn streaming_rejection_is_classified() {
    let session = session();
    let project_id = create_project(&session, "stream");

    let reply = session
        .conversations()
        .send_stream(project_id, "missing", Kwargs::new().set("prompt", "hi"))
        .unwrap();
    match reply {
        StreamReply::Rejected(response) => {
            assert_eq!(response.status(), 404);
            assert!(matches!(response.parsed(), Some(SendMessageOutcome::NotFound(_))));
        }
        StreamReply::Events(_) => panic!("expected a rejection"),
    }
}

#[test]
fn plain_send_refuses_stream_flag() {
    let session = session();
    let err = session
        .conversations()
        .send(1, "s", Kwargs::new().set("prompt", "hi").set("stream", 1))
        .unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::InvalidArgument(_))));
}

#[test]
fn undocumented_status_follows_settings() {
    let base = base_url();
    let lenient = session_for(&base, "test-key");
    let response = lenient.pages().preview("abc").unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.parsed().is_none());
    assert_eq!(response.text(), "preview of abc");

    let mut strict = session_for(&base, "test-key");
    strict.update(|settings| settings.raise_on_unexpected_status = true);
    let err = strict.pages().preview("abc").unwrap_err();
    assert_eq!(err.status(), Some(200));
    assert!(matches!(err, Error::Api(ApiError::UnexpectedStatus { .. })));
}

#[test]
fn unknown_argument_never_reaches_the_wire() {
    let session = session_for("http://127.0.0.1:1", "test-key");
    let err = session.projects().list(Kwargs::new().set("colour", "red")).unwrap_err();
    match err {
        Error::Api(ApiError::UnknownArgument { operation, name }) => {
            assert_eq!(operation, "list_projects");
            assert_eq!(name, "colour");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn settings_change_takes_effect_on_next_call() {
    let mut session = session_for(&base_url(), "");
    assert_eq!(session.users().get().unwrap().status(), 401);

    session.set_api_key("test-key");
    let response = session.users().get().unwrap();
    match response.parsed() {
        Some(GetUserOutcome::Ok(body)) => {
            assert_eq!(body.data().unwrap().email, Field::Value("mock@example.com".to_string()));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn transport_failure_propagates() {
    let session = session_for("http://127.0.0.1:1", "test-key");
    let err = session.users().get().unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[test]
fn client_plain_form_projects_the_envelope() {
    let client = Client::new(ClientConfig::new(&base_url(), "test-key"));
    let outcome = client.call_parsed(&GetUser).unwrap();
    assert!(matches!(outcome, Some(GetUserOutcome::Ok(_))));
}

#[test]
fn handle_can_run_on_another_client() {
    let session = session_for("http://127.0.0.1:1", "test-key");
    let client = Client::new(ClientConfig::new(&base_url(), "test-key"));

    let response = session.users().with_client(&client).get().unwrap();
    assert!(matches!(response.parsed(), Some(GetUserOutcome::Ok(_))));

    let projects = session.projects().with_client(&client);
    let created = projects
        .create(Kwargs::new().set("project_name", "routed").set("sitemap_path", "https://x"))
        .unwrap();
    let Some(CreateProjectOutcome::Created(body)) = created.into_parsed() else {
        panic!("project not created");
    };
    let project_id = body.data().unwrap().id.value().copied().unwrap();
    assert!(matches!(projects.get(project_id).unwrap().parsed(), Some(GetProjectOutcome::Ok(_))));

    let conversations = session.conversations().with_client(&client);
    let created = conversations.create(project_id, Kwargs::new()).unwrap();
    let Some(CreateConversationOutcome::Created(body)) = created.into_parsed() else {
        panic!("conversation not created");
    };
    let session_id = body.data().unwrap().session_id.value().cloned().unwrap();
    let events = conversations
        .send_stream(project_id, &session_id, Kwargs::new().set("prompt", "routed"))
        .unwrap()
        .events()
        .unwrap();
    assert!(events.count() > 0);

    // Argument checks still run before the override is reached.
    let err = session.projects().with_client(&client).list(Kwargs::new().set("colour", "red")).unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::UnknownArgument { .. })));

    // The session's own transport is untouched.
    assert!(matches!(session.users().get().unwrap_err(), Error::Transport(_)));
}
