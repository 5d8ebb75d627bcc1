//! Client tests against a mocked backend.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use clubhub_client::{ClientError, ClubClient, EditorMode, TaskEditor, TaskForm};
use clubhub_core::task::TaskCategory;
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn task_json(id: i64, event_id: i64, member: i64) -> Value {
    let mut body = Map::new();
    body.insert("id".into(), json!(id));
    body.insert("event_id".into(), json!(event_id));
    body.insert("deadline".into(), json!("2025-02-25"));
    body.insert("status".into(), json!("Pending"));
    body.insert("created_date".into(), json!("2025-01-01T00:00:00Z"));
    for category in TaskCategory::ALL {
        body.insert(
            category.as_str().into(),
            json!({ "assignedTo": [{ "id": member, "name": "Asha", "phone_number": null }] }),
        );
    }
    Value::Object(body)
}

fn members_json() -> Value {
    json!([
        { "id": 1, "name": "Asha", "email": "a@club.edu", "student_id": "M1",
          "phone_number": null, "join_date": "2024-01-01", "hobbies": [] },
        { "id": 2, "name": "Ravi", "email": "r@club.edu", "student_id": "M2",
          "phone_number": "9876543210", "join_date": "2025-01-01", "hobbies": [] },
    ])
}

fn complete_form() -> TaskForm {
    let mut form = TaskForm::new();
    form.deadline = NaiveDate::from_ymd_opt(2025, 2, 25);
    form.assign_all(1);
    form
}

#[tokio::test]
async fn test_incomplete_form_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ClubClient::new(server.uri());
    let mut form = complete_form();
    form.toggle(TaskCategory::StageHandling, 1, false);

    assert_matches!(
        client.create_task(3, &form).await,
        Err(ClientError::Incomplete(missing)) if missing == vec![TaskCategory::StageHandling]
    );
    assert_matches!(
        client.update_task(3, 7, &form).await,
        Err(ClientError::Incomplete(_))
    );
}

#[tokio::test]
async fn test_create_task_sends_full_payload() {
    let server = MockServer::start().await;
    let form = complete_form();

    Mock::given(method("POST"))
        .and(path("/api/v1/tasks/3"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(form.to_payload()))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(7, 3, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClubClient::new(format!("{}/", server.uri())).with_token("secret");
    let task = client.create_task(3, &form).await.unwrap();
    assert_eq!(task.id, 7);
    assert_eq!(task.assignments[&TaskCategory::Coordinators], vec![1]);
}

#[tokio::test]
async fn test_api_errors_carry_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/3/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Task with id 99 not found",
            "code": "NOT_FOUND",
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/tasks/3/99"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = ClubClient::new(server.uri());
    let err = client.get_task(3, 99).await.unwrap_err();
    assert_matches!(
        &err,
        ClientError::Api { status: 404, code, message }
            if code == "NOT_FOUND" && message == "Task with id 99 not found"
    );
    assert_eq!(err.status(), Some(404));

    let err = client.delete_task(3, 99).await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 502, message, .. } if message == "bad gateway");
}

#[tokio::test]
async fn test_participant_calls() {
    let server = MockServer::start().await;
    let event = json!({
        "id": 3, "title": "Fest", "date": "2025-03-01", "is_live": false, "gallery": [],
        "participants": [
            { "id": 10, "name": "B", "student_id": "200", "email": "b@x.edu" },
            { "id": 11, "name": "A", "student_id": "100", "email": "a@x.edu" },
        ],
    });

    Mock::given(method("POST"))
        .and(path("/api/v1/events/3/participants"))
        .and(body_json(json!({ "studentIds": "100, 200" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(event.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/events/3/participants"))
        .and(body_json(json!({ "studentIds": ["100"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(event))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClubClient::new(server.uri()).with_token("admin");
    let updated = client.add_participants(3, "100, 200").await.unwrap();
    let codes: Vec<String> = updated
        .sorted_participants()
        .into_iter()
        .map(|p| p.student_id)
        .collect();
    assert_eq!(codes, vec!["100", "200"]);

    client.remove_participants(3, &["100"]).await.unwrap();
}

#[tokio::test]
async fn test_editor_edits_existing_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json(7, 3, 1)])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(members_json()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/tasks/3/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json(7, 3, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let mut editor = TaskEditor::load(ClubClient::new(server.uri()), 3).await.unwrap();
    assert_eq!(editor.mode(), EditorMode::Edit { task_id: 7 });
    assert!(editor.roster_error.is_none());
    assert_eq!(editor.roster.members()[0].name, "Ravi");
    assert!(editor.form.is_assigned(TaskCategory::Anchoring, 1));

    // Narrowing the picker leaves assignments of hidden members alone.
    assert_eq!(editor.roster.filter("rav").len(), 1);
    for category in TaskCategory::ALL {
        editor.form.toggle(category, 2, true);
    }
    editor.form.toggle(TaskCategory::Anchoring, 1, false);
    assert_eq!(editor.form.assigned(TaskCategory::Decoration), &[1, 2]);

    let task = editor.submit().await.unwrap();
    assert_eq!(task.assignments[&TaskCategory::Anchoring], vec![2]);
    assert_eq!(editor.form.assigned(TaskCategory::Decoration), &[2]);
}

#[tokio::test]
async fn test_editor_degrades_without_roster() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/members"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "An internal error occurred",
            "code": "INTERNAL_ERROR",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/tasks/3"))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(8, 3, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut editor = TaskEditor::load(ClubClient::new(server.uri()), 3).await.unwrap();
    assert_eq!(editor.mode(), EditorMode::Add);
    assert!(editor.roster.is_empty());
    assert_matches!(editor.roster_error, Some(ClientError::Api { status: 500, .. }));

    assert_matches!(editor.submit().await, Err(ClientError::MissingDeadline));

    editor.form.deadline = NaiveDate::from_ymd_opt(2025, 2, 25);
    editor.form.assign_all(1);
    let task = editor.submit().await.unwrap();
    assert_eq!(task.id, 8);
    assert_eq!(editor.mode(), EditorMode::Edit { task_id: 8 });
}
