use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use trips::{config::AppConfig, routes::create_router, state::AppState};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

async fn text(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn snapshot(app: &Router) -> Value {
    let request = Request::get("/api/screen")
        .body(Body::empty())
        .expect("request");
    let (status, body) = text(app, request).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).expect("json snapshot")
}

async fn add_trip(app: &Router, destination: &str, date: &str, description: &str) -> String {
    let body = format!(
        "destination={destination}&date={}&description={description}",
        date.replace('/', "%2F")
    );
    let (status, _) = text(app, form_post("/trips", &body)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let screen = snapshot(app).await;
    let last = screen["trips"]
        .as_array()
        .and_then(|trips| trips.last())
        .expect("trip appended");
    last["id"].as_str().expect("trip id").to_owned()
}

#[tokio::test]
async fn index_renders_empty_form_in_add_mode() {
    let app = app();
    let request = Request::get("/").body(Body::empty()).expect("request");
    let (status, body) = text(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">Add</button>"));
    assert!(!body.contains("Cancel"));
}

#[tokio::test]
async fn valid_submit_appends_and_redirects() {
    let app = app();
    add_trip(&app, "Paris", "01/01/2024", "Trip").await;

    let screen = snapshot(&app).await;
    assert_eq!(screen["trips"].as_array().map(Vec::len), Some(1));
    assert_eq!(screen["trips"][0]["destination"], "Paris");
    assert_eq!(screen["trips"][0]["date"], "01/01/2024");
    assert_eq!(screen["fields"]["destination"], "");
    assert_eq!(screen["mode"]["mode"], "add");
}

#[tokio::test]
async fn blank_submit_renders_errors_with_bad_request() {
    let app = app();
    let (status, body) = text(
        &app,
        form_post("/trips", "destination=&date=&description="),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Destination is required"));
    assert!(body.contains("Date is required"));
    assert!(body.contains("Description is required"));

    let screen = snapshot(&app).await;
    assert_eq!(screen["trips"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn malformed_date_keeps_typed_values() {
    let app = app();
    let (status, _) = text(
        &app,
        form_post("/trips", "destination=Rome&date=1%2F1%2F24&description=x"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let screen = snapshot(&app).await;
    assert_eq!(screen["errors"]["date"], "Invalid date format (JJ/MM/AAAA)");
    assert_eq!(screen["errors"]["destination"], "");
    assert_eq!(screen["fields"]["destination"], "Rome");
    assert_eq!(screen["trips"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn modify_then_submit_updates_in_place() {
    let app = app();
    let id = add_trip(&app, "Paris", "01/01/2024", "Trip").await;

    let (status, _) = text(&app, form_post(&format!("/trips/{id}/modify"), "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let request = Request::get("/").body(Body::empty()).expect("request");
    let (_, body) = text(&app, request).await;
    assert!(body.contains(">Update</button>"));
    assert!(body.contains("Cancel"));

    let (status, _) = text(
        &app,
        form_post("/trips", "destination=Lyon&date=whenever&description="),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let screen = snapshot(&app).await;
    assert_eq!(screen["trips"].as_array().map(Vec::len), Some(1));
    assert_eq!(screen["trips"][0]["id"], id.as_str());
    assert_eq!(screen["trips"][0]["destination"], "Lyon");
    assert_eq!(screen["trips"][0]["date"], "whenever");
    assert_eq!(screen["mode"]["mode"], "add");
}

#[tokio::test]
async fn delete_removes_only_the_chosen_duplicate() {
    let app = app();
    let first = add_trip(&app, "Oslo", "01/01/2024", "same").await;
    let second = add_trip(&app, "Oslo", "01/01/2024", "same").await;

    let (status, _) = text(&app, form_post(&format!("/trips/{second}/delete"), "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let screen = snapshot(&app).await;
    assert_eq!(screen["trips"].as_array().map(Vec::len), Some(1));
    assert_eq!(screen["trips"][0]["id"], first.as_str());
}

#[tokio::test]
async fn unknown_trip_is_not_found() {
    let app = app();
    let stray = "00000000-0000-4000-8000-000000000000";
    let (status, _) = text(&app, form_post(&format!("/trips/{stray}/delete"), "")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = text(&app, form_post(&format!("/trips/{stray}/modify"), "")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn field_edit_clears_only_its_error() {
    let app = app();
    text(&app, form_post("/trips", "")).await;

    let (status, _) = text(&app, form_post("/form/fields/date", "value=12")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let screen = snapshot(&app).await;
    assert_eq!(screen["fields"]["date"], "12");
    assert_eq!(screen["errors"]["date"], "");
    assert_eq!(screen["errors"]["destination"], "Destination is required");
    assert_eq!(screen["errors"]["description"], "Description is required");
}

#[tokio::test]
async fn unknown_field_is_bad_request() {
    let app = app();
    let (status, _) = text(&app, form_post("/form/fields/origin", "value=x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cancel_leaves_edit_mode() {
    let app = app();
    let id = add_trip(&app, "Paris", "01/01/2024", "Trip").await;
    text(&app, form_post(&format!("/trips/{id}/modify"), "")).await;

    let (status, _) = text(&app, form_post("/form/cancel", "")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let screen = snapshot(&app).await;
    assert_eq!(screen["mode"]["mode"], "add");
    assert_eq!(screen["fields"]["destination"], "");
    assert_eq!(screen["button"], "Add");
}

#[tokio::test]
async fn late_keystroke_cannot_refill_a_submitted_form() {
    let app = app();
    let revision = snapshot(&app).await["revision"].as_u64().expect("revision");

    let early = format!("value=Tri&revision={revision}");
    let (status, _) = text(&app, form_post("/form/fields/description", &early)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = text(
        &app,
        form_post("/trips", "destination=Paris&date=01%2F01%2F2024&description=Trip"),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let late = format!("value=Trip&revision={revision}");
    let (status, _) = text(&app, form_post("/form/fields/description", &late)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let screen = snapshot(&app).await;
    assert_eq!(screen["fields"]["destination"], "");
    assert_eq!(screen["fields"]["date"], "");
    assert_eq!(screen["fields"]["description"], "");
    assert_eq!(screen["trips"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn index_carries_the_form_revision() {
    let app = app();
    let revision = snapshot(&app).await["revision"].as_u64().expect("revision");
    let request = Request::get("/").body(Body::empty()).expect("request");
    let (_, body) = text(&app, request).await;
    assert!(body.contains(&format!("data-revision=\"{revision}\"")));
}
