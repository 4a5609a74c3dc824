use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use resume_client::admin::{AdminConsole, AdminState};
use resume_client::api_client::ApiClient;
use resume_client::config::Config;
use resume_client::dashboard::fetch_dashboard;
use resume_client::errors::ClientError;
use resume_client::extraction::{ResumeExtractor, ResumeUpload};
use resume_client::ai::Rephraser;
use resume_client::sections::award::AwardForm;
use resume_client::sections::skill::SkillForm;
use resume_client::sections::{Awards, SectionEditor, SectionState, Skills};

const TOKEN: &str = "test-token";
const STAMP: &str = "2024-05-01T10:00:00";

#[derive(Clone, Default)]
struct Backend {
    awards: Arc<Mutex<Vec<Value>>>,
    uploads: Arc<Mutex<Vec<(String, String, usize)>>>,
}

type Reply = (StatusCode, Json<Value>);

fn detail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "detail": message })))
}

async fn list_awards(State(b): State<Backend>) -> Json<Value> {
    Json(Value::Array(b.awards.lock().unwrap().clone()))
}

async fn create_award(State(b): State<Backend>, Json(mut body): Json<Value>) -> Reply {
    let mut awards = b.awards.lock().unwrap();
    body["id"] = json!(format!("a{}", awards.len() + 1));
    body["user_id"] = json!("u1");
    body["created_at"] = json!(STAMP);
    body["updated_at"] = json!(STAMP);
    awards.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update_award(
    State(b): State<Backend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    let mut awards = b.awards.lock().unwrap();
    match awards.iter_mut().find(|a| a["id"] == json!(id)) {
        Some(award) => {
            award["title"] = body["title"].clone();
            award["date"] = body["date"].clone();
            (StatusCode::OK, Json(award.clone()))
        }
        None => detail(StatusCode::NOT_FOUND, "Award not found"),
    }
}

async fn delete_award(
    State(b): State<Backend>,
    Path(id): Path<String>,
) -> Result<StatusCode, Reply> {
    let mut awards = b.awards.lock().unwrap();
    let before = awards.len();
    awards.retain(|a| a["id"] != json!(id));
    if awards.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "Award not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_skills() -> Json<Value> {
    Json(json!([]))
}

async fn reject_skill() -> Reply {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": [
            { "loc": ["body", "category"], "msg": "category too long", "type": "value_error" },
            { "loc": ["body", "items"], "msg": "too many items", "type": "value_error" }
        ]})),
    )
}

async fn extract(State(b): State<Backend>, mut multipart: Multipart) -> Reply {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let Ok(bytes) = field.bytes().await else {
            return detail(StatusCode::BAD_REQUEST, "Unreadable upload");
        };
        b.uploads
            .lock()
            .unwrap()
            .push((file_name, content_type, bytes.len()));
        return (
            StatusCode::OK,
            Json(json!({
                "extracted_data": {
                    "heading": { "mobile": "+91-827-4925-985", "custom_links": [] },
                    "awards": [{ "title": "Dean's List", "date": "May 2022" }],
                    "skills": [{ "category": "Languages", "items": ["Rust", "Go"] }]
                },
                "extraction_id": "x1",
                "resume_url": "https://cdn.example.com/r.pdf",
                "thumbnail_url": "https://cdn.example.com/r.png",
                "tokens_used": 1200
            })),
        );
    }
    detail(StatusCode::BAD_REQUEST, "No file uploaded")
}

async fn admin_users(headers: HeaderMap, Query(q): Query<HashMap<String, u32>>) -> Reply {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if !authorized {
        return detail(StatusCode::FORBIDDEN, "Admin access required");
    }
    let skip = q.get("skip").copied().unwrap_or(0);
    let limit = q.get("limit").copied().unwrap_or(100);
    (
        StatusCode::OK,
        Json(json!({
            "users": [{
                "id": format!("u{skip}"),
                "email": "jane@example.com",
                "first_name": "Jane",
                "last_name": "Doe",
                "credits": limit,
                "max_resume": 3,
                "created_at": STAMP
            }],
            "total": 41
        })),
    )
}

async fn rephrase_title() -> Reply {
    detail(StatusCode::PAYMENT_REQUIRED, "Insufficient credits")
}

async fn dashboard() -> Json<Value> {
    Json(json!({
        "stats": { "credits": 4, "max_resume": 3, "resume_count": 1, "pdfs_generated": 2, "ai_calls_count": 9 },
        "recent_resumes": [],
        "recent_pdfs": [],
        "element_counts": { "awards": 1 },
        "recent_activity": []
    }))
}

async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/api/award/", get(list_awards).post(create_award))
        .route("/api/award/:id", put(update_award).delete(delete_award))
        .route("/api/skill/", get(list_skills).post(reject_skill))
        .route("/api/ai/extract-resume", post(extract))
        .route("/api/ai/rephrase-title", post(rephrase_title))
        .route("/api/admin/users", get(admin_users))
        .route("/api/dashboard/", get(dashboard))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), backend)
}

fn client(base_url: &str, token: Option<&str>) -> ApiClient {
    let mut config = Config::for_base_url(base_url);
    config.api_token = token.map(str::to_string);
    ApiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_award_crud_over_http() {
    let (base_url, backend) = spawn_backend().await;
    let editor = SectionEditor::<Awards>::new(Arc::new(client(&base_url, None)));

    let form = AwardForm {
        title: "Dean's List".to_string(),
        date: "May 2022".to_string(),
    };
    let outcome = editor.create(SectionState::new(), &form).await;
    assert!(!outcome.has_error(), "{:?}", outcome.notices);
    assert_eq!(outcome.state.items.len(), 1);
    assert_eq!(outcome.state.items[0].id, "a1");

    let renamed = AwardForm {
        title: "Dean's List 2022".to_string(),
        ..form.clone()
    };
    let outcome = editor.update(outcome.state, "a1", &renamed).await;
    assert_eq!(outcome.notices[0].message, "Award updated successfully");
    assert_eq!(outcome.state.items[0].title, "Dean's List 2022");

    let outcome = editor.update(outcome.state, "a9", &renamed).await;
    assert_eq!(outcome.notices[0].message, "Award not found");

    let state = SectionEditor::<Awards>::request_delete(outcome.state, "a1");
    let outcome = editor.confirm_delete(state).await;
    assert_eq!(outcome.notices[0].message, "Award deleted successfully");
    assert!(outcome.state.items.is_empty());
    assert!(backend.awards.lock().unwrap().is_empty());

    // Already gone: reported, and the list is still refreshed.
    let state = SectionEditor::<Awards>::request_delete(outcome.state, "a1");
    let outcome = editor.confirm_delete(state).await;
    assert!(outcome.has_error());
    assert_eq!(outcome.notices[0].message, "Award not found");
    assert!(!outcome.state.loading);
}

#[tokio::test]
async fn test_empty_delete_response_is_success() {
    let (base_url, backend) = spawn_backend().await;
    let api = client(&base_url, None);
    let editor = SectionEditor::<Awards>::new(Arc::new(api.clone()));
    let form = AwardForm {
        title: "Dean's List".to_string(),
        date: "May 2022".to_string(),
    };
    editor.create(SectionState::new(), &form).await;

    let body = api.delete_path("/api/award/a1").await.unwrap();

    assert_eq!(body, Value::Null);
    assert!(backend.awards.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_field_error_list_is_joined() {
    let (base_url, _) = spawn_backend().await;
    let editor = SectionEditor::<Skills>::new(Arc::new(client(&base_url, None)));
    let form = SkillForm {
        category: "Languages".to_string(),
        items: "Rust, Go".to_string(),
    };

    let outcome = editor.create(SectionState::new().open_create(), &form).await;

    assert_eq!(
        outcome.notices[0].message,
        "category too long, too many items"
    );
}

#[tokio::test]
async fn test_pdf_upload_is_multipart() {
    let (base_url, backend) = spawn_backend().await;
    let extractor = ResumeExtractor::new(client(&base_url, None));

    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.extend_from_slice(&[b'x'; 2048]);
    let response = extractor
        .extract(&ResumeUpload::new("jane.pdf", bytes))
        .await
        .unwrap();

    assert_eq!(response.extracted_data.entry_count(), 3);
    assert_eq!(response.tokens_used, 1200);
    let uploads = backend.uploads.lock().unwrap().clone();
    assert_eq!(
        uploads,
        vec![("jane.pdf".to_string(), "application/pdf".to_string(), 2057)]
    );
}

#[tokio::test]
async fn test_invalid_pdf_is_not_uploaded() {
    let (base_url, backend) = spawn_backend().await;
    let extractor = ResumeExtractor::new(client(&base_url, None));

    let err = extractor
        .extract(&ResumeUpload::new("jane.pdf", b"hello".to_vec()))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidUpload(_)));
    assert!(backend.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_page_needs_token() {
    let (base_url, _) = spawn_backend().await;

    let console = AdminConsole::new(Arc::new(client(&base_url, None)));
    let outcome = console.load_page(AdminState::new(), 0).await;
    assert_eq!(outcome.notices[0].message, "Admin access required");

    let console = AdminConsole::new(Arc::new(client(&base_url, Some(TOKEN))));
    let outcome = console.load_page(AdminState::new(), 2).await;
    assert!(!outcome.has_error());
    assert_eq!(outcome.state.users[0].id, "u40");
    assert_eq!(outcome.state.users[0].credits, 20);
    assert_eq!(outcome.state.page_count(), 3);
}

#[tokio::test]
async fn test_credit_exhaustion_surfaces_verbatim() {
    let (base_url, _) = spawn_backend().await;
    let rephraser = Rephraser::new(client(&base_url, None));

    let err = rephraser
        .rephrase_title("project", "p1", "Resume builder")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Rejected { status: 402, .. }));
    assert_eq!(err.notice().message, "Insufficient credits");
}

#[tokio::test]
async fn test_dashboard_decodes() {
    let (base_url, _) = spawn_backend().await;
    let dashboard = fetch_dashboard(&client(&base_url, None)).await.unwrap();
    assert_eq!(dashboard.stats.credits, 4);
    assert_eq!(dashboard.element_counts.awards, 1);
}

#[tokio::test]
async fn test_unreachable_backend_gives_generic_notice() {
    let editor = SectionEditor::<Awards>::new(Arc::new(client("http://127.0.0.1:9", None)));
    let outcome = editor.refresh(SectionState::new()).await;
    assert_eq!(
        outcome.notices[0].message,
        "Something went wrong. Please try again."
    );
}
