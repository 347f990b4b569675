//! Round-trip tests against a cooperating in-process lead service
//!
//! The fake service mirrors the real contract: JSON bodies everywhere,
//! multipart for import, `{"error": ...}` on failures, per-user lead scoping,
//! exact-match filtering on the seven text columns.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use leadbook::api::{Credentials, Lead, LeadApiClient};
use leadbook::dashboard::DashboardState;
use leadbook::errors::{AuthError, LeadbookError};
use leadbook::filters::{FilterStore, LeadColumn};
use leadbook::session::Session;

const CSV_THREE_ROWS: &str = "\
Lead ID,Lead Name,Contact Information,Source,Interest Level,Status,Assigned Salesperson
L-1,Acme Corp,acme@example.com,Web,High,New,Dana
L-2,Globex,globex@example.com,Referral,Low,Contacted,Eli
L-3,Initech,初音@example.com,Event,Medium,New,Dana
";

const CSV_TWO_ROWS: &str = "\
Lead ID,Lead Name,Contact Information,Source,Interest Level,Status,Assigned Salesperson
L-4,Umbrella,u@example.com,Web,High,New,Fay
L-5,Stark,s@example.com,Cold Call,High,Won,Fay
";

#[derive(Clone, Default)]
struct FakeService {
    /// username -> password
    users: Arc<Mutex<HashMap<String, String>>>,
    leads: Arc<Mutex<Vec<Lead>>>,
    /// query parameters of the most recent list request
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl FakeService {
    fn with_user(username: &str, password: &str) -> Self {
        let svc = Self::default();
        svc.users
            .lock()
            .unwrap()
            .insert(username.to_string(), password.to_string());
        svc
    }

    fn seed_lead(&self, owner: &str, lead_id: &str, status: &str, salesperson: &str) {
        let mut leads = self.leads.lock().unwrap();
        let n = leads.len() + 1;
        leads.push(Lead {
            id: format!("id-{}", n),
            created_at: "2026-01-05T09:00:00".to_string(),
            user_uuid: owner.to_string(),
            lead_id: lead_id.to_string(),
            lead_name: format!("Lead {}", n),
            contact_information: String::new(),
            source: String::new(),
            interest_level: String::new(),
            status: status.to_string(),
            salesperson: salesperson.to_string(),
        });
    }
}

async fn login(
    State(svc): State<FakeService>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let username = body["user_name"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();

    let users = svc.users.lock().unwrap();
    match users.get(&username) {
        Some(stored) if stored == password => (
            StatusCode::OK,
            Json(json!({
                "message": "Login successful",
                "user": {
                    "uuid": "u-1",
                    "userName": username,
                    "created_at": "2026-01-05T09:00:00",
                },
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid credentials"})),
        ),
    }
}

async fn create_user(
    State(svc): State<FakeService>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let username = body["user_name"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    let mut users = svc.users.lock().unwrap();
    if users.contains_key(&username) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Username already exists"})),
        );
    }
    users.insert(username.clone(), password);

    (
        StatusCode::OK,
        Json(json!([{
            "uuid": format!("u-{}", users.len()),
            "userName": username,
            "created_at": "2026-01-05T09:00:00",
        }])),
    )
}

fn lead_field<'a>(lead: &'a Lead, key: &str) -> Option<&'a str> {
    match key {
        "lead_id" => Some(&lead.lead_id),
        "lead_name" => Some(&lead.lead_name),
        "contact_information" => Some(&lead.contact_information),
        "source" => Some(&lead.source),
        "interest_level" => Some(&lead.interest_level),
        "status" => Some(&lead.status),
        "salesperson" => Some(&lead.salesperson),
        _ => None,
    }
}

async fn list_leads(
    State(svc): State<FakeService>,
    Path(username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Lead>> {
    *svc.last_query.lock().unwrap() = Some(params.clone());

    let leads = svc.leads.lock().unwrap();
    let out = leads
        .iter()
        .filter(|lead| lead.user_uuid == username)
        .filter(|lead| {
            params
                .iter()
                .all(|(key, value)| lead_field(lead, key) == Some(value.as_str()))
        })
        .cloned()
        .collect();
    Json(out)
}

async fn import_csv(
    State(svc): State<FakeService>,
    Path(username): Path<String>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut success_count = 0u64;

    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        if field.name() != Some("file") {
            continue;
        }
        let data = field.bytes().await.expect("file bytes");

        let mut reader = csv::Reader::from_reader(data.as_ref());
        let headers = reader.headers().expect("csv headers").clone();
        let records: Vec<csv::StringRecord> =
            reader.records().map(|r| r.expect("csv record")).collect();

        let mut leads = svc.leads.lock().unwrap();
        for record in records {
            let get = |name: &str| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .and_then(|i| record.get(i))
                    .unwrap_or_default()
                    .to_string()
            };
            let n = leads.len() + 1;
            leads.push(Lead {
                id: format!("id-{}", n),
                created_at: "2026-01-05T09:00:00".to_string(),
                user_uuid: username.clone(),
                lead_id: get("Lead ID"),
                lead_name: get("Lead Name"),
                contact_information: get("Contact Information"),
                source: get("Source"),
                interest_level: get("Interest Level"),
                status: get("Status"),
                salesperson: get("Assigned Salesperson"),
            });
            success_count += 1;
        }
    }

    (
        StatusCode::CREATED,
        Json(json!({"success_count": success_count, "error_count": 0})),
    )
}

async fn spawn_server(svc: FakeService) -> SocketAddr {
    let app = Router::new()
        .route("/login", post(login))
        .route("/user", post(create_user))
        .route("/:username", get(list_leads).post(import_csv))
        .with_state(svc);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn client_for(addr: SocketAddr) -> LeadApiClient {
    LeadApiClient::new(&format!("http://{}", addr), 5).expect("client")
}

#[tokio::test]
async fn test_wrong_password_is_auth_error_with_server_message() {
    let addr = spawn_server(FakeService::with_user("alice", "secret")).await;
    let client = client_for(addr);

    let err = client
        .login(&Credentials::new("alice", "wrong"))
        .await
        .expect_err("login must fail");

    match err {
        LeadbookError::Auth(AuthError::InvalidCredentials { message }) => {
            assert_eq!(message, "invalid credentials");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_duplicate_account_is_auth_error() {
    let addr = spawn_server(FakeService::default()).await;
    let client = client_for(addr);

    let credentials = Credentials::new("bob", "hunter2");
    client
        .create_account(&credentials)
        .await
        .expect("first signup");

    let err = client
        .create_account(&credentials)
        .await
        .expect_err("second signup must fail");

    match err {
        LeadbookError::Auth(AuthError::DuplicateAccount { username, message }) => {
            assert_eq!(username, "bob");
            assert_eq!(message, "Username already exists");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_import_then_fetch_grows_by_row_count() {
    let addr = spawn_server(FakeService::with_user("alice", "secret")).await;
    let client = client_for(addr);

    let session = client
        .login(&Credentials::new("alice", "secret"))
        .await
        .expect("login");
    let no_filters = FilterStore::new();

    let before = client
        .fetch_leads(&session, &no_filters)
        .await
        .expect("fetch");
    assert!(before.is_empty());

    let summary = client
        .import_bytes(&session, "leads.csv", CSV_THREE_ROWS.as_bytes().to_vec())
        .await
        .expect("import");
    assert_eq!(summary.success_count, 3);
    assert_eq!(summary.error_count, 0);

    let after = client
        .fetch_leads(&session, &no_filters)
        .await
        .expect("fetch");
    assert_eq!(after.len(), before.len() + 3);

    // A second import keeps growing the list; nothing is merged or deduped
    client
        .import_bytes(&session, "more.csv", CSV_TWO_ROWS.as_bytes().to_vec())
        .await
        .expect("import");
    let final_list = client
        .fetch_leads(&session, &no_filters)
        .await
        .expect("fetch");
    assert_eq!(final_list.len(), 5);
}

#[tokio::test]
async fn test_empty_filter_state_sends_zero_query_params() {
    let svc = FakeService::with_user("alice", "secret");
    svc.seed_lead("alice", "L-1", "New", "Dana");
    let last_query = svc.last_query.clone();
    let addr = spawn_server(svc).await;
    let client = client_for(addr);
    let session = Session::new("alice");

    let leads = client
        .fetch_leads(&session, &FilterStore::new())
        .await
        .expect("fetch");
    assert_eq!(leads.len(), 1);

    let observed = last_query.lock().unwrap().clone().expect("request seen");
    assert!(observed.is_empty());
}

#[tokio::test]
async fn test_filtered_fetch_sends_exactly_the_active_pairs() {
    let svc = FakeService::with_user("alice", "secret");
    svc.seed_lead("alice", "L-1", "New", "Dana");
    svc.seed_lead("alice", "L-2", "Contacted", "Dana");
    svc.seed_lead("alice", "L-3", "New", "Eli");
    // Another user's lead never shows up, filtered or not
    svc.seed_lead("mallory", "L-9", "New", "Dana");
    let last_query = svc.last_query.clone();
    let addr = spawn_server(svc).await;
    let client = client_for(addr);
    let session = Session::new("alice");

    let mut filters = FilterStore::new();
    filters.set(LeadColumn::Status, "New");
    filters.set(LeadColumn::Salesperson, "Dana");

    let leads = client
        .fetch_leads(&session, &filters)
        .await
        .expect("fetch");
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].lead_id, "L-1");

    let observed = last_query.lock().unwrap().clone().expect("request seen");
    assert_eq!(observed.len(), 2);
    assert_eq!(observed.get("status").map(String::as_str), Some("New"));
    assert_eq!(observed.get("salesperson").map(String::as_str), Some("Dana"));
}

#[tokio::test]
async fn test_coordinator_refreshes_after_filter_change() {
    let svc = FakeService::with_user("alice", "secret");
    svc.seed_lead("alice", "L-1", "New", "Dana");
    svc.seed_lead("alice", "L-2", "Contacted", "Dana");
    let addr = spawn_server(svc).await;

    let api = client_for(addr);
    let (state, coordinator) = DashboardState::new(api, Session::new("alice"));
    tokio::spawn(coordinator.run());

    state.set_filter(LeadColumn::Status, "Contacted").await;
    wait_for_applies(&state, 1).await;

    let shown = state.board.leads().await;
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].lead_id, "L-2");

    // Clearing the filter refreshes again and restores the full list
    state.set_filter(LeadColumn::Status, "").await;
    wait_for_applies(&state, 2).await;
    assert_eq!(state.board.len().await, 2);
}

async fn wait_for_applies(state: &DashboardState, count: u64) {
    for _ in 0..250 {
        if state.board.applied_count() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!(
        "board never reached {} applied response(s) (saw {})",
        count,
        state.board.applied_count()
    );
}
