//! HTTP integration tests for the organization search API.
//!
//! Each test gets its own in-memory SQLite database behind a full router,
//! including the CORS, trace and timeout layers.

#![cfg(feature = "sqlite")]

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use orgsearch_persistence::backends::sqlite::SqliteBackend;
use orgsearch_persistence::core::OrganizationStorage;
use orgsearch_persistence::types::NewOrganization;
use orgsearch_rest::ServerConfig;
use orgsearch_rest::responses::OrganizationPage;
use orgsearch_rest::routing::ORGANIZATIONS_PATH;
use serde_json::{Value, json};

async fn create_backend() -> Arc<SqliteBackend> {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().await.expect("Failed to init schema");
    Arc::new(backend)
}

async fn seed(backend: &SqliteBackend) {
    let rows = [
        ("CLEAR", (2002, 9, 22), 5, true),
        ("CLEARWATER", (2010, 1, 1), 10, false),
        ("Acme", (1999, 12, 31), 250, true),
        ("Globex", (2002, 9, 21), 7, false),
        ("CLEAR", (2020, 6, 15), 1200, false),
    ];
    for (name, (y, m, d), employees, public) in rows {
        backend
            .create(NewOrganization {
                name: name.to_string(),
                creation_date: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
                employee_count: employees,
                is_public: public,
            })
            .await
            .expect("Failed to seed organization");
    }
}

fn server_with(backend: Arc<SqliteBackend>, config: ServerConfig) -> TestServer {
    let state = orgsearch_rest::AppState::new(backend, config);
    let app = orgsearch_rest::routing::create_routes(state);
    TestServer::new(app).expect("Failed to create test server")
}

async fn seeded_server() -> TestServer {
    let backend = create_backend().await;
    seed(&backend).await;
    server_with(backend, ServerConfig::for_testing())
}

fn names(page: &OrganizationPage) -> Vec<&str> {
    let mut names: Vec<&str> = page.organizations.iter().map(|o| o.name.as_str()).collect();
    names.sort();
    names
}

// ============================================================================
// Search Tests
// ============================================================================

#[tokio::test]
async fn test_search_without_filters() {
    let server = seeded_server().await;

    let response = server.get(ORGANIZATIONS_PATH).await;
    response.assert_status_ok();

    let page: OrganizationPage = response.json();
    assert_eq!(page.organizations.len(), 5);
    assert_eq!(page.total_count, 5);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 20);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_search_exact_and_wildcard() {
    let server = seeded_server().await;

    let exact: OrganizationPage = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("filter", "name:CLEAR")
        .await
        .json();
    assert_eq!(names(&exact), vec!["CLEAR", "CLEAR"]);

    let wildcard: OrganizationPage = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("filter", "name:CLEAR*")
        .await
        .json();
    assert_eq!(names(&wildcard), vec!["CLEAR", "CLEAR", "CLEARWATER"]);
}

#[tokio::test]
async fn test_search_repeated_filters_and_range() {
    let server = seeded_server().await;

    let response = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("filter", "name:CLEAR*")
        .add_query_param("filter", "is_public:false")
        .add_query_param("range_filter", "creation_date:[2002-09-22T00:00:00Z TO *]")
        .await;
    response.assert_status_ok();

    let page: OrganizationPage = response.json();
    assert_eq!(names(&page), vec!["CLEAR", "CLEARWATER"]);
    assert!(page.organizations.iter().all(|o| !o.is_public));
}

#[tokio::test]
async fn test_search_pagination() {
    let server = seeded_server().await;

    let page: OrganizationPage = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("page", "3")
        .add_query_param("page_size", "2")
        .await
        .json();

    assert_eq!(page.organizations.len(), 1);
    assert_eq!(page.page, 3);
    assert_eq!(page.page_size, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_count, 5);
}

#[tokio::test]
async fn test_search_page_size_clamped_to_max() {
    let backend = create_backend().await;
    seed(&backend).await;
    let server = server_with(
        backend,
        ServerConfig {
            max_page_size: 3,
            ..ServerConfig::for_testing()
        },
    );

    let page: OrganizationPage = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("page_size", "100")
        .await
        .json();
    assert_eq!(page.page_size, 3);
    assert_eq!(page.organizations.len(), 3);
}

#[tokio::test]
async fn test_search_no_matches_is_empty_ok() {
    let server = seeded_server().await;

    let response = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("filter", "name:Nobody")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["organizations"], json!([]));
    assert_eq!(body["total_count"], 0);
    assert_eq!(body["total_pages"], 0);
}

#[tokio::test]
async fn test_search_no_matches_legacy_not_found() {
    let backend = create_backend().await;
    seed(&backend).await;
    let server = server_with(
        backend,
        ServerConfig {
            empty_result_not_found: true,
            ..ServerConfig::for_testing()
        },
    );

    let response = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("filter", "name:Nobody")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "No organizations found");
    assert_eq!(body["code"], "not_found");
}

// ============================================================================
// Search Error Tests
// ============================================================================

async fn assert_bad_request(server: &TestServer, param: &str, value: &str, code: &str) {
    let response = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param(param, value)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], code, "{param}={value}");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_search_rejects_bad_input() {
    let server = seeded_server().await;

    assert_bad_request(&server, "filter", "name=CLEAR*", "invalid_filter").await;
    assert_bad_request(&server, "filter", ":CLEAR*", "invalid_filter").await;
    assert_bad_request(&server, "range_filter", "employee_count: [5TO10)", "invalid_filter").await;
    assert_bad_request(&server, "range_filter", "employee_count:[5-10)", "invalid_filter").await;
    assert_bad_request(&server, "range_filter", "employee_count:[5TO10", "invalid_filter").await;
    assert_bad_request(&server, "filter", "wrong_name:x", "unknown_field").await;
    assert_bad_request(&server, "range_filter", "name:[a TO b]", "filter_type_mismatch").await;
    assert_bad_request(&server, "page", "abc", "invalid_pagination").await;
    assert_bad_request(&server, "page_size", "0", "invalid_pagination").await;
}

#[tokio::test]
async fn test_search_store_failure_is_generic_500() {
    // No schema: the count query fails inside the store.
    let backend = Arc::new(SqliteBackend::in_memory().unwrap());
    let server = server_with(backend, ServerConfig::for_testing());

    let response = server.get(ORGANIZATIONS_PATH).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"], "failed to query organizations");
    assert_eq!(body["code"], "search_failed");
}

#[tokio::test]
async fn test_search_unconvertible_bound_is_500() {
    let server = seeded_server().await;

    let response = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("range_filter", "employee_count:[* TO abc]")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["code"], "search_failed");
}

#[tokio::test]
async fn test_search_wildcard_is_literal_and_case_sensitive() {
    let backend = create_backend().await;
    seed(&backend).await;
    backend
        .create(NewOrganization {
            name: "CLEAR_1".to_string(),
            creation_date: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            employee_count: 3,
            is_public: true,
        })
        .await
        .unwrap();
    let server = server_with(backend, ServerConfig::for_testing());

    let page: OrganizationPage = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("filter", "name:CLEAR_*")
        .await
        .json();
    assert_eq!(names(&page), vec!["CLEAR_1"]);

    let page: OrganizationPage = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("filter", "name:clear*")
        .await
        .json();
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn test_search_repeated_page_uses_first() {
    let server = seeded_server().await;

    let page: OrganizationPage = server
        .get(&format!("{ORGANIZATIONS_PATH}?page_size=2&page_size=50&page=2&page=x"))
        .await
        .json();
    assert_eq!(page.page, 2);
    assert_eq!(page.page_size, 2);
    assert_eq!(page.organizations.len(), 2);
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_organization() {
    let server = server_with(create_backend().await, ServerConfig::for_testing());

    let response = server
        .post(ORGANIZATIONS_PATH)
        .json(&json!({
            "name": "CLEAR",
            "creation_date": "2002-09-22T00:00:00Z",
            "employee_count": 5,
            "is_public": true
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    let id = body["id"].as_str().expect("id should be a string");
    assert!(uuid::Uuid::parse_str(id).is_ok());
    assert_eq!(body["name"], "CLEAR");

    let page: OrganizationPage = server
        .get(ORGANIZATIONS_PATH)
        .add_query_param("filter", "name:CLEAR")
        .await
        .json();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.organizations[0].id.to_string(), id);
}

#[tokio::test]
async fn test_create_rejects_supplied_id() {
    let server = server_with(create_backend().await, ServerConfig::for_testing());

    let response = server
        .post(ORGANIZATIONS_PATH)
        .json(&json!({
            "id": "0b6f1ad2-4a7e-4c5f-9d59-1c3a6f0e2b11",
            "name": "CLEAR",
            "creation_date": "2002-09-22T00:00:00Z",
            "employee_count": 5,
            "is_public": true
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "id_already_assigned");
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let server = server_with(create_backend().await, ServerConfig::for_testing());

    let response = server.post(ORGANIZATIONS_PATH).text("{not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "malformed_body");

    let response = server
        .post(ORGANIZATIONS_PATH)
        .json(&json!({ "name": "missing fields" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health() {
    let server = server_with(create_backend().await, ServerConfig::for_testing());

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "sqlite");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_full_app_serves_routes() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.init_schema().await.unwrap();
    let app = orgsearch_rest::create_app_with_config(backend, ServerConfig::for_testing());
    let server = TestServer::new(app).unwrap();

    server.get("/health").await.assert_status_ok();
    server.get(ORGANIZATIONS_PATH).await.assert_status_ok();
    server
        .get("/api/v1/unknown")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
