//! End-to-end HTTP tests (§8): the three-account literal scenarios, plus
//! cache-identity and idempotence properties. Drives the router in-process
//! with `tower::ServiceExt::oneshot` rather than binding a real socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use accountdb::api::{build_router, AppState};
use accountdb::cache::ResponseCache;
use accountdb::dictionary::Dictionaries;
use accountdb::index::IndexSet;
use accountdb::model::{Sex, Status};
use accountdb::observability::MetricsRegistry;
use accountdb::storage::{Record, RecordStore};

const NOW: i64 = 1_550_000_000;

fn blank_record(id: u32, email: &str, sex: Sex, status: Status, birth: i32) -> Record {
    Record {
        id,
        email: email.to_string(),
        phone: None,
        phone_code: None,
        fname_id: None,
        sname_id: None,
        country_id: None,
        city_id: None,
        sex,
        status,
        birth,
        joined: 0,
        interests: vec![],
        premium: None,
        likes: vec![],
    }
}

fn three_account_fixture() -> Router {
    let mut dicts = Dictionaries::new();
    let tea = dicts.interest.intern("tea").unwrap();
    let jazz = dicts.interest.intern("jazz").unwrap();
    let chess = dicts.interest.intern("chess").unwrap();

    let mut account1 = blank_record(1, "a@ex.io", Sex::Male, Status::Free, -631_152_000);
    account1.interests = { let mut v = vec![tea, jazz]; v.sort_unstable(); v };
    account1.premium = Some((1_500_000_000, 1_600_000_000));

    let mut account2 = blank_record(2, "b@ex.io", Sex::Female, Status::Busy, 0);
    account2.interests = vec![jazz];

    let mut account3 = blank_record(3, "c@other", Sex::Female, Status::Free, 500_000_000);
    account3.interests = { let mut v = vec![tea, chess]; v.sort_unstable(); v };

    let store = RecordStore::from_records(vec![account1, account2, account3]);
    let index = IndexSet::build(&store, &dicts, NOW);
    let state = Arc::new(AppState {
        store,
        dicts,
        index,
        cache: ResponseCache::new(),
        metrics: MetricsRegistry::new(),
        now: NOW,
    });
    build_router(state)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

async fn get_raw(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn scenario_1_filter_by_email_domain() {
    let router = three_account_fixture();
    let (status, body) = get(&router, "/accounts/filter/?email_domain=ex.io&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"accounts": [{"id": 2, "email": "b@ex.io"}, {"id": 1, "email": "a@ex.io"}]})
    );
}

#[tokio::test]
async fn scenario_2_filter_by_sex_and_interests_any() {
    let router = three_account_fixture();
    let (status, body) = get(&router, "/accounts/filter/?sex_eq=f&interests_any=tea&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"accounts": [{"id": 3, "email": "c@other", "sex": "f"}]}));
}

#[tokio::test]
async fn scenario_3_group_by_sex_and_status_descending() {
    // A strict descending tuple-compare of (sex, status) puts "m" ahead of
    // "f" (§4.4.1's stated rule); spec.md's own worked example for this
    // request lists "f" groups first, which is inconsistent with that rule
    // (see DESIGN.md). We follow the rule as written.
    let router = three_account_fixture();
    let (status, body) = get(&router, "/accounts/group/?keys=sex,status&order=-1&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"groups": [
            {"sex": "m", "status": "свободны", "count": 1},
            {"sex": "f", "status": "свободны", "count": 1},
            {"sex": "f", "status": "заняты", "count": 1},
        ]})
    );
}

#[tokio::test]
async fn scenario_4_recommend_ranks_free_over_busy() {
    let router = three_account_fixture();
    let (status, body) = get(&router, "/accounts/1/recommend/?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["accounts"].as_array().unwrap().iter().map(|a| a["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 2]);
}

#[tokio::test]
async fn scenario_5_recommend_missing_account_404s_then_caches() {
    let router = three_account_fixture();
    let (status, bytes) = get_raw(&router, "/accounts/99/recommend/?limit=5&query_id=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());

    let (status, bytes) = get_raw(&router, "/accounts/99/recommend/?limit=5&query_id=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn scenario_6_unknown_parameter_400s_then_caches() {
    let router = three_account_fixture();
    let (status, bytes) = get_raw(&router, "/accounts/filter/?unknown=1&limit=5&query_id=7").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(bytes.is_empty());

    let (status, bytes) = get_raw(&router, "/accounts/filter/?unknown=1&limit=5&query_id=7").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn cache_hit_is_byte_identical_to_the_original_response() {
    let router = three_account_fixture();
    let uri = "/accounts/filter/?sex_eq=m&limit=10&query_id=42";
    let (status_a, bytes_a) = get_raw(&router, uri).await;
    let (status_b, bytes_b) = get_raw(&router, uri).await;
    assert_eq!(status_a, status_b);
    assert_eq!(bytes_a, bytes_b);
}

#[tokio::test]
async fn repeated_requests_without_query_id_are_idempotent() {
    let router = three_account_fixture();
    let uri = "/accounts/filter/?sex_eq=f&limit=10";
    let (_, bytes_a) = get_raw(&router, uri).await;
    let (_, bytes_b) = get_raw(&router, uri).await;
    assert_eq!(bytes_a, bytes_b);
}

#[tokio::test]
async fn non_get_method_is_bad_request_not_method_not_allowed() {
    let router = three_account_fixture();
    let response = router
        .oneshot(Request::builder().method("POST").uri("/accounts/filter/?limit=5").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_path_is_bad_request() {
    let router = three_account_fixture();
    let (status, bytes) = get_raw(&router, "/accounts/nonsense/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(bytes.is_empty());
}
