//! Router-level tests for the REST API.
//!
//! Requests go through the full middleware stack via `tower::ServiceExt::oneshot`.

#![cfg(feature = "http-server")]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use sunroof_proposals::http::{create_router, AppState};
use sunroof_proposals::models::{BuildingInsights, Coordinates};
use sunroof_proposals::services::ProposalDataLoader;
use sunroof_proposals::solar::{
    BuildingLookup, ImmediateReadiness, SolarClientFactory, SolarResult, StaticBuildingLookup,
};

struct NeverLookup;

#[async_trait]
impl BuildingLookup for NeverLookup {
    async fn find_building(
        &self,
        _coordinates: Coordinates,
        _api_key: &str,
    ) -> SolarResult<Option<BuildingInsights>> {
        std::future::pending().await
    }

    fn name(&self) -> &'static str {
        "never"
    }
}

fn local_app() -> (Router, AppState) {
    let solar = SolarClientFactory::create_local();
    let state = AppState::new(Arc::new(ProposalDataLoader::new(solar.lookup, solar.readiness)));
    (create_router(state.clone()), state)
}

fn stalled_app() -> (Router, AppState) {
    let loader = ProposalDataLoader::new(Arc::new(NeverLookup), Arc::new(ImmediateReadiness::new()));
    let state = AppState::new(Arc::new(loader));
    (create_router(state.clone()), state)
}

fn request_body(enabled: bool) -> Value {
    json!({
        "user": {
            "rooftop_latitude": 37.4449439,
            "rooftop_longitude": -122.1391466,
            "utm_source": "lead-7",
            "monthly_payment_min": 120.4,
            "monthly_payment_max": 160.0,
            "avg_bill": 180.0
        },
        "theme": {
            "is_sunroof_enabled": enabled,
            "google_api_gateway_key": "key",
            "company_name": "The Pro Companies"
        }
    })
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (app, _) = local_app();
    let (status, body) = send(app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["solar_backend"], "local");
    assert_eq!(body["active_sessions"], 0);
}

#[tokio::test]
async fn test_load_returns_ready_snapshot() {
    let (app, _) = local_app();
    let (status, body) = send(app, Method::POST, "/v1/proposals/load", Some(request_body(true))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loading"], false);
    assert!(body["error"].is_null());
    assert_eq!(body["squareFeet"], "20,490");
    assert_eq!(body["sunshineHours"], "1,802");
    assert_eq!(body["centerLat"], 37.4449439);
}

#[tokio::test]
async fn test_load_skips_when_disabled() {
    let (app, _) = local_app();
    let (status, body) = send(app, Method::POST, "/v1/proposals/load", Some(request_body(false))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "Skip sunroof");
    assert!(body["squareFeet"].is_null());
    assert!(body["centerLng"].is_null());
}

#[tokio::test]
async fn test_summary() {
    let (app, _) = local_app();
    let (status, body) = send(app, Method::POST, "/v1/proposals/summary", Some(request_body(true))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["show_rooftop"], true);
    assert_eq!(body["monthly_payment"]["text"], "$120-160*");
    assert_eq!(body["financing"]["term_years"], 20);
    assert_eq!(
        body["tracking_pixel_url"],
        "https://track.clickbooth.com/l/con?cbiframe=1&oid=67899&cbtid=lead-7"
    );
}

#[tokio::test]
async fn test_malformed_request_is_rejected() {
    let (app, state) = local_app();
    for uri in ["/v1/proposals/load", "/v1/proposals/summary", "/v1/proposals"] {
        let (status, body) = send(
            app.clone(),
            Method::POST,
            uri,
            Some(json!({ "theme": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid proposal request"));
    }
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_session_settles_in_background() {
    let (app, state) = local_app();
    let (status, body) = send(app.clone(), Method::POST, "/v1/proposals", Some(request_body(true))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let session = state.sessions.get(&session_id).unwrap();
    tokio::time::timeout(Duration::from_secs(5), session.cell.wait_settled())
        .await
        .unwrap();

    let (status, body) = send(app, Method::GET, &format!("/v1/proposals/{}", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["status"], "ready");
    assert_eq!(body["snapshot"]["loading"], false);
}

async fn wait_marked_settled(state: &AppState, session_id: &str) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while state
            .sessions
            .get(session_id)
            .map_or(true, |session| session.settled_at.is_none())
        {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_settled_sessions_expire() {
    let solar = SolarClientFactory::create_local();
    let state = AppState::new(Arc::new(ProposalDataLoader::new(solar.lookup, solar.readiness)))
        .with_session_retention(Duration::ZERO);
    let app = create_router(state.clone());

    for _ in 0..20 {
        let (status, body) = send(app.clone(), Method::POST, "/v1/proposals", Some(request_body(true))).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let session_id = body["session_id"].as_str().unwrap().to_string();
        wait_marked_settled(&state, &session_id).await;
        assert_eq!(state.sessions.len(), 1);
    }

    assert_eq!(state.prune_sessions(), 1);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn test_loading_sessions_survive_pruning() {
    let loader = ProposalDataLoader::new(Arc::new(NeverLookup), Arc::new(ImmediateReadiness::new()));
    let state = AppState::new(Arc::new(loader)).with_session_retention(Duration::ZERO);
    let app = create_router(state.clone());

    for _ in 0..3 {
        send(app.clone(), Method::POST, "/v1/proposals", Some(request_body(true))).await;
    }
    assert_eq!(state.prune_sessions(), 0);
    assert_eq!(state.sessions.len(), 3);
}

#[tokio::test]
async fn test_session_cancel_leaves_loading_and_removes() {
    let (app, state) = stalled_app();
    let (_, body) = send(app.clone(), Method::POST, "/v1/proposals", Some(request_body(true))).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();
    let session = state.sessions.get(&session_id).unwrap();

    let (status, body) = send(app.clone(), Method::GET, &format!("/v1/proposals/{}", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["snapshot"]["loading"], true);

    let (status, _) = send(app.clone(), Method::DELETE, &format!("/v1/proposals/{}", session_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(session.cancel.is_cancelled());
    assert!(session.cell.current().is_loading());

    let (status, body) = send(app, Method::GET, &format!("/v1/proposals/{}", session_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_session() {
    let (app, _) = local_app();
    let (status, _) = send(app.clone(), Method::DELETE, "/v1/proposals/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app, Method::GET, "/v1/proposals/nope/events", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_events_stream_terminal_state() {
    let lookup = Arc::new(StaticBuildingLookup::new());
    let loader = ProposalDataLoader::new(lookup, Arc::new(ImmediateReadiness::new()));
    let state = AppState::new(Arc::new(loader));
    let app = create_router(state.clone());

    let (_, body) = send(app.clone(), Method::POST, "/v1/proposals", Some(request_body(true))).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/proposals/{}/events", session_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = tokio::time::timeout(
        Duration::from_secs(5),
        to_bytes(response.into_body(), usize::MAX),
    )
    .await
    .unwrap()
    .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("event: settled"));
    assert!(text.contains("unsupported_location"));
}
