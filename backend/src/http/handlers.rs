//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    CreateSessionResponse, HealthResponse, ProposalRequest, SessionStatusResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{ProposalSnapshot, ProposalViewState};
use crate::services::ProposalSummary;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn proposal_request(
    payload: Result<Json<ProposalRequest>, JsonRejection>,
) -> Result<ProposalRequest, AppError> {
    payload
        .map(|Json(request)| request)
        .map_err(|e| AppError::BadRequest(format!("Invalid proposal request: {}", e.body_text())))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        solar_backend: state.loader.lookup_name().to_string(),
        active_sessions: state.sessions.len(),
    }))
}

// =============================================================================
// Synchronous loads
// =============================================================================

/// POST /v1/proposals/load
///
/// Run the rooftop load and return its terminal snapshot. If the client goes
/// away the handler future is dropped, which abandons the in-flight calls.
pub async fn load_proposal(
    State(state): State<AppState>,
    payload: Result<Json<ProposalRequest>, JsonRejection>,
) -> HandlerResult<ProposalSnapshot> {
    let request = proposal_request(payload)?;
    let view_state = state.loader.load(&request.user, &request.theme).await;
    Ok(Json(view_state.snapshot()))
}

/// POST /v1/proposals/summary
///
/// Run the rooftop load and return every display value of the results page.
pub async fn proposal_summary(
    State(state): State<AppState>,
    payload: Result<Json<ProposalRequest>, JsonRejection>,
) -> HandlerResult<ProposalSummary> {
    let request = proposal_request(payload)?;
    let view_state = state.loader.load(&request.user, &request.theme).await;
    Ok(Json(ProposalSummary::build(
        &request.user,
        &request.theme,
        &view_state,
        state.loader.locale(),
    )))
}

// =============================================================================
// Background sessions
// =============================================================================

/// POST /v1/proposals
///
/// Start a load in the background, one session per page mount.
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<ProposalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let request = proposal_request(payload)?;
    state.prune_sessions();
    let session_id = state.sessions.create_session();
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::Internal(format!("Session {} vanished", session_id)))?;

    let loader = state.loader.clone();
    let sessions = state.sessions.clone();
    let task_session_id = session_id.clone();
    tokio::spawn(async move {
        let ProposalRequest { user, theme } = request;
        if loader
            .run(&user, &theme, &session.cell, &session.cancel)
            .await
            .is_ok()
        {
            sessions.mark_settled(&task_session_id);
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(CreateSessionResponse {
            session_id: session_id.clone(),
            message: format!(
                "Proposal load started. Track progress at /v1/proposals/{}/events",
                session_id
            ),
        }),
    ))
}

/// GET /v1/proposals/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<SessionStatusResponse> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session_id)))?;

    let view_state = session.cell.current();
    Ok(Json(SessionStatusResponse {
        session_id: session.session_id,
        snapshot: view_state.snapshot(),
        state: view_state,
        created_at: session.created_at,
        settled_at: session.settled_at,
    }))
}

/// GET /v1/proposals/{session_id}/events
///
/// Stream the current state, then the terminal state, via Server-Sent Events.
pub async fn stream_session_events(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let session = state
        .sessions
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session_id)))?;

    let stream = async_stream::stream! {
        let current = session.cell.current();
        yield Ok(state_event(&current));
        if current.is_loading() {
            let last = tokio::select! {
                settled = session.cell.wait_settled() => state_event(&settled),
                _ = session.cancel.cancelled() => {
                    Event::default().event("cancelled").data(session.session_id.clone())
                }
            };
            yield Ok(last);
        }
    };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}

fn state_event(view_state: &ProposalViewState) -> Event {
    let name = if view_state.is_loading() { "loading" } else { "settled" };
    Event::default()
        .event(name)
        .data(serde_json::to_string(view_state).unwrap_or_default())
}

/// DELETE /v1/proposals/{session_id}
///
/// Tear down a page mount. The in-flight load is cancelled and never writes
/// its result.
pub async fn cancel_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sessions.cancel(&session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {} not found", session_id)))
    }
}
