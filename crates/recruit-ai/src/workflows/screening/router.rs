use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::EmailAddress;
use super::extraction::AnswerClassifier;
use super::orchestrator::{Conversation, ScreeningOrchestrator};
use super::repository::{CandidateRepository, RepositoryError};

/// Router builder exposing the chat boundary and the candidate read model.
pub fn screening_router<R, C>(orchestrator: Arc<ScreeningOrchestrator<R, C>>) -> Router
where
    R: CandidateRepository + 'static,
    C: AnswerClassifier + 'static,
{
    Router::new()
        .route("/api/v1/screening/chat", post(chat_handler::<R, C>))
        .route(
            "/api/v1/screening/candidates/:email",
            get(candidate_handler::<R, C>),
        )
        .with_state(orchestrator)
}

pub(crate) async fn chat_handler<R, C>(
    State(orchestrator): State<Arc<ScreeningOrchestrator<R, C>>>,
    axum::Json(conversation): axum::Json<Conversation>,
) -> Response
where
    R: CandidateRepository + 'static,
    C: AnswerClassifier + 'static,
{
    match orchestrator.respond(&conversation) {
        Ok(turn) => (StatusCode::OK, axum::Json(turn)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn candidate_handler<R, C>(
    State(orchestrator): State<Arc<ScreeningOrchestrator<R, C>>>,
    Path(email): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
    C: AnswerClassifier + 'static,
{
    let email = match EmailAddress::parse(&email) {
        Ok(email) => email,
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match orchestrator.tools().fetch_record(&email) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("no candidate on file for {email}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error @ (RepositoryError::Timeout | RepositoryError::Unavailable(_))) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
