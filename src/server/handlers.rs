//! HTTP handlers for the meeting analysis API

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::server::error::Result;
use crate::server::AppState;
use crate::transcript::Transcript;
use crate::DebriefError;

/// GET /api/health
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "message": "Meeting analysis API is running",
        })),
    )
}

/// GET /api/docs
pub async fn api_docs() -> impl IntoResponse {
    Json(json!({
        "endpoints": {
            "/api/health": {
                "method": "GET",
                "description": "Check if the API is running"
            },
            "/api/analyze-meeting": {
                "method": "POST",
                "description": "Analyze a meeting transcript",
                "request_body": {
                    "transcript": [
                        ["speaker_name", "speaker_text"]
                    ]
                },
                "response_format": {
                    "status": "success/error",
                    "data": {
                        "summary": {
                            "meeting_outcomes": "string",
                            "discuss_steps": "string",
                            "action_items": ["string"]
                        },
                        "analysis": {
                            "counterpoints": ["string"],
                            "proposed_ideas": ["string"]
                        },
                        "actions": [{
                            "description": "string",
                            "DRI": "string",
                            "C": ["string"],
                            "I": ["string"],
                            "Importance": "H/M/L",
                            "Deadline": "DD/MM/YYYY or empty"
                        }]
                    }
                },
                "error_format": {
                    "status": "error",
                    "error": "human readable message",
                    "kind": "invalid_request/invalid_transcript/model_invocation/result_parsing/timeout",
                    "raw_results": "present for result_parsing: {summary, analysis, actions} raw model text"
                }
            },
            "/api/docs": {
                "method": "GET",
                "description": "Get API documentation"
            }
        }
    }))
}

/// POST /api/analyze-meeting
pub async fn analyze_meeting(
    State(state): State<AppState>,
    payload: core::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(body) =
        payload.map_err(|rejection| DebriefError::InvalidRequest(rejection.body_text()))?;

    let transcript = Transcript::from_value(body.get("transcript"))?;

    let request_id = Uuid::new_v4();
    let span = info_span!("analyze_meeting", %request_id, utterances = transcript.len());

    let report = async {
        info!("Starting meeting analysis");
        let report = tokio::time::timeout(state.request_timeout, state.pipeline.analyze(&transcript))
            .await
            .map_err(|_| DebriefError::Timeout(state.request_timeout))??;
        info!("Meeting analysis complete");
        Ok::<_, DebriefError>(report)
    }
    .instrument(span)
    .await?;

    Ok(Json(json!({
        "status": "success",
        "data": report,
    })))
}
