//! Inbound webhook endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use ticketpress_core::{SubmitError, TicketEvent, WebhookPayload};

use crate::metrics::WEBHOOKS_TOTAL;
use crate::state::AppState;

/// Receive a ticket event from the ticket system.
///
/// Validation failures are the caller's problem and come back as 400s.
/// Everything past acceptance runs in the background: the response only says
/// whether the event was queued, never whether the dispatch succeeded.
pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WebhookPayload>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected malformed webhook body");
            WEBHOOKS_TOTAL.with_label_values(&["invalid"]).inc();
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            );
        }
    };

    let event = match TicketEvent::from_payload(payload) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Rejected invalid webhook payload");
            WEBHOOKS_TOTAL.with_label_values(&["invalid"]).inc();
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            );
        }
    };

    if !event.mode.wants_document() {
        info!(
            ticket_id = event.snapshot.id,
            "Webhook acknowledged, no document requested"
        );
        WEBHOOKS_TOTAL.with_label_values(&["ignored"]).inc();
        return (StatusCode::OK, Json(json!({ "status": "ignored" })));
    }

    let ticket_id = event.snapshot.id;
    let mode = event.mode;
    match state.dispatcher().submit(event) {
        Ok(()) => {
            info!(
                ticket_id = ticket_id,
                mode = mode.as_str(),
                "Webhook accepted, dispatch queued"
            );
            WEBHOOKS_TOTAL.with_label_values(&["accepted"]).inc();
            (StatusCode::ACCEPTED, Json(json!({ "status": "accepted" })))
        }
        Err(e @ (SubmitError::QueueFull | SubmitError::Closed)) => {
            warn!(ticket_id = ticket_id, error = %e, "Could not queue dispatch");
            WEBHOOKS_TOTAL.with_label_values(&["rejected"]).inc();
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}
