//! Ticket check API endpoints.
//!
//! JSON surface consumed by the portal page. One POST runs the whole check
//! sequence; the rest is lock metadata and a liveness probe. Chain problems
//! surface as invalid verdicts with diagnostics, never as HTTP errors, so
//! the only error responses here are address problems and bad payloads.

use crate::address::AddressError;
use crate::lock::checker::TicketChecker;
use crate::lock::client::LockReader;
use crate::lock::types::KeyDetails;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for the gate API endpoints
pub struct GateState {
    pub checker: TicketChecker,
    pub reader: Arc<dyn LockReader>,
    pub lock_address: String,
    pub network: String,
    pub purchase_url: String,
    pub support_email: String,
}

// ==================== Request/Response Types ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    /// Canonical EIP-55 form of the checked address
    pub address: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<KeyDetails>,
    /// Present on every invalid verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateInfoResponse {
    pub lock_address: String,
    pub network: String,
    pub support_email: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "invalid_address" | "invalid_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

impl From<AddressError> for ErrorResponse {
    fn from(err: AddressError) -> Self {
        Self {
            error: "invalid_address".to_string(),
            message: err.to_string(),
        }
    }
}

// ==================== API Handlers ====================

/// POST /api/v1/check
/// Run the full check sequence for one wallet address
pub async fn check_ticket(
    State(state): State<Arc<GateState>>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ErrorResponse> {
    let outcome = match state.checker.check(&payload.address).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!("Rejected address input: {}", err);
            return Err(err.into());
        }
    };

    let valid = outcome.is_valid();
    Ok(Json(CheckResponse {
        address: outcome.address.to_checksum(None),
        valid,
        diagnostic: outcome.diagnostic.map(|d| d.to_string()),
        details: outcome.details,
        purchase_url: (!valid).then(|| state.purchase_url.clone()),
    }))
}

/// GET /api/v1/gate
/// Lock metadata for the portal footer
pub async fn gate_info(State(state): State<Arc<GateState>>) -> Json<GateInfoResponse> {
    Json(GateInfoResponse {
        lock_address: state.lock_address.clone(),
        network: state.network.clone(),
        support_email: state.support_email.clone(),
    })
}

/// GET /healthz
/// Liveness probe; reports degraded when the RPC endpoint is unreachable
pub async fn health(State(state): State<Arc<GateState>>) -> Response {
    match state.reader.current_block().await {
        Ok(block) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                block: Some(block),
            }),
        )
            .into_response(),
        Err(err) => {
            warn!("Health probe cannot reach RPC endpoint: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    block: None,
                }),
            )
                .into_response()
        }
    }
}
