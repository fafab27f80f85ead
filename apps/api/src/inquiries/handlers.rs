use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::inquiries::{clean, is_bot, missing_fields, InquiryRequest};
use crate::state::AppState;

/// POST /api/inquiries
///
/// Honeypot submissions succeed silently with no body and no row, so bots
/// get no signal and no stored record.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(request): Json<InquiryRequest>,
) -> Result<Response, AppError> {
    if is_bot(&request) {
        debug!("honeypot tripped; dropping inquiry");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let inquiry = clean(&request);
    let missing = missing_fields(&inquiry);
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    sqlx::query(
        "INSERT INTO inquiries (name, email, phone, purpose, message) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&inquiry.name)
    .bind(&inquiry.email)
    .bind(&inquiry.phone)
    .bind(&inquiry.purpose)
    .bind(&inquiry.message)
    .execute(&state.db)
    .await?;

    info!(purpose = %inquiry.purpose, "inquiry stored");
    Ok(Json(json!({ "message": "Inquiry received. Thank you!" })).into_response())
}
