use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::applications::ApplicationFields;
use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::{self, UploadError};

/// POST /api/applications
///
/// Field order in the multipart stream is client-controlled, so the CV is
/// buffered in memory while the remaining fields arrive. It reaches disk only
/// after every field has validated; if the insert itself fails afterwards,
/// the stored file is removed so no orphan survives a failed submission.
pub async fn handle_submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut fields = ApplicationFields::default();
    let mut cv = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(UploadError::Stream)?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "cv" {
            cv = Some(state.uploads.receive(field).await?);
        } else {
            let value = field.text().await.map_err(UploadError::Stream)?;
            fields.set(&name, &value);
        }
    }

    if !fields.complete() {
        return Err(AppError::Validation("Missing fields or file".to_string()));
    }
    let cv = cv.ok_or(UploadError::Missing)?;

    let stored = state.uploads.store(cv).await?;

    let inserted = sqlx::query(
        "INSERT INTO applications (position, fullname, email, cv_path) VALUES (?, ?, ?, ?)",
    )
    .bind(&fields.position)
    .bind(&fields.fullname)
    .bind(&fields.email)
    .bind(stored.path.to_string_lossy().as_ref())
    .execute(&state.db)
    .await;

    if let Err(err) = inserted {
        upload::discard(&stored).await;
        return Err(AppError::Database(err));
    }

    info!(position = %fields.position, cv = %stored.path.display(), "application stored");
    Ok(Json(json!({ "message": "Application submitted successfully." })))
}
