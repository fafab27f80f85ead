use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// A persisted contact inquiry. Rows are append-only and never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InquiryRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub purpose: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

/// A persisted job application referencing its stored CV on disk.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationRow {
    pub id: i64,
    pub position: String,
    pub fullname: String,
    pub email: String,
    pub cv_path: String,
    pub created_at: NaiveDateTime,
}
