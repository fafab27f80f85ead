pub mod health;

use std::path::PathBuf;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::applications;
use crate::inquiries;
use crate::ratelimit;
use crate::state::AppState;

/// JSON bodies have no business being large.
const JSON_BODY_LIMIT: usize = 1024 * 1024;

/// Headroom over the upload ceiling so the in-handler size check fires with a
/// specific 400 before the transport-level body limit cuts the stream.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let public_dir = PathBuf::from(&state.config.public_dir);
    let static_files =
        ServeDir::new(&public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    let api = Router::new()
        .route(
            "/api/inquiries",
            post(inquiries::handlers::handle_submit)
                .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT)),
        )
        .route(
            "/api/applications",
            post(applications::handlers::handle_submit).layer(DefaultBodyLimit::max(
                state.config.max_upload_bytes() as usize + MULTIPART_OVERHEAD,
            )),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            ratelimit::enforce,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(api)
        // Unmatched paths fall through to static assets, then the landing page.
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .with_state(state)
}
