//! HTTP surface.
//!
//! Every catalog [`DocumentType`] gets one `POST` route taking a multipart
//! upload with a `file` part; `GET /health` answers `Ok` without touching
//! the provider.
//!
//! ```text
//! multipart ──▶ handlers::read_pdf ──▶ ExtractionService::extract ──▶ 200 JSON
//!                    │                            │
//!                    └─▶ 422 RequestRejection     └─▶ 500 ExtractionFailure
//! ```

mod handlers;
mod response;

pub use response::RequestRejection;

use crate::catalog::DocumentType;
use crate::service::ExtractionService;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, immutable per-process state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ExtractionService>,
}

/// Build the application router.
///
/// `max_upload_bytes` bounds the whole request body, multipart framing
/// included.
pub fn router(service: Arc<ExtractionService>, max_upload_bytes: usize) -> Router {
    let mut app = Router::new().route("/health", get(handlers::health));

    for doc in DocumentType::ALL {
        app = app.route(
            doc.route(),
            post(
                move |state: State<AppState>, multipart: Result<Multipart, MultipartRejection>| {
                    handlers::extract_document(state, doc, multipart)
                },
            ),
        );
    }

    app.layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}
