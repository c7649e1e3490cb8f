//! # HTTP Layer
//!
//! Thin JSON routes in front of [`NotesApi`]. Handlers parse the request, make one
//! facade call while holding the store lock, and shape the [`CmdResult`] into a
//! response body. Status code mapping lives in [`error::ApiError`].
//!
//! | Method & Path           | Success body                   |
//! |-------------------------|--------------------------------|
//! | `GET /api/notes`        | `{collection, data: Note[]}`   |
//! | `POST /api/notes`       | `{success: true, id}`          |
//! | `PUT /api/notes`        | `{success: true}`              |
//! | `DELETE /api/notes?id=` | `{success: true}`              |
//! | `GET /api/notes/:id`    | `{note: Note}`                 |
//!
//! Failures answer `{success: false, error}` with a 4xx/5xx status.

use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api::{CmdMessage, CmdResult, MessageLevel, NotesApi};
use crate::error::{NotesError, Result};
use crate::model::Note;
use crate::store::DataStore;

pub mod error;
pub mod routes;

/// Name reported in listings, after the document collection notes live in.
pub const COLLECTION: &str = "notes";

pub struct AppState<S: DataStore> {
    pub api: Mutex<NotesApi<S>>,
}

impl<S: DataStore> AppState<S> {
    pub fn new(api: NotesApi<S>) -> Arc<Self> {
        Arc::new(Self {
            api: Mutex::new(api),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub collection: String,
    pub data: Vec<Note>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

pub fn router<S>(state: Arc<AppState<S>>) -> Router
where
    S: DataStore + Send + 'static,
{
    Router::new()
        .route(
            "/api/notes",
            get(routes::list_notes::<S>)
                .post(routes::create_note::<S>)
                .put(routes::update_note::<S>)
                .delete(routes::delete_note::<S>),
        )
        .route("/api/notes/:id", get(routes::get_note::<S>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serves `app` on `listener` until ctrl-c.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let addr = listener.local_addr().map_err(NotesError::Io)?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down");
        })
        .await
        .map_err(NotesError::Io)
}

fn log_messages(result: &CmdResult) {
    for CmdMessage { level, content } in &result.messages {
        match level {
            MessageLevel::Info | MessageLevel::Success => tracing::info!("{}", content),
            MessageLevel::Warning => tracing::warn!("{}", content),
        }
    }
}
