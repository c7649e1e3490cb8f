use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use super::error::ApiError;
use super::{
    log_messages, AppState, CreatedResponse, ListResponse, NoteResponse, SuccessResponse,
    COLLECTION,
};
use crate::error::NotesError;
use crate::model::{NewNote, NoteUpdate};
use crate::store::DataStore;

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

pub async fn list_notes<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> ApiResult<Json<ListResponse>> {
    let result = state.api.lock().await.list_notes()?;
    Ok(Json(ListResponse {
        collection: COLLECTION.to_string(),
        data: result.listed_notes,
    }))
}

pub async fn create_note<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: std::result::Result<Json<NewNote>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let Json(new_note) = payload?;
    let result = state.api.lock().await.create_note(new_note)?;
    log_messages(&result);

    let note = result
        .affected_notes
        .first()
        .ok_or_else(|| NotesError::Store("create returned no note".to_string()))?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            id: note.id,
        }),
    ))
}

pub async fn update_note<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: std::result::Result<Json<NoteUpdate>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Json(update) = payload?;
    let result = state.api.lock().await.update_note(update)?;
    log_messages(&result);
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn delete_note<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    query: std::result::Result<Query<DeleteQuery>, QueryRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Query(query) = query?;
    let result = state.api.lock().await.delete_note(query.id.as_deref())?;
    log_messages(&result);
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn get_note<S: DataStore + Send + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<NoteResponse>> {
    let mut result = state.api.lock().await.get_note(&id)?;
    let note = result
        .listed_notes
        .pop()
        .ok_or_else(|| NotesError::Store("lookup returned no note".to_string()))?;
    Ok(Json(NoteResponse { note }))
}
