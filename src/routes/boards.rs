use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Board;
use crate::routes::Caller;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    #[serde(rename = "orgId")]
    pub org_id: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct CreateBoardResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoardRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RemoveBoardResponse {
    pub success: bool,
}

/// Create a board
///
/// POST /api/boards
pub async fn create_board(
    State(state): State<AppState>,
    Caller(credentials): Caller,
    Json(payload): Json<CreateBoardRequest>,
) -> Result<Json<CreateBoardResponse>> {
    let service = state.service.clone();

    let id = tokio::task::spawn_blocking(move || {
        service.create(credentials.as_ref(), &payload.org_id, &payload.title)
    })
    .await??;

    Ok(Json(CreateBoardResponse { id }))
}

/// Fetch a board, or `null` when it does not exist
///
/// GET /api/boards/:id
pub async fn get_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Board>>> {
    let service = state.service.clone();

    let board = tokio::task::spawn_blocking(move || service.get(&id)).await??;

    Ok(Json(board))
}

/// Rename a board
///
/// PATCH /api/boards/:id
pub async fn update_board(
    State(state): State<AppState>,
    Caller(credentials): Caller,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBoardRequest>,
) -> Result<Json<Board>> {
    let service = state.service.clone();

    let board = tokio::task::spawn_blocking(move || {
        service.update(credentials.as_ref(), &id, &payload.title)
    })
    .await??;

    Ok(Json(board))
}

/// Delete a board and the caller's favorite of it
///
/// DELETE /api/boards/:id
pub async fn remove_board(
    State(state): State<AppState>,
    Caller(credentials): Caller,
    Path(id): Path<String>,
) -> Result<Json<RemoveBoardResponse>> {
    let service = state.service.clone();

    tokio::task::spawn_blocking(move || service.remove(credentials.as_ref(), &id)).await??;

    Ok(Json(RemoveBoardResponse { success: true }))
}
