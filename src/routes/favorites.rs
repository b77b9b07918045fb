use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::Board;
use crate::routes::Caller;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FavoriteBoardRequest {
    #[serde(rename = "orgId")]
    pub org_id: String,
}

/// Favorite a board for the calling user
///
/// POST /api/boards/:id/favorite
pub async fn favorite_board(
    State(state): State<AppState>,
    Caller(credentials): Caller,
    Path(id): Path<String>,
    Json(payload): Json<FavoriteBoardRequest>,
) -> Result<Json<Board>> {
    let service = state.service.clone();

    let board = tokio::task::spawn_blocking(move || {
        service.favorite(credentials.as_ref(), &id, &payload.org_id)
    })
    .await??;

    Ok(Json(board))
}

/// Drop the calling user's favorite of a board
///
/// DELETE /api/boards/:id/favorite
pub async fn unfavorite_board(
    State(state): State<AppState>,
    Caller(credentials): Caller,
    Path(id): Path<String>,
) -> Result<Json<Board>> {
    let service = state.service.clone();

    let board =
        tokio::task::spawn_blocking(move || service.unfavorite(credentials.as_ref(), &id))
            .await??;

    Ok(Json(board))
}
