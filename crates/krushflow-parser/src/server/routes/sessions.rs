//! Session query and clear endpoints

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{DataResponse, MessageResponse, ServerData, SessionResponse};

/// GET /api/data - All sessions
pub async fn get_all_data(State(state): State<AppState>) -> Result<Json<DataResponse>> {
    let data = state.store().load().await?;

    Ok(Json(DataResponse {
        success: true,
        total_sessions: data.len(),
        data,
    }))
}

/// GET /api/data/:id - One session by id
pub async fn get_session(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<Json<SessionResponse>> {
    let Path(id) = id.map_err(|e| Error::validation(e.body_text()))?;

    let data = state.store().load().await?;
    let session = data
        .find_session(id)
        .cloned()
        .ok_or(Error::SessionNotFound(id))?;

    Ok(Json(SessionResponse {
        success: true,
        session,
    }))
}

/// POST /api/clear - Drop every session
pub async fn clear_data(State(state): State<AppState>) -> Result<Json<MessageResponse>> {
    state.store().save(&ServerData::default()).await?;
    tracing::info!("Cleared all session data");

    Ok(Json(MessageResponse::ok("All server data cleared")))
}
