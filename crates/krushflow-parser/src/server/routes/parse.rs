//! Document parse endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::extraction;
use crate::server::state::AppState;
use crate::types::{DocumentInput, ParseResponse, ParsedDocument};

/// Body of `POST /api/parse`
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub documents: Option<Vec<DocumentInput>>,
}

/// POST /api/parse - Parse uploaded documents and record them as a new session
pub async fn parse_documents(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ParseResponse>> {
    let Json(request) = payload.map_err(|e| Error::validation(e.body_text()))?;

    let documents = request.documents.unwrap_or_default();
    if documents.is_empty() {
        return Err(Error::validation("No documents provided"));
    }

    let mut parsed_documents = Vec::with_capacity(documents.len());
    for input in documents {
        let record = ParsedDocument::from_input(&input);
        let record = match input.data {
            Some(data) => record.with_extraction(extraction::extract_blocking(data).await),
            None => record,
        };
        parsed_documents.push(record);
    }

    let store = state.store();
    let mut data = store.load().await?;
    let session_id = data.append_session(parsed_documents.clone()).id;
    store.save(&data).await?;

    tracing::info!(
        "Parsed {} documents into session {}",
        parsed_documents.len(),
        session_id
    );

    Ok(Json(ParseResponse {
        success: true,
        session_id,
        total_documents: parsed_documents.len(),
        parsed_documents,
        message: "Documents parsed and saved successfully".to_string(),
    }))
}
