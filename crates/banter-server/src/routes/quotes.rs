//! Admin quote indexing endpoint.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use banter_core::types::{Quote, QuoteCategory};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for indexing a quote.
#[derive(Debug, Deserialize)]
pub struct AddQuoteRequest {
    pub text: String,
    pub category: QuoteCategory,
}

/// Response for indexing a quote.
#[derive(Debug, Serialize)]
pub struct AddQuoteResponse {
    pub indexed: bool,
    pub total: u64,
}

/// Index a quote and commit it.
/// POST /quotes
pub async fn add_quote(
    State(state): State<AppState>,
    Json(request): Json<AddQuoteRequest>,
) -> ApiResult<(StatusCode, Json<AddQuoteResponse>)> {
    if request.text.trim().is_empty() {
        return Err(ApiError::validation("quote text must not be empty"));
    }

    let quote = Quote::new(request.text, request.category);
    state.store.add(&quote)?;
    state.store.commit()?;

    Ok((
        StatusCode::CREATED,
        Json(AddQuoteResponse {
            indexed: true,
            total: state.store.num_quotes(),
        }),
    ))
}
