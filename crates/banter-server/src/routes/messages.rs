//! Inbound channel message endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use banter_core::responder::addressed;

use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for an inbound channel message.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Who sent it.
    pub sender: String,
    /// The raw channel line, including any addressing prefix.
    pub text: String,
}

/// Response for an inbound channel message.
///
/// `reply` is null when the message was not addressed to the bot.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub reply: Option<String>,
}

/// Handle an inbound channel message.
/// POST /messages
///
/// Every message counts as channel activity for the idle monitor; only
/// messages addressed to the bot produce a reply.
pub async fn post_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.clock.touch();

    let Some(body) = addressed(&state.config.handle, &request.text) else {
        return Ok(Json(MessageResponse { reply: None }));
    };

    info!(sender = %request.sender, "message addressed to bot");
    let reply = state.responder.reply(&request.sender, body).await?;
    Ok(Json(MessageResponse { reply: Some(reply) }))
}
