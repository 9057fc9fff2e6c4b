use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Local;

use crate::bot::{handle_command, parse_command, Update};
use crate::dto::OkResponse;
use crate::AppState;

/// Telegram webhook. Always answers 200 so Telegram does not redeliver;
/// anything that is not a text message from a user is acknowledged and dropped.
pub async fn webhook(
    State(state): State<AppState>,
    payload: Result<Json<Update>, JsonRejection>,
) -> Json<OkResponse> {
    let update = match payload {
        Ok(Json(update)) => update,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed Telegram update");
            return Json(OkResponse::new());
        }
    };

    let Some(message) = update.message else {
        tracing::debug!(update_id = update.update_id, "Update without message");
        return Json(OkResponse::new());
    };
    let chat_id = message.chat.id;
    let (Some(sender), Some(text)) = (message.from, message.text) else {
        return Json(OkResponse::new());
    };

    let command = parse_command(&text);
    tracing::debug!(update_id = update.update_id, telegram_id = sender.id, ?command, "Bot command");

    let today = Local::now().date_naive();
    let reply = handle_command(state.store.as_ref(), &sender, command, today).await;

    match &state.telegram {
        Some(client) => {
            if let Err(e) = client.send_message(chat_id, &reply).await {
                tracing::warn!(error = %e, chat_id, "Failed to send Telegram reply");
            }
        }
        None => tracing::debug!(chat_id, "TELEGRAM_BOT_TOKEN not set, reply not sent"),
    }

    Json(OkResponse::new())
}
