use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{error::AppError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/screen", get(screen_snapshot))
}

async fn screen_snapshot(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let screen = state.screen.lock().await;
    Ok(Json(json!({
        "trips": to_json(screen.trips())?,
        "fields": to_json(screen.fields())?,
        "errors": to_json(screen.errors())?,
        "mode": to_json(&screen.mode())?,
        "button": screen.mode().button_label(),
        "revision": screen.revision(),
    })))
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|err| AppError::Other(err.into()))
}
