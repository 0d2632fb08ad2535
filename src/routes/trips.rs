use askama::Template;
use askama_axum::IntoResponse as AskamaTemplateResponse;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::AppError,
    models::{
        form::{FieldErrors, FormFields, FormMode, TripField},
        trip::TripId,
    },
    services::trip_form::{SubmitOutcome, TripFormController},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/trips", post(submit))
        .route("/trips/:id/modify", post(modify))
        .route("/trips/:id/delete", post(delete))
        .route("/form/cancel", post(cancel))
        .route("/form/fields/:field", post(edit_field))
}

struct TripRow {
    id: String,
    destination: String,
    date: String,
    description: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "trips/index.html")]
struct IndexTemplate {
    trips: Vec<TripRow>,
    fields: FormFields,
    errors: FieldErrors,
    button_label: &'static str,
    editing: bool,
    revision: u64,
}

impl IndexTemplate {
    fn from_screen(screen: &TripFormController) -> Self {
        let mode = screen.mode();
        let trips = screen
            .trips()
            .iter()
            .map(|trip| TripRow {
                id: trip.id.to_string(),
                destination: trip.destination.clone(),
                date: trip.date.clone(),
                description: trip.description.clone(),
                selected: mode.selected() == Some(trip.id),
            })
            .collect();
        Self {
            trips,
            fields: screen.fields().clone(),
            errors: screen.errors().clone(),
            button_label: mode.button_label(),
            editing: mode != FormMode::Add,
            revision: screen.revision(),
        }
    }
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let screen = state.screen.lock().await;
    AskamaTemplateResponse::into_response(IndexTemplate::from_screen(&screen))
}

#[derive(Deserialize)]
struct TripForm {
    #[serde(default)]
    destination: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    description: String,
}

async fn submit(State(state): State<AppState>, Form(form): Form<TripForm>) -> Response {
    let mut screen = state.screen.lock().await;
    screen.sync_fields(FormFields::new(
        form.destination,
        form.date,
        form.description,
    ));

    match screen.submit() {
        SubmitOutcome::Added(_) | SubmitOutcome::Updated(_) => {
            Redirect::to("/").into_response()
        }
        SubmitOutcome::Rejected => (
            StatusCode::BAD_REQUEST,
            AskamaTemplateResponse::into_response(IndexTemplate::from_screen(&screen)),
        )
            .into_response(),
    }
}

async fn modify(
    State(state): State<AppState>,
    Path(id): Path<TripId>,
) -> Result<Redirect, AppError> {
    state.screen.lock().await.select_for_edit(id)?;
    Ok(Redirect::to("/"))
}

async fn delete(
    State(state): State<AppState>,
    Path(id): Path<TripId>,
) -> Result<Redirect, AppError> {
    state.screen.lock().await.delete_trip(id)?;
    Ok(Redirect::to("/"))
}

async fn cancel(State(state): State<AppState>) -> Redirect {
    state.screen.lock().await.cancel_edit();
    Redirect::to("/")
}

#[derive(Deserialize)]
struct FieldEdit {
    #[serde(default)]
    value: String,
    /// Form revision the keystroke was typed against. Without it the edit
    /// always applies.
    revision: Option<u64>,
}

async fn edit_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Form(edit): Form<FieldEdit>,
) -> Result<StatusCode, AppError> {
    let field: TripField = field.parse()?;
    let mut screen = state.screen.lock().await;
    let applied = match edit.revision {
        Some(revision) => screen.edit_field_at(revision, field, edit.value),
        None => {
            screen.edit_field(field, edit.value);
            true
        }
    };
    if !applied {
        return Ok(StatusCode::CONFLICT);
    }
    debug!(field = field.as_str(), "field edited");
    Ok(StatusCode::NO_CONTENT)
}
