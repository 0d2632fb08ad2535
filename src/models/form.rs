use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::{
    error::AppError,
    models::trip::{Trip, TripId},
};

pub const DESTINATION_REQUIRED: &str = "Destination is required";
pub const DATE_REQUIRED: &str = "Date is required";
pub const DATE_INVALID_FORMAT: &str = "Invalid date format (JJ/MM/AAAA)";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripField {
    Destination,
    Date,
    Description,
}

impl TripField {
    pub const ALL: [TripField; 3] = [
        TripField::Destination,
        TripField::Date,
        TripField::Description,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TripField::Destination => "destination",
            TripField::Date => "date",
            TripField::Description => "description",
        }
    }
}

impl FromStr for TripField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "destination" => Ok(TripField::Destination),
            "date" => Ok(TripField::Date),
            "description" => Ok(TripField::Description),
            other => Err(AppError::BadRequest(format!("unknown form field: {other}"))),
        }
    }
}

/// The three free-text inputs of the trip form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormFields {
    pub destination: String,
    pub date: String,
    pub description: String,
}

impl FormFields {
    pub fn new(
        destination: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            date: date.into(),
            description: description.into(),
        }
    }

    pub fn from_trip(trip: &Trip) -> Self {
        Self::new(
            trip.destination.clone(),
            trip.date.clone(),
            trip.description.clone(),
        )
    }

    pub fn get(&self, field: TripField) -> &str {
        match field {
            TripField::Destination => &self.destination,
            TripField::Date => &self.date,
            TripField::Description => &self.description,
        }
    }

    pub fn slot_mut(&mut self, field: TripField) -> &mut String {
        match field {
            TripField::Destination => &mut self.destination,
            TripField::Date => &mut self.date,
            TripField::Description => &mut self.description,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Per-field error text. An empty string means "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub destination: String,
    pub date: String,
    pub description: String,
}

impl FieldErrors {
    pub fn get(&self, field: TripField) -> &str {
        match field {
            TripField::Destination => &self.destination,
            TripField::Date => &self.date,
            TripField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: TripField, message: impl Into<String>) {
        *self.slot_mut(field) = message.into();
    }

    pub fn clear_field(&mut self, field: TripField) {
        self.slot_mut(field).clear();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        TripField::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    fn slot_mut(&mut self, field: TripField) -> &mut String {
        match field {
            TripField::Destination => &mut self.destination,
            TripField::Date => &mut self.date,
            TripField::Description => &mut self.description,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "trip_id", rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Add,
    Editing(TripId),
}

impl FormMode {
    pub fn button_label(&self) -> &'static str {
        match self {
            FormMode::Add => "Add",
            FormMode::Editing(_) => "Update",
        }
    }

    pub fn selected(&self) -> Option<TripId> {
        match self {
            FormMode::Add => None,
            FormMode::Editing(id) => Some(*id),
        }
    }
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ASCII digits only; the regex crate's `\d` would also accept other scripts.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("date regex should compile")
});

/// `DD/DD/DDDD`. Calendar sense is not checked.
pub fn matches_date_pattern(value: &str) -> bool {
    DATE_PATTERN.is_match(value)
}

/// Runs every creation rule without short-circuiting, so several errors can
/// surface from one pass.
pub fn validate(fields: &FormFields) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if is_blank(&fields.destination) {
        errors.set(TripField::Destination, DESTINATION_REQUIRED);
    }

    if is_blank(&fields.date) {
        errors.set(TripField::Date, DATE_REQUIRED);
    } else if !matches_date_pattern(&fields.date) {
        errors.set(TripField::Date, DATE_INVALID_FORMAT);
    }

    if is_blank(&fields.description) {
        errors.set(TripField::Description, DESCRIPTION_REQUIRED);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
