use tracing::{debug, info, warn};

use crate::{
    error::AppError,
    models::{
        form::{validate, FieldErrors, FormFields, FormMode, TripField},
        trip::{Trip, TripId},
    },
    services::trip_store::TripStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(TripId),
    Updated(TripId),
    /// Add path failed validation; see [`TripFormController::errors`].
    Rejected,
}

/// Owns the trip list and the single input form that edits it.
#[derive(Debug, Clone, Default)]
pub struct TripFormController {
    trips: TripStore,
    fields: FormFields,
    errors: FieldErrors,
    mode: FormMode,
    /// Bumped whenever the form is reloaded or reset, so keystrokes typed
    /// against an older form can be told apart.
    revision: u64,
}

impl TripFormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trips(&self) -> &TripStore {
        &self.trips
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Keystroke handler. Always clears the touched field's error, whatever
    /// the new value is.
    pub fn edit_field(&mut self, field: TripField, value: impl Into<String>) {
        *self.fields.slot_mut(field) = value.into();
        self.errors.clear_field(field);
    }

    /// [`Self::edit_field`] for a keystroke typed against form `revision`.
    /// Returns false and changes nothing when the form has been reset since.
    pub fn edit_field_at(
        &mut self,
        revision: u64,
        field: TripField,
        value: impl Into<String>,
    ) -> bool {
        if revision != self.revision {
            debug!(
                field = field.as_str(),
                revision,
                current = self.revision,
                "stale field edit dropped"
            );
            return false;
        }
        self.edit_field(field, value);
        true
    }

    /// Feeds a whole submitted form through [`Self::edit_field`], one call per
    /// field whose text actually changed.
    pub fn sync_fields(&mut self, incoming: FormFields) {
        for field in TripField::ALL {
            let value = incoming.get(field);
            if self.fields.get(field) != value {
                self.edit_field(field, value);
            }
        }
    }

    /// Loads a trip into the form, discarding whatever was typed before.
    pub fn select_for_edit(&mut self, id: TripId) -> Result<(), AppError> {
        let trip = self.trips.get(id).ok_or(AppError::NotFound)?;
        self.fields = FormFields::from_trip(trip);
        if let FormMode::Editing(previous) = self.mode {
            if previous != id {
                debug!(%previous, %id, "switching edited trip, dropping unsaved input");
            }
        }
        self.mode = FormMode::Editing(id);
        self.revision += 1;
        debug!(%id, "trip selected for edit");
        Ok(())
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        match self.mode {
            FormMode::Editing(id) => self.submit_update(id),
            FormMode::Add => self.submit_add(),
        }
    }

    // The update path has no validation and leaves error messages alone.
    fn submit_update(&mut self, id: TripId) -> SubmitOutcome {
        let fields = std::mem::take(&mut self.fields);
        if self.trips.replace(id, fields).is_some() {
            info!(%id, "trip updated");
        } else {
            warn!(%id, "edited trip no longer in store, dropping update");
        }
        self.mode = FormMode::Add;
        self.revision += 1;
        SubmitOutcome::Updated(id)
    }

    fn submit_add(&mut self) -> SubmitOutcome {
        if let Err(errors) = validate(&self.fields) {
            for field in TripField::ALL {
                let message = errors.get(field);
                if !message.is_empty() {
                    self.errors.set(field, message);
                }
            }
            debug!(?errors, "trip rejected");
            return SubmitOutcome::Rejected;
        }

        let FormFields {
            destination,
            date,
            description,
        } = std::mem::take(&mut self.fields);
        let id = self.trips.append(Trip::new(destination, date, description));
        self.errors.clear();
        self.revision += 1;
        info!(%id, total = self.trips.len(), "trip added");
        SubmitOutcome::Added(id)
    }

    /// Leaves edit mode without saving. No-op in Add mode.
    pub fn cancel_edit(&mut self) {
        if let FormMode::Editing(id) = self.mode {
            self.reset_to_add();
            debug!(%id, "edit cancelled");
        }
    }

    /// Removes exactly the trip with `id`. Deleting the trip loaded in the
    /// form also resets the form to Add.
    pub fn delete_trip(&mut self, id: TripId) -> Result<Trip, AppError> {
        let removed = self.trips.remove(id).ok_or(AppError::NotFound)?;
        if self.mode == FormMode::Editing(id) {
            self.reset_to_add();
            debug!(%id, "deleted trip was being edited, form reset");
        }
        info!(%id, total = self.trips.len(), "trip deleted");
        Ok(removed)
    }

    fn reset_to_add(&mut self) {
        self.fields.clear();
        self.mode = FormMode::Add;
        self.revision += 1;
    }
}
