use serde::Serialize;

use crate::models::{
    form::FormFields,
    trip::{Trip, TripId},
};

/// Ordered in-memory trip list. Insertion order is display order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TripStore {
    trips: Vec<Trip>,
}

impl TripStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, trip: Trip) -> TripId {
        let id = trip.id;
        self.trips.push(trip);
        id
    }

    pub fn get(&self, id: TripId) -> Option<&Trip> {
        self.trips.iter().find(|trip| trip.id == id)
    }

    /// Overwrites the three text fields of the trip with `id`, keeping its
    /// slot and identity.
    pub fn replace(&mut self, id: TripId, fields: FormFields) -> Option<&Trip> {
        let idx = self.position(id)?;
        let trip = &mut self.trips[idx];
        trip.destination = fields.destination;
        trip.date = fields.date;
        trip.description = fields.description;
        Some(trip)
    }

    pub fn remove(&mut self, id: TripId) -> Option<Trip> {
        let idx = self.position(id)?;
        Some(self.trips.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter()
    }

    pub fn as_slice(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    fn position(&self, id: TripId) -> Option<usize> {
        self.trips.iter().position(|trip| trip.id == id)
    }
}
