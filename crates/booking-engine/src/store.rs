//! Storage boundary for cars and booking definitions.
//!
//! The engine only needs plain records in and out, so storage is a small trait.
//! [`MemoryStore`] keeps everything in a [`Snapshot`] that round-trips through
//! JSON, which is what the CLI persists between runs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BookingError, Result};
use crate::model::{BookingDefinition, Car};

/// Repository of cars and booking definitions.
pub trait BookingStore {
    /// All definitions, or only those for `resource_id` when given.
    fn bookings(&self, resource_id: Option<Uuid>) -> Result<Vec<BookingDefinition>>;

    fn booking(&self, id: Uuid) -> Result<Option<BookingDefinition>>;

    /// Persist new definitions. Either all are stored or none.
    fn insert(&mut self, definitions: Vec<BookingDefinition>) -> Result<()>;

    /// Replace the stored definition with the same id.
    fn update(&mut self, definition: BookingDefinition) -> Result<()>;

    fn cars(&self) -> Result<Vec<Car>>;

    fn car(&self, id: Uuid) -> Result<Option<Car>>;
}

/// Serializable contents of a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub cars: Vec<Car>,
    #[serde(default)]
    pub bookings: Vec<BookingDefinition>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty() && self.bookings.is_empty()
    }
}

/// In-memory store backed by a [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        MemoryStore { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    pub fn add_car(&mut self, car: Car) {
        self.snapshot.cars.push(car);
    }
}

impl BookingStore for MemoryStore {
    fn bookings(&self, resource_id: Option<Uuid>) -> Result<Vec<BookingDefinition>> {
        Ok(self
            .snapshot
            .bookings
            .iter()
            .filter(|b| resource_id.is_none_or(|id| b.resource_id == id))
            .cloned()
            .collect())
    }

    fn booking(&self, id: Uuid) -> Result<Option<BookingDefinition>> {
        Ok(self.snapshot.bookings.iter().find(|b| b.id == id).cloned())
    }

    fn insert(&mut self, definitions: Vec<BookingDefinition>) -> Result<()> {
        let clash = definitions.iter().enumerate().find(|(i, d)| {
            self.snapshot.bookings.iter().any(|b| b.id == d.id)
                || definitions[..*i].iter().any(|b| b.id == d.id)
        });
        if let Some((_, duplicate)) = clash {
            return Err(BookingError::Storage(format!(
                "duplicate booking id {}",
                duplicate.id
            )));
        }

        self.snapshot.bookings.extend(definitions);
        Ok(())
    }

    fn update(&mut self, definition: BookingDefinition) -> Result<()> {
        let slot = self
            .snapshot
            .bookings
            .iter_mut()
            .find(|b| b.id == definition.id)
            .ok_or_else(|| {
                BookingError::Storage(format!("no stored booking with id {}", definition.id))
            })?;
        *slot = definition;
        Ok(())
    }

    fn cars(&self) -> Result<Vec<Car>> {
        Ok(self.snapshot.cars.clone())
    }

    fn car(&self, id: Uuid) -> Result<Option<Car>> {
        Ok(self.snapshot.cars.iter().find(|c| c.id == id).cloned())
    }
}
