//! Passenger form: one contact record per selected seat.

use crate::types::{PassengerField, PassengerRecord};
use thiserror::Error;

/// Errors from editing the passenger form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PassengerFormError {
    /// Edit addressed a record that does not exist
    #[error("passenger index {index} out of bounds (form has {len} records)")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of records in the form
        len: usize,
    },
}

/// Positional list of passenger records
///
/// Record `i` belongs to the `i`-th selected seat. Any change to the
/// selection reprovisions the whole form, so entered values never follow a
/// seat around.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassengerForm {
    records: Vec<PassengerRecord>,
}

impl PassengerForm {
    /// Creates an empty form
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Replace the form with `count` empty records
    pub fn reprovision(&mut self, count: usize) {
        self.records = vec![PassengerRecord::default(); count];
    }

    /// Overwrite one field of record `index`
    ///
    /// # Errors
    ///
    /// Returns [`PassengerFormError::IndexOutOfBounds`] if `index` does not
    /// address a record.
    pub fn set_field(
        &mut self,
        index: usize,
        field: PassengerField,
        value: String,
    ) -> Result<(), PassengerFormError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(PassengerFormError::IndexOutOfBounds { index, len })?;
        record.set(field, value);
        Ok(())
    }

    /// Record at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PassengerRecord> {
        self.records.get(index)
    }

    /// All records in seat order
    #[must_use]
    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the form has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
