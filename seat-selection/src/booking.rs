//! Booking payload handed to the payment step.

use crate::inventory::SeatInventory;
use crate::passenger::PassengerForm;
use crate::selection::SelectionSet;
use crate::types::{BusId, Money, PassengerRecord, SeatNumber, TripId};
use serde::Serialize;
use thiserror::Error;

/// Errors from assembling a payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// No seat is selected
    #[error("no seats selected")]
    NothingSelected,

    /// Inventory is empty, so there is no bus to book on
    #[error("seat inventory is empty")]
    EmptyInventory,
}

/// Submit-time snapshot of a booking, serialized for the payment view
///
/// Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    trip_id: TripId,
    bus_id: BusId,
    selected_seats: Vec<SeatNumber>,
    passenger_info: Vec<PassengerRecord>,
    total_price: Money,
}

impl BookingPayload {
    /// Build the payload from a validated form
    ///
    /// The bus comes from the first inventory seat and the total from the
    /// first selected seat's price times the seat count.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError`] if nothing is selected or the inventory is
    /// empty.
    pub fn assemble(
        trip_id: &TripId,
        inventory: &SeatInventory,
        selection: &SelectionSet,
        passengers: &PassengerForm,
    ) -> Result<Self, AssembleError> {
        if selection.is_empty() {
            return Err(AssembleError::NothingSelected);
        }
        let bus_id = inventory.bus_id().ok_or(AssembleError::EmptyInventory)?;

        Ok(Self {
            trip_id: trip_id.clone(),
            bus_id: bus_id.clone(),
            selected_seats: selection.seat_numbers(),
            passenger_info: passengers.records().to_vec(),
            total_price: selection.total_price(),
        })
    }

    /// Trip being booked
    #[must_use]
    pub const fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    /// Bus operating the trip
    #[must_use]
    pub const fn bus_id(&self) -> &BusId {
        &self.bus_id
    }

    /// Seat numbers in selection order
    #[must_use]
    pub fn seat_numbers(&self) -> &[SeatNumber] {
        &self.selected_seats
    }

    /// Passenger records aligned with [`seat_numbers`](Self::seat_numbers)
    #[must_use]
    pub fn passengers(&self) -> &[PassengerRecord] {
        &self.passenger_info
    }

    /// Amount due
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{PassengerField, Seat, SeatStatus};

    fn seat(number: &str) -> Seat {
        Seat::new(number, SeatStatus::Available, Money::from_minor(50_000), BusId::Number(12))
    }

    fn booked_pair() -> (SeatInventory, SelectionSet, PassengerForm) {
        let inventory = SeatInventory::from(vec![seat("A101"), seat("A102"), seat("A103")]);
        let mut selection = SelectionSet::new();
        selection.toggle(&seat("A103"));
        selection.toggle(&seat("A101"));
        let mut form = PassengerForm::new();
        form.reprovision(2);
        form.set_field(0, PassengerField::Name, "Jane Roe".into()).unwrap();
        form.set_field(1, PassengerField::Name, "John Roe".into()).unwrap();
        (inventory, selection, form)
    }

    #[test]
    fn assemble_keeps_selection_order_and_totals() {
        let (inventory, selection, form) = booked_pair();

        let payload =
            BookingPayload::assemble(&TripId::new("7"), &inventory, &selection, &form).unwrap();

        assert_eq!(payload.trip_id(), &TripId::new("7"));
        assert_eq!(payload.bus_id(), &BusId::Number(12));
        assert_eq!(
            payload.seat_numbers(),
            &[SeatNumber::from("A103"), SeatNumber::from("A101")]
        );
        assert_eq!(payload.passengers()[0].name, "Jane Roe");
        assert_eq!(payload.total_price(), Money::from_minor(100_000));
    }

    #[test]
    fn assemble_requires_a_selection() {
        let (inventory, _, form) = booked_pair();
        let result =
            BookingPayload::assemble(&TripId::new("7"), &inventory, &SelectionSet::new(), &form);
        assert_eq!(result, Err(AssembleError::NothingSelected));
    }

    #[test]
    fn assemble_requires_inventory() {
        let (_, selection, form) = booked_pair();
        let result =
            BookingPayload::assemble(&TripId::new("7"), &SeatInventory::default(), &selection, &form);
        assert_eq!(result, Err(AssembleError::EmptyInventory));
    }

    #[test]
    fn serializes_for_the_payment_view() {
        let (inventory, selection, form) = booked_pair();
        let payload =
            BookingPayload::assemble(&TripId::new("7"), &inventory, &selection, &form).unwrap();

        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "tripId": "7",
                "busId": 12,
                "selectedSeats": ["A103", "A101"],
                "passengerInfo": [
                    { "name": "Jane Roe", "email": "", "phone": "" },
                    { "name": "John Roe", "email": "", "phone": "" }
                ],
                "totalPrice": 1000
            })
        );
    }
}
