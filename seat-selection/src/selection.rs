//! The set of seats the customer has picked.

use crate::inventory::SeatInventory;
use crate::types::{Money, Seat, SeatNumber};

/// What a toggle did to the selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Seat was appended
    Selected,
    /// Seat was removed
    Deselected,
    /// Seat is booked; nothing changed
    Ignored,
}

impl ToggleOutcome {
    /// Whether the selection changed
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Ordered set of selected seats, keyed by seat number
///
/// Seats appear in the order they were picked. A seat number occurs at most
/// once and booked seats never enter the set. [`toggle`](Self::toggle) is
/// the only way to add or remove a seat; there is no index-based mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    seats: Vec<Seat>,
}

impl SelectionSet {
    /// Creates an empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self { seats: Vec::new() }
    }

    /// Flip a seat's membership
    ///
    /// Booked seats are ignored. A seat already present (by seat number) is
    /// removed; otherwise it is appended at the end.
    pub fn toggle(&mut self, seat: &Seat) -> ToggleOutcome {
        if !seat.is_selectable() {
            return ToggleOutcome::Ignored;
        }

        if let Some(position) = self.position(&seat.seat_number) {
            self.seats.remove(position);
            ToggleOutcome::Deselected
        } else {
            self.seats.push(seat.clone());
            ToggleOutcome::Selected
        }
    }

    /// Drop seats that are no longer selectable in a freshly loaded inventory
    ///
    /// Surviving seats take the inventory's current record. Returns `true`
    /// if any seat was dropped.
    pub fn reconcile(&mut self, inventory: &SeatInventory) -> bool {
        let before = self.seats.len();
        self.seats = self
            .seats
            .iter()
            .filter_map(|seat| inventory.find(&seat.seat_number))
            .filter(|seat| seat.is_selectable())
            .cloned()
            .collect();
        self.seats.len() != before
    }

    /// Remove every seat
    pub fn clear(&mut self) {
        self.seats.clear();
    }

    /// Whether the seat number is selected
    #[must_use]
    pub fn contains(&self, seat_number: &SeatNumber) -> bool {
        self.position(seat_number).is_some()
    }

    /// Number of selected seats
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Selected seats in pick order
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Seat numbers in pick order
    #[must_use]
    pub fn seat_numbers(&self) -> Vec<SeatNumber> {
        self.seats.iter().map(|seat| seat.seat_number.clone()).collect()
    }

    /// First seat picked
    #[must_use]
    pub fn first(&self) -> Option<&Seat> {
        self.seats.first()
    }

    /// Seat count times the first seat's price; zero when empty
    #[must_use]
    pub fn total_price(&self) -> Money {
        self.first()
            .map_or(Money::ZERO, |seat| seat.price().times(self.seats.len()))
    }

    fn position(&self, seat_number: &SeatNumber) -> Option<usize> {
        self.seats
            .iter()
            .position(|seat| &seat.seat_number == seat_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BusId, SeatStatus};

    fn seat(number: &str, status: SeatStatus) -> Seat {
        Seat::new(number, status, Money::from_minor(50_000), BusId::Number(12))
    }

    #[test]
    fn toggle_appends_then_removes() {
        let mut selection = SelectionSet::new();

        assert_eq!(selection.toggle(&seat("A101", SeatStatus::Available)), ToggleOutcome::Selected);
        assert_eq!(selection.toggle(&seat("A103", SeatStatus::Available)), ToggleOutcome::Selected);
        assert_eq!(
            selection.seat_numbers(),
            vec![SeatNumber::from("A101"), SeatNumber::from("A103")]
        );

        assert_eq!(selection.toggle(&seat("A101", SeatStatus::Available)), ToggleOutcome::Deselected);
        assert_eq!(selection.seat_numbers(), vec![SeatNumber::from("A103")]);
    }

    #[test]
    fn booked_seats_are_ignored() {
        let mut selection = SelectionSet::new();
        selection.toggle(&seat("A101", SeatStatus::Available));

        let outcome = selection.toggle(&seat("A102", SeatStatus::Booked));

        assert_eq!(outcome, ToggleOutcome::Ignored);
        assert!(!outcome.changed());
        assert_eq!(selection.seat_numbers(), vec![SeatNumber::from("A101")]);
    }

    #[test]
    fn membership_is_by_seat_number() {
        let mut selection = SelectionSet::new();
        selection.toggle(&seat("A101", SeatStatus::Available));

        // Same seat number, different record (price changed on refetch)
        let repriced = Seat::new("A101", SeatStatus::Available, Money::from_minor(1), BusId::Number(12));
        assert_eq!(selection.toggle(&repriced), ToggleOutcome::Deselected);
        assert!(selection.is_empty());
    }

    #[test]
    fn total_uses_first_seat_price() {
        let mut selection = SelectionSet::new();
        assert_eq!(selection.total_price(), Money::ZERO);

        selection.toggle(&seat("A101", SeatStatus::Available));
        selection.toggle(&seat("A103", SeatStatus::Available));

        assert_eq!(selection.total_price(), Money::from_minor(100_000));
    }

    #[test]
    fn reconcile_drops_seats_booked_elsewhere() {
        let mut selection = SelectionSet::new();
        selection.toggle(&seat("A101", SeatStatus::Available));
        selection.toggle(&seat("A103", SeatStatus::Available));

        let refreshed = SeatInventory::from(vec![
            seat("A101", SeatStatus::Booked),
            seat("A103", SeatStatus::Available),
        ]);

        assert!(selection.reconcile(&refreshed));
        assert_eq!(selection.seat_numbers(), vec![SeatNumber::from("A103")]);
        assert!(!selection.reconcile(&refreshed));
    }

    #[test]
    fn reconcile_drops_missing_seats() {
        let mut selection = SelectionSet::new();
        selection.toggle(&seat("A101", SeatStatus::Available));

        assert!(selection.reconcile(&SeatInventory::default()));
        assert!(selection.is_empty());
    }
}
