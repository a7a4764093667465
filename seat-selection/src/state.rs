//! State and actions of the seat-selection reducer.

use crate::access::SeatSelectionAccess;
use crate::booking::AssembleError;
use crate::inventory::{FetchError, SeatInventory};
use crate::passenger::PassengerForm;
use crate::selection::SelectionSet;
use crate::types::{Money, PassengerField, Seat, SeatNumber, TripId};
use crate::validation::{ErrorMap, SubmitRejection};
use chrono::{DateTime, Utc};

/// Actions for the seat-selection reducer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeatSelectionAction {
    // Commands
    /// Switch to another trip, resetting everything, and load its seats
    OpenTrip {
        /// Trip to show
        trip_id: TripId,
    },
    /// Reload the current trip's seats
    LoadSeats,
    /// Click on a seat
    ToggleSeat {
        /// Seat clicked
        seat_number: SeatNumber,
    },
    /// Type into one passenger field
    EditPassengerField {
        /// Passenger (selected seat) index
        index: usize,
        /// Field edited
        field: PassengerField,
        /// New value
        value: String,
    },
    /// Try to book the selected seats
    Submit,

    // Events
    /// Seat lookup answered
    SeatsLoaded {
        /// Trip the seats belong to
        trip_id: TripId,
        /// Load that produced this answer
        generation: u64,
        /// Seats, in service order
        seats: Vec<Seat>,
    },
    /// Seat lookup failed
    SeatsLoadFailed {
        /// Trip that was requested
        trip_id: TripId,
        /// Load that failed
        generation: u64,
        /// Failure
        error: FetchError,
    },
}

impl SeatSelectionAction {
    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenTrip { .. } => "OpenTrip",
            Self::LoadSeats => "LoadSeats",
            Self::ToggleSeat { .. } => "ToggleSeat",
            Self::EditPassengerField { .. } => "EditPassengerField",
            Self::Submit => "Submit",
            Self::SeatsLoaded { .. } => "SeatsLoaded",
            Self::SeatsLoadFailed { .. } => "SeatsLoadFailed",
        }
    }
}

/// Result of the most recent submit attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Booking passed to the payment step
    HandedOff {
        /// Seats booked
        seat_count: usize,
        /// Amount due
        total_price: Money,
    },
    /// Attempt refused; the user may correct and retry
    Rejected(SubmitRejection),
    /// Validation passed but no payload could be built
    ///
    /// Only possible if the selection outlived its inventory, which
    /// `SeatsLoaded` reconciliation rules out.
    AssemblyFailed(AssembleError),
}

/// How a seat is drawn on the seat map
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeatDisplay {
    /// Free to pick
    Available,
    /// Picked by this user
    Selected,
    /// Taken
    Booked,
}

/// State of one seat-selection view
///
/// Only the reducer mutates it. The passenger form always has one record per
/// selected seat, and no booked seat is ever selected.
#[derive(Clone, Debug)]
pub struct SeatSelectionState {
    pub(crate) access: SeatSelectionAccess,
    pub(crate) trip_id: TripId,
    pub(crate) inventory: SeatInventory,
    pub(crate) selection: SelectionSet,
    pub(crate) passengers: PassengerForm,
    pub(crate) errors: ErrorMap,
    pub(crate) loading: bool,
    pub(crate) load_generation: u64,
    pub(crate) last_loaded_at: Option<DateTime<Utc>>,
    pub(crate) last_fetch_error: Option<FetchError>,
    pub(crate) last_submit: Option<SubmitOutcome>,
}

impl SeatSelectionState {
    /// Empty view of a trip for an admitted session
    ///
    /// Nothing is loaded until `OpenTrip` or `LoadSeats` is sent.
    #[must_use]
    pub fn new(access: SeatSelectionAccess, trip_id: TripId) -> Self {
        Self {
            access,
            trip_id,
            inventory: SeatInventory::default(),
            selection: SelectionSet::new(),
            passengers: PassengerForm::new(),
            errors: ErrorMap::new(),
            loading: false,
            load_generation: 0,
            last_loaded_at: None,
            last_fetch_error: None,
            last_submit: None,
        }
    }

    /// Drop everything belonging to the previous trip
    ///
    /// The load generation carries over so loads started before the reset
    /// stay outdated.
    pub(crate) fn reset_for(&mut self, trip_id: TripId) {
        let generation = self.load_generation;
        *self = Self::new(self.access.clone(), trip_id);
        self.load_generation = generation;
    }

    /// Start a load; only its completion will be applied
    pub(crate) fn begin_load(&mut self) -> u64 {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.loading = true;
        self.load_generation
    }

    /// Realign the passenger form after the selection changed
    pub(crate) fn reprovision_passengers(&mut self) {
        let count = self.selection.len();
        self.passengers.reprovision(count);
        self.errors.truncate(count);
    }

    /// Session admitted to this view
    #[must_use]
    pub const fn access(&self) -> &SeatSelectionAccess {
        &self.access
    }

    /// Trip being shown
    #[must_use]
    pub const fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    /// Seats of the trip as last loaded
    #[must_use]
    pub const fn inventory(&self) -> &SeatInventory {
        &self.inventory
    }

    /// Seats picked, in pick order
    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Passenger records, one per selected seat
    #[must_use]
    pub const fn passengers(&self) -> &PassengerForm {
        &self.passengers
    }

    /// Field errors recorded while editing
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Message shown under one passenger field, if any
    #[must_use]
    pub fn field_error(&self, index: usize, field: PassengerField) -> Option<&'static str> {
        self.errors.message(index, field)
    }

    /// Whether a seat load is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Generation of the most recently started load
    ///
    /// Completions carrying any other generation are discarded.
    #[must_use]
    pub const fn load_generation(&self) -> u64 {
        self.load_generation
    }

    /// When the inventory was last loaded
    #[must_use]
    pub const fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }

    /// Failure of the most recent load, cleared by the next success
    #[must_use]
    pub const fn last_fetch_error(&self) -> Option<&FetchError> {
        self.last_fetch_error.as_ref()
    }

    /// Outcome of the most recent submit attempt
    #[must_use]
    pub const fn last_submit(&self) -> Option<&SubmitOutcome> {
        self.last_submit.as_ref()
    }

    /// Running total for the current selection
    #[must_use]
    pub fn running_total(&self) -> Money {
        self.selection.total_price()
    }

    /// Every inventory seat with how it should be drawn
    #[must_use]
    pub fn seat_view(&self) -> Vec<(&Seat, SeatDisplay)> {
        self.inventory
            .seats()
            .iter()
            .map(|seat| {
                let display = if !seat.is_selectable() {
                    SeatDisplay::Booked
                } else if self.selection.contains(&seat.seat_number) {
                    SeatDisplay::Selected
                } else {
                    SeatDisplay::Available
                };
                (seat, display)
            })
            .collect()
    }
}
