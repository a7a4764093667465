//! Reducer for the seat-selection view.
//!
//! Seat clicks, passenger edits and submits are handled synchronously
//! against state. Seat loads, notifications and the payment handoff are
//! returned as effects for the store to run.

use crate::booking::BookingPayload;
use crate::collaborators::{Notification, Notifier, PaymentHandoff};
use crate::inventory::{SeatInventory, SeatLookup};
use crate::state::{SeatSelectionAction, SeatSelectionState, SubmitOutcome};
use crate::types::TripId;
use crate::validation::{validate_all, SubmitRejection};
use seatflow_core::{
    async_effect, effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec,
};
use std::sync::Arc;

/// Shown when the seat list cannot be loaded
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch seat data!";

/// Environment dependencies for the seat-selection reducer
#[derive(Clone)]
pub struct SeatSelectionEnvironment {
    /// Clock for load timestamps
    pub clock: Arc<dyn Clock>,
    /// Seat lookup service
    pub seat_lookup: Arc<dyn SeatLookup>,
    /// User notifications
    pub notifier: Arc<dyn Notifier>,
    /// Payment step
    pub payment_handoff: Arc<dyn PaymentHandoff>,
}

impl SeatSelectionEnvironment {
    /// Creates a new `SeatSelectionEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        seat_lookup: Arc<dyn SeatLookup>,
        notifier: Arc<dyn Notifier>,
        payment_handoff: Arc<dyn PaymentHandoff>,
    ) -> Self {
        Self {
            clock,
            seat_lookup,
            notifier,
            payment_handoff,
        }
    }
}

/// Reducer for the seat-selection view
#[derive(Clone, Debug)]
pub struct SeatSelectionReducer;

impl SeatSelectionReducer {
    /// Creates a new `SeatSelectionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    // ========================================================================
    // Effects
    // ========================================================================

    fn load_seats(
        state: &mut SeatSelectionState,
        env: &SeatSelectionEnvironment,
    ) -> Effect<SeatSelectionAction> {
        let generation = state.begin_load();
        let trip_id = state.trip_id.clone();
        let lookup = Arc::clone(&env.seat_lookup);
        tracing::debug!(%trip_id, generation, "Loading seats");
        async_effect! {
            match lookup.load(&trip_id).await {
                Ok(seats) => Some(SeatSelectionAction::SeatsLoaded { trip_id, generation, seats }),
                Err(error) => Some(SeatSelectionAction::SeatsLoadFailed { trip_id, generation, error }),
            }
        }
    }

    /// Whether a load completion belongs to the most recent load of this trip
    fn is_current_load(state: &SeatSelectionState, trip_id: &TripId, generation: u64) -> bool {
        if *trip_id != state.trip_id {
            tracing::debug!(%trip_id, current = %state.trip_id, "Ignoring load of a previous trip");
            return false;
        }
        if generation != state.load_generation {
            tracing::debug!(
                %trip_id,
                generation,
                current = state.load_generation,
                "Ignoring load superseded by a newer one"
            );
            return false;
        }
        true
    }

    fn notify(
        notification: Notification,
        env: &SeatSelectionEnvironment,
    ) -> Effect<SeatSelectionAction> {
        let notifier = Arc::clone(&env.notifier);
        async_effect! {
            notifier.notify(notification);
            None
        }
    }

    fn hand_off(payload: BookingPayload, env: &SeatSelectionEnvironment) -> Effect<SeatSelectionAction> {
        let handoff = Arc::clone(&env.payment_handoff);
        async_effect! {
            handoff.hand_off(payload);
            None
        }
    }

    // ========================================================================
    // Submit
    // ========================================================================

    fn submit(
        state: &mut SeatSelectionState,
        env: &SeatSelectionEnvironment,
    ) -> SmallVec<[Effect<SeatSelectionAction>; 4]> {
        if state.selection.is_empty() {
            return Self::reject(state, SubmitRejection::NothingSelected, env);
        }

        if let Err(rejection) = validate_all(&state.passengers, &state.errors) {
            return Self::reject(state, rejection, env);
        }

        match BookingPayload::assemble(
            &state.trip_id,
            &state.inventory,
            &state.selection,
            &state.passengers,
        ) {
            Ok(payload) => {
                let seat_count = payload.seat_numbers().len();
                let total_price = payload.total_price();
                tracing::info!(
                    trip_id = %state.trip_id,
                    seats = seat_count,
                    total = %total_price,
                    "Handing booking off to payment"
                );
                metrics::counter!("seat_selection.submit", "outcome" => "handed_off").increment(1);

                state.errors.clear();
                state.selection.clear();
                state.reprovision_passengers();
                state.last_submit = Some(SubmitOutcome::HandedOff {
                    seat_count,
                    total_price,
                });

                smallvec![Self::hand_off(payload, env)]
            },
            Err(error) => {
                tracing::error!(%error, trip_id = %state.trip_id, "Validated booking could not be assembled");
                metrics::counter!("seat_selection.submit", "outcome" => "assembly_failed").increment(1);
                state.last_submit = Some(SubmitOutcome::AssemblyFailed(error));
                SmallVec::new()
            },
        }
    }

    fn reject(
        state: &mut SeatSelectionState,
        rejection: SubmitRejection,
        env: &SeatSelectionEnvironment,
    ) -> SmallVec<[Effect<SeatSelectionAction>; 4]> {
        let (outcome, effects): (&'static str, SmallVec<[Effect<SeatSelectionAction>; 4]>) =
            match &rejection {
                SubmitRejection::NothingSelected => {
                    tracing::debug!("Submit with no seats selected");
                    ("nothing_selected", SmallVec::new())
                },
                SubmitRejection::Incomplete => {
                    tracing::info!("Submit blocked: passenger details incomplete");
                    (
                        "incomplete",
                        smallvec![Self::notify(Notification::error(rejection.to_string()), env)],
                    )
                },
                SubmitRejection::UncorrectedErrors { indices } => {
                    tracing::warn!(?indices, "Submit blocked: passenger fields still in error");
                    (
                        "uncorrected_errors",
                        smallvec![Self::notify(Notification::warning(rejection.to_string()), env)],
                    )
                },
            };

        metrics::counter!("seat_selection.submit", "outcome" => outcome).increment(1);
        state.last_submit = Some(SubmitOutcome::Rejected(rejection));
        effects
    }
}

impl Default for SeatSelectionReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for SeatSelectionReducer {
    type State = SeatSelectionState;
    type Action = SeatSelectionAction;
    type Environment = SeatSelectionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(action = action.name(), trip_id = %state.trip_id, "Reducing");

        match action {
            // ========== Commands ==========
            SeatSelectionAction::OpenTrip { trip_id } => {
                tracing::info!(%trip_id, "Opening trip");
                state.reset_for(trip_id);
                smallvec![Self::load_seats(state, env)]
            },

            SeatSelectionAction::LoadSeats => smallvec![Self::load_seats(state, env)],

            SeatSelectionAction::ToggleSeat { seat_number } => {
                let Some(seat) = state.inventory.find(&seat_number) else {
                    tracing::debug!(%seat_number, "Ignoring click on a seat not in the inventory");
                    return SmallVec::new();
                };

                let outcome = state.selection.toggle(seat);
                tracing::debug!(%seat_number, ?outcome, "Seat toggled");
                if outcome.changed() {
                    state.reprovision_passengers();
                }
                SmallVec::new()
            },

            SeatSelectionAction::EditPassengerField {
                index,
                field,
                value,
            } => {
                if let Err(error) = state.passengers.set_field(index, field, value.clone()) {
                    tracing::error!(%error, %field, "Dropping passenger edit");
                    return SmallVec::new();
                }
                state.errors.on_field_edit(index, field, &value);
                SmallVec::new()
            },

            SeatSelectionAction::Submit => Self::submit(state, env),

            // ========== Events ==========
            SeatSelectionAction::SeatsLoaded {
                trip_id,
                generation,
                seats,
            } => {
                if !Self::is_current_load(state, &trip_id, generation) {
                    return SmallVec::new();
                }

                tracing::info!(%trip_id, seats = seats.len(), "Seats loaded");
                metrics::counter!("seat_selection.inventory.loaded").increment(1);

                state.loading = false;
                state.last_loaded_at = Some(env.clock.now());
                state.last_fetch_error = None;
                state.inventory = SeatInventory::from(seats);

                if state.selection.reconcile(&state.inventory) {
                    tracing::warn!(%trip_id, "Selected seats were taken meanwhile; passenger details reset");
                    state.reprovision_passengers();
                }
                SmallVec::new()
            },

            SeatSelectionAction::SeatsLoadFailed {
                trip_id,
                generation,
                error,
            } => {
                if !Self::is_current_load(state, &trip_id, generation) {
                    return SmallVec::new();
                }

                tracing::warn!(%trip_id, %error, "Seat lookup failed");
                metrics::counter!("seat_selection.inventory.failed").increment(1);

                state.loading = false;
                state.last_fetch_error = Some(error);
                smallvec![Self::notify(Notification::error(FETCH_FAILED_MESSAGE), env)]
            },
        }
    }
}
