//! Property tests for seat toggling and passenger form alignment.

#![allow(clippy::expect_used, clippy::unwrap_used)] // Test code can use unwrap/expect

use proptest::prelude::*;
use seat_selection::{
    BusId, GuardPolicy, Money, Role, Seat, SeatInventory, SeatSelectionAction,
    SeatSelectionEnvironment, SeatSelectionReducer, SeatSelectionState, SeatStatus, SelectionSet,
    Session, TripId,
    mocks::{InMemorySeatLookup, RecordingNotifier, RecordingPaymentHandoff},
};
use seatflow_core::reducer::Reducer;
use seatflow_testing::test_clock;
use std::sync::Arc;

const POOL: usize = 8;

fn pool(booked: &[bool]) -> Vec<Seat> {
    booked
        .iter()
        .enumerate()
        .map(|(i, booked)| {
            let status = if *booked {
                SeatStatus::Booked
            } else {
                SeatStatus::Available
            };
            Seat::new(format!("S{i}"), status, Money::from_minor(75_000), BusId::Number(1))
        })
        .collect()
}

fn selection_after(seats: &[Seat], clicks: &[usize]) -> SelectionSet {
    let mut selection = SelectionSet::new();
    for click in clicks {
        selection.toggle(&seats[*click]);
    }
    selection
}

fn environment() -> SeatSelectionEnvironment {
    SeatSelectionEnvironment::new(
        Arc::new(test_clock()),
        InMemorySeatLookup::shared(),
        Arc::new(RecordingNotifier::new()),
        Arc::new(RecordingPaymentHandoff::new()),
    )
}

fn state_with(seats: Vec<Seat>, env: &SeatSelectionEnvironment) -> SeatSelectionState {
    let access = GuardPolicy::default()
        .authorize(&Session::signed_in("prop", Role::Customer))
        .unwrap();
    let trip_id = TripId::new("P-1");
    let mut state = SeatSelectionState::new(access, trip_id.clone());
    let generation = state.load_generation();
    SeatSelectionReducer::new().reduce(
        &mut state,
        SeatSelectionAction::SeatsLoaded { trip_id, generation, seats },
        env,
    );
    state
}

fn booked_flags() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), POOL)
}

fn clicks() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..POOL, 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn select_then_deselect_restores_selection(
        booked in booked_flags(),
        history in clicks(),
        target in 0..POOL,
    ) {
        let seats = pool(&booked);
        let seat = &seats[target];
        prop_assume!(seat.is_selectable());

        let before = selection_after(&seats, &history);
        prop_assume!(!before.contains(&seat.seat_number));

        let mut after = before.clone();
        after.toggle(seat);
        after.toggle(seat);

        prop_assert_eq!(after, before);
    }

    #[test]
    fn booked_seats_never_change_selection(
        booked in booked_flags(),
        history in clicks(),
        target in 0..POOL,
    ) {
        let mut seats = pool(&booked);
        seats[target].status = SeatStatus::Booked;

        let before = selection_after(&seats, &history);
        let mut after = before.clone();
        after.toggle(&seats[target]);

        prop_assert_eq!(&after, &before);
        prop_assert!(after.seats().iter().all(Seat::is_selectable));
    }

    #[test]
    fn passenger_form_tracks_selection_length(
        booked in booked_flags(),
        history in clicks(),
    ) {
        let env = environment();
        let seats = pool(&booked);
        let mut state = state_with(seats.clone(), &env);
        let reducer = SeatSelectionReducer::new();

        for click in history {
            reducer.reduce(
                &mut state,
                SeatSelectionAction::ToggleSeat { seat_number: seats[click].seat_number.clone() },
                &env,
            );
            prop_assert_eq!(state.passengers().len(), state.selection().len());
            prop_assert!(state.selection().seats().iter().all(Seat::is_selectable));
        }
    }

    #[test]
    fn refetch_keeps_form_aligned(
        first in booked_flags(),
        second in booked_flags(),
        history in clicks(),
    ) {
        let env = environment();
        let seats = pool(&first);
        let mut state = state_with(seats.clone(), &env);
        let reducer = SeatSelectionReducer::new();
        for click in history {
            reducer.reduce(
                &mut state,
                SeatSelectionAction::ToggleSeat { seat_number: seats[click].seat_number.clone() },
                &env,
            );
        }

        let refreshed = pool(&second);
        let generation = state.load_generation();
        reducer.reduce(
            &mut state,
            SeatSelectionAction::SeatsLoaded {
                trip_id: TripId::new("P-1"),
                generation,
                seats: refreshed.clone(),
            },
            &env,
        );

        let inventory = SeatInventory::from(refreshed);
        prop_assert_eq!(state.passengers().len(), state.selection().len());
        for seat in state.selection().seats() {
            let current = inventory.find(&seat.seat_number).unwrap();
            prop_assert!(current.is_selectable());
        }
    }
}
