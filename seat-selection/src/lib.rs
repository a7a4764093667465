//! # Seat Selection
//!
//! Seat selection and passenger intake for a bus trip.
//!
//! A customer picks non-booked seats from a trip's seat map, fills in name,
//! email and phone for each seat, and submits. The reducer keeps the
//! selection, the per-seat passenger form and the per-field errors in step,
//! decides when the form may be submitted, and hands the finished
//! [`BookingPayload`] to the payment step.
//!
//! ## Flow
//!
//! 1. Routing authorizes the session with a [`GuardPolicy`] and gets a
//!    [`SeatSelectionAccess`] token.
//! 2. A [`SeatSelectionState`] is built for the trip and `OpenTrip` loads
//!    its seats through a [`SeatLookup`].
//! 3. `ToggleSeat` and `EditPassengerField` update state synchronously.
//! 4. `Submit` validates and hands off, or records why it could not.
//!
//! ## Example
//!
//! ```ignore
//! let access = GuardPolicy::default()
//!     .authorize(&Session::signed_in("jane", Role::Customer))?;
//! let store = Store::new(
//!     SeatSelectionState::new(access, trip_id.clone()),
//!     SeatSelectionReducer::new(),
//!     environment,
//! );
//! store.send_cascading(SeatSelectionAction::OpenTrip { trip_id }).await?.wait().await;
//! ```

pub mod access;
pub mod booking;
pub mod collaborators;
pub mod config;
pub mod inventory;
pub mod mocks;
pub mod passenger;
pub mod reducer;
pub mod selection;
pub mod state;
pub mod types;
pub mod validation;

pub use access::{GuardPolicy, Redirect, Role, SeatSelectionAccess, Session};
pub use booking::{AssembleError, BookingPayload};
pub use collaborators::{Notification, NotificationLevel, Notifier, PaymentHandoff, TracingNotifier};
pub use config::{Config, ConfigError};
pub use inventory::{FetchError, HttpSeatLookup, SeatInventory, SeatLookup};
pub use passenger::{PassengerForm, PassengerFormError};
pub use reducer::{SeatSelectionEnvironment, SeatSelectionReducer};
pub use selection::{SelectionSet, ToggleOutcome};
pub use state::{SeatDisplay, SeatSelectionAction, SeatSelectionState, SubmitOutcome};
pub use types::{BusId, Money, PassengerField, PassengerRecord, Seat, SeatNumber, SeatStatus, TripId};
pub use validation::{ErrorMap, FieldErrors, SubmitRejection};
