//! # Seatflow Testing
//!
//! Testing utilities and helpers for reducers built on `seatflow-core`.
//!
//! This crate provides:
//! - Deterministic clocks
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Effect assertions
//! - [`drain_effects`], which runs an effect tree to completion without a Store
//!
//! ## Example
//!
//! ```ignore
//! use seatflow_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(SeatSelectionReducer::new())
//!     .with_env(test_environment())
//!     .given_state(state_with_inventory())
//!     .when_action(SeatSelectionAction::ToggleSeat { seat_number: "A101".into() })
//!     .then_state(|state| assert_eq!(state.selection().len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use seatflow_core::environment::Clock;


pub use reducer_test::{assertions, drain_effects, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use seatflow_testing::mocks::FixedClock;
    /// use seatflow_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

pub use mocks::{test_clock, FixedClock};
