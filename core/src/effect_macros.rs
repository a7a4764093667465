//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block is wrapped in `async move`, so captured collaborators must be
/// owned (typically an `Arc` cloned out of the environment beforehand).
///
/// # Example
///
/// ```rust,ignore
/// use seatflow_core::async_effect;
///
/// let lookup = Arc::clone(&env.seat_lookup);
/// async_effect! {
///     match lookup.load(&trip_id).await {
///         Ok(seats) => Some(SeatSelectionAction::SeatsLoaded { trip_id, generation, seats }),
///         Err(error) => Some(SeatSelectionAction::SeatsLoadFailed { trip_id, generation, error }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
