//! # Seatflow Core
//!
//! Core traits and types for the seat-selection flow.
//!
//! Every interaction with the booking-intake screen (seat click, field edit,
//! submit, inventory fetch completion) is modeled as an action fed into a
//! reducer. The reducer mutates state in place and returns descriptions of
//! side effects; it never performs I/O itself.
//!
//! ## Core Concepts
//!
//! - **State**: Everything the screen knows (inventory, selection, passenger rows, errors)
//! - **Action**: All possible inputs to a reducer (user commands and effect feedback)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected collaborators via traits
//!
//! ## Example
//!
//! ```ignore
//! use seatflow_core::*;
//!
//! impl Reducer for SelectionReducer {
//!     type State = SelectionState;
//!     type Action = SelectionAction;
//!     type Environment = SelectionEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut SelectionState,
//!         action: SelectionAction,
//!         env: &SelectionEnvironment,
//!     ) -> SmallVec<[Effect<SelectionAction>; 4]> {
//!         match action {
//!             SelectionAction::Toggle { seat } => {
//!                 state.selection.toggle(&seat);
//!                 SmallVec::new()
//!             }
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{smallvec, SmallVec};

/// Declarative macros for building effects
pub mod effect_macros;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// Most actions produce at most a handful of effects, so the result
        /// is a `SmallVec` that stays on the stack in the common case.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution); the runtime decides when they run.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Whether this effect does nothing when executed
        ///
        /// Composite effects are inert when all of their children are.
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Parallel(effects) => effects.iter().all(Effect::is_none),
                Effect::Future(_) => false,
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use seatflow_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let before = clock.now();
    /// assert!(clock.now() >= before);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time, for production environments
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;

    #[derive(Debug)]
    enum TestAction {
        Loaded,
    }

    #[test]
    fn none_is_inert() {
        assert!(Effect::<TestAction>::None.is_none());
    }

    #[test]
    fn nested_none_is_inert() {
        let effect = Effect::<TestAction>::Parallel(vec![
            Effect::None,
            Effect::Parallel(vec![Effect::None]),
        ]);
        assert!(effect.is_none());
    }

    #[test]
    fn future_is_not_inert() {
        let effect = Effect::Parallel(vec![
            Effect::None,
            Effect::Future(Box::pin(async { Some(TestAction::Loaded) })),
        ]);
        assert!(!effect.is_none());
    }

    #[test]
    fn debug_hides_future_body() {
        let effect: Effect<TestAction> = Effect::Future(Box::pin(async { None }));
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }
}
