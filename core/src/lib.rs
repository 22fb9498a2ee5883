//! # Studio Quote Core
//!
//! The abstractions the quotation wizard is written against.
//!
//! Visitor input never touches wizard state directly. It arrives as an
//! action; a [`Reducer`](reducer::Reducer) applies the action to the state and
//! hands back [`Effect`](effect::Effect) values describing any work that must
//! happen outside the reducer, such as posting the quotation or clearing a
//! notice a few seconds later. The runtime crate owns executing them.
//!
//! ```ignore
//! use studio_quote_core::{SmallVec, effect::Effect, reducer::Reducer};
//!
//! impl Reducer for QuotationReducer {
//!     type State = QuotationState;
//!     type Action = QuotationAction;
//!     type Environment = QuotationEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut QuotationState,
//!         action: QuotationAction,
//!         env: &QuotationEnvironment,
//!     ) -> SmallVec<[Effect<QuotationAction>; 4]> {
//!         SmallVec::new()
//!     }
//! }
//! ```

pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// `async_effect!` and `delay!`
pub mod effect_macros;

/// The reducer trait.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// Applies actions to state.
    ///
    /// Implementations must be deterministic given the same state, action and
    /// environment. Anything non-deterministic (network, timers, wall-clock
    /// time) goes through the environment or comes back as an [`Effect`].
    pub trait Reducer {
        /// State owned by the store
        type State;

        /// Inputs: visitor intents and effect feedback
        type Action;

        /// Injected dependencies
        type Environment;

        /// Apply `action` to `state` and describe the follow-up work.
        ///
        /// Returning an empty vector means the action was fully handled in
        /// place. Four inline slots cover every wizard action without
        /// allocating.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Descriptions of work for the runtime to perform.
pub mod effect {
    use futures::future::BoxFuture;
    use std::fmt;
    use std::time::Duration;

    /// Work requested by a reducer.
    ///
    /// An effect is inert until the store executes it. Effects that produce
    /// an action feed it back through the same reducer.
    pub enum Effect<Action> {
        /// Nothing to do
        None,

        /// Start every effect at once
        Parallel(Vec<Effect<Action>>),

        /// Run each effect to completion before starting the next
        Sequential(Vec<Effect<Action>>),

        /// Dispatch `action` after `duration`
        Delay {
            /// Wait before dispatching
            duration: Duration,
            /// Action dispatched when the wait ends
            action: Box<Action>,
        },

        /// Run an async job; `Some(action)` is fed back when it finishes
        Future(BoxFuture<'static, Option<Action>>),
    }

    impl<Action: fmt::Debug> fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::None => f.write_str("Effect::None"),
                Self::Parallel(effects) => f.debug_tuple("Effect::Parallel").field(effects).finish(),
                Self::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Self::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Self::Future(_) => f.write_str("Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Run `effects` concurrently
        #[must_use]
        pub const fn merge(effects: Vec<Self>) -> Self {
            Self::Parallel(effects)
        }

        /// Run `effects` one after another
        #[must_use]
        pub const fn chain(effects: Vec<Self>) -> Self {
            Self::Sequential(effects)
        }

        /// Whether this is [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Self::None)
        }
    }
}

/// Dependencies injected into reducers.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Source of the current time.
    ///
    /// Production code uses [`SystemClock`]; tests pin the time so stamped
    /// values (submission acknowledgments) can be asserted exactly.
    pub trait Clock: Send + Sync {
        /// Current UTC time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
