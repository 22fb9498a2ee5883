//! # Studio Quote Testing
//!
//! Helpers for testing the quotation wizard: a pinned clock, the
//! [`ReducerTest`] harness and effect assertions.
//!
//! ```ignore
//! use studio_quote_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(QuotationReducer::new())
//!     .with_env(test_environment())
//!     .given_state(QuotationState::new())
//!     .when_action(QuotationAction::Next)
//!     .then_state(|s| assert_eq!(s.step(), Step::SharedEvents))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


/// Test doubles for environment traits.
pub mod mocks {
    use chrono::{DateTime, TimeZone, Utc};
    use studio_quote_core::environment::Clock;

    /// Clock stuck at one instant.
    ///
    /// ```
    /// use studio_quote_testing::mocks::FixedClock;
    /// use studio_quote_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Clock that always reports `time`
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

    /// Clock pinned to 2025-01-01 00:00:00 UTC.
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap_or_default())
    }
}

pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use studio_quote_core::environment::Clock;

    #[test]
    fn test_clock_is_pinned() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }
}
