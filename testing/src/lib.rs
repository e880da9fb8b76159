//! # Showtime Testing
//!
//! Testing utilities for reducers and the effects they return.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Effect assertions and an effect runner that resolves `Future` effects
//!   into the actions they would feed back
//! - Deterministic clocks
//!
//! ## Example
//!
//! ```ignore
//! use showtime_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(FormReducer::new())
//!     .with_env(test_environment())
//!     .given_state(FormState::new(&session))
//!     .when_action(FormAction::Submit)
//!     .then_state(|state| assert!(!state.is_valid()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use showtime_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of core environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use showtime_testing::mocks::FixedClock;
    /// use showtime_core::environment::Clock;
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

/// Effect execution helpers for reducer tests
pub mod effects {
    use futures::future::{BoxFuture, join_all};
    use showtime_core::effect::Effect;

    /// Run every `Future` effect and collect the actions they produce
    ///
    /// Effects are resolved concurrently; the returned actions keep the order
    /// in which the effects appear (depth first through `Parallel`). Produced
    /// actions are NOT fed back into any reducer, which lets a test inspect
    /// each step of a workflow on its own.
    pub async fn collect_actions<A, I>(effects: I) -> Vec<A>
    where
        A: Send + 'static,
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut futures = Vec::new();
        for effect in effects {
            flatten(effect, &mut futures);
        }

        join_all(futures).await.into_iter().flatten().collect()
    }

    fn flatten<A: Send + 'static>(effect: Effect<A>, out: &mut Vec<BoxFuture<'static, Option<A>>>) {
        match effect {
            Effect::None => {},
            Effect::Parallel(effects) => {
                for effect in effects {
                    flatten(effect, out);
                }
            },
            Effect::Future(fut) => out.push(fut),
        }
    }
}

pub use mocks::{FixedClock, test_clock};
