//! # Petshop Testing
//!
//! Shared test tooling for the storefront crates:
//! - [`FixedClock`] and [`test_clock`] so that commit timestamps are stable
//! - [`ReducerTest`], a Given-When-Then builder for slice reducers
//! - [`collect_actions`], which drives effect descriptions without a store
//!
//! ```ignore
//! use petshop_testing::{collect_actions, test_clock};
//!
//! #[tokio::test]
//! async fn test_brand_fetch() {
//!     let env = StorefrontEnvironment::new(MockCatalogApi::new(), Arc::new(test_clock()));
//!     let mut state = BrandsState::default();
//!
//!     let effects = BrandsReducer::new().reduce(
//!         &mut state,
//!         BrandsAction::Fetch(BrandQuery::default()),
//!         &env,
//!     );
//!
//!     let actions = collect_actions(effects).await;
//!     assert!(matches!(actions.as_slice(), [BrandsAction::Loaded { .. }]));
//! }
//! ```

/// Reducer test builder
pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Deterministic clocks
pub mod clock {
    use chrono::{DateTime, Utc};
    use petshop_core::environment::Clock;

    /// 2025-01-01T00:00:00Z
    const TEST_EPOCH_SECONDS: i64 = 1_735_689_600;

    /// A [`Clock`] frozen at one instant
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use petshop_core::environment::Clock;
    /// use petshop_testing::FixedClock;
    ///
    /// let at = Utc::now() - Duration::days(1);
    /// let clock = FixedClock::new(at);
    /// assert_eq!(clock.now(), at);
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixedClock {
        at: DateTime<Utc>,
    }

    impl FixedClock {
        /// Freeze at `at`
        #[must_use]
        pub const fn new(at: DateTime<Utc>) -> Self {
            Self { at }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.at
        }
    }

    /// Clock frozen at 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::from_timestamp(TEST_EPOCH_SECONDS, 0).unwrap_or_default())
    }
}

/// Running effects outside of a store
pub mod helpers {
    use futures::future::join_all;
    use petshop_core::effect::Effect;
    use std::future::Future;
    use std::pin::Pin;

    /// Execute one effect description and return the actions it produces
    ///
    /// `Parallel` children run concurrently and their actions are returned
    /// in declaration order; `Sequential` children run one after another.
    /// Produced actions are NOT fed back into any reducer.
    pub fn run_effect<A>(effect: Effect<A>) -> Pin<Box<dyn Future<Output = Vec<A>> + Send>>
    where
        A: Send + 'static,
    {
        Box::pin(async move {
            match effect {
                Effect::None => Vec::new(),
                Effect::Future(fut) => fut.await.into_iter().collect(),
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    vec![*action]
                },
                Effect::Parallel(effects) => join_all(effects.into_iter().map(run_effect))
                    .await
                    .into_iter()
                    .flatten()
                    .collect(),
                Effect::Sequential(effects) => {
                    let mut actions = Vec::new();
                    for effect in effects {
                        actions.extend(run_effect(effect).await);
                    }
                    actions
                },
            }
        })
    }

    /// Execute every effect returned by a reducer and collect the produced actions
    pub async fn collect_actions<A, I>(effects: I) -> Vec<A>
    where
        A: Send + 'static,
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut actions = Vec::new();
        for effect in effects {
            actions.extend(run_effect(effect).await);
        }
        actions
    }

    /// Install a test-friendly tracing subscriber
    ///
    /// Honours `RUST_LOG`; repeated calls are no-ops.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

pub use clock::{FixedClock, test_clock};
pub use helpers::{collect_actions, init_test_tracing, run_effect};
