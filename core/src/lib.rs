//! # Petshop Core
//!
//! Building blocks of the storefront store: the [`reducer::Reducer`] trait,
//! [`effect::Effect`] descriptions, the injected [`environment::Clock`], and
//! the [`Tracked`] slot that attaches a [`RequestStatus`] to every fetched
//! value and fences out stale completions.
//!
//! A reducer never performs I/O. It updates its slice and returns effects;
//! the runtime executes them and feeds their output back as new actions.
//!
//! ```ignore
//! use petshop_core::*;
//!
//! impl<A: CatalogApi + Clone + 'static> Reducer for BrandsReducer<A> {
//!     type State = BrandsState;
//!     type Action = BrandsAction;
//!     type Environment = StorefrontEnvironment<A>;
//!
//!     fn reduce(&self, state: &mut BrandsState, action: BrandsAction, env: &Self::Environment)
//!         -> SmallVec<[Effect<BrandsAction>; 4]>
//!     {
//!         match action {
//!             BrandsAction::ClearChosen => {
//!                 state.brands.value_mut().iter_mut().for_each(|b| b.chosen = false);
//!                 smallvec![Effect::None]
//!             }
//!             // ...
//!         }
//!     }
//! }
//! ```

pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

/// Request tracking: status, sequence fencing and cancellation
pub mod request;

pub use request::{Commit, RequestId, RequestStatus, Tracked};

/// State transitions
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// Pure transition `(state, action, environment) -> effects`
    ///
    /// Implementations mutate `state` in place and describe any I/O as
    /// [`Effect`] values. Given the same state, action and environment they
    /// return the same result.
    pub trait Reducer {
        /// Slice state
        type State;

        /// Inputs: user intents and request completions
        type Action;

        /// Injected dependencies
        type Environment;

        /// Apply `action` to `state` and return the effects to run
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Side-effect descriptions
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Work for the runtime to do after a reduction
    ///
    /// Every variant may yield actions that are fed back into the reducer.
    pub enum Effect<Action> {
        /// Nothing
        None,

        /// Run all children concurrently
        Parallel(Vec<Effect<Action>>),

        /// Run children one after another, each to completion
        Sequential(Vec<Effect<Action>>),

        /// Dispatch `action` after `duration`
        Delay {
            /// Wait before dispatching
            duration: Duration,
            /// Action to dispatch
            action: Box<Action>,
        },

        /// Async computation, typically an API call; `Some` output is fed back
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::None => f.write_str("Effect::None"),
                Self::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Self::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Self::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Self::Future(_) => f.write_str("Effect::Future(..)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Run `effects` concurrently
        #[must_use]
        pub const fn merge(effects: Vec<Self>) -> Self {
            Self::Parallel(effects)
        }

        /// Run `effects` in order
        #[must_use]
        pub const fn chain(effects: Vec<Self>) -> Self {
            Self::Sequential(effects)
        }

        /// Transform the actions this effect produces
        ///
        /// Lifts a slice reducer's effects into the application's action
        /// type, e.g. `effect.map(AppAction::Brands)`.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            Action: Send + 'static,
            B: Send + 'static,
            F: Fn(Action) -> B + Clone + Send + Sync + 'static,
        {
            match self {
                Self::None => Effect::None,
                Self::Parallel(effects) => {
                    Effect::Parallel(effects.into_iter().map(|e| e.map(f.clone())).collect())
                },
                Self::Sequential(effects) => {
                    Effect::Sequential(effects.into_iter().map(|e| e.map(f.clone())).collect())
                },
                Self::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(f(*action)),
                },
                Self::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
            }
        }
    }
}

/// Injected dependencies shared by reducers
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Source of "now", used to stamp committed fetches
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
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
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Inner {
        Ping,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Outer {
        Wrapped(Inner),
    }

    #[tokio::test]
    async fn test_map_future_wraps_produced_action() {
        let effect: Effect<Inner> = Effect::Future(Box::pin(async { Some(Inner::Ping) }));
        let Effect::Future(fut) = effect.map(Outer::Wrapped) else {
            unreachable!("map keeps the variant");
        };
        assert_eq!(fut.await, Some(Outer::Wrapped(Inner::Ping)));
    }

    #[tokio::test]
    async fn test_map_future_keeps_none() {
        let effect: Effect<Inner> = Effect::Future(Box::pin(async { None }));
        let Effect::Future(fut) = effect.map(Outer::Wrapped) else {
            unreachable!("map keeps the variant");
        };
        assert_eq!(fut.await, None);
    }

    #[test]
    fn test_map_delay_and_nested() {
        let effect = Effect::Parallel(vec![
            Effect::None,
            Effect::Delay {
                duration: Duration::from_millis(5),
                action: Box::new(Inner::Ping),
            },
        ]);

        match effect.map(Outer::Wrapped) {
            Effect::Parallel(effects) => {
                assert_eq!(effects.len(), 2);
                assert!(matches!(effects[0], Effect::None));
                match &effects[1] {
                    Effect::Delay { duration, action } => {
                        assert_eq!(*duration, Duration::from_millis(5));
                        assert_eq!(**action, Outer::Wrapped(Inner::Ping));
                    },
                    other => unreachable!("unexpected effect {other:?}"),
                }
            },
            other => unreachable!("unexpected effect {other:?}"),
        }
    }
}
