//! Store slices
//!
//! One slice per resource. Each slice owns its collection inside a
//! [`Tracked`](petshop_core::Tracked) slot and exposes:
//!
//! - a `Fetch` action that begins a request and returns an effect calling
//!   the catalog API,
//! - exactly one completion action per request (`Loaded` or `LoadFailed`),
//!   committed only while its [`RequestId`](petshop_core::RequestId) is
//!   still the latest in flight,
//! - a `Cancel` action dispatched when the consuming view unmounts.

use petshop_api::ApiError;
use petshop_core::environment::Clock;
use petshop_core::{RequestId, Tracked, effect::Effect};
use std::fmt::Display;
use std::future::Future;

/// Declare a slice reducer: a stateless struct generic over the catalog API
macro_rules! slice_reducer {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<A> {
            _api: ::std::marker::PhantomData<fn() -> A>,
        }

        impl<A> $name<A> {
            /// Create a reducer
            #[must_use]
            pub const fn new() -> Self {
                Self { _api: ::std::marker::PhantomData }
            }
        }

        impl<A> Default for $name<A> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<A> Clone for $name<A> {
            fn clone(&self) -> Self {
                Self::new()
            }
        }
    };
}

pub mod animals;
pub mod article;
pub mod articles;
pub mod brands;
pub mod products;
pub mod reviews;

pub use animals::{AnimalsAction, AnimalsReducer, AnimalsState};
pub use article::{ArticleAction, ArticleReducer, ArticleState};
pub use articles::{ArticlesAction, ArticlesReducer, ArticlesState};
pub use brands::{Brand, BrandsAction, BrandsReducer, BrandsState};
pub use products::{ProductsAction, ProductsReducer, ProductsState};
pub use reviews::{ReviewsAction, ReviewsReducer, ReviewsState, SubmitError};

/// Wrap an API call into an effect that always yields one completion action
pub(crate) fn api_effect<Act, T, F, C>(call: F, complete: C) -> Effect<Act>
where
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
    C: FnOnce(Result<T, ApiError>) -> Act + Send + 'static,
    T: Send + 'static,
    Act: Send + 'static,
{
    Effect::Future(Box::pin(async move { Some(complete(call.await)) }))
}

/// Completion handling shared by every fetch slot
///
/// `what` names the resource in log events.
pub(crate) trait FetchSlot<T> {
    /// Commit a fetched value stamped with `clock`, or drop it if stale
    fn commit_loaded(&mut self, request: RequestId, value: T, clock: &dyn Clock, what: &str);

    /// Record a failed fetch, keeping the last committed value, or drop it if stale
    fn commit_failed<E: Display>(&mut self, request: RequestId, error: &E, what: &str);

    /// Drop the fetch in flight, if any
    fn cancel_fetch(&mut self, what: &str);
}

impl<T> FetchSlot<T> for Tracked<T> {
    fn commit_loaded(&mut self, request: RequestId, value: T, clock: &dyn Clock, what: &str) {
        if self.resolve(request, value, Some(clock.now())).is_stale() {
            tracing::debug!(%request, what, "Discarded stale response");
        }
    }

    fn commit_failed<E: Display>(&mut self, request: RequestId, error: &E, what: &str) {
        if self.reject(request, error.to_string()).is_stale() {
            tracing::debug!(%request, what, "Discarded stale failure");
        } else {
            tracing::warn!(%request, what, %error, "Fetch failed");
        }
    }

    fn cancel_fetch(&mut self, what: &str) {
        if let Some(request) = self.cancel() {
            tracing::debug!(%request, what, "Cancelled fetch");
        }
    }
}
