//! Injected dependencies for storefront reducers

use petshop_api::CatalogApi;
use petshop_core::environment::{Clock, SystemClock};
use std::sync::Arc;

/// Environment shared by every slice reducer
///
/// Generic over the catalog API so tests can plug in
/// [`MockCatalogApi`](crate::mocks::MockCatalogApi).
pub struct StorefrontEnvironment<A> {
    /// Catalog API
    pub api: A,
    /// Clock used to stamp committed fetches
    pub clock: Arc<dyn Clock>,
}

impl<A: CatalogApi> StorefrontEnvironment<A> {
    /// Create an environment
    #[must_use]
    pub fn new(api: A, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }

    /// Environment backed by the system clock
    #[must_use]
    pub fn live(api: A) -> Self {
        Self::new(api, Arc::new(SystemClock))
    }
}

impl<A: Clone> Clone for StorefrontEnvironment<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A: std::fmt::Debug> std::fmt::Debug for StorefrontEnvironment<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontEnvironment")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}
