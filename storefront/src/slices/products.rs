//! Products slice: catalog groups and their subcategories for the catalog menu

use crate::env::StorefrontEnvironment;
use crate::slices::{FetchSlot, api_effect};
use petshop_api::{ApiError, CatalogApi, ProductQuery, ProductSummary};
use petshop_core::{RequestId, SmallVec, Tracked, effect::Effect, reducer::Reducer, smallvec};

/// Products slice state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductsState {
    /// Catalog groups of the latest committed fetch
    pub products: Tracked<Vec<ProductSummary>>,
    /// Filters of the latest dispatched fetch
    pub query: ProductQuery,
}

/// Products slice actions
#[derive(Clone, Debug)]
pub enum ProductsAction {
    /// Fetch catalog groups matching the filters
    Fetch(ProductQuery),
    /// A fetch completed
    Loaded {
        /// Request being completed
        request: RequestId,
        /// Catalog groups
        products: Vec<ProductSummary>,
    },
    /// A fetch failed
    LoadFailed {
        /// Request being completed
        request: RequestId,
        /// Failure
        error: ApiError,
    },
    /// Drop the request in flight
    Cancel,
}

slice_reducer! {
    /// Reducer for [`ProductsState`]
    ProductsReducer
}

impl<A> Reducer for ProductsReducer<A>
where
    A: CatalogApi + Clone + 'static,
{
    type State = ProductsState;
    type Action = ProductsAction;
    type Environment = StorefrontEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ProductsAction::Fetch(query) => {
                state.query = query;
                let request = state.products.begin();
                tracing::debug!(%request, ?query, "Fetching catalog groups");

                let api = env.api.clone();
                smallvec![api_effect(
                    async move { api.fetch_products(&query).await },
                    move |result| match result {
                        Ok(products) => ProductsAction::Loaded { request, products },
                        Err(error) => ProductsAction::LoadFailed { request, error },
                    },
                )]
            },

            ProductsAction::Loaded { request, products } => {
                state.products.commit_loaded(request, products, &*env.clock, "catalog groups");
                smallvec![Effect::None]
            },

            ProductsAction::LoadFailed { request, error } => {
                state.products.commit_failed(request, &error, "catalog groups");
                smallvec![Effect::None]
            },

            ProductsAction::Cancel => {
                state.products.cancel_fetch("catalog groups");
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockCatalogApi;
    use petshop_api::Subcategory;
    use petshop_core::RequestStatus;
    use petshop_testing::{collect_actions, test_clock};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_repeated_fetch_replaces_wholesale() {
        let food = ProductSummary {
            id: 1,
            name: "Food".to_string(),
            subcategories: vec![Subcategory {
                id: 10,
                name: "Dry".to_string(),
                discount_subcategory: Some(5),
            }],
        };
        let env = StorefrontEnvironment::new(
            MockCatalogApi::new().with_products(vec![food.clone()]),
            Arc::new(test_clock()),
        );
        let reducer = ProductsReducer::<MockCatalogApi>::new();
        let mut state = ProductsState::default();

        for _ in 0..2 {
            let effects = reducer.reduce(
                &mut state,
                ProductsAction::Fetch(ProductQuery::new().with_animal(1)),
                &env,
            );
            for action in collect_actions(effects).await {
                let _ = reducer.reduce(&mut state, action, &env);
            }
        }

        assert_eq!(state.products.status(), RequestStatus::Succeeded);
        assert_eq!(state.products.value(), &vec![food]);
    }
}
