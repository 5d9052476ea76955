//! Brands slice: brand filter contents and the client-side selection

use crate::env::StorefrontEnvironment;
use crate::slices::{FetchSlot, api_effect};
use petshop_api::{ApiError, BrandQuery, BrandRecord, CatalogApi};
use petshop_core::{
    RequestId, SmallVec, Tracked, effect::Effect, reducer::Reducer, smallvec,
};

/// A brand as shown in the filter, with its selection flag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Brand {
    /// Brand id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Logo URL
    pub image: Option<String>,
    /// Selected in the filter UI (client-only)
    pub chosen: bool,
}

impl From<BrandRecord> for Brand {
    fn from(record: BrandRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            image: record.image,
            chosen: false,
        }
    }
}

/// Brands slice state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrandsState {
    /// Brands of the latest committed fetch
    pub brands: Tracked<Vec<Brand>>,
    /// Filters of the latest dispatched fetch
    pub query: BrandQuery,
}

/// Brands slice actions
#[derive(Clone, Debug)]
pub enum BrandsAction {
    /// Fetch brands matching the filters
    Fetch(BrandQuery),
    /// A fetch completed
    Loaded {
        /// Request being completed
        request: RequestId,
        /// Wire records
        brands: Vec<BrandRecord>,
    },
    /// A fetch failed
    LoadFailed {
        /// Request being completed
        request: RequestId,
        /// Failure
        error: ApiError,
    },
    /// Flip the selection flag of one brand
    ToggleChosen(u32),
    /// Clear every selection flag
    ClearChosen,
    /// Drop the request in flight
    Cancel,
}

slice_reducer! {
    /// Reducer for [`BrandsState`]
    BrandsReducer
}

impl<A> Reducer for BrandsReducer<A>
where
    A: CatalogApi + Clone + 'static,
{
    type State = BrandsState;
    type Action = BrandsAction;
    type Environment = StorefrontEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BrandsAction::Fetch(query) => {
                state.query = query;
                let request = state.brands.begin();
                tracing::debug!(%request, ?query, "Fetching brands");

                let api = env.api.clone();
                smallvec![api_effect(
                    async move { api.fetch_brands(&query).await },
                    move |result| match result {
                        Ok(brands) => BrandsAction::Loaded { request, brands },
                        Err(error) => BrandsAction::LoadFailed { request, error },
                    },
                )]
            },

            BrandsAction::Loaded { request, brands } => {
                let brands = brands.into_iter().map(Brand::from).collect();
                state.brands.commit_loaded(request, brands, &*env.clock, "brands");
                smallvec![Effect::None]
            },

            BrandsAction::LoadFailed { request, error } => {
                state.brands.commit_failed(request, &error, "brands");
                smallvec![Effect::None]
            },

            BrandsAction::ToggleChosen(id) => {
                if let Some(brand) = state.brands.value_mut().iter_mut().find(|b| b.id == id) {
                    brand.chosen = !brand.chosen;
                }
                smallvec![Effect::None]
            },

            BrandsAction::ClearChosen => {
                for brand in state.brands.value_mut() {
                    brand.chosen = false;
                }
                smallvec![Effect::None]
            },

            BrandsAction::Cancel => {
                state.brands.cancel_fetch("brands");
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockCatalogApi;
    use petshop_core::RequestStatus;
    use petshop_core::environment::Clock;
    use petshop_testing::{ReducerTest, assertions, collect_actions, test_clock};
    use std::sync::Arc;

    fn env(api: MockCatalogApi) -> StorefrontEnvironment<MockCatalogApi> {
        StorefrontEnvironment::new(api, Arc::new(test_clock()))
    }

    fn reducer() -> BrandsReducer<MockCatalogApi> {
        BrandsReducer::new()
    }

    fn record(id: u32, name: &str) -> BrandRecord {
        BrandRecord {
            id,
            name: name.to_string(),
            image: None,
        }
    }

    #[test]
    fn test_fetch_marks_pending() {
        ReducerTest::new(reducer())
            .with_env(env(MockCatalogApi::new()))
            .given_state(BrandsState::default())
            .when_action(BrandsAction::Fetch(BrandQuery::new().with_animal(2)))
            .then_state(|state| {
                assert_eq!(state.brands.status(), RequestStatus::Pending);
                assert_eq!(state.query.animal, Some(2));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[tokio::test]
    async fn test_fetch_effect_calls_api_with_query() {
        let api = MockCatalogApi::new().with_brands(vec![record(1, "Acana")]);
        let env = env(api.clone());
        let mut state = BrandsState::default();
        let query = BrandQuery::new().with_category(5);

        let effects = reducer().reduce(&mut state, BrandsAction::Fetch(query), &env);
        let actions = collect_actions(effects).await;

        assert_eq!(api.brand_queries(), vec![query]);
        assert!(matches!(
            actions.as_slice(),
            [BrandsAction::Loaded { brands, .. }] if brands.len() == 1
        ));
    }

    #[test]
    fn test_loaded_adds_unchosen_flag() {
        let mut state = BrandsState::default();
        let request = state.brands.begin();

        ReducerTest::new(reducer())
            .with_env(env(MockCatalogApi::new()))
            .given_state(state)
            .when_action(BrandsAction::Loaded {
                request,
                brands: vec![record(1, "Acana"), record(2, "Brit")],
            })
            .then_state(|state| {
                assert_eq!(state.brands.status(), RequestStatus::Succeeded);
                assert!(state.brands.value().iter().all(|b| !b.chosen));
                assert_eq!(state.brands.updated_at(), Some(test_clock().now()));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_toggle_and_clear_chosen() {
        let mut state = BrandsState::default();
        let request = state.brands.begin();
        let _ = state
            .brands
            .resolve(request, vec![record(1, "Acana").into(), record(2, "Brit").into()], None);

        ReducerTest::new(reducer())
            .with_env(env(MockCatalogApi::new()))
            .given_state(state.clone())
            .when_action(BrandsAction::ToggleChosen(2))
            .then_state(|state| {
                let chosen: Vec<u32> = state
                    .brands
                    .value()
                    .iter()
                    .filter(|b| b.chosen)
                    .map(|b| b.id)
                    .collect();
                assert_eq!(chosen, vec![2]);
                // Selection is a client-only edit
                assert_eq!(state.brands.status(), RequestStatus::Succeeded);
            })
            .run();

        ReducerTest::new(reducer())
            .with_env(env(MockCatalogApi::new()))
            .given_state(state)
            .when_action(BrandsAction::ToggleChosen(1))
            .when_action(BrandsAction::ClearChosen)
            .then_state(|state| {
                assert!(state.brands.value().iter().all(|b| !b.chosen));
            })
            .run();
    }

    #[test]
    fn test_failure_keeps_previous_brands() {
        let mut state = BrandsState::default();
        let first = state.brands.begin();
        let _ = state.brands.resolve(first, vec![record(1, "Acana").into()], None);
        let second = state.brands.begin();

        ReducerTest::new(reducer())
            .with_env(env(MockCatalogApi::new()))
            .given_state(state)
            .when_action(BrandsAction::LoadFailed {
                request: second,
                error: ApiError::RequestFailed("connection refused".into()),
            })
            .then_state(|state| {
                assert_eq!(state.brands.status(), RequestStatus::Failed);
                assert_eq!(state.brands.value().len(), 1);
                assert!(state.brands.error().is_some_and(|e| e.contains("connection refused")));
            })
            .run();
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = BrandsState::default();
        let old = state.brands.begin();
        let _new = state.brands.begin();

        ReducerTest::new(reducer())
            .with_env(env(MockCatalogApi::new()))
            .given_state(state)
            .when_action(BrandsAction::Loaded {
                request: old,
                brands: vec![record(9, "Stale")],
            })
            .then_state(|state| {
                assert!(state.brands.is_pending());
                assert!(state.brands.value().is_empty());
            })
            .run();
    }
}
