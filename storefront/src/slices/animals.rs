//! Animal types slice: the animal switcher and the chosen animal

use crate::env::StorefrontEnvironment;
use crate::slices::{FetchSlot, api_effect};
use petshop_api::{AnimalType, ApiError, CatalogApi};
use petshop_core::{RequestId, SmallVec, Tracked, effect::Effect, reducer::Reducer, smallvec};

/// Animal types slice state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimalsState {
    /// Animal types of the latest committed fetch
    pub animals: Tracked<Vec<AnimalType>>,
    /// Animal type picked in the switcher
    pub chosen: Option<u32>,
}

/// Animal types slice actions
#[derive(Clone, Debug)]
pub enum AnimalsAction {
    /// Fetch every animal type
    Fetch,
    /// A fetch completed
    Loaded {
        /// Request being completed
        request: RequestId,
        /// Animal types
        animals: Vec<AnimalType>,
    },
    /// A fetch failed
    LoadFailed {
        /// Request being completed
        request: RequestId,
        /// Failure
        error: ApiError,
    },
    /// Pick an animal type, or clear the choice with `None`
    Choose(Option<u32>),
    /// Drop the request in flight
    Cancel,
}

slice_reducer! {
    /// Reducer for [`AnimalsState`]
    AnimalsReducer
}

impl<A> Reducer for AnimalsReducer<A>
where
    A: CatalogApi + Clone + 'static,
{
    type State = AnimalsState;
    type Action = AnimalsAction;
    type Environment = StorefrontEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AnimalsAction::Fetch => {
                let request = state.animals.begin();
                tracing::debug!(%request, "Fetching animal types");

                let api = env.api.clone();
                smallvec![api_effect(
                    async move { api.fetch_animals().await },
                    move |result| match result {
                        Ok(animals) => AnimalsAction::Loaded { request, animals },
                        Err(error) => AnimalsAction::LoadFailed { request, error },
                    },
                )]
            },

            AnimalsAction::Loaded { request, animals } => {
                state.animals.commit_loaded(request, animals, &*env.clock, "animal types");
                smallvec![Effect::None]
            },

            AnimalsAction::LoadFailed { request, error } => {
                state.animals.commit_failed(request, &error, "animal types");
                smallvec![Effect::None]
            },

            AnimalsAction::Choose(chosen) => {
                state.chosen = chosen;
                smallvec![Effect::None]
            },

            AnimalsAction::Cancel => {
                state.animals.cancel_fetch("animal types");
                smallvec![Effect::None]
            },
        }
    }
}
