//! Articles slice: the blog listing
//!
//! Articles are always fetched unfiltered. The chosen animal is recorded
//! with the fetch and applied client-side by the selectors, so the page can
//! fall back to the full list when too few articles match.

use crate::env::StorefrontEnvironment;
use crate::slices::{FetchSlot, api_effect};
use petshop_api::{ApiError, Article, ArticleQuery, CatalogApi};
use petshop_core::{RequestId, SmallVec, Tracked, effect::Effect, reducer::Reducer, smallvec};

/// Articles slice state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArticlesState {
    /// Articles of the latest committed fetch, in server order
    pub articles: Tracked<Vec<Article>>,
    /// Animal type recorded by the latest fetch
    pub chosen_animal: Option<u32>,
}

/// Articles slice actions
#[derive(Clone, Debug)]
pub enum ArticlesAction {
    /// Fetch the article list for the page showing `chosen_animal`
    Fetch {
        /// Animal type chosen on the page, if any
        chosen_animal: Option<u32>,
    },
    /// A fetch completed
    Loaded {
        /// Request being completed
        request: RequestId,
        /// Articles
        articles: Vec<Article>,
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
    /// Reducer for [`ArticlesState`]
    ArticlesReducer
}

impl<A> Reducer for ArticlesReducer<A>
where
    A: CatalogApi + Clone + 'static,
{
    type State = ArticlesState;
    type Action = ArticlesAction;
    type Environment = StorefrontEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ArticlesAction::Fetch { chosen_animal } => {
                state.chosen_animal = chosen_animal;
                let request = state.articles.begin();
                tracing::debug!(%request, ?chosen_animal, "Fetching articles");

                let api = env.api.clone();
                smallvec![api_effect(
                    async move { api.fetch_articles(&ArticleQuery::new()).await },
                    move |result| match result {
                        Ok(articles) => ArticlesAction::Loaded { request, articles },
                        Err(error) => ArticlesAction::LoadFailed { request, error },
                    },
                )]
            },

            ArticlesAction::Loaded { request, articles } => {
                state.articles.commit_loaded(request, articles, &*env.clock, "articles");
                smallvec![Effect::None]
            },

            ArticlesAction::LoadFailed { request, error } => {
                state.articles.commit_failed(request, &error, "articles");
                smallvec![Effect::None]
            },

            ArticlesAction::Cancel => {
                state.articles.cancel_fetch("articles");
                smallvec![Effect::None]
            },
        }
    }
}
