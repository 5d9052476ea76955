//! Article slice: the single article page

use crate::env::StorefrontEnvironment;
use crate::slices::{FetchSlot, api_effect};
use petshop_api::{ApiError, Article, CatalogApi};
use petshop_core::{RequestId, SmallVec, Tracked, effect::Effect, reducer::Reducer, smallvec};

/// Article slice state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArticleState {
    /// The article of the latest committed fetch
    pub article: Tracked<Option<Article>>,
    /// Id requested by the latest fetch
    pub requested_id: Option<u32>,
}

/// Article slice actions
#[derive(Clone, Debug)]
pub enum ArticleAction {
    /// Fetch one article by id
    Fetch(u32),
    /// A fetch completed
    Loaded {
        /// Request being completed
        request: RequestId,
        /// The article
        article: Article,
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
    /// Reducer for [`ArticleState`]
    ArticleReducer
}

impl<A> Reducer for ArticleReducer<A>
where
    A: CatalogApi + Clone + 'static,
{
    type State = ArticleState;
    type Action = ArticleAction;
    type Environment = StorefrontEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ArticleAction::Fetch(id) => {
                state.requested_id = Some(id);
                let request = state.article.begin();
                tracing::debug!(%request, id, "Fetching article");

                let api = env.api.clone();
                smallvec![api_effect(
                    async move { api.fetch_article(id).await },
                    move |result| match result {
                        Ok(article) => ArticleAction::Loaded { request, article },
                        Err(error) => ArticleAction::LoadFailed { request, error },
                    },
                )]
            },

            ArticleAction::Loaded { request, article } => {
                state.article.commit_loaded(request, Some(article), &*env.clock, "article");
                smallvec![Effect::None]
            },

            ArticleAction::LoadFailed { request, error } => {
                state.article.commit_failed(request, &error, "article");
                smallvec![Effect::None]
            },

            ArticleAction::Cancel => {
                state.article.cancel_fetch("article");
                smallvec![Effect::None]
            },
        }
    }
}
