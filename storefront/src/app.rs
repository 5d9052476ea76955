//! The combined storefront state, action and reducer

use crate::env::StorefrontEnvironment;
use crate::slices::{
    AnimalsAction, AnimalsReducer, AnimalsState, ArticleAction, ArticleReducer, ArticleState,
    ArticlesAction, ArticlesReducer, ArticlesState, BrandsAction, BrandsReducer, BrandsState,
    ProductsAction, ProductsReducer, ProductsState, ReviewsAction, ReviewsReducer, ReviewsState,
};
use petshop_api::CatalogApi;
use petshop_core::{SmallVec, effect::Effect, reducer::Reducer};
use petshop_runtime::{Store, StoreConfig};

/// Whole storefront state, one field per slice
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// Brand filter
    pub brands: BrandsState,
    /// Animal switcher
    pub animals: AnimalsState,
    /// Blog listing
    pub articles: ArticlesState,
    /// Single article page
    pub article: ArticleState,
    /// Catalog menu
    pub products: ProductsState,
    /// Reviews block
    pub reviews: ReviewsState,
}

/// Every action the storefront store accepts
#[derive(Clone, Debug)]
pub enum AppAction {
    /// Brands slice
    Brands(BrandsAction),
    /// Animal types slice
    Animals(AnimalsAction),
    /// Articles slice
    Articles(ArticlesAction),
    /// Article slice
    Article(ArticleAction),
    /// Products slice
    Products(ProductsAction),
    /// Reviews slice
    Reviews(ReviewsAction),
}

/// Routes each action to its slice and lifts the slice's effects
pub struct AppReducer<A> {
    brands: BrandsReducer<A>,
    animals: AnimalsReducer<A>,
    articles: ArticlesReducer<A>,
    article: ArticleReducer<A>,
    products: ProductsReducer<A>,
    reviews: ReviewsReducer<A>,
}

impl<A> AppReducer<A> {
    /// Create a reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            brands: BrandsReducer::new(),
            animals: AnimalsReducer::new(),
            articles: ArticlesReducer::new(),
            article: ArticleReducer::new(),
            products: ProductsReducer::new(),
            reviews: ReviewsReducer::new(),
        }
    }
}

impl<A> Default for AppReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for AppReducer<A> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

fn lift<Act, F>(effects: SmallVec<[Effect<Act>; 4]>, wrap: F) -> SmallVec<[Effect<AppAction>; 4]>
where
    Act: Send + 'static,
    F: Fn(Act) -> AppAction + Clone + Send + Sync + 'static,
{
    effects
        .into_iter()
        .map(|effect| effect.map(wrap.clone()))
        .collect()
}

impl<A> Reducer for AppReducer<A>
where
    A: CatalogApi + Clone + 'static,
{
    type State = AppState;
    type Action = AppAction;
    type Environment = StorefrontEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Brands(action) => lift(
                self.brands.reduce(&mut state.brands, action, env),
                AppAction::Brands,
            ),
            AppAction::Animals(action) => lift(
                self.animals.reduce(&mut state.animals, action, env),
                AppAction::Animals,
            ),
            AppAction::Articles(action) => lift(
                self.articles.reduce(&mut state.articles, action, env),
                AppAction::Articles,
            ),
            AppAction::Article(action) => lift(
                self.article.reduce(&mut state.article, action, env),
                AppAction::Article,
            ),
            AppAction::Products(action) => lift(
                self.products.reduce(&mut state.products, action, env),
                AppAction::Products,
            ),
            AppAction::Reviews(action) => lift(
                self.reviews.reduce(&mut state.reviews, action, env),
                AppAction::Reviews,
            ),
        }
    }
}

/// The storefront store
pub type StorefrontStore<A> = Store<AppState, AppAction, StorefrontEnvironment<A>, AppReducer<A>>;

/// Create an empty storefront store
#[must_use]
pub fn new_store<A>(env: StorefrontEnvironment<A>, config: StoreConfig) -> StorefrontStore<A>
where
    A: CatalogApi + Clone + 'static,
{
    Store::with_config(AppState::default(), AppReducer::new(), env, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockCatalogApi;
    use petshop_api::BrandQuery;
    use petshop_core::RequestStatus;
    use petshop_testing::{ReducerTest, assertions, collect_actions, test_clock};
    use std::sync::Arc;

    fn env() -> StorefrontEnvironment<MockCatalogApi> {
        StorefrontEnvironment::new(MockCatalogApi::new(), Arc::new(test_clock()))
    }

    #[test]
    fn test_routes_to_slice() {
        ReducerTest::new(AppReducer::<MockCatalogApi>::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(AppAction::Animals(AnimalsAction::Choose(Some(2))))
            .then_state(|state| {
                assert_eq!(state.animals.chosen, Some(2));
                assert_eq!(state.brands, BrandsState::default());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn test_lifted_effect_produces_app_action() {
        let env = env();
        let mut state = AppState::default();

        let effects = AppReducer::<MockCatalogApi>::new().reduce(
            &mut state,
            AppAction::Brands(BrandsAction::Fetch(BrandQuery::new())),
            &env,
        );
        assert_eq!(state.brands.brands.status(), RequestStatus::Pending);

        let actions = collect_actions(effects).await;
        assert!(matches!(
            actions.as_slice(),
            [AppAction::Brands(BrandsAction::Loaded { .. })]
        ));
    }
}
