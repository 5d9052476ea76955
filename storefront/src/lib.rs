//! # Petshop Storefront
//!
//! Client-side data layer of the pet-shop storefront.
//!
//! All fetched data lives in one [`StorefrontStore`]. Views dispatch fetch
//! actions on mount, the slice reducers begin a tracked request and return an
//! effect that calls the [`CatalogApi`](petshop_api::CatalogApi), and the
//! completion is committed only if it still belongs to the latest request of
//! its slice. Views read state exclusively through [`selectors`].
//!
//! ```ignore
//! let api = ApiClient::new(config.api)?;
//! let store = new_store(StorefrontEnvironment::live(api), config.store);
//!
//! let page = ArticlesPage::new(&store);
//! page.mount().await?.settled().await;
//! println!("{}", page.render().await);
//! ```

pub mod app;
pub mod config;
pub mod env;
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;
pub mod selectors;
pub mod slices;
pub mod views;

pub use app::{AppAction, AppReducer, AppState, StorefrontStore, new_store};
pub use config::StorefrontConfig;
pub use env::StorefrontEnvironment;
pub use views::{ArticlePage, ArticlesPage, BrandFilter, CatalogMenu, Dispatched, ReviewsBlock};
