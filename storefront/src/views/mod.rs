//! View components
//!
//! Each view borrows the [`StorefrontStore`](crate::app::StorefrontStore),
//! dispatches its fetches on `mount`, cancels them on `unmount`, and renders
//! HTML from selector outputs. Rendering is split into pure `render_*`
//! functions over [`AppState`](crate::app::AppState) so markup can be checked
//! without a running store.

use petshop_runtime::{EffectHandle, StoreError};
use std::time::Duration;

pub mod article_page;
pub mod articles_page;
pub mod brand_filter;
pub mod catalog_menu;
pub(crate) mod markup;
pub mod reviews_block;

pub use article_page::ArticlePage;
pub use articles_page::ArticlesPage;
pub use brand_filter::BrandFilter;
pub use catalog_menu::CatalogMenu;
pub use reviews_block::ReviewsBlock;

/// Effects started by a view interaction
///
/// Awaiting it returns once every request the interaction started has been
/// committed or discarded.
#[derive(Debug, Default)]
#[must_use = "dropping the handles does not cancel the requests"]
pub struct Dispatched {
    handles: Vec<EffectHandle>,
}

impl Dispatched {
    fn push(&mut self, handle: EffectHandle) {
        self.handles.push(handle);
    }

    /// Wait for every started request to settle
    pub async fn settled(mut self) {
        for handle in &mut self.handles {
            handle.wait().await;
        }
    }

    /// Wait for every started request to settle, with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires first
    pub async fn settled_within(self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.settled())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl From<EffectHandle> for Dispatched {
    fn from(handle: EffectHandle) -> Self {
        Self {
            handles: vec![handle],
        }
    }
}
