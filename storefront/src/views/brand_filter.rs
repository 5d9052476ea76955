//! Brand filter sidebar

use crate::app::{AppAction, AppState, StorefrontStore};
use crate::selectors;
use crate::slices::BrandsAction;
use crate::views::Dispatched;
use crate::views::markup::{attr, image, status_notice, text};
use petshop_api::{BrandQuery, CatalogApi};
use petshop_runtime::StoreError;
use std::fmt::Write;

/// Checkbox list of brands for one animal/category filter
pub struct BrandFilter<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    store: &'a StorefrontStore<A>,
    query: BrandQuery,
}

impl<'a, A> BrandFilter<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    /// Bind the filter to a store
    #[must_use]
    pub const fn new(store: &'a StorefrontStore<A>, query: BrandQuery) -> Self {
        Self { store, query }
    }

    /// Filters this view fetches with
    #[must_use]
    pub const fn query(&self) -> &BrandQuery {
        &self.query
    }

    /// Fetch brands for the filter's query
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn mount(&self) -> Result<Dispatched, StoreError> {
        let handle = self
            .store
            .send(AppAction::Brands(BrandsAction::Fetch(self.query)))
            .await?;
        Ok(handle.into())
    }

    /// Switch to a new query and refetch
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn requery(&mut self, query: BrandQuery) -> Result<Dispatched, StoreError> {
        self.query = query;
        self.mount().await
    }

    /// Cancel the brand fetch
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn unmount(&self) -> Result<(), StoreError> {
        let _ = self.store.send(AppAction::Brands(BrandsAction::Cancel)).await?;
        Ok(())
    }

    /// Flip the checkbox of one brand
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn toggle(&self, id: u32) -> Result<(), StoreError> {
        let _ = self
            .store
            .send(AppAction::Brands(BrandsAction::ToggleChosen(id)))
            .await?;
        Ok(())
    }

    /// Uncheck every brand
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _ = self.store.send(AppAction::Brands(BrandsAction::ClearChosen)).await?;
        Ok(())
    }

    /// Render the filter
    pub async fn render(&self) -> String {
        self.store.state(render_brand_filter).await
    }
}

/// Markup of the brand filter
#[must_use]
pub fn render_brand_filter(state: &AppState) -> String {
    let mut out = String::from(r#"<fieldset class="brand-filter"><legend>Brands</legend>"#);
    out.push_str(&status_notice(&state.brands.brands, "brands"));

    out.push_str("<ul>");
    for brand in selectors::brands(state) {
        let _ = write!(
            out,
            concat!(
                "<li><label>",
                r#"<input type="checkbox" name="brand" value="{id}"{checked}>"#,
                "{image}{name}</label></li>"
            ),
            id = brand.id,
            checked = if brand.chosen { " checked" } else { "" },
            image = image(brand.image.as_deref(), &brand.name),
            name = text(&brand.name),
        );
    }
    out.push_str("</ul>");

    if !selectors::chosen_brand_ids(state).is_empty() {
        let _ = write!(
            out,
            r#"<button class="clear" aria-label="{}">Clear</button>"#,
            attr("Clear brand selection")
        );
    }

    out.push_str("</fieldset>");
    out
}
