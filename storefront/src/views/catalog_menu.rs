//! Catalog navigation menu

use crate::app::{AppAction, AppState, StorefrontStore};
use crate::slices::ProductsAction;
use crate::views::Dispatched;
use crate::views::markup::{status_notice, text};
use petshop_api::{CatalogApi, ProductQuery};
use petshop_runtime::StoreError;
use std::fmt::Write;

/// Nested list of catalog groups and their subcategories
pub struct CatalogMenu<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    store: &'a StorefrontStore<A>,
    query: ProductQuery,
}

impl<'a, A> CatalogMenu<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    /// Bind the menu to a store
    #[must_use]
    pub const fn new(store: &'a StorefrontStore<A>, query: ProductQuery) -> Self {
        Self { store, query }
    }

    /// Fetch the catalog groups
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn mount(&self) -> Result<Dispatched, StoreError> {
        let handle = self
            .store
            .send(AppAction::Products(ProductsAction::Fetch(self.query)))
            .await?;
        Ok(handle.into())
    }

    /// Cancel the catalog fetch
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn unmount(&self) -> Result<(), StoreError> {
        let _ = self.store.send(AppAction::Products(ProductsAction::Cancel)).await?;
        Ok(())
    }

    /// Render the menu
    pub async fn render(&self) -> String {
        self.store.state(render_catalog_menu).await
    }
}

/// Markup of the catalog menu
#[must_use]
pub fn render_catalog_menu(state: &AppState) -> String {
    let mut out = String::from(r#"<nav class="catalog-menu">"#);
    out.push_str(&status_notice(&state.products.products, "the catalog"));

    out.push_str("<ul>");
    for group in state.products.products.value() {
        let _ = write!(out, r#"<li data-id="{}">{}<ul>"#, group.id, text(&group.name));
        for sub in &group.subcategories {
            let _ = write!(out, r#"<li data-id="{}">{}"#, sub.id, text(&sub.name));
            if let Some(discount) = sub.discount_subcategory.filter(|d| *d > 0) {
                let _ = write!(out, r#" <span class="discount">-{discount}%</span>"#);
            }
            out.push_str("</li>");
        }
        out.push_str("</ul></li>");
    }
    out.push_str("</ul></nav>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use petshop_api::{ProductSummary, Subcategory};

    #[test]
    fn test_discount_badges() {
        let mut state = AppState::default();
        let request = state.products.products.begin();
        let _ = state.products.products.resolve(
            request,
            vec![ProductSummary {
                id: 1,
                name: "Food".to_string(),
                subcategories: vec![
                    Subcategory {
                        id: 10,
                        name: "Dry".to_string(),
                        discount_subcategory: Some(15),
                    },
                    Subcategory {
                        id: 11,
                        name: "Wet".to_string(),
                        discount_subcategory: Some(0),
                    },
                ],
            }],
            None,
        );

        let html = render_catalog_menu(&state);
        assert!(html.contains(r#"Dry <span class="discount">-15%</span>"#));
        assert_eq!(html.matches("discount").count(), 1);
    }
}
