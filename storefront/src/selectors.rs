//! Read-only projections from [`AppState`] to view-ready values
//!
//! Selectors are pure: same state in, same value out.

use crate::app::AppState;
use crate::slices::Brand;
use petshop_api::{Article, Subcategory};
use petshop_core::RequestStatus;

/// Number of articles shown before "show more"
pub const ARTICLES_PREVIEW: usize = 3;

/// Articles the listing draws from
///
/// With a chosen animal, the articles about that animal, provided there are
/// at least [`ARTICLES_PREVIEW`] of them. Otherwise the whole list.
fn article_source(state: &AppState) -> Vec<&Article> {
    let all = state.articles.articles.value();

    if let Some(animal) = state.articles.chosen_animal {
        let matching: Vec<&Article> = all.iter().filter(|a| a.animal == Some(animal)).collect();
        if matching.len() >= ARTICLES_PREVIEW {
            return matching;
        }
    }

    all.iter().collect()
}

/// Articles to render in the listing, in server order
#[must_use]
pub fn articles_for_block(state: &AppState, show_all: bool) -> Vec<&Article> {
    let mut source = article_source(state);
    if !show_all {
        source.truncate(ARTICLES_PREVIEW);
    }
    source
}

/// Whether the listing hides articles behind "show more"
#[must_use]
pub fn can_show_more_articles(state: &AppState, show_all: bool) -> bool {
    !show_all && article_source(state).len() > ARTICLES_PREVIEW
}

/// Name of the animal type the listing was fetched for
#[must_use]
pub fn chosen_animal_name(state: &AppState) -> Option<&str> {
    let chosen = state.articles.chosen_animal?;
    state
        .animals
        .animals
        .value()
        .iter()
        .find(|animal| animal.id == chosen)
        .map(|animal| animal.name.as_str())
}

/// Article with the given id, from the detail slot or the listing
#[must_use]
pub fn article_by_id(state: &AppState, id: u32) -> Option<&Article> {
    state
        .article
        .article
        .value()
        .as_ref()
        .filter(|article| article.id == id)
        .or_else(|| {
            state
                .articles
                .articles
                .value()
                .iter()
                .find(|article| article.id == id)
        })
}

/// Brands of the latest committed fetch
#[must_use]
pub fn brands(state: &AppState) -> &[Brand] {
    state.brands.brands.value()
}

/// Ids of the brands selected in the filter
#[must_use]
pub fn chosen_brand_ids(state: &AppState) -> Vec<u32> {
    brands(state)
        .iter()
        .filter(|brand| brand.chosen)
        .map(|brand| brand.id)
        .collect()
}

/// Status of the latest review submission
#[must_use]
pub fn review_submission_status(state: &AppState) -> RequestStatus {
    state.reviews.submission.status()
}

/// Subcategories carrying a discount, with their catalog group name
#[must_use]
pub fn discounted_subcategories(state: &AppState) -> Vec<(&str, &Subcategory)> {
    state
        .products
        .products
        .value()
        .iter()
        .flat_map(|group| {
            group
                .subcategories
                .iter()
                .filter(|sub| sub.discount_subcategory.is_some_and(|d| d > 0))
                .map(move |sub| (group.name.as_str(), sub))
        })
        .collect()
}

/// Whether any slice has a request in flight
#[must_use]
pub fn is_loading(state: &AppState) -> bool {
    state.brands.brands.is_pending()
        || state.animals.animals.is_pending()
        || state.articles.articles.is_pending()
        || state.article.article.is_pending()
        || state.products.products.is_pending()
        || state.reviews.reviews.is_pending()
        || state.reviews.submission.is_pending()
}
