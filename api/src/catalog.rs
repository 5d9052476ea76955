//! The catalog API seam used by the storefront
//!
//! Reducers depend on [`CatalogApi`] rather than on [`ApiClient`] so that
//! tests can substitute an in-memory implementation.

use crate::{
    AnimalType, ApiClient, ApiError, Article, ArticleQuery, BrandQuery, BrandRecord, NewReview,
    ProductQuery, ProductSummary, ReviewRecord, resources,
};
use std::future::Future;

/// Catalog API operations
///
/// # Example
///
/// ```ignore
/// async fn brand_names<A: CatalogApi>(api: &A) -> Result<Vec<String>, ApiError> {
///     let brands = api.fetch_brands(&BrandQuery::new().with_animal(2)).await?;
///     Ok(brands.into_iter().map(|b| b.name).collect())
/// }
/// ```
pub trait CatalogApi: Send + Sync {
    /// `GET brands/`
    fn fetch_brands(
        &self,
        query: &BrandQuery,
    ) -> impl Future<Output = Result<Vec<BrandRecord>, ApiError>> + Send;

    /// `GET animals/`
    fn fetch_animals(&self) -> impl Future<Output = Result<Vec<AnimalType>, ApiError>> + Send;

    /// `GET categories/`
    fn fetch_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<ProductSummary>, ApiError>> + Send;

    /// `GET articles/`
    fn fetch_articles(
        &self,
        query: &ArticleQuery,
    ) -> impl Future<Output = Result<Vec<Article>, ApiError>> + Send;

    /// `GET articles/{id}/`
    fn fetch_article(&self, id: u32) -> impl Future<Output = Result<Article, ApiError>> + Send;

    /// `GET comments/`
    fn fetch_reviews(&self) -> impl Future<Output = Result<Vec<ReviewRecord>, ApiError>> + Send;

    /// `POST comments/`
    fn submit_review(
        &self,
        review: &NewReview,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl CatalogApi for ApiClient {
    async fn fetch_brands(&self, query: &BrandQuery) -> Result<Vec<BrandRecord>, ApiError> {
        resources::brands::list(self, query).await
    }

    async fn fetch_animals(&self) -> Result<Vec<AnimalType>, ApiError> {
        resources::animals::list(self).await
    }

    async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<ProductSummary>, ApiError> {
        resources::products::list(self, query).await
    }

    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, ApiError> {
        resources::articles::list(self, query).await
    }

    async fn fetch_article(&self, id: u32) -> Result<Article, ApiError> {
        resources::articles::detail(self, id).await
    }

    async fn fetch_reviews(&self) -> Result<Vec<ReviewRecord>, ApiError> {
        resources::reviews::list(self).await
    }

    async fn submit_review(&self, review: &NewReview) -> Result<(), ApiError> {
        resources::reviews::submit(self, review).await
    }
}
