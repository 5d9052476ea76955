//! `categories/`: catalog groups with their subcategories

use crate::{ApiClient, ApiError, ProductQuery, ProductSummary};

/// Endpoint path
pub const PATH: &str = "categories/";

/// List catalog groups matching `query`
///
/// # Errors
///
/// Returns errors for network failures, non-2xx statuses, or undecodable bodies
#[tracing::instrument(skip(client), level = "debug")]
pub async fn list(
    client: &ApiClient,
    query: &ProductQuery,
) -> Result<Vec<ProductSummary>, ApiError> {
    client.get_json(PATH, &query.query_pairs()).await
}
