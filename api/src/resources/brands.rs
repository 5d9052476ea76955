//! `brands/`

use crate::{ApiClient, ApiError, BrandQuery, BrandRecord};

/// Endpoint path
pub const PATH: &str = "brands/";

/// List brands matching `query`
///
/// The backend only honours `category` together with `animal`.
///
/// # Errors
///
/// Returns errors for network failures, non-2xx statuses, or undecodable bodies
#[tracing::instrument(skip(client), level = "debug")]
pub async fn list(client: &ApiClient, query: &BrandQuery) -> Result<Vec<BrandRecord>, ApiError> {
    client.get_json(PATH, &query.query_pairs()).await
}
