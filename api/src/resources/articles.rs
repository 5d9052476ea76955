//! `articles/`

use crate::{ApiClient, ApiError, Article, ArticleQuery};

/// Endpoint path
pub const PATH: &str = "articles/";

/// Path of a single article
#[must_use]
pub fn detail_path(id: u32) -> String {
    format!("{PATH}{id}/")
}

/// List articles matching `query`
///
/// # Errors
///
/// Returns errors for network failures, non-2xx statuses, or undecodable bodies
#[tracing::instrument(skip(client), level = "debug")]
pub async fn list(client: &ApiClient, query: &ArticleQuery) -> Result<Vec<Article>, ApiError> {
    client.get_json(PATH, &query.query_pairs()).await
}

/// Fetch one article
///
/// # Errors
///
/// Returns `ApiError::Status` with 404 for unknown ids, plus the usual
/// transport and decoding errors
#[tracing::instrument(skip(client), level = "debug")]
pub async fn detail(client: &ApiClient, id: u32) -> Result<Article, ApiError> {
    client.get_json(&detail_path(id), &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_path() {
        assert_eq!(detail_path(7), "articles/7/");
    }
}
