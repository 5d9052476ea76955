//! `comments/`: customer reviews
//!
//! Only moderated reviews are listed. A successful submission is answered
//! with `201 Created` and an empty body; the review shows up in the list once
//! it has been published.

use crate::{ApiClient, ApiError, NewReview, ReviewRecord};

/// Endpoint path
pub const PATH: &str = "comments/";

/// List published reviews
///
/// # Errors
///
/// Returns errors for network failures, non-2xx statuses, or undecodable bodies
#[tracing::instrument(skip(client), level = "debug")]
pub async fn list(client: &ApiClient) -> Result<Vec<ReviewRecord>, ApiError> {
    client.get_json(PATH, &[]).await
}

/// Submit a review
///
/// # Errors
///
/// Returns errors for network failures or non-2xx statuses (the backend
/// answers `400` when its own validation rejects the review)
#[tracing::instrument(skip(client, review), level = "debug")]
pub async fn submit(client: &ApiClient, review: &NewReview) -> Result<(), ApiError> {
    client.post_json(PATH, review).await
}
