//! `animals/`

use crate::{AnimalType, ApiClient, ApiError};

/// Endpoint path
pub const PATH: &str = "animals/";

/// List every animal type
///
/// # Errors
///
/// Returns errors for network failures, non-2xx statuses, or undecodable bodies
#[tracing::instrument(skip(client), level = "debug")]
pub async fn list(client: &ApiClient) -> Result<Vec<AnimalType>, ApiError> {
    client.get_json(PATH, &[]).await
}
