//! # Petshop Catalog API Client
//!
//! Rust client for the pet shop's catalog REST API: brands, animal types,
//! catalog groups, articles and customer reviews.
//!
//! ## Example
//!
//! ```no_run
//! use petshop_api::{ApiClient, ApiConfig, BrandQuery, CatalogApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads PETSHOP_API_URL and PETSHOP_API_TIMEOUT_SECS
//!     let client = ApiClient::new(ApiConfig::from_env()?)?;
//!
//!     let brands = client
//!         .fetch_brands(&BrandQuery::new().with_animal(2).with_category(5))
//!         .await?;
//!
//!     println!("{} brands", brands.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Layout
//!
//! - [`client`]: thin wrapper over `reqwest` that decodes JSON and maps
//!   failures to [`ApiError`]
//! - [`query`]: query builders with a fixed filter precedence
//! - [`resources`]: one module per REST resource
//! - [`catalog`]: the [`CatalogApi`] trait the storefront depends on

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod resources;
pub mod types;

// Re-export main types for convenience
pub use catalog::CatalogApi;
pub use client::ApiClient;
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorKind};
pub use query::{ArticleQuery, BrandQuery, CatalogQuery, ProductQuery};
pub use types::{
    AnimalType, Article, BrandRecord, NewReview, ProductSummary, ReviewRecord,
    ReviewValidationError, Subcategory,
};
