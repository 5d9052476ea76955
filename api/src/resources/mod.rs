//! Resource modules, one per REST resource
//!
//! Each module knows its endpoint path and how to encode its filters; the
//! HTTP round-trip itself goes through [`ApiClient`](crate::ApiClient).
//! Errors are propagated unchanged.

pub mod animals;
pub mod articles;
pub mod brands;
pub mod products;
pub mod reviews;
