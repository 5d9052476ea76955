//! Query builders for filtered collection endpoints
//!
//! Each builder emits only the filters that are present, in a fixed order.
//! For brands and catalog groups the order is `animal` then `category`:
//!
//! | animal | category | query string |
//! |---|---|---|
//! | - | - | *(empty)* |
//! | `a` | - | `?animal=a` |
//! | - | `c` | `?category=c` |
//! | `a` | `c` | `?animal=a&category=c` |
//!
//! ```
//! use petshop_api::BrandQuery;
//!
//! assert_eq!(BrandQuery::new().to_query_string(), "");
//! assert_eq!(BrandQuery::new().with_category(5).to_query_string(), "?category=5");
//! assert_eq!(
//!     BrandQuery::new().with_animal(2).with_category(5).to_query_string(),
//!     "?animal=2&category=5"
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Filters accepted by the brands and catalog-groups endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Animal type id
    pub animal: Option<u32>,
    /// Catalog category id
    pub category: Option<u32>,
}

/// Brand listing filters
pub type BrandQuery = CatalogQuery;

/// Catalog group (product summary) filters
pub type ProductQuery = CatalogQuery;

impl CatalogQuery {
    /// An unfiltered query
    #[must_use]
    pub const fn new() -> Self {
        Self {
            animal: None,
            category: None,
        }
    }

    /// Filter by animal type
    #[must_use]
    pub const fn with_animal(mut self, animal: u32) -> Self {
        self.animal = Some(animal);
        self
    }

    /// Filter by catalog category
    #[must_use]
    pub const fn with_category(mut self, category: u32) -> Self {
        self.category = Some(category);
        self
    }

    /// Present filters as `(name, value)` pairs, in precedence order
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(animal) = self.animal {
            pairs.push(("animal", animal.to_string()));
        }
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        pairs
    }

    /// Encode as a query string (`""` when unfiltered)
    #[must_use]
    pub fn to_query_string(&self) -> String {
        encode(&self.query_pairs())
    }
}

/// Article listing filters
///
/// The backend names the article filter `animals`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleQuery {
    /// Animal type id
    pub animals: Option<u32>,
}

impl ArticleQuery {
    /// An unfiltered query
    #[must_use]
    pub const fn new() -> Self {
        Self { animals: None }
    }

    /// Filter by animal type
    #[must_use]
    pub const fn with_animal(mut self, animal: u32) -> Self {
        self.animals = Some(animal);
        self
    }

    /// Present filters as `(name, value)` pairs
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.animals
            .map(|animal| vec![("animals", animal.to_string())])
            .unwrap_or_default()
    }

    /// Encode as a query string (`""` when unfiltered)
    #[must_use]
    pub fn to_query_string(&self) -> String {
        encode(&self.query_pairs())
    }
}

fn encode(pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let joined = pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{joined}")
}
