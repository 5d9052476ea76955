//! In-memory catalog API for tests
//!
//! Every endpoint answers from a fallback reply that can be overridden with
//! `with_*` builders. Individual calls can be scripted with `push_*`: queued
//! replies are consumed first, each with its own latency, which makes it
//! possible to complete concurrent requests out of order.

use petshop_api::{
    AnimalType, ApiError, Article, ArticleQuery, BrandQuery, BrandRecord, CatalogApi, NewReview,
    ProductQuery, ProductSummary, ReviewRecord,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A call received by [`MockCatalogApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `fetch_brands`
    Brands(BrandQuery),
    /// `fetch_animals`
    Animals,
    /// `fetch_products`
    Products(ProductQuery),
    /// `fetch_articles`
    Articles(ArticleQuery),
    /// `fetch_article`
    Article(u32),
    /// `fetch_reviews`
    Reviews,
    /// `submit_review`
    SubmitReview(NewReview),
}

#[derive(Debug, Clone)]
struct Reply<T> {
    latency: Duration,
    result: Result<T, ApiError>,
}

impl<T> Reply<T> {
    async fn deliver(self) -> Result<T, ApiError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.result
    }
}

#[derive(Debug)]
struct Script<T> {
    fallback: Reply<T>,
    queued: VecDeque<Reply<T>>,
}

impl<T: Clone> Script<T> {
    fn ok(value: T) -> Self {
        Self {
            fallback: Reply {
                latency: Duration::ZERO,
                result: Ok(value),
            },
            queued: VecDeque::new(),
        }
    }

    fn next(&mut self) -> Reply<T> {
        self.queued
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

type Shared<T> = Arc<Mutex<Script<T>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn shared<T: Clone>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(Script::ok(value)))
}

/// In-memory [`CatalogApi`]
///
/// Clones share scripts and the call log.
#[derive(Debug, Clone)]
pub struct MockCatalogApi {
    brands: Shared<Vec<BrandRecord>>,
    animals: Shared<Vec<AnimalType>>,
    products: Shared<Vec<ProductSummary>>,
    articles: Shared<Vec<Article>>,
    reviews: Shared<Vec<ReviewRecord>>,
    submit: Shared<()>,
    publish_on_submit: bool,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockCatalogApi {
    /// Every endpoint answers immediately with an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self {
            brands: shared(Vec::new()),
            animals: shared(Vec::new()),
            products: shared(Vec::new()),
            articles: shared(Vec::new()),
            reviews: shared(Vec::new()),
            submit: shared(()),
            publish_on_submit: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Brands returned by default
    #[must_use]
    pub fn with_brands(self, brands: Vec<BrandRecord>) -> Self {
        lock(&self.brands).fallback.result = Ok(brands);
        self
    }

    /// Animal types returned by default
    #[must_use]
    pub fn with_animals(self, animals: Vec<AnimalType>) -> Self {
        lock(&self.animals).fallback.result = Ok(animals);
        self
    }

    /// Catalog groups returned by default
    #[must_use]
    pub fn with_products(self, products: Vec<ProductSummary>) -> Self {
        lock(&self.products).fallback.result = Ok(products);
        self
    }

    /// Articles returned by default; also serves `fetch_article`
    #[must_use]
    pub fn with_articles(self, articles: Vec<Article>) -> Self {
        lock(&self.articles).fallback.result = Ok(articles);
        self
    }

    /// Published reviews returned by default
    #[must_use]
    pub fn with_reviews(self, reviews: Vec<ReviewRecord>) -> Self {
        lock(&self.reviews).fallback.result = Ok(reviews);
        self
    }

    /// Make every review submission fail by default
    #[must_use]
    pub fn with_submit_error(self, error: ApiError) -> Self {
        lock(&self.submit).fallback.result = Err(error);
        self
    }

    /// Make every reviews fetch fail by default
    #[must_use]
    pub fn with_reviews_error(self, error: ApiError) -> Self {
        lock(&self.reviews).fallback.result = Err(error);
        self
    }

    /// Publish accepted reviews immediately instead of holding them for moderation
    #[must_use]
    pub const fn with_auto_publish(mut self) -> Self {
        self.publish_on_submit = true;
        self
    }

    /// Latency applied to every default reply
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        lock(&self.brands).fallback.latency = latency;
        lock(&self.animals).fallback.latency = latency;
        lock(&self.products).fallback.latency = latency;
        lock(&self.articles).fallback.latency = latency;
        lock(&self.reviews).fallback.latency = latency;
        lock(&self.submit).fallback.latency = latency;
        self
    }

    /// Queue the reply to the next unscripted brands fetch
    pub fn push_brands(&self, latency: Duration, result: Result<Vec<BrandRecord>, ApiError>) {
        lock(&self.brands).queued.push_back(Reply { latency, result });
    }

    /// Queue the reply to the next unscripted articles fetch
    pub fn push_articles(&self, latency: Duration, result: Result<Vec<Article>, ApiError>) {
        lock(&self.articles).queued.push_back(Reply { latency, result });
    }

    /// Queue the reply to the next unscripted reviews fetch
    pub fn push_reviews(&self, latency: Duration, result: Result<Vec<ReviewRecord>, ApiError>) {
        lock(&self.reviews).queued.push_back(Reply { latency, result });
    }

    /// Queue the reply to the next unscripted review submission
    pub fn push_submit(&self, latency: Duration, result: Result<(), ApiError>) {
        lock(&self.submit).queued.push_back(Reply { latency, result });
    }

    /// Every call received so far, in arrival order
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    /// Queries of every brands fetch
    #[must_use]
    pub fn brand_queries(&self) -> Vec<BrandQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Brands(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    /// Queries of every articles fetch
    #[must_use]
    pub fn article_queries(&self) -> Vec<ArticleQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Articles(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    /// Every review passed to `submit_review`
    #[must_use]
    pub fn submitted_reviews(&self) -> Vec<NewReview> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::SubmitReview(review) => Some(review),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        lock(&self.calls).push(call);
    }
}

impl Default for MockCatalogApi {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogApi for MockCatalogApi {
    async fn fetch_brands(&self, query: &BrandQuery) -> Result<Vec<BrandRecord>, ApiError> {
        self.record(MockCall::Brands(*query));
        let reply = lock(&self.brands).next();
        reply.deliver().await
    }

    async fn fetch_animals(&self) -> Result<Vec<AnimalType>, ApiError> {
        self.record(MockCall::Animals);
        let reply = lock(&self.animals).next();
        reply.deliver().await
    }

    async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<ProductSummary>, ApiError> {
        self.record(MockCall::Products(*query));
        let reply = lock(&self.products).next();
        reply.deliver().await
    }

    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, ApiError> {
        self.record(MockCall::Articles(*query));
        let reply = lock(&self.articles).next();
        let articles = reply.deliver().await?;
        Ok(match query.animals {
            Some(animal) => articles
                .into_iter()
                .filter(|a| a.animal == Some(animal))
                .collect(),
            None => articles,
        })
    }

    async fn fetch_article(&self, id: u32) -> Result<Article, ApiError> {
        self.record(MockCall::Article(id));
        let reply = {
            let script = lock(&self.articles);
            script.fallback.clone()
        };
        reply
            .deliver()
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Not found.".to_string(),
            })
    }

    async fn fetch_reviews(&self) -> Result<Vec<ReviewRecord>, ApiError> {
        self.record(MockCall::Reviews);
        let reply = lock(&self.reviews).next();
        reply.deliver().await
    }

    async fn submit_review(&self, review: &NewReview) -> Result<(), ApiError> {
        self.record(MockCall::SubmitReview(review.clone()));
        let reply = lock(&self.submit).next();
        reply.deliver().await?;

        if self.publish_on_submit {
            let mut reviews = lock(&self.reviews);
            if let Ok(published) = reviews.fallback.result.as_mut() {
                published.push(ReviewRecord {
                    id: None,
                    author: review.author.clone(),
                    animal: Some(review.animal.clone()),
                    body: review.body.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Article fixture
#[must_use]
pub fn sample_article(id: u32, animal: Option<u32>) -> Article {
    Article {
        id,
        title: format!("Article {id}"),
        description: format!("<p>Body of article {id}</p>"),
        image: None,
        time_read: "5 min".to_string(),
        date_added: chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
        animal,
    }
}
