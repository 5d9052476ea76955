//! Storefront binary
//!
//! Mounts the storefront views against the configured API, waits for their
//! data and prints the rendered markup.

use anyhow::Context;
use petshop_api::{ApiClient, BrandQuery, ProductQuery};
use petshop_storefront::{
    ArticlesPage, BrandFilter, CatalogMenu, ReviewsBlock, StorefrontConfig,
    StorefrontEnvironment, new_store,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str =
    "storefront=debug,petshop_storefront=debug,petshop_api=debug,petshop_runtime=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env().context("invalid configuration")?;
    tracing::info!(base_url = config.api.base_url(), "Starting storefront");

    let shutdown_timeout = config.store.default_shutdown_timeout;
    let api = ApiClient::new(config.api).context("failed to build API client")?;
    let store = new_store(StorefrontEnvironment::live(api), config.store);

    let menu = CatalogMenu::new(&store, ProductQuery::new());
    let brands = BrandFilter::new(&store, BrandQuery::new());
    let articles = ArticlesPage::new(&store);
    let reviews = ReviewsBlock::new(&store);

    let mounted = [
        menu.mount().await?,
        brands.mount().await?,
        articles.mount().await?,
        reviews.mount().await?,
    ];
    for dispatched in mounted {
        dispatched
            .settled_within(shutdown_timeout)
            .await
            .context("views did not load in time")?;
    }

    println!("{}", menu.render().await);
    println!("{}", brands.render().await);
    println!("{}", articles.render().await);
    println!("{}", reviews.render().await);

    menu.unmount().await?;
    brands.unmount().await?;
    articles.unmount().await?;
    reviews.unmount().await?;

    store.shutdown(shutdown_timeout).await?;
    tracing::info!("Storefront stopped");
    Ok(())
}
