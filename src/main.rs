//! ShopHub Storefront - single-page storefront view service

use anyhow::Result;
use shophub_storefront::{api, config::AppConfig, Storefront};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| config.default_log_filter.as_str().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let storefront = Storefront::seeded()?;
    let catalog = storefront.catalog();
    tracing::info!(products = catalog.len(), categories = catalog.categories().len(), "catalog loaded");
    let app = api::router(api::AppState::new(storefront));

    let addr = config.bind_addr();
    tracing::info!("ShopHub storefront listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
