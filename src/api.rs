//! HTTP surface over the storefront view controller.

use axum::{extract::{Path, State}, http::StatusCode, response::{IntoResponse, Response}, routing::{get, post, put}, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use validator::Validate;
use crate::domain::aggregates::Product;
use crate::domain::query::QueryConfig;
use crate::domain::value_objects::{Facet, PriceRange, ProductId, PRICE_SLIDER_MAX, PRICE_SLIDER_STEP};
use crate::storefront::{CartSummary, Storefront};
use crate::{Result, StorefrontError};

/// One storefront behind one lock: each request is a single event applied to completion.
#[derive(Clone)]
pub struct AppState { pub storefront: Arc<Mutex<Storefront>> }

impl AppState {
    pub fn new(storefront: Storefront) -> Self { Self { storefront: Arc::new(Mutex::new(storefront)) } }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "shophub-storefront"})) }))
        .route("/api/v1/catalog/facets", get(get_facets))
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/filters", get(get_filters).patch(update_filters))
        .route("/api/v1/filters/reset", post(reset_filters))
        .route("/api/v1/cart", get(get_cart))
        .route("/api/v1/cart/items", post(add_to_cart))
        .route("/api/v1/cart/items/:id", put(set_quantity).delete(remove_from_cart))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()))
        .with_state(state)
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UnknownProduct(_) => StatusCode::NOT_FOUND,
            Self::OutOfStock(_) => StatusCode::CONFLICT,
            Self::InvalidPriceRange(_) | Self::InvalidSortKey(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetsResponse { pub categories: Vec<String>, pub brands: Vec<String>, pub price_max: u64, pub price_step: u64 }

async fn get_facets(State(s): State<AppState>) -> Json<FacetsResponse> {
    let view = s.storefront.lock().await;
    let catalog = view.catalog();
    Json(FacetsResponse {
        categories: catalog.categories().into_iter().map(String::from).collect(),
        brands: catalog.brands().into_iter().map(String::from).collect(),
        price_max: PRICE_SLIDER_MAX, price_step: PRICE_SLIDER_STEP,
    })
}

/// Product card: the product plus the values derived for display.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard<'a> {
    #[serde(flatten)]
    product: &'a Product,
    discount_percent: Option<u8>,
    full_stars: u8,
}

impl<'a> From<&'a Product> for ProductCard<'a> {
    fn from(product: &'a Product) -> Self {
        Self { product, discount_percent: product.discount_percent(), full_stars: product.rating().full_stars() }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse<'a> { pub data: Vec<ProductCard<'a>>, pub total: usize }

async fn list_products(State(s): State<AppState>) -> Response {
    let mut view = s.storefront.lock().await;
    products_response(&mut view)
}

fn products_response(view: &mut Storefront) -> Response {
    let products = view.products();
    Json(ProductsResponse { data: products.iter().map(ProductCard::from).collect(), total: products.len() }).into_response()
}

async fn get_filters(State(s): State<AppState>) -> Json<QueryConfig> {
    Json(s.storefront.lock().await.config().clone())
}

/// Partial filter update. Omitted fields keep their current value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    #[validate(length(max = 200))]
    pub search_text: Option<String>,
    pub category: Option<Facet>,
    pub brand: Option<Facet>,
    #[validate(range(max = 30000))]
    pub min_price: Option<u32>,
    #[validate(range(max = 30000))]
    pub max_price: Option<u32>,
    pub sort_key: Option<String>,
}

impl FilterPatch {
    pub fn apply_to(self, current: &QueryConfig) -> Result<QueryConfig> {
        self.validate()?;
        let mut next = current.clone();
        if let Some(text) = self.search_text { next.search_text = text; }
        if let Some(category) = self.category { next.category = category; }
        if let Some(brand) = self.brand { next.brand = brand; }
        let min = self.min_price.map(u64::from).unwrap_or(current.price_range.min().amount());
        let max = self.max_price.map(u64::from).unwrap_or(current.price_range.max().amount());
        next.price_range = PriceRange::new(min, max)?;
        if let Some(key) = self.sort_key { next.sort_key = key.parse()?; }
        Ok(next)
    }
}

async fn update_filters(State(s): State<AppState>, Json(patch): Json<FilterPatch>) -> Result<Response> {
    let mut view = s.storefront.lock().await;
    let next = patch.apply_to(view.config())?;
    view.replace_config(next);
    Ok(products_response(&mut view))
}

async fn reset_filters(State(s): State<AppState>) -> Response {
    let mut view = s.storefront.lock().await;
    view.reset_filters();
    products_response(&mut view)
}

async fn get_cart(State(s): State<AppState>) -> Json<CartSummary> {
    Json(s.storefront.lock().await.cart_summary())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest { pub product_id: ProductId }

async fn add_to_cart(State(s): State<AppState>, Json(r): Json<AddToCartRequest>) -> Result<(StatusCode, Json<CartSummary>)> {
    let mut view = s.storefront.lock().await;
    view.add_to_cart(r.product_id)?;
    Ok((StatusCode::CREATED, Json(view.cart_summary())))
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest { pub quantity: i64 }

async fn set_quantity(State(s): State<AppState>, Path(id): Path<ProductId>, Json(r): Json<SetQuantityRequest>) -> Json<CartSummary> {
    let mut view = s.storefront.lock().await;
    view.set_quantity(id, r.quantity);
    Json(view.cart_summary())
}

async fn remove_from_cart(State(s): State<AppState>, Path(id): Path<ProductId>) -> Json<CartSummary> {
    let mut view = s.storefront.lock().await;
    view.remove_from_cart(id);
    Json(view.cart_summary())
}
