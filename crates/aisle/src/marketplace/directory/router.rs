use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::browse::{DirectoryPageView, DirectoryService};
use super::catalog::DirectoryFacets;
use super::filter::{FilterState, DEFAULT_ITEMS_PER_PAGE};

/// Router builder exposing the vendor directory endpoints.
pub fn directory_router(service: Arc<DirectoryService>) -> Router {
    Router::new()
        .route("/api/v1/vendors", get(search_handler))
        .route("/api/v1/vendors/facets", get(facets_handler))
        .with_state(service)
}

/// Query parameters accepted by `GET /api/v1/vendors`. Omitted parameters
/// leave the matching control unconstrained.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct VendorSearchParams {
    #[serde(default)]
    pub(crate) search: String,
    #[serde(default)]
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) location: String,
    #[serde(default)]
    pub(crate) price: String,
    #[serde(default)]
    pub(crate) min_rating: f32,
    #[serde(default)]
    pub(crate) availability: String,
    /// Comma-separated style tags.
    #[serde(default)]
    pub(crate) styles: Option<String>,
    #[serde(default = "default_page")]
    pub(crate) page: i64,
    #[serde(default)]
    pub(crate) per_page: Option<usize>,
}

fn default_page() -> i64 {
    1
}

impl VendorSearchParams {
    pub(crate) fn into_filter_state(self) -> (FilterState, i64) {
        let styles = self
            .styles
            .map(|joined| {
                joined
                    .split(',')
                    .map(|style| style.trim().to_string())
                    .filter(|style| !style.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let state = FilterState {
            search_query: self.search,
            category: self.category,
            location: self.location,
            price_tier: self.price,
            rating_floor: self.min_rating,
            availability: self.availability,
            styles,
            items_per_page: self.per_page.unwrap_or(DEFAULT_ITEMS_PER_PAGE).max(1),
        };

        (state, self.page)
    }
}

pub(crate) async fn search_handler(
    State(service): State<Arc<DirectoryService>>,
    Query(params): Query<VendorSearchParams>,
) -> Json<DirectoryPageView> {
    let (filters, page) = params.into_filter_state();
    Json(service.browse(&filters, page))
}

pub(crate) async fn facets_handler(
    State(service): State<Arc<DirectoryService>>,
) -> Json<DirectoryFacets> {
    Json(service.facets())
}
