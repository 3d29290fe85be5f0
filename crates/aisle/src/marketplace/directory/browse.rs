use serde::Serialize;

use super::catalog::{DirectoryFacets, VendorCatalog};
use super::domain::Vendor;
use super::filter::{filter, FilterState};
use super::pagination::paginate;

/// Filter and pagination state for one visitor's trip through the directory.
///
/// Every setter replaces one control and, when the new value actually differs
/// from the old one, snaps the requested page back to 1 so the visitor is
/// never stranded on a page that no longer exists. Re-submitting the value a
/// control already holds is not a change and keeps the current page, as does
/// adjusting the page size (the clamp inside `paginate` keeps it in range).
#[derive(Debug, Clone)]
pub struct BrowseSession {
    filters: FilterState,
    requested_page: i64,
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseSession {
    pub fn new() -> Self {
        Self {
            filters: FilterState::default(),
            requested_page: 1,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn requested_page(&self) -> i64 {
        self.requested_page
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.filters.search_query != query {
            self.filters.search_query = query;
            self.requested_page = 1;
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if self.filters.category != category {
            self.filters.category = category;
            self.requested_page = 1;
        }
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        let location = location.into();
        if self.filters.location != location {
            self.filters.location = location;
            self.requested_page = 1;
        }
    }

    pub fn set_price_tier(&mut self, price_tier: impl Into<String>) {
        let price_tier = price_tier.into();
        if self.filters.price_tier != price_tier {
            self.filters.price_tier = price_tier;
            self.requested_page = 1;
        }
    }

    pub fn set_rating_floor(&mut self, rating_floor: f32) {
        if self.filters.rating_floor != rating_floor {
            self.filters.rating_floor = rating_floor;
            self.requested_page = 1;
        }
    }

    pub fn set_availability(&mut self, availability: impl Into<String>) {
        let availability = availability.into();
        if self.filters.availability != availability {
            self.filters.availability = availability;
            self.requested_page = 1;
        }
    }

    pub fn set_styles(&mut self, styles: Vec<String>) {
        if self.filters.styles != styles {
            self.filters.styles = styles;
            self.requested_page = 1;
        }
    }

    /// Add the style if absent, remove it if present. A toggle always changes
    /// the selection, so it always resets the page.
    pub fn toggle_style(&mut self, style: impl Into<String>) {
        let style = style.into();
        match self.filters.styles.iter().position(|tag| *tag == style) {
            Some(position) => {
                self.filters.styles.remove(position);
            }
            None => self.filters.styles.push(style),
        }
        self.requested_page = 1;
    }

    /// Changing the page size re-slices the current results without touching
    /// the requested page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.filters.items_per_page = items_per_page.max(1);
    }

    pub fn request_page(&mut self, page: i64) {
        self.requested_page = page;
    }

    /// Run filtering and pagination for the current state against a catalog.
    pub fn page_view(&self, catalog: &[Vendor]) -> DirectoryPageView {
        build_page_view(catalog, &self.filters, self.requested_page)
    }
}

/// Catalog and engine behind one handle, shared as router state.
pub struct DirectoryService {
    catalog: VendorCatalog,
}

impl DirectoryService {
    pub fn new(catalog: VendorCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &VendorCatalog {
        &self.catalog
    }

    pub fn browse(&self, filters: &FilterState, requested_page: i64) -> DirectoryPageView {
        build_page_view(self.catalog.vendors(), filters, requested_page)
    }

    pub fn facets(&self) -> DirectoryFacets {
        self.catalog.facets()
    }
}

/// One rendered directory page.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryPageView {
    pub vendors: Vec<Vendor>,
    pub page: usize,
    pub per_page: usize,
    pub total_matches: usize,
    pub total_pages: usize,
}

fn build_page_view(catalog: &[Vendor], filters: &FilterState, requested_page: i64) -> DirectoryPageView {
    let matches = filter(catalog, filters);
    let page = paginate(&matches, requested_page, filters.items_per_page);

    DirectoryPageView {
        vendors: page.items.into_iter().cloned().collect(),
        page: page.page,
        per_page: page.per_page,
        total_matches: page.total_items,
        total_pages: page.total_pages,
    }
}
