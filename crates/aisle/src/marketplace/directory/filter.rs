use super::domain::Vendor;

/// Sentinel category meaning "no category constraint", alongside the empty string.
pub const CATEGORY_ALL: &str = "all";
/// Sentinel location meaning "no location constraint", alongside the empty string.
pub const ANY_LOCATION: &str = "Any Location";
/// Page size used when a caller does not choose one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 8;

/// One snapshot of every directory filter control.
///
/// Each control carries an "unconstrained" value (empty string, the `all` and
/// `Any Location` sentinels, a rating floor of 0, an empty style list) and a
/// predicate that passes automatically while the control is unconstrained. A
/// vendor survives only when all seven predicates hold.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Free-text query matched against name, description, and tags.
    pub search_query: String,
    pub category: String,
    pub location: String,
    /// Glyph tier string such as "$$".
    pub price_tier: String,
    /// Minimum rating; 0 lifts the constraint entirely.
    pub rating_floor: f32,
    pub availability: String,
    /// Style tags; a vendor needs at least one of them verbatim.
    pub styles: Vec<String>,
    pub items_per_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            category: String::new(),
            location: String::new(),
            price_tier: String::new(),
            rating_floor: 0.0,
            availability: String::new(),
            styles: Vec::new(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl FilterState {
    /// True when every active predicate accepts the vendor.
    pub fn matches(&self, vendor: &Vendor) -> bool {
        self.matches_search(vendor)
            && self.matches_category(vendor)
            && self.matches_location(vendor)
            && self.matches_price(vendor)
            && self.matches_rating(vendor)
            && self.matches_availability(vendor)
            && self.matches_styles(vendor)
    }

    fn matches_search(&self, vendor: &Vendor) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let query = self.search_query.to_lowercase();
        vendor.name.to_lowercase().contains(&query)
            || vendor.description.to_lowercase().contains(&query)
            || vendor
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
    }

    fn matches_category(&self, vendor: &Vendor) -> bool {
        if self.category.is_empty() || self.category == CATEGORY_ALL {
            return true;
        }
        vendor.category.eq_ignore_ascii_case(&self.category)
    }

    fn matches_location(&self, vendor: &Vendor) -> bool {
        // Substring containment, deliberately case-sensitive: "Austin" finds
        // "Austin, TX" but "austin" finds nothing.
        if self.location.is_empty() || self.location == ANY_LOCATION {
            return true;
        }
        vendor.location.contains(&self.location)
    }

    fn matches_price(&self, vendor: &Vendor) -> bool {
        // Tiers are ordinal glyph strings; two tiers match when their glyph
        // counts do, regardless of which glyph was used.
        if self.price_tier.is_empty() {
            return true;
        }
        glyph_count(&vendor.price) == glyph_count(&self.price_tier)
    }

    fn matches_rating(&self, vendor: &Vendor) -> bool {
        self.rating_floor == 0.0 || vendor.rating >= self.rating_floor
    }

    fn matches_availability(&self, vendor: &Vendor) -> bool {
        if self.availability.is_empty() {
            return true;
        }
        vendor.availability.eq_ignore_ascii_case(&self.availability)
    }

    fn matches_styles(&self, vendor: &Vendor) -> bool {
        if self.styles.is_empty() {
            return true;
        }
        self.styles.iter().any(|style| vendor.tags.contains(style))
    }
}

/// Apply the filter state to a catalog slice in one pass.
///
/// Catalog order is preserved and nothing is cached; the cost is linear in
/// the catalog on every call.
pub fn filter<'a>(catalog: &'a [Vendor], state: &FilterState) -> Vec<&'a Vendor> {
    catalog
        .iter()
        .filter(|vendor| state.matches(vendor))
        .collect()
}

fn glyph_count(tier: &str) -> usize {
    tier.chars().count()
}
