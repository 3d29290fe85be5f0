use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::marketplace::directory::domain::{Vendor, VendorId};
use crate::marketplace::directory::{directory_router, DirectoryService, FilterState, VendorCatalog};

#[allow(clippy::too_many_arguments)]
pub(super) fn vendor(
    id: u64,
    name: &str,
    category: &str,
    location: &str,
    price: &str,
    rating: f32,
    tags: &[&str],
    availability: &str,
    description: &str,
) -> Vendor {
    Vendor {
        id: VendorId(id),
        name: name.to_string(),
        category: category.to_string(),
        location: location.to_string(),
        price: price.to_string(),
        rating,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        availability: availability.to_string(),
        description: description.to_string(),
    }
}

/// Ten-vendor catalog used across the directory tests. Three vendors sit at
/// or above a 4.5 rating, four are priced "$$", and four are in Austin.
pub(super) fn sample_vendors() -> Vec<Vendor> {
    vec![
        vendor(
            1,
            "Elegant Moments Photography",
            "Photography",
            "Austin, TX",
            "$$$",
            4.9,
            &["classic", "romantic"],
            "Available",
            "Editorial wedding photography with a documentary eye.",
        ),
        vendor(
            2,
            "Golden Hour Films",
            "Videography",
            "Austin, TX",
            "$$$",
            4.4,
            &["cinematic", "modern"],
            "Limited",
            "Cinematic wedding films cut to your vows.",
        ),
        vendor(
            3,
            "Bloom & Vine Florals",
            "Florist",
            "Portland, OR",
            "$$",
            4.6,
            &["boho", "rustic"],
            "Available",
            "Seasonal arrangements from Pacific Northwest growers.",
        ),
        vendor(
            4,
            "The Grand Ballroom",
            "Venue",
            "Chicago, IL",
            "$$$$",
            4.2,
            &["classic", "glamorous"],
            "Booked",
            "A restored 1920s ballroom in the Loop.",
        ),
        vendor(
            5,
            "Harvest Table Catering",
            "Catering",
            "Portland, OR",
            "$$",
            4.3,
            &["rustic", "farm-to-table"],
            "Available",
            "Family-style menus built around local farms.",
        ),
        vendor(
            6,
            "Velvet Strings Quartet",
            "Music",
            "Chicago, IL",
            "$$",
            4.8,
            &["classic", "elegant"],
            "Limited",
            "String quartet for ceremonies and cocktail hours.",
        ),
        vendor(
            7,
            "Aurora Beauty Collective",
            "Beauty",
            "Austin, TX",
            "$",
            4.1,
            &["modern", "glam"],
            "Available",
            "On-location hair and makeup team.",
        ),
        vendor(
            8,
            "Sugar & Lace Cakery",
            "Cake",
            "Des Moines, IA",
            "$$",
            4.0,
            &["vintage", "romantic"],
            "Available",
            "Buttercream cakes and dessert tables.",
        ),
        vendor(
            9,
            "Willow Creek Estate",
            "Venue",
            "Austin, TX",
            "$$$",
            3.9,
            &["outdoor", "rustic"],
            "Limited",
            "Hill Country estate with oak-shaded lawns.",
        ),
        vendor(
            10,
            "Northside Beats",
            "DJ",
            "Chicago, IL",
            "$",
            4.4,
            &["modern", "party"],
            "Available",
            "Open-format DJs who read the room.",
        ),
    ]
}

pub(super) fn sample_service() -> DirectoryService {
    DirectoryService::new(VendorCatalog::from_vendors(sample_vendors()))
}

pub(super) fn names(vendors: &[&Vendor]) -> Vec<String> {
    vendors.iter().map(|vendor| vendor.name.clone()).collect()
}

pub(super) fn state() -> FilterState {
    FilterState::default()
}

pub(super) fn sample_router() -> axum::Router {
    directory_router(Arc::new(sample_service()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
