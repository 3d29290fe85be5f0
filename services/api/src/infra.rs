use aisle::error::AppError;
use aisle::marketplace::access::{OnboardingLookupError, OnboardingStatusSource, UserId};
use aisle::marketplace::directory::{CatalogImporter, Vendor, VendorCatalog, VendorId};
use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Onboarding flags held in process memory, standing in for the hosted
/// `vendor_profiles` table. A vendor with no entry reads as not onboarded,
/// the same as a missing profile row.
#[derive(Default)]
pub(crate) struct InMemoryOnboardingDirectory {
    flags: Mutex<HashMap<UserId, bool>>,
}

impl InMemoryOnboardingDirectory {
    pub(crate) fn mark(&self, vendor: UserId, complete: bool) {
        let mut guard = self.flags.lock().expect("onboarding mutex poisoned");
        guard.insert(vendor, complete);
    }
}

#[async_trait]
impl OnboardingStatusSource for InMemoryOnboardingDirectory {
    async fn onboarding_complete(&self, vendor: &UserId) -> Result<bool, OnboardingLookupError> {
        let guard = self.flags.lock().expect("onboarding mutex poisoned");
        Ok(guard.get(vendor).copied().unwrap_or(false))
    }
}

/// Load the CSV at `path` when one was configured, otherwise fall back to the
/// bundled sample catalog.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<VendorCatalog, AppError> {
    match path {
        Some(path) => CatalogImporter::from_path(path).map_err(AppError::from),
        None => Ok(sample_catalog()),
    }
}

pub(crate) fn sample_catalog() -> VendorCatalog {
    VendorCatalog::from_vendors(vec![
        Vendor {
            id: VendorId(1),
            name: "Elegant Moments Photography".to_string(),
            category: "Photography".to_string(),
            location: "Austin, TX".to_string(),
            price: "$$$".to_string(),
            rating: 4.9,
            tags: vec!["classic".to_string(), "romantic".to_string()],
            availability: "Available".to_string(),
            description: "Editorial wedding photography with a documentary eye.".to_string(),
        },
        Vendor {
            id: VendorId(2),
            name: "Golden Hour Films".to_string(),
            category: "Videography".to_string(),
            location: "Austin, TX".to_string(),
            price: "$$$".to_string(),
            rating: 4.4,
            tags: vec!["cinematic".to_string(), "modern".to_string()],
            availability: "Limited".to_string(),
            description: "Cinematic wedding films cut to your vows.".to_string(),
        },
        Vendor {
            id: VendorId(3),
            name: "Bloom & Vine Florals".to_string(),
            category: "Florist".to_string(),
            location: "Portland, OR".to_string(),
            price: "$$".to_string(),
            rating: 4.6,
            tags: vec!["boho".to_string(), "rustic".to_string()],
            availability: "Available".to_string(),
            description: "Seasonal arrangements from Pacific Northwest growers.".to_string(),
        },
        Vendor {
            id: VendorId(4),
            name: "The Grand Ballroom".to_string(),
            category: "Venue".to_string(),
            location: "Chicago, IL".to_string(),
            price: "$$$$".to_string(),
            rating: 4.2,
            tags: vec!["classic".to_string(), "glamorous".to_string()],
            availability: "Booked".to_string(),
            description: "A restored 1920s ballroom in the Loop.".to_string(),
        },
        Vendor {
            id: VendorId(5),
            name: "Harvest Table Catering".to_string(),
            category: "Catering".to_string(),
            location: "Portland, OR".to_string(),
            price: "$$".to_string(),
            rating: 4.3,
            tags: vec!["rustic".to_string(), "farm-to-table".to_string()],
            availability: "Available".to_string(),
            description: "Family-style menus built around local farms.".to_string(),
        },
        Vendor {
            id: VendorId(6),
            name: "Velvet Strings Quartet".to_string(),
            category: "Music".to_string(),
            location: "Chicago, IL".to_string(),
            price: "$$".to_string(),
            rating: 4.8,
            tags: vec!["classic".to_string(), "elegant".to_string()],
            availability: "Limited".to_string(),
            description: "String quartet for ceremonies and cocktail hours.".to_string(),
        },
        Vendor {
            id: VendorId(7),
            name: "Aurora Beauty Collective".to_string(),
            category: "Beauty".to_string(),
            location: "Austin, TX".to_string(),
            price: "$".to_string(),
            rating: 4.1,
            tags: vec!["modern".to_string(), "glam".to_string()],
            availability: "Available".to_string(),
            description: "On-location hair and makeup team.".to_string(),
        },
        Vendor {
            id: VendorId(8),
            name: "Sugar & Lace Cakery".to_string(),
            category: "Cake".to_string(),
            location: "Des Moines, IA".to_string(),
            price: "$$".to_string(),
            rating: 4.0,
            tags: vec!["vintage".to_string(), "romantic".to_string()],
            availability: "Available".to_string(),
            description: "Buttercream cakes and dessert tables.".to_string(),
        },
        Vendor {
            id: VendorId(9),
            name: "Willow Creek Estate".to_string(),
            category: "Venue".to_string(),
            location: "Austin, TX".to_string(),
            price: "$$$".to_string(),
            rating: 3.9,
            tags: vec!["outdoor".to_string(), "rustic".to_string()],
            availability: "Limited".to_string(),
            description: "Hill Country estate with oak-shaded lawns.".to_string(),
        },
        Vendor {
            id: VendorId(10),
            name: "Northside Beats".to_string(),
            category: "DJ".to_string(),
            location: "Chicago, IL".to_string(),
            price: "$".to_string(),
            rating: 4.4,
            tags: vec!["modern".to_string(), "party".to_string()],
            availability: "Available".to_string(),
            description: "Open-format DJs who read the room.".to_string(),
        },
    ])
}
