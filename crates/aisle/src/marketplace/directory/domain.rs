use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorId(pub u64);

/// A validated vendor listing as it appears in the directory.
///
/// Records enter through the catalog ingestion boundary, which rejects
/// anything with a missing field or an out-of-range rating, so the filter and
/// pagination passes can assume every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    /// Category tag such as "Photography"; upstream payloads spell the field `type`.
    pub category: String,
    /// Free-text city/region, e.g. "Austin, TX".
    pub location: String,
    /// Ordinal price tier written as repeated glyphs: "$", "$$", "$$$".
    pub price: String,
    /// Average review rating on a 0-5 scale.
    pub rating: f32,
    /// Style tags consumed by both the text search and the style filter.
    pub tags: Vec<String>,
    /// Booking availability label, one of the `AVAILABILITY_*` values by convention.
    pub availability: String,
    pub description: String,
}

pub const AVAILABILITY_AVAILABLE: &str = "Available";
pub const AVAILABILITY_LIMITED: &str = "Limited";
pub const AVAILABILITY_BOOKED: &str = "Booked";
