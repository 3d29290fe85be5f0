use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::domain::{Vendor, VendorId};

/// Unvalidated vendor payload as received from a catalog source.
///
/// Every field is optional; `validate` decides what survives into the
/// directory. JSON payloads may spell the category field `type`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVendorRecord {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(alias = "type")]
    pub category: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub availability: Option<String>,
    pub description: Option<String>,
}

impl RawVendorRecord {
    fn validate(self) -> Result<Vendor, RecordRejection> {
        let id = self.id.ok_or(RecordRejection::MissingField("id"))?;
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(RecordRejection::MissingField("name"))?;
        let category = self.category.ok_or(RecordRejection::MissingField("category"))?;
        let location = self.location.ok_or(RecordRejection::MissingField("location"))?;
        let price = self.price.ok_or(RecordRejection::MissingField("price"))?;
        let rating = self.rating.ok_or(RecordRejection::MissingField("rating"))?;
        if !(0.0..=5.0).contains(&rating) {
            return Err(RecordRejection::RatingOutOfRange(rating));
        }
        let availability = self
            .availability
            .ok_or(RecordRejection::MissingField("availability"))?;
        let description = self
            .description
            .ok_or(RecordRejection::MissingField("description"))?;

        Ok(Vendor {
            id: VendorId(id),
            name,
            category,
            location,
            price,
            rating,
            tags: self.tags,
            availability,
            description,
        })
    }
}

/// Reason a catalog entry was rejected at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordRejection {
    #[error("entry is not a JSON object")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("rating {0} is outside the 0-5 scale")]
    RatingOutOfRange(f32),
    #[error("duplicate vendor id {0}")]
    DuplicateId(u64),
    #[error("entry could not be parsed: {0}")]
    Unparseable(String),
}

/// A rejected entry kept for diagnostics, with its position in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub index: usize,
    pub rejection: RecordRejection,
}

/// The validated, order-preserving vendor catalog.
///
/// Construction is fail-soft: entries that do not validate are skipped and
/// logged, and the rejection is retained so operators can see what was
/// dropped. Surviving vendors keep their source order and carry unique ids.
#[derive(Debug, Clone, Default)]
pub struct VendorCatalog {
    vendors: Vec<Vendor>,
    rejected: Vec<RejectedRecord>,
    seen_ids: HashSet<u64>,
}

impl VendorCatalog {
    /// Build a catalog from already-validated vendors, still enforcing id
    /// uniqueness.
    pub fn from_vendors(vendors: Vec<Vendor>) -> Self {
        let mut catalog = Self::default();
        for (index, vendor) in vendors.into_iter().enumerate() {
            catalog.push_validated(index, vendor);
        }
        catalog
    }

    /// Ingest a JSON payload expected to be an array of vendor records.
    ///
    /// A payload that is not an array is logged and treated as an empty
    /// catalog; individual null or malformed entries are rejected without
    /// aborting the rest.
    pub fn from_json_value(payload: Value) -> Self {
        let Value::Array(entries) = payload else {
            warn!("vendor catalog payload is not an array; loading an empty catalog");
            return Self::default();
        };

        let mut catalog = Self::default();
        for (index, entry) in entries.into_iter().enumerate() {
            if !entry.is_object() {
                catalog.push_rejected(index, RecordRejection::NotAnObject);
                continue;
            }
            match serde_json::from_value::<RawVendorRecord>(entry) {
                Ok(raw) => catalog.push_raw(index, raw),
                Err(err) => {
                    catalog.push_rejected(index, RecordRejection::Unparseable(err.to_string()))
                }
            }
        }
        catalog
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    /// Distinct filter-control values present in the catalog, sorted for
    /// stable dropdown rendering.
    pub fn facets(&self) -> DirectoryFacets {
        let mut categories = BTreeSet::new();
        let mut locations = BTreeSet::new();
        let mut styles = BTreeSet::new();
        let mut availability = BTreeSet::new();

        for vendor in &self.vendors {
            categories.insert(vendor.category.clone());
            locations.insert(vendor.location.clone());
            availability.insert(vendor.availability.clone());
            for tag in &vendor.tags {
                styles.insert(tag.clone());
            }
        }

        DirectoryFacets {
            categories: categories.into_iter().collect(),
            locations: locations.into_iter().collect(),
            styles: styles.into_iter().collect(),
            availability: availability.into_iter().collect(),
        }
    }

    fn push_raw(&mut self, index: usize, raw: RawVendorRecord) {
        match raw.validate() {
            Ok(vendor) => self.push_validated(index, vendor),
            Err(rejection) => self.push_rejected(index, rejection),
        }
    }

    fn push_validated(&mut self, index: usize, vendor: Vendor) {
        if !self.seen_ids.insert(vendor.id.0) {
            self.push_rejected(index, RecordRejection::DuplicateId(vendor.id.0));
            return;
        }
        self.vendors.push(vendor);
    }

    fn push_rejected(&mut self, index: usize, rejection: RecordRejection) {
        warn!(index, %rejection, "skipping vendor catalog record");
        self.rejected.push(RejectedRecord { index, rejection });
    }
}

/// Distinct values the directory offers in its filter dropdowns.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DirectoryFacets {
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    pub styles: Vec<String>,
    pub availability: Vec<String>,
}

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read vendor catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid vendor catalog CSV data: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads vendor catalogs exported as CSV, one row per vendor with style tags
/// joined by `|`.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<VendorCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Ingest CSV rows with the same fail-soft policy as JSON payloads: rows
    /// that fail to deserialize or validate are rejected individually, while
    /// transport failures abort the import.
    pub fn from_reader<R: Read>(reader: R) -> Result<VendorCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut catalog = VendorCatalog::default();

        for (index, row) in csv_reader.deserialize::<CsvVendorRow>().enumerate() {
            match row {
                Ok(row) => catalog.push_raw(index, row.into_raw()),
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
                Err(err) => {
                    catalog.push_rejected(index, RecordRejection::Unparseable(err.to_string()))
                }
            }
        }

        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
struct CsvVendorRow {
    id: Option<u64>,
    name: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
    location: Option<String>,
    price: Option<String>,
    rating: Option<f32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tags: Option<String>,
    availability: Option<String>,
    description: Option<String>,
}

impl CsvVendorRow {
    fn into_raw(self) -> RawVendorRecord {
        let tags = self
            .tags
            .map(|joined| {
                joined
                    .split('|')
                    .map(|tag| tag.trim().to_string())
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        RawVendorRecord {
            id: self.id,
            name: self.name,
            category: self.category,
            location: self.location,
            price: self.price,
            rating: self.rating,
            tags,
            availability: self.availability,
            description: self.description,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
