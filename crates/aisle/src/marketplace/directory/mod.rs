//! Vendor directory: catalog ingestion, filtering, and pagination.
//!
//! The engine is split into pure pieces so each stage can be exercised on its
//! own: `filter` applies the seven ANDed predicates in catalog order,
//! `paginate` slices the survivors with clamped page numbers, and
//! `BrowseSession` layers the page-reset rule on top. `VendorCatalog` guards
//! the ingestion boundary so everything downstream can trust its records.

pub mod browse;
pub mod catalog;
pub mod domain;
pub mod filter;
pub mod pagination;
pub mod router;

#[cfg(test)]
mod tests;

pub use browse::{BrowseSession, DirectoryPageView, DirectoryService};
pub use catalog::{
    CatalogImportError, CatalogImporter, DirectoryFacets, RawVendorRecord, RecordRejection,
    RejectedRecord, VendorCatalog,
};
pub use domain::{Vendor, VendorId};
pub use filter::{filter, FilterState, ANY_LOCATION, CATEGORY_ALL, DEFAULT_ITEMS_PER_PAGE};
pub use pagination::{paginate, Page};
pub use router::directory_router;
