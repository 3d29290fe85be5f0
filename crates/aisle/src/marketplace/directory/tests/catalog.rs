use super::common::*;
use crate::marketplace::directory::{
    CatalogImportError, CatalogImporter, RecordRejection, VendorCatalog,
};
use serde_json::json;
use std::io::Cursor;

fn record(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "type": "Photography",
        "location": "Austin, TX",
        "price": "$$",
        "rating": 4.5,
        "tags": ["classic"],
        "availability": "Available",
        "description": "Sample vendor."
    })
}

#[test]
fn json_array_builds_an_ordered_catalog() {
    let payload = json!([record(1, "First Light Studio"), record(2, "Second Shooter Co")]);

    let catalog = VendorCatalog::from_json_value(payload);
    assert_eq!(catalog.len(), 2);
    assert!(catalog.rejected().is_empty());
    assert_eq!(catalog.vendors()[0].name, "First Light Studio");
    assert_eq!(catalog.vendors()[1].name, "Second Shooter Co");
}

#[test]
fn non_array_payload_yields_an_empty_catalog() {
    let catalog = VendorCatalog::from_json_value(json!({ "vendors": [] }));
    assert!(catalog.is_empty());
    assert!(catalog.rejected().is_empty());
}

#[test]
fn null_and_malformed_entries_are_skipped_individually() {
    let payload = json!([
        record(1, "Kept Vendor"),
        null,
        { "id": "not-a-number", "name": "Broken" },
        { "id": 2, "type": "Venue" }
    ]);

    let catalog = VendorCatalog::from_json_value(payload);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.vendors()[0].name, "Kept Vendor");

    let rejected = catalog.rejected();
    assert_eq!(rejected.len(), 3);
    assert_eq!(rejected[0].index, 1);
    assert_eq!(rejected[0].rejection, RecordRejection::NotAnObject);
    assert!(matches!(rejected[1].rejection, RecordRejection::Unparseable(_)));
    assert_eq!(rejected[2].rejection, RecordRejection::MissingField("name"));
}

#[test]
fn duplicate_ids_keep_the_first_record() {
    let payload = json!([record(7, "Original"), record(7, "Impostor")]);

    let catalog = VendorCatalog::from_json_value(payload);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.vendors()[0].name, "Original");
    assert_eq!(catalog.rejected()[0].rejection, RecordRejection::DuplicateId(7));
}

#[test]
fn out_of_range_ratings_are_rejected() {
    let mut entry = record(3, "Too Good To Be True");
    entry["rating"] = json!(7.2);

    let catalog = VendorCatalog::from_json_value(json!([entry]));
    assert!(catalog.is_empty());
    assert_eq!(
        catalog.rejected()[0].rejection,
        RecordRejection::RatingOutOfRange(7.2)
    );
}

#[test]
fn type_field_aliases_category() {
    let payload = json!([record(4, "Aliased")]);
    let catalog = VendorCatalog::from_json_value(payload);
    assert_eq!(catalog.vendors()[0].category, "Photography");
}

#[test]
fn from_vendors_still_enforces_unique_ids() {
    let mut vendors = sample_vendors();
    vendors.push(vendors[0].clone());

    let catalog = VendorCatalog::from_vendors(vendors);
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog.rejected().len(), 1);
}

#[test]
fn csv_rows_become_vendors_with_split_tags() {
    let csv = "id,name,type,location,price,rating,tags,availability,description\n\
1,Bloom & Vine Florals,Florist,\"Portland, OR\",$$,4.6,boho|rustic,Available,Seasonal arrangements.\n\
2,Northside Beats,DJ,\"Chicago, IL\",$,4.4,modern | party,Available,Open-format DJs.\n";

    let catalog = CatalogImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.vendors()[0].tags, vec!["boho", "rustic"]);
    assert_eq!(catalog.vendors()[1].tags, vec!["modern", "party"]);
    assert_eq!(catalog.vendors()[0].location, "Portland, OR");
}

#[test]
fn csv_rows_missing_fields_are_rejected_without_aborting() {
    let csv = "id,name,type,location,price,rating,tags,availability,description\n\
1,,Florist,\"Portland, OR\",$$,4.6,boho,Available,No name given.\n\
2,Kept Vendor,Florist,\"Portland, OR\",$$,4.6,,Available,Survives the row above.\n";

    let catalog = CatalogImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.vendors()[0].name, "Kept Vendor");
    assert!(catalog.vendors()[0].tags.is_empty());
    assert_eq!(catalog.rejected()[0].rejection, RecordRejection::MissingField("name"));
}

#[test]
fn csv_rows_with_unparseable_values_are_rejected() {
    let csv = "id,name,type,location,price,rating,tags,availability,description\n\
one,Broken Vendor,Florist,\"Portland, OR\",$$,4.6,boho,Available,Bad id column.\n";

    let catalog = CatalogImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
    assert!(catalog.is_empty());
    assert!(matches!(
        catalog.rejected()[0].rejection,
        RecordRejection::Unparseable(_)
    ));
}

#[test]
fn missing_csv_file_surfaces_an_io_error() {
    let result = CatalogImporter::from_path("definitely-missing-vendors.csv");
    assert!(matches!(result, Err(CatalogImportError::Io(_))));
}

#[test]
fn facets_collect_distinct_sorted_values() {
    let catalog = VendorCatalog::from_vendors(sample_vendors());
    let facets = catalog.facets();

    assert_eq!(facets.categories.len(), 9);
    assert_eq!(facets.locations.len(), 4);
    assert_eq!(
        facets.availability,
        vec!["Available", "Booked", "Limited"]
    );
    assert!(facets.styles.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(facets.styles.contains(&"rustic".to_string()));
}
