use schemars::JsonSchema;
use serde::Deserialize;
use trip_planner::{completion_schema, CompletionSchema};

/// A packing list the model fills in
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[completion_schema]
#[allow(dead_code)]
struct PackingList {
    /// Where the traveler is going
    destination: String,
    item_count: u32,
    #[serde(default)]
    luggage: Option<Luggage>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[allow(dead_code)]
struct Luggage {
    kind: String,
    weight_kg: f64,
}

#[completion_schema(name = "Weather", description = "Forecast for one day")]
#[derive(Debug, Deserialize, JsonSchema)]
#[allow(dead_code)]
struct DailyForecast {
    summary: String,
}

#[test]
fn test_schema_metadata_from_doc_comments() {
    let handle = PackingList::schema();
    assert_eq!(handle.schema_name(), "PackingList");
    assert_eq!(handle.type_name(), "PackingList");

    let schema = handle.schema_json();
    assert_eq!(schema["title"], "PackingList");
    assert_eq!(schema["description"], "A packing list the model fills in");
    assert_eq!(
        schema["properties"]["destination"]["description"],
        "Where the traveler is going"
    );
}

#[test]
fn test_schema_uses_serde_names_and_required() {
    let handle = PackingList::schema();
    let mut names = handle.property_names();
    names.sort_unstable();
    assert_eq!(names, ["destination", "itemCount", "luggage"]);

    let required = handle.schema_json()["required"].as_array().unwrap();
    assert!(required.iter().any(|name| name == "destination"));
    assert!(required.iter().any(|name| name == "itemCount"));
    assert!(!required.iter().any(|name| name == "luggage"));
}

#[test]
fn test_nested_types_are_inlined() {
    let schema = PackingList::schema().schema_json();
    assert!(!schema.to_string().contains("$ref"));
    assert!(schema.to_string().contains("weight_kg"));
}

#[test]
fn test_explicit_name_and_description() {
    let handle = DailyForecast::schema();
    assert_eq!(handle.schema_name(), "Weather");
    assert_eq!(handle.type_name(), "DailyForecast");
    assert_eq!(handle.schema_json()["description"], "Forecast for one day");
}

#[test]
fn test_schema_handle_is_cached() {
    assert!(std::ptr::eq(PackingList::schema(), PackingList::schema()));
    assert!(trip_planner::schema_type_name::<PackingList>().ends_with("PackingList"));
}
