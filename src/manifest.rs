use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "Internet Archive Reconciliation Service";
pub const IDENTIFIER_SPACE: &str = "https://archive.org/";
pub const SCHEMA_SPACE: &str = "http://schema.org/";
pub const VIEW_URL_TEMPLATE: &str = "https://archive.org/details/{{id}}";

/// Metadata document returned when a request carries no query.
pub fn service_manifest() -> Value {
    json!({
        "name": SERVICE_NAME,
        "identifierSpace": IDENTIFIER_SPACE,
        "schemaSpace": SCHEMA_SPACE,
        "view": { "url": VIEW_URL_TEMPLATE }
    })
}
