use crate::error::{ReconcileError, ReconcileResult};
use serde_json::Value;

pub const NO_TITLE: &str = "No Title";
const ITEM_URL_PREFIX: &str = "https://archive.org/details/";

/// One document from the archive's `response.docs` list.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub identifier: String,
    pub title: String,
    /// Scalar or list depending on the item.
    pub creator: Option<Value>,
    pub year: Option<Value>,
    pub mediatype: Option<String>,
}

impl Candidate {
    pub fn from_doc(doc: &Value) -> ReconcileResult<Self> {
        let identifier = doc
            .get("identifier")
            .and_then(Value::as_str)
            .ok_or(ReconcileError::MissingIdentifier)?
            .to_string();

        Ok(Self {
            identifier,
            title: display_title(doc.get("title")),
            creator: present(doc.get("creator")),
            year: present(doc.get("year")),
            mediatype: doc.get("mediatype").and_then(Value::as_str).map(str::to_string),
        })
    }

    pub fn item_url(&self) -> String {
        format!("{ITEM_URL_PREFIX}{}", self.identifier)
    }
}

// Multi-valued titles show their first entry.
fn display_title(title: Option<&Value>) -> String {
    match title {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .find_map(Value::as_str)
            .unwrap_or(NO_TITLE)
            .to_string(),
        _ => NO_TITLE.to_string(),
    }
}

fn present(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}
