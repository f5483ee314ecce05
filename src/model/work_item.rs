use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TITLE_FIELD: &str = "System.Title";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: u64,
    #[serde(default)]
    pub fields: Map<String, Value>,
    /// Absent from the payload when the item has no links
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl WorkItem {
    pub fn title(&self) -> Option<&str> {
        self.fields.get(TITLE_FIELD).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub rel: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}
