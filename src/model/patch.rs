use serde::{Deserialize, Serialize};

use super::work_item::Relation;

/// One JSON-patch instruction against a work item document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Relation },
    Remove { path: String },
}

impl PatchOperation {
    pub fn append_relation(relation: Relation) -> Self {
        PatchOperation::Add {
            path: "/relations/-".into(),
            value: relation,
        }
    }

    pub fn remove_relation(index: usize) -> Self {
        PatchOperation::Remove {
            path: format!("/relations/{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_serializes_with_value() {
        let op = PatchOperation::append_relation(Relation {
            rel: "ArtifactLink".into(),
            url: "vstfs:///Git/Ref/x".into(),
            attributes: serde_json::Map::new(),
        });
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "op": "add",
                "path": "/relations/-",
                "value": {"rel": "ArtifactLink", "url": "vstfs:///Git/Ref/x"}
            })
        );
    }

    #[test]
    fn remove_serializes_without_value() {
        let op = PatchOperation::remove_relation(0);
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"op": "remove", "path": "/relations/0"})
        );
    }
}
