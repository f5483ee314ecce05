use serde::{Deserialize, Serialize};

/// A build pipeline, as returned by the definitions listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionReference {
    pub id: u64,
    pub name: String,
}

impl std::fmt::Display for DefinitionReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
