use serde::{Deserialize, Serialize};

/// The character the island guide assigns to a visitor.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IslandIdentity {
    pub role: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub emoji: String,
}
