//! record.json data structures

use serde::{Deserialize, Serialize};

/// Root structure for record.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordJson {
    pub node: Vec<NodeRecord>,
    pub include: Vec<IncludeRecord>,
}

impl RecordJson {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Node record structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub executable: String,
    pub package: String,
    pub name: String,
    pub namespace: String,
    pub output: Option<String>,
    pub params: Vec<(String, String)>,
    pub args: Option<Vec<String>>,
    pub cmd: Vec<String>,
}

/// A nested launch description the executor must load itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludeRecord {
    pub file: String,
    pub args: Vec<(String, String)>,
}
