//! Workflow node kinds.
//!
//! Kept in sync with the `chk_nodes_node_type` constraint in
//! `db/migrations`. The serialized form is the SCREAMING_SNAKE_CASE name so
//! the frontend can compare against the same strings the database stores.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Placeholder node every new workflow starts with.
    Initial,
    /// Started by a user clicking "execute" in the editor.
    ManualTrigger,
    /// Performs an outbound HTTP request.
    HttpRequest,
}

impl NodeType {
    /// Every variant, in declaration order.
    pub const ALL: [NodeType; 3] = [
        NodeType::Initial,
        NodeType::ManualTrigger,
        NodeType::HttpRequest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Initial => "INITIAL",
            NodeType::ManualTrigger => "MANUAL_TRIGGER",
            NodeType::HttpRequest => "HTTP_REQUEST",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown node type: {s}")))
    }
}
