//! Agent kinds and descriptors.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The fixed set of simulated pipeline stages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgentKind {
    /// Plans the workflow; always runs first
    Scheduler,
    /// Literature and knowledge extraction
    Knowledge,
    /// Single-cell RNA-seq data processing
    Scrna,
    /// Filtering and quality control
    Filter,
    /// Final report; always runs last
    Summary,
}

impl AgentKind {
    /// Whether this agent is placed by the selector itself rather than by keywords.
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Scheduler | Self::Summary)
    }
}

/// An agent as it appears on the wire: `{ "type": ..., "name": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    /// Agent kind
    #[serde(rename = "type")]
    pub kind: AgentKind,
    /// Localized display name
    pub name: String,
}

impl AgentDescriptor {
    /// Create a new descriptor.
    pub fn new(kind: AgentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_round_trips_through_strings() {
        assert_eq!(AgentKind::Scrna.to_string(), "scrna");
        assert_eq!(AgentKind::from_str("filter").unwrap(), AgentKind::Filter);
        assert!(AgentKind::from_str("planner").is_err());
    }

    #[test]
    fn test_descriptor_wire_shape() {
        let agent = AgentDescriptor::new(AgentKind::Knowledge, "知识提取Agent");
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json, serde_json::json!({"type": "knowledge", "name": "知识提取Agent"}));
    }

    #[test]
    fn test_fixed_agents() {
        assert!(AgentKind::Scheduler.is_fixed());
        assert!(AgentKind::Summary.is_fixed());
        assert!(!AgentKind::Filter.is_fixed());
    }
}
