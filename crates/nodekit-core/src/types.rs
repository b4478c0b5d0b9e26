// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Closed enumerations shared by the manifest model, validator and registry.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Category of a plugin node as understood by the host platform.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeCategory {
    Trigger,
    Action,
    Transform,
    Control,
    Ai,
    Utility,
}

impl NodeCategory {
    /// All accepted category names, in declaration order.
    pub const NAMES: [&'static str; 6] =
        ["trigger", "action", "transform", "control", "ai", "utility"];
}

/// Direction of a port on a node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PortType {
    Input,
    Output,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn category_names_match_variants() {
        let names: Vec<String> = NodeCategory::iter().map(|c| c.to_string()).collect();
        assert_eq!(names, NodeCategory::NAMES);
    }

    #[test]
    fn category_display_and_from_str_round_trip() {
        for category in NodeCategory::iter() {
            let parsed = NodeCategory::from_str(&category.to_string()).unwrap();
            assert_eq!(parsed, category);
        }
        assert!(NodeCategory::from_str("ai_tool").is_err());
    }

    #[test]
    fn port_type_serializes_lowercase() {
        let json = serde_json::to_string(&PortType::Output).unwrap();
        assert_eq!(json, "\"output\"");
        let parsed: PortType = serde_json::from_str("\"input\"").unwrap();
        assert_eq!(parsed, PortType::Input);
    }
}
