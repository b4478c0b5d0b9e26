// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-platform registry records for nodes.
//!
//! The host distinguishes plugin-provided nodes from built-in ones with a
//! `builtinOrPlugin` discriminant; both share the same base fields.

use serde::{Deserialize, Serialize};

use crate::manifest::PluginManifest;

/// Fields common to every registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeItemBase {
    pub category_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_version: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginNodeItem {
    #[serde(flatten)]
    pub base: NodeItemBase,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default, alias = "repository_url", skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltinNodeItem {
    #[serde(flatten)]
    pub base: NodeItemBase,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<String>,
}

/// A registry record, dispatched on `builtinOrPlugin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "builtinOrPlugin", rename_all = "lowercase")]
pub enum NodeRegistryItem {
    Plugin(PluginNodeItem),
    Builtin(BuiltinNodeItem),
}

impl NodeRegistryItem {
    /// Derive a plugin record from manifest fields.
    pub fn from_manifest(manifest: &PluginManifest) -> Self {
        NodeRegistryItem::Plugin(PluginNodeItem {
            base: NodeItemBase {
                category_id: manifest.category.to_string(),
                description: manifest.description.clone(),
                icon: manifest.icon.clone().unwrap_or_default(),
                name: manifest.display_name.clone(),
                tags: manifest.tags.clone(),
                docs_url: None,
                max_nodes: None,
                type_version: None,
            },
            node_type: manifest
                .automation_node_type
                .clone()
                .unwrap_or_else(|| manifest.node_type.clone()),
            is_popular: manifest.is_popular,
            repository_url: None,
            sub_category_id: manifest.sub_category.clone(),
        })
    }

    pub fn base(&self) -> &NodeItemBase {
        match self {
            NodeRegistryItem::Plugin(item) => &item.base,
            NodeRegistryItem::Builtin(item) => &item.base,
        }
    }

    pub fn node_type(&self) -> &str {
        match self {
            NodeRegistryItem::Plugin(item) => &item.node_type,
            NodeRegistryItem::Builtin(item) => &item.node_type,
        }
    }

    pub fn is_plugin(&self) -> bool {
        matches!(self, NodeRegistryItem::Plugin(_))
    }
}
