// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory catalog of plugin manifests.
//!
//! The `PluginRegistry` stores manifests keyed by `nodeType`. Iteration
//! follows registration order; re-registering a key replaces the manifest in
//! place, keeping its original position.

use indexmap::IndexMap;
use nodekit_core::{NodeCategory, NodekitError};

use crate::lifecycle::PluginNode;
use crate::manifest::PluginManifest;

/// Registry of known plugins, constructed explicitly and passed by reference.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    entries: IndexMap<String, PluginManifest>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a manifest under its `nodeType`, replacing any existing
    /// entry. Returns the replaced manifest. Blank or whitespace-padded
    /// node types are rejected.
    pub fn register(
        &mut self,
        manifest: PluginManifest,
    ) -> Result<Option<PluginManifest>, NodekitError> {
        let key = manifest.node_type.as_str();
        if key.trim().is_empty() {
            return Err(NodekitError::InvalidArgument(format!(
                "plugin `{}` has no node type",
                manifest.name
            )));
        }
        if key.trim() != key {
            return Err(NodekitError::InvalidArgument(format!(
                "plugin `{}` has surrounding whitespace in node type `{key}`",
                manifest.name
            )));
        }

        let key = key.to_string();
        let previous = self.entries.insert(key.clone(), manifest);
        match &previous {
            Some(old) => tracing::warn!(
                node_type = %key,
                old_version = %old.version,
                "replacing registered plugin"
            ),
            None => tracing::debug!(node_type = %key, "registered plugin"),
        }
        Ok(previous)
    }

    /// Register the manifest of a plugin instance.
    pub fn register_plugin(
        &mut self,
        plugin: &dyn PluginNode,
    ) -> Result<Option<PluginManifest>, NodekitError> {
        self.register(plugin.manifest().clone())
    }

    /// Remove an entry, keeping the order of the rest. Absent keys are a no-op.
    pub fn unregister(&mut self, node_type: &str) -> Option<PluginManifest> {
        self.entries.shift_remove(node_type)
    }

    pub fn get(&self, node_type: &str) -> Option<&PluginManifest> {
        self.entries.get(node_type)
    }

    /// All manifests in registration order.
    pub fn list(&self) -> Vec<&PluginManifest> {
        self.entries.values().collect()
    }

    /// Case-insensitive substring match on display name, description or any
    /// tag. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&PluginManifest> {
        let needle = query.to_lowercase();
        self.entries
            .values()
            .filter(|m| {
                m.display_name.to_lowercase().contains(&needle)
                    || m.description.to_lowercase().contains(&needle)
                    || m.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn get_by_category(&self, category: NodeCategory) -> Vec<&PluginManifest> {
        self.entries
            .values()
            .filter(|m| m.category == category)
            .collect()
    }

    /// Manifests flagged `isPopular`.
    pub fn get_popular(&self) -> Vec<&PluginManifest> {
        self.entries.values().filter(|m| m.is_popular).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodekit_core::PortType;
    use tracing_test::traced_test;

    use crate::manifest::PortDefinition;

    fn test_manifest(node_type: &str, display_name: &str, category: NodeCategory) -> PluginManifest {
        PluginManifest {
            name: format!("@acme/{}", node_type.replace('.', "-")),
            version: "1.0.0".to_string(),
            description: format!("Test plugin {display_name}"),
            author: "Acme".to_string(),
            node_type: node_type.to_string(),
            automation_node_type: None,
            display_name: display_name.to_string(),
            category,
            ports: vec![PortDefinition::new("in", PortType::Input)],
            tags: vec![],
            domain: None,
            sub_category: None,
            icon: None,
            is_popular: false,
            sdk_version: None,
            main: None,
            keywords: vec![],
            metadata: None,
            automation_configs: None,
        }
    }

    fn populated() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        let mut http = test_manifest("action.http", "HTTP Request", NodeCategory::Action);
        http.tags = vec!["api".to_string(), "REST".to_string()];
        http.is_popular = true;
        registry.register(http).unwrap();
        registry
            .register(test_manifest("trigger.cron", "Schedule", NodeCategory::Trigger))
            .unwrap();
        registry
            .register(test_manifest("action.email", "Send Email", NodeCategory::Action))
            .unwrap();
        registry
    }

    fn keys(manifests: &[&PluginManifest]) -> Vec<String> {
        manifests.iter().map(|m| m.node_type.clone()).collect()
    }

    #[test]
    fn register_and_get_roundtrip() {
        let registry = populated();
        assert_eq!(registry.get("action.http").unwrap().display_name, "HTTP Request");
        assert!(registry.get("action.missing").is_none());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    #[traced_test]
    fn reregistering_replaces_in_place() {
        let mut registry = populated();
        let mut newer = test_manifest("action.http", "HTTP Request v2", NodeCategory::Action);
        newer.version = "2.0.0".to_string();

        let previous = registry.register(newer).unwrap();
        assert_eq!(previous.unwrap().version, "1.0.0");
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("action.http").unwrap().version, "2.0.0");
        assert_eq!(
            keys(&registry.list()),
            vec!["action.http", "trigger.cron", "action.email"]
        );
        assert!(logs_contain("replacing registered plugin"));
    }

    #[test]
    fn blank_node_type_is_rejected() {
        let mut registry = PluginRegistry::new();
        let err = registry
            .register(test_manifest("  ", "Nothing", NodeCategory::Utility))
            .unwrap_err();
        assert!(matches!(err, NodekitError::InvalidArgument(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn unregister_preserves_order_and_ignores_missing() {
        let mut registry = populated();
        assert!(registry.unregister("trigger.cron").is_some());
        assert!(registry.unregister("trigger.cron").is_none());
        assert_eq!(keys(&registry.list()), vec!["action.http", "action.email"]);
    }

    #[test]
    fn empty_search_returns_all_in_order() {
        let registry = populated();
        assert_eq!(
            keys(&registry.search("")),
            vec!["action.http", "trigger.cron", "action.email"]
        );
    }

    #[test]
    fn search_is_case_insensitive_over_name_description_and_tags() {
        let registry = populated();
        assert_eq!(keys(&registry.search("EMAIL")), vec!["action.email"]);
        assert_eq!(keys(&registry.search("rest")), vec!["action.http"]);
        assert_eq!(keys(&registry.search("test plugin")).len(), 3);
        assert!(registry.search("ftp").is_empty());
    }

    #[test]
    fn filters_by_category_and_popularity() {
        let registry = populated();
        assert_eq!(
            keys(&registry.get_by_category(NodeCategory::Action)),
            vec!["action.http", "action.email"]
        );
        assert!(registry.get_by_category(NodeCategory::Ai).is_empty());
        assert_eq!(keys(&registry.get_popular()), vec!["action.http"]);
    }

    #[test]
    fn register_plugin_uses_node_manifest() {
        struct Static(PluginManifest);
        impl PluginNode for Static {
            fn manifest(&self) -> &PluginManifest {
                &self.0
            }

            fn execute(
                &mut self,
                _inputs: &serde_json::Map<String, serde_json::Value>,
                _ctx: &crate::ExecutionContext,
            ) -> Result<crate::ExecutionResult, NodekitError> {
                Ok(crate::ExecutionResult::success(serde_json::Value::Null))
            }
        }

        let mut registry = PluginRegistry::new();
        let node = Static(test_manifest("utility.noop", "No-op", NodeCategory::Utility));
        registry.register_plugin(&node).unwrap();
        assert!(registry.get("utility.noop").is_some());
    }

    #[test]
    fn clear_empties_registry() {
        let mut registry = populated();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.list().is_empty());
    }

    #[test]
    fn padded_node_type_is_rejected() {
        let mut registry = PluginRegistry::new();
        let padded = test_manifest(" action.http", "HTTP", NodeCategory::Action);
        let err = registry.register(padded).unwrap_err();
        assert!(matches!(err, NodekitError::InvalidArgument(_)));
        assert!(registry.is_empty());

        let blank = test_manifest("  ", "Blank", NodeCategory::Action);
        assert!(registry.register(blank).is_err());
    }
}
