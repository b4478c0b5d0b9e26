// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest model and loading from `plugin.manifest.json` files.
//!
//! Documents are read as raw JSON first, normalised (split port lists
//! flattened, numeric port ids stringified), run through the validator, and
//! only then deserialized into a typed [`PluginManifest`].

use std::collections::BTreeMap;
use std::path::Path;

use nodekit_core::{NodeCategory, NodekitError, PortType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::NodeRegistryItem;
use crate::validate::validate_document;

/// Parsed plugin manifest describing one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    /// Package name, possibly scoped (e.g. "@acme/http-request").
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Human-readable description.
    pub description: String,
    /// Author identifier.
    pub author: String,
    /// Platform-facing node identifier; the registry key.
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation_node_type: Option<String>,
    /// Human-facing label.
    pub display_name: String,
    pub category: NodeCategory,
    /// Canonical flat port list.
    #[serde(default)]
    pub ports: Vec<PortDefinition>,
    /// Free-text search terms.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ManifestMetadata>,
    /// Host-specific configuration, opaque apart from `ports` and `registry`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation_configs: Option<Value>,
}

/// A single input or output port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub port_type: PortType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_multiple: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PortDefinition {
    /// A port with only the required fields set.
    pub fn new(id: impl Into<String>, port_type: PortType) -> Self {
        Self {
            id: id.into(),
            port_type,
            required: None,
            allow_multiple: None,
            label: None,
            data_type: None,
            position: None,
            role: None,
            description: None,
        }
    }

    /// Whether the port must receive a value.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Creation and modification timestamps (RFC 3339).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestMetadata {
    pub created_at: String,
    pub updated_at: String,
}

impl PluginManifest {
    /// Ports of type `input`, in declaration order.
    pub fn input_ports(&self) -> Vec<&PortDefinition> {
        self.ports_of(PortType::Input)
    }

    /// Ports of type `output`, in declaration order.
    pub fn output_ports(&self) -> Vec<&PortDefinition> {
        self.ports_of(PortType::Output)
    }

    fn ports_of(&self, port_type: PortType) -> Vec<&PortDefinition> {
        self.ports
            .iter()
            .filter(|p| p.port_type == port_type)
            .collect()
    }

    /// The host registry record for this node.
    ///
    /// Uses the item embedded at `automationConfigs.registry` when it parses,
    /// otherwise derives a plugin item from the manifest fields.
    pub fn registry_item(&self) -> NodeRegistryItem {
        let embedded = self
            .automation_configs
            .as_ref()
            .and_then(|configs| configs.get("registry"));

        if let Some(raw) = embedded {
            match serde_json::from_value::<NodeRegistryItem>(raw.clone()) {
                Ok(item) => return item,
                Err(e) => tracing::debug!(
                    node_type = %self.node_type,
                    error = %e,
                    "embedded registry item unreadable, deriving from manifest"
                ),
            }
        }
        NodeRegistryItem::from_manifest(self)
    }
}

/// The project descriptor (`package.json`). Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl ProjectDescriptor {
    /// Requirement string for `package` from either dependency table.
    pub fn dependency(&self, package: &str) -> Option<&str> {
        self.dependencies
            .get(package)
            .or_else(|| self.dev_dependencies.get(package))
            .map(String::as_str)
    }
}

/// Rewrites a raw manifest document into its canonical shape.
///
/// When `ports` is absent, `automationConfigs.ports.inputPorts` and
/// `outputPorts` are flattened into it (inputs first, each entry's `type`
/// set to its list's direction). Numeric port ids become strings.
/// Anything that is not an object is returned untouched.
pub fn normalize_document(mut doc: Value) -> Value {
    let Some(object) = doc.as_object_mut() else {
        return doc;
    };

    if object.get("ports").is_none_or(Value::is_null)
        && let Some(flat) = flatten_split_ports(object.get("automationConfigs"))
    {
        object.insert("ports".to_string(), Value::Array(flat));
    }

    if let Some(Value::Array(ports)) = object.get_mut("ports") {
        for port in ports.iter_mut() {
            if let Some(id) = port.get_mut("id")
                && id.is_number()
            {
                *id = Value::String(id.to_string());
            }
        }
    }
    doc
}

fn flatten_split_ports(configs: Option<&Value>) -> Option<Vec<Value>> {
    let split = configs?.get("ports")?;
    let inputs = split.get("inputPorts").and_then(Value::as_array);
    let outputs = split.get("outputPorts").and_then(Value::as_array);
    if inputs.is_none() && outputs.is_none() {
        return None;
    }

    let mut flat = Vec::new();
    for (list, direction) in [(inputs, "input"), (outputs, "output")] {
        for port in list.into_iter().flatten() {
            let mut port = port.clone();
            if let Some(fields) = port.as_object_mut() {
                fields.insert("type".to_string(), Value::from(direction));
            }
            flat.push(port);
        }
    }
    Some(flat)
}

/// Build a typed manifest from a raw document.
///
/// The document is normalised and validated first; any rule violation is
/// returned as [`NodekitError::Validation`] with every message.
pub fn manifest_from_document(doc: Value) -> Result<PluginManifest, NodekitError> {
    let doc = normalize_document(doc);
    let report = validate_document(&doc)?;
    if !report.valid {
        return Err(NodekitError::Validation {
            errors: report.errors,
        });
    }
    serde_json::from_value(doc)
        .map_err(|e| NodekitError::MalformedInput(format!("invalid plugin manifest: {e}")))
}

/// Parse and validate a manifest from JSON text.
pub fn parse_manifest(json: &str) -> Result<PluginManifest, NodekitError> {
    manifest_from_document(parse_json(json, "plugin manifest")?)
}

/// Read a manifest file as a raw JSON document without validating it.
pub fn read_manifest_document(path: &Path) -> Result<Value, NodekitError> {
    let content = read_file(path)?;
    parse_json(&content, "plugin manifest")
}

/// Read, parse and validate a manifest file.
pub fn load_manifest(path: &Path) -> Result<PluginManifest, NodekitError> {
    manifest_from_document(read_manifest_document(path)?)
}

/// Read a project descriptor file.
pub fn load_descriptor(path: &Path) -> Result<ProjectDescriptor, NodekitError> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| {
        NodekitError::MalformedInput(format!(
            "invalid project descriptor {}: {e}",
            path.display()
        ))
    })
}

fn read_file(path: &Path) -> Result<String, NodekitError> {
    std::fs::read_to_string(path)
        .map_err(|e| NodekitError::environment(format!("failed to read {}", path.display()), e))
}

fn parse_json(content: &str, what: &str) -> Result<Value, NodekitError> {
    serde_json::from_str(content)
        .map_err(|e| NodekitError::MalformedInput(format!("invalid {what} JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Value {
        json!({
            "name": "@acme/http-request",
            "version": "1.2.0",
            "description": "Send HTTP requests",
            "author": "Acme",
            "nodeType": "action.http",
            "displayName": "HTTP Request",
            "category": "action",
            "ports": [
                {"id": "in", "type": "input", "required": true},
                {"id": "out", "type": "output"}
            ],
            "tags": ["http", "api"]
        })
    }

    #[test]
    fn parse_valid_manifest() {
        let manifest = parse_manifest(&sample_document().to_string()).unwrap();
        assert_eq!(manifest.name, "@acme/http-request");
        assert_eq!(manifest.category, NodeCategory::Action);
        assert_eq!(manifest.input_ports().len(), 1);
        assert_eq!(manifest.output_ports()[0].id, "out");
        assert!(manifest.input_ports()[0].is_required());
        assert!(!manifest.is_popular);
    }

    #[test]
    fn invalid_json_is_malformed_input() {
        let err = parse_manifest("{not json").unwrap_err();
        assert!(matches!(err, NodekitError::MalformedInput(_)));
    }

    #[test]
    fn rule_violations_are_reported_together() {
        let mut doc = sample_document();
        doc["name"] = json!("");
        doc["category"] = json!("bogus");
        match manifest_from_document(doc).unwrap_err() {
            NodekitError::Validation { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0], "Plugin name is required");
                assert!(errors[1].starts_with("Invalid category `bogus`"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn split_ports_are_flattened_inputs_first() {
        let mut doc = sample_document();
        doc.as_object_mut().unwrap().remove("ports");
        doc["automationConfigs"] = json!({
            "ports": {
                "outputPorts": [{"id": 2}],
                "inputPorts": [{"id": 1, "type": "output"}]
            }
        });
        let manifest = manifest_from_document(doc).unwrap();
        let ids: Vec<(&str, PortType)> = manifest
            .ports
            .iter()
            .map(|p| (p.id.as_str(), p.port_type))
            .collect();
        assert_eq!(ids, vec![("1", PortType::Input), ("2", PortType::Output)]);
    }

    #[test]
    fn flat_ports_take_precedence_over_split() {
        let mut doc = sample_document();
        doc["automationConfigs"] = json!({
            "ports": {"inputPorts": [{"id": "ignored"}]}
        });
        let manifest = manifest_from_document(doc).unwrap();
        assert_eq!(manifest.ports.len(), 2);
        assert!(manifest.automation_configs.is_some());
    }

    #[test]
    fn normalize_leaves_non_objects_alone() {
        assert_eq!(normalize_document(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn serialization_omits_unset_optionals() {
        let manifest = parse_manifest(&sample_document().to_string()).unwrap();
        let value = serde_json::to_value(&manifest).unwrap();
        assert!(value.get("domain").is_none());
        assert!(value["ports"][1].get("required").is_none());
        assert_eq!(value["nodeType"], "action.http");
    }

    #[test]
    fn load_manifest_missing_file_is_environment_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(&dir.path().join("plugin.manifest.json")).unwrap_err();
        assert!(matches!(err, NodekitError::Environment { .. }));
    }

    #[test]
    fn descriptor_dependency_checks_both_tables() {
        let descriptor: ProjectDescriptor = serde_json::from_value(json!({
            "name": "@acme/thing",
            "scripts": {"build": "tsc"},
            "devDependencies": {"@nodekit/sdk": "^1.0.0"}
        }))
        .unwrap();
        assert_eq!(descriptor.dependency("@nodekit/sdk"), Some("^1.0.0"));
        assert_eq!(descriptor.dependency("left-pad"), None);
        assert_eq!(descriptor.version, None);
    }
}
