// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest documents flowing through validation into the registry.

use nodekit_core::{NodeCategory, NodekitError};
use nodekit_plugin::{NodeRegistryItem, PluginRegistry, parse_manifest, validate_document};
use serde_json::{Value, json};

fn http_manifest(version: &str) -> Value {
    json!({
        "name": "@acme/http",
        "version": version,
        "description": "Call any HTTP endpoint",
        "author": "Acme",
        "nodeType": "action.http",
        "displayName": "HTTP Request",
        "category": "action",
        "automationConfigs": {
            "ports": {
                "inputPorts": [{"id": 1, "label": "Request"}],
                "outputPorts": [{"id": 2, "label": "Response"}, {"id": 3, "label": "Error"}]
            }
        },
        "tags": ["rest", "api"]
    })
}

#[test]
fn second_registration_of_same_node_type_wins() {
    let mut registry = PluginRegistry::new();
    registry
        .register(parse_manifest(&http_manifest("1.0.0").to_string()).unwrap())
        .unwrap();
    registry
        .register(parse_manifest(&http_manifest("1.1.0").to_string()).unwrap())
        .unwrap();

    assert_eq!(registry.len(), 1);
    let entry = registry.get("action.http").unwrap();
    assert_eq!(entry.version, "1.1.0");
    assert_eq!(entry.output_ports().len(), 2);
    assert_eq!(entry.input_ports()[0].id, "1");
}

#[test]
fn invalid_document_never_reaches_registry() {
    let mut doc = http_manifest("1.0.0");
    doc["name"] = json!("");
    let report = validate_document(&doc).unwrap();
    assert!(!report.valid);

    let err = parse_manifest(&doc.to_string()).unwrap_err();
    match err {
        NodekitError::Validation { errors } => {
            assert_eq!(errors, vec!["Plugin name is required"]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn derived_and_embedded_registry_items() {
    let manifest = parse_manifest(&http_manifest("1.0.0").to_string()).unwrap();
    let derived = manifest.registry_item();
    assert!(derived.is_plugin());
    assert_eq!(derived.node_type(), "action.http");
    assert_eq!(derived.base().name, "HTTP Request");
    assert_eq!(derived.base().category_id, NodeCategory::Action.to_string());

    let mut doc = http_manifest("1.0.0");
    doc["automationConfigs"]["registry"] = json!({
        "builtinOrPlugin": "builtin",
        "categoryId": "action",
        "name": "HTTP",
        "type": "action.http.builtin"
    });
    let manifest = parse_manifest(&doc.to_string()).unwrap();
    match manifest.registry_item() {
        NodeRegistryItem::Builtin(item) => assert_eq!(item.node_type, "action.http.builtin"),
        other => panic!("expected builtin item, got {other:?}"),
    }
}
