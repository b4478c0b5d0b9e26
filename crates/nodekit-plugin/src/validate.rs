// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural validation of plugin manifests.
//!
//! Validation never stops at the first problem: every rule runs and every
//! violation is reported, in a fixed order (identity fields, version format,
//! category, port existence, port ids, port types). Only a document whose
//! shape cannot be inspected at all is rejected with
//! [`NodekitError::MalformedInput`].

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use nodekit_core::{NodeCategory, NodekitError};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::manifest::{PluginManifest, normalize_document};

static SEMVER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+").expect("semver prefix pattern is valid"));

/// Identity fields in reporting order, with the message for a missing one.
const REQUIRED_FIELDS: [(&str, &str); 7] = [
    ("name", "Plugin name is required"),
    ("version", "Version is required"),
    ("description", "Description is required"),
    ("author", "Author is required"),
    ("nodeType", "Node type is required"),
    ("displayName", "Display name is required"),
    ("category", "Category is required"),
];

/// Outcome of validating one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// True iff `errors` is empty.
    pub valid: bool,
    /// Human-readable violations in rule order.
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a typed manifest.
///
/// The manifest is serialised and checked by [`validate_document`], so typed
/// and raw manifests obey the same rules.
pub fn validate(manifest: &PluginManifest) -> ValidationReport {
    let checked = serde_json::to_value(manifest)
        .map_err(|e| NodekitError::Internal(format!("manifest serialization failed: {e}")))
        .and_then(|doc| validate_document(&doc));
    match checked {
        Ok(report) => report,
        Err(e) => ValidationReport::from_errors(vec![e.to_string()]),
    }
}

/// Validate a raw manifest document.
///
/// Split port lists and numeric port ids are normalised before checking.
pub fn validate_document(doc: &Value) -> Result<ValidationReport, NodekitError> {
    let normalized = normalize_document(doc.clone());
    let object = check_shape(&normalized)?;
    let mut errors = Vec::new();

    for (field, message) in REQUIRED_FIELDS {
        if text(object, field).is_none() {
            errors.push(message.to_string());
        }
    }

    if let Some(version) = text(object, "version")
        && !SEMVER_PREFIX.is_match(version)
    {
        errors.push(format!(
            "Valid semantic version is required (got `{version}`)"
        ));
    }

    if let Some(category) = text(object, "category")
        && NodeCategory::from_str(category).is_err()
    {
        errors.push(format!(
            "Invalid category `{category}` (expected one of: {})",
            NodeCategory::NAMES.join(", ")
        ));
    }

    match object.get("ports").and_then(Value::as_array) {
        None => errors.push("Port configuration is required".to_string()),
        Some(ports) => check_ports(ports, &mut errors),
    }

    Ok(ValidationReport::from_errors(errors))
}

fn check_ports(ports: &[Value], errors: &mut Vec<String>) {
    let typed = ports.iter().filter(|p| port_type(p).is_some()).count();
    if typed == 0 {
        errors.push("At least one port required".to_string());
    }

    for (index, port) in ports.iter().enumerate() {
        if port_id(port).is_none() {
            errors.push(format!("Port #{} has no id", index + 1));
        }
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ports.iter().filter_map(port_id) {
        if !seen.insert(id) && reported.insert(id) {
            errors.push(format!("Duplicate port id `{id}`"));
        }
    }

    for (index, port) in ports.iter().enumerate() {
        if port_type(port).is_some() {
            continue;
        }
        let label = port_id(port)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index + 1));
        let found = match port.get("type") {
            None | Some(Value::Null) => "none".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };
        errors.push(format!(
            "Port `{label}` has invalid type `{found}` (expected input or output)"
        ));
    }
}

fn port_id(port: &Value) -> Option<&str> {
    port.get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

fn port_type(port: &Value) -> Option<&str> {
    port.get("type")
        .and_then(Value::as_str)
        .filter(|t| matches!(*t, "input" | "output"))
}

/// Present, string-typed and not blank.
fn text<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn check_shape(doc: &Value) -> Result<&Map<String, Value>, NodekitError> {
    let object = doc.as_object().ok_or_else(|| {
        NodekitError::MalformedInput(format!(
            "manifest must be a JSON object, got {}",
            kind(doc)
        ))
    })?;

    for (field, _) in REQUIRED_FIELDS {
        match object.get(field) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => {
                return Err(NodekitError::MalformedInput(format!(
                    "`{field}` must be a string, got {}",
                    kind(other)
                )));
            }
        }
    }

    match object.get("ports") {
        None | Some(Value::Null) => {}
        Some(Value::Array(ports)) => {
            if let Some((index, port)) = ports.iter().enumerate().find(|(_, p)| !p.is_object()) {
                return Err(NodekitError::MalformedInput(format!(
                    "`ports[{index}]` must be an object, got {}",
                    kind(port)
                )));
            }
        }
        Some(other) => {
            return Err(NodekitError::MalformedInput(format!(
                "`ports` must be an array, got {}",
                kind(other)
            )));
        }
    }

    match object.get("tags") {
        None | Some(Value::Null) => {}
        Some(Value::Array(tags)) if tags.iter().all(Value::is_string) => {}
        Some(_) => {
            return Err(NodekitError::MalformedInput(
                "`tags` must be an array of strings".to_string(),
            ));
        }
    }

    Ok(object)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
