// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk plugin projects for integration tests.
//!
//! `PluginFixture` owns a temp directory laid out like a scaffolded plugin:
//! descriptor, manifest, registry record, source entry and README.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// A manifest document that passes validation.
pub fn valid_manifest(name: &str, version: &str) -> Value {
    json!({
        "name": format!("@acme/{name}"),
        "version": version,
        "description": format!("The {name} test plugin"),
        "author": "Acme Tests",
        "nodeType": format!("action.{name}"),
        "displayName": name,
        "category": "action",
        "ports": [
            {"id": "in", "type": "input", "required": true},
            {"id": "out", "type": "output"}
        ],
        "tags": ["test", name]
    })
}

/// Builder for [`PluginFixture`].
pub struct PluginFixtureBuilder {
    name: String,
    version: String,
    manifest: Option<Value>,
    descriptor: bool,
    files: Vec<(String, String)>,
}

impl PluginFixtureBuilder {
    fn new() -> Self {
        Self {
            name: "echo".to_string(),
            version: "1.0.0".to_string(),
            manifest: None,
            descriptor: true,
            files: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Replace the generated manifest with `document` verbatim.
    pub fn manifest(mut self, document: Value) -> Self {
        self.manifest = Some(document);
        self
    }

    /// Leave out `package.json`.
    pub fn without_descriptor(mut self) -> Self {
        self.descriptor = false;
        self
    }

    /// Add an extra project file.
    pub fn file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> PluginFixture {
        let dir = TempDir::new().expect("create fixture dir");
        let root = dir.path();

        let manifest = self
            .manifest
            .unwrap_or_else(|| valid_manifest(&self.name, &self.version));
        write(root, "plugin.manifest.json", &pretty(&manifest));
        if self.descriptor {
            let descriptor = json!({
                "name": format!("@acme/{}", self.name),
                "version": self.version,
                "dependencies": {"@nodekit/sdk": "^1.0.0"}
            });
            write(root, "package.json", &pretty(&descriptor));
        }
        write(root, "plugin.registry.json", "{\"security\": {\"level\": \"standard\"}}\n");
        write(root, "README.md", &format!("# {}\n", self.name));
        write(root, "src/index.ts", "export default class Node {}\n");
        write(root, "notes.txt", "not part of the package\n");
        for (relative, content) in &self.files {
            write(root, relative, content);
        }

        PluginFixture { dir }
    }
}

/// A temporary plugin project, removed on drop.
pub struct PluginFixture {
    dir: TempDir,
}

impl PluginFixture {
    pub fn builder() -> PluginFixtureBuilder {
        PluginFixtureBuilder::new()
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path().join("plugin.manifest.json")
    }
}

fn pretty(value: &Value) -> String {
    let mut text = serde_json::to_string_pretty(value).expect("serialize fixture JSON");
    text.push('\n');
    text
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture subdir");
    }
    std::fs::write(path, content).expect("write fixture file");
}
