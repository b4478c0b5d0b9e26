// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scaffold generator for `nodekit create`.
//!
//! Creates a new TypeScript plugin project:
//! ```text
//! {output_dir}/{category}/{name}/
//! +-- package.json          # descriptor depending on the SDK package
//! +-- plugin.manifest.json  # one input and one output port
//! +-- plugin.registry.json  # security/testing/compatibility record
//! +-- src/index.ts          # node class skeleton
//! +-- tests/index.test.ts   # only with `include_tests`
//! +-- README.md, icon.svg, tsconfig.json, .gitignore
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::Utc;
use nodekit_core::{NodeCategory, NodekitError, PortType};
use regex::Regex;
use serde::Serialize;
use serde_json::json;

use crate::manifest::{ManifestMetadata, PluginManifest, PortDefinition};
use crate::project::ProjectLayout;
use crate::validate::validate;

static PLUGIN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("plugin name pattern is valid"));

const SDK_REQUIREMENT: &str = "^1.0.0";

/// Inputs for [`scaffold_plugin`].
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Unscoped package name, lowercase letters, digits and hyphens.
    pub name: String,
    pub author: String,
    pub description: String,
    pub category: NodeCategory,
    /// Parent directory; the project lands in `{output_dir}/{category}/{name}`.
    pub output_dir: PathBuf,
    /// npm scope without the `@`.
    pub scope: String,
    /// Also generate a starter test file.
    pub include_tests: bool,
}

/// Turn free text into a valid plugin name: lowercase, whitespace runs to
/// single hyphens, anything outside `[a-z0-9-]` dropped.
pub fn sanitize_plugin_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if (c == '-' || c.is_whitespace()) && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// "my-plugin" -> "My Plugin".
pub fn display_name(name: &str) -> String {
    name.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scaffold a new plugin project and return its directory.
///
/// Returns an error if the name is invalid or the directory already exists.
pub fn scaffold_plugin(
    options: &ScaffoldOptions,
    layout: &ProjectLayout,
) -> Result<PathBuf, NodekitError> {
    let name = options.name.as_str();
    if !PLUGIN_NAME.is_match(name) {
        return Err(scaffold_error(format!(
            "plugin name '{name}' is invalid (only lowercase letters, digits and hyphens allowed)"
        )));
    }

    let plugin_dir = options
        .output_dir
        .join(options.category.to_string())
        .join(name);
    if plugin_dir.exists() {
        return Err(scaffold_error(format!(
            "directory '{}' already exists",
            plugin_dir.display()
        )));
    }

    let manifest = build_manifest(options);
    let report = validate(&manifest);
    if !report.valid {
        return Err(scaffold_error(format!(
            "generated manifest is invalid: {}",
            report.errors.join("; ")
        )));
    }

    create_dir(&plugin_dir.join("src"))?;
    if options.include_tests {
        create_dir(&plugin_dir.join("tests"))?;
    }

    write_json(&plugin_dir.join(&layout.descriptor_file), &descriptor(options, layout))?;
    write_json(&plugin_dir.join(&layout.manifest_file), &manifest)?;
    write_json(&plugin_dir.join(&layout.registry_file), &registry_record(options))?;
    write_file(&plugin_dir.join(&layout.entry_file), &entry_source(&manifest, layout))?;
    write_json(&plugin_dir.join("tsconfig.json"), &tsconfig(options))?;
    write_file(&plugin_dir.join("README.md"), &readme(&manifest))?;
    write_file(&plugin_dir.join(".gitignore"), GITIGNORE)?;
    write_file(&plugin_dir.join("icon.svg"), ICON)?;
    if options.include_tests {
        write_file(
            &plugin_dir.join("tests").join("index.test.ts"),
            &test_source(&manifest),
        )?;
    }

    tracing::info!(dir = %plugin_dir.display(), node_type = %manifest.node_type, "scaffolded plugin");
    Ok(plugin_dir)
}

fn build_manifest(options: &ScaffoldOptions) -> PluginManifest {
    let name = &options.name;
    let category = options.category;
    let now = Utc::now().to_rfc3339();

    let mut input = PortDefinition::new("input", PortType::Input);
    input.label = Some("Input".to_string());
    input.data_type = Some("any".to_string());
    input.required = Some(true);
    let mut output = PortDefinition::new("output", PortType::Output);
    output.label = Some("Output".to_string());
    output.data_type = Some("any".to_string());

    PluginManifest {
        name: format!("@{}/{name}", options.scope),
        version: "1.0.0".to_string(),
        description: options.description.clone(),
        author: options.author.clone(),
        node_type: format!("@{}/{name}.{category}", options.scope),
        automation_node_type: Some(format!("{category}.{name}")),
        display_name: display_name(name),
        category,
        ports: vec![input, output],
        tags: vec![name.clone(), category.to_string(), "automation".to_string()],
        domain: None,
        sub_category: None,
        icon: Some("icon.svg".to_string()),
        is_popular: false,
        sdk_version: Some(SDK_REQUIREMENT.to_string()),
        main: Some("dist/index.js".to_string()),
        keywords: vec![],
        metadata: Some(ManifestMetadata {
            created_at: now.clone(),
            updated_at: now,
        }),
        automation_configs: None,
    }
}

fn descriptor(options: &ScaffoldOptions, layout: &ProjectLayout) -> serde_json::Value {
    let mut dev_dependencies = json!({
        "@types/node": "^20.0.0",
        "typescript": "^5.0.0"
    });
    let mut scripts = json!({
        "build": "tsc",
        "dev": "tsc --watch",
        "validate": "nodekit validate .",
        "clean": "rm -rf dist"
    });
    if options.include_tests {
        dev_dependencies["jest"] = json!("^29.5.0");
        dev_dependencies["ts-jest"] = json!("^29.1.0");
        dev_dependencies["@types/jest"] = json!("^29.5.0");
        scripts["test"] = json!("jest");
    }

    let mut dependencies = serde_json::Map::new();
    dependencies.insert(layout.sdk_package.clone(), json!(SDK_REQUIREMENT));

    json!({
        "name": format!("@{}/{}", options.scope, options.name),
        "version": "1.0.0",
        "description": options.description,
        "main": "dist/index.js",
        "types": "dist/index.d.ts",
        "scripts": scripts,
        "keywords": ["automation", "plugin", options.name, options.category.to_string()],
        "author": options.author,
        "license": "MIT",
        "dependencies": dependencies,
        "devDependencies": dev_dependencies,
        "files": ["dist", layout.manifest_file, layout.registry_file, "README.md", "icon.svg"],
        "engines": { "node": ">=18.0.0" }
    })
}

fn registry_record(options: &ScaffoldOptions) -> serde_json::Value {
    let permissions = if options.category == NodeCategory::Trigger {
        json!(["network"])
    } else {
        json!(["network", "data"])
    };
    let test_files = if options.include_tests {
        json!(["tests/**/*.test.ts"])
    } else {
        json!([])
    };
    json!({
        "name": format!("@{}/{}", options.scope, options.name),
        "version": "1.0.0",
        "author": options.author,
        "submittedAt": Utc::now().to_rfc3339(),
        "category": options.category,
        "security": {
            "level": "standard",
            "permissions": permissions,
            "sandbox": true,
            "description": options.description
        },
        "testing": {
            "coverage": 0,
            "testFiles": test_files,
            "integrationTests": false,
            "performanceTests": false
        },
        "compatibility": {
            "sdkVersion": SDK_REQUIREMENT,
            "nodeVersion": ">=18.0.0",
            "platformVersion": ">=1.0.0"
        }
    })
}

fn tsconfig(options: &ScaffoldOptions) -> serde_json::Value {
    let mut include = vec!["src/**/*"];
    if options.include_tests {
        include.push("tests/**/*");
    }
    json!({
        "compilerOptions": {
            "target": "ES2020",
            "module": "CommonJS",
            "lib": ["ES2020"],
            "outDir": "./dist",
            "strict": true,
            "esModuleInterop": true,
            "skipLibCheck": true,
            "declaration": true,
            "sourceMap": true,
            "moduleResolution": "node"
        },
        "include": include,
        "exclude": ["node_modules", "dist"]
    })
}

fn class_name(manifest: &PluginManifest) -> String {
    format!("{}Node", manifest.display_name.replace(' ', ""))
}

fn entry_source(manifest: &PluginManifest, layout: &ProjectLayout) -> String {
    format!(
        r#"import {{ BasePlugin, PluginContext }} from "{sdk}";
import manifest from "../{manifest_file}";

/**
 * {display_name}: {description}
 */
export default class {class} extends BasePlugin {{
  constructor() {{
    super(manifest);
  }}

  async execute(inputs: Record<string, unknown>, context: PluginContext) {{
    context.logger.info("{node_type} executing");
    return {{ output: inputs.input }};
  }}
}}
"#,
        sdk = layout.sdk_package,
        manifest_file = layout.manifest_file,
        display_name = manifest.display_name,
        description = manifest.description,
        class = class_name(manifest),
        node_type = manifest.node_type,
    )
}

fn test_source(manifest: &PluginManifest) -> String {
    format!(
        r#"import Plugin from "../src/index";

describe("{display_name}", () => {{
  it("passes its input through", async () => {{
    const plugin = new Plugin();
    const logger = {{ info: jest.fn() }};
    const result = await plugin.execute({{ input: 42 }}, {{ logger }} as any);
    expect(result.output).toBe(42);
  }});
}});
"#,
        display_name = manifest.display_name,
    )
}

fn readme(manifest: &PluginManifest) -> String {
    format!(
        r#"# {display_name}

{description}

- **Node type:** `{node_type}`
- **Category:** {category}

## Development

```bash
npm install
npm run build
nodekit validate .
nodekit build .
```
"#,
        display_name = manifest.display_name,
        description = manifest.description,
        node_type = manifest.node_type,
        category = manifest.category,
    )
}

const GITIGNORE: &str = "# Dependencies
node_modules/

# Build outputs
dist/
*.tsbuildinfo
*.nodepkg

# Testing
coverage/

# Logs
*.log

# OS
.DS_Store
";

const ICON: &str = r##"<svg width="24" height="24" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">
  <rect x="3" y="3" width="18" height="18" rx="3" fill="#3b82f6"/>
  <path d="M12 7v10m-5-5h10" stroke="white" stroke-width="2" stroke-linecap="round"/>
</svg>
"##;

fn scaffold_error(message: String) -> NodekitError {
    NodekitError::Scaffold {
        message,
        source: None,
    }
}

fn create_dir(path: &Path) -> Result<(), NodekitError> {
    std::fs::create_dir_all(path).map_err(|e| NodekitError::Scaffold {
        message: format!("failed to create directory '{}': {e}", path.display()),
        source: Some(Box::new(e)),
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), NodekitError> {
    let mut content = serde_json::to_string_pretty(value).map_err(|e| NodekitError::Scaffold {
        message: format!("failed to serialize '{}': {e}", path.display()),
        source: Some(Box::new(e)),
    })?;
    content.push('\n');
    write_file(path, &content)
}

/// Helper to write a file, converting IO errors to NodekitError.
fn write_file(path: &Path, content: &str) -> Result<(), NodekitError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    std::fs::write(path, content).map_err(|e| NodekitError::Scaffold {
        message: format!("failed to write '{}': {e}", path.display()),
        source: Some(Box::new(e)),
    })
}
