// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Package file naming: `<sanitized-name>-<version>.nodepkg`.

use nodekit_plugin::{PluginManifest, ProjectDescriptor};

/// File extension of package artifacts.
pub const PACKAGE_EXTENSION: &str = "nodepkg";

const FALLBACK_NAME: &str = "unnamed-plugin";
const FALLBACK_VERSION: &str = "1.0.0";

/// Make a package name safe for use in a file name.
///
/// A leading `@scope/` is dropped, remaining `@` and path separators become
/// hyphens, hyphen runs collapse and edge hyphens are trimmed.
pub fn sanitize_name(name: &str) -> String {
    let name = name.trim();
    let unscoped = match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((_, rest)) => rest,
        None => name,
    };

    let mut out = String::with_capacity(unscoped.len());
    for c in unscoped.chars() {
        let c = if matches!(c, '@' | '/' | '\\') { '-' } else { c };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// The package file name for a name/version pair, applying fallbacks for
/// blank values.
pub fn package_file_name(name: Option<&str>, version: Option<&str>) -> String {
    let name = non_blank(name).map_or_else(|| FALLBACK_NAME.to_string(), sanitize_name);
    let version = non_blank(version)
        .unwrap_or(FALLBACK_VERSION)
        .replace(['/', '\\'], "-");
    format!("{name}-{version}.{PACKAGE_EXTENSION}")
}

/// Package file name for a project: manifest values first, then the project
/// descriptor.
pub fn resolve_package_name(
    manifest: &PluginManifest,
    descriptor: Option<&ProjectDescriptor>,
) -> String {
    let name = non_blank(Some(manifest.name.as_str()))
        .or_else(|| descriptor.and_then(|d| non_blank(d.name.as_deref())));
    let version = non_blank(Some(manifest.version.as_str()))
        .or_else(|| descriptor.and_then(|d| non_blank(d.version.as_deref())));
    package_file_name(name, version)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
