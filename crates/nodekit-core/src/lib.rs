// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the nodekit plugin SDK.
//!
//! This crate provides the error type and the closed enumerations used
//! throughout the workspace. Every other nodekit crate reports failures
//! through [`NodekitError`].

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::NodekitError;
pub use types::{NodeCategory, PortType};

/// Result alias used across the nodekit crates.
pub type Result<T> = std::result::Result<T, NodekitError>;
