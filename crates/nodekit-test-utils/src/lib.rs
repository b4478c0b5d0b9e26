// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for nodekit integration tests.
//!
//! # Components
//!
//! - [`PluginFixture`] - On-disk plugin project with a configurable manifest
//! - [`MockCompiler`] - Compiler that writes canned output or fails on demand

pub mod fixture;
pub mod mock_compiler;

pub use fixture::PluginFixture;
pub use mock_compiler::MockCompiler;
