// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Utility modules
//!
//! Common utilities for the pipgen CLI.

pub mod colors;

pub use colors::*;
