// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Terminal color utilities
//!
//! Provides consistent color schemes across the CLI.

use colored::Colorize;

/// Style for dimmed/secondary text
pub fn dimmed(msg: &str) -> colored::ColoredString {
    msg.dimmed()
}

/// Style for emphasized/bold text
pub fn bold(msg: &str) -> colored::ColoredString {
    msg.bold()
}

/// Style for job and resource names
pub fn code(msg: &str) -> colored::ColoredString {
    msg.cyan()
}

/// Print a success check to stderr
pub fn print_success(msg: &str) {
    eprintln!("  {} {}", "✓".green(), msg);
}
