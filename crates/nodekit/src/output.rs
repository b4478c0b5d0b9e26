// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Status line formatting shared by the subcommands.
//!
//! Colors are used only on a terminal and never with `--plain`; otherwise a
//! bracketed tag replaces the symbol.

use std::fmt::Display;
use std::io::IsTerminal;

use colored::Colorize;

pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new(plain: bool) -> Self {
        Self {
            color: !plain && std::io::stdout().is_terminal(),
        }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn heading(&self, text: &str) {
        if self.color {
            println!("{}", text.bold());
        } else {
            println!("{text}");
        }
    }

    pub fn ok(&self, message: impl Display) {
        if self.color {
            println!("  {} {message}", "✓".green());
        } else {
            println!("  [OK]   {message}");
        }
    }

    pub fn warn(&self, message: impl Display) {
        if self.color {
            println!("  {} {}", "!".yellow(), message.to_string().yellow());
        } else {
            println!("  [WARN] {message}");
        }
    }

    pub fn fail(&self, message: impl Display) {
        if self.color {
            println!("  {} {}", "✗".red(), message.to_string().red());
        } else {
            println!("  [FAIL] {message}");
        }
    }

    /// Indented secondary line.
    pub fn detail(&self, message: impl Display) {
        if self.color {
            println!("    {}", message.to_string().dimmed());
        } else {
            println!("    {message}");
        }
    }

    /// Report a command failure on stderr.
    pub fn error(&self, error: &nodekit_core::NodekitError) {
        if self.color {
            eprintln!("{} {error}", "error:".red().bold());
        } else {
            eprintln!("error: {error}");
        }
    }
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }
}
