//
//  bitbucket-scaffolder
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! Renders command results either as human-readable tables or as JSON.
//!
//! | Format | Flag | Use |
//! |--------|------|-----|
//! | [`OutputFormat::Table`] | (default) | Terminals |
//! | [`OutputFormat::Json`] | `--json` | Scripts, portal integrations |
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitbucket_scaffolder::output::{OutputFormat, OutputWriter, TableOutput};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Created {
//!     remote_url: String,
//! }
//!
//! impl TableOutput for Created {
//!     fn print_table(&self, _color: bool) {
//!         println!("{}", self.remote_url);
//!     }
//! }
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&Created { remote_url: "https://bitbucket.org/w/r.git".into() })?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod table;

pub use table::*;

use console::style;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output with optional colors
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Picks the format from the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes results in the selected [`OutputFormat`].
///
/// Data goes to stdout; errors and warnings go to stderr so JSON output
/// stays parseable.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Writes a single value.
    pub fn write<T: Serialize + TableOutput + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list of values, one table row per value.
    pub fn write_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
            OutputFormat::Table => {
                for value in values {
                    value.print_table(self.color);
                }
            }
        }
        Ok(())
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Success line; suppressed in JSON mode.
    pub fn write_success(&self, msg: &str) {
        if self.format == OutputFormat::Json {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Human-readable rendering of a result.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Prints a `key: value` line, dimming the key when colors are on.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_json_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}
