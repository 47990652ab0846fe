//! Report rendering for stdout.
//!
//! A [`Renderer`] carries the resolved `--output`, `--color` and `--quiet`
//! settings so handlers build their data once and hand it over. Tables
//! go through `tabled`, structured formats through serde.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// `true` if `mode` asks for ANSI color on stdout.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Resolved presentation settings for one command.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
    color: bool,
    quiet: bool,
}

impl Renderer {
    pub fn new(format: OutputFormat, color: ColorMode, quiet: bool) -> Self {
        Self {
            format,
            color: should_color(color),
            quiet,
        }
    }

    // ── Text fragments ───────────────────────────────────────────────

    /// `✓ message`, the tick green when color is on.
    pub fn check(&self, message: &str) -> String {
        if self.color {
            format!("{} {message}", "✓".green())
        } else {
            format!("✓ {message}")
        }
    }

    pub fn heading(&self, title: &str) -> String {
        if self.color {
            title.bold().to_string()
        } else {
            title.to_owned()
        }
    }

    /// `heading` followed by a table of `rows`.
    pub fn titled_table<R: Tabled>(&self, title: &str, rows: &[R]) -> String {
        format!("{}\n{}", self.heading(title), table(rows))
    }

    // ── Whole documents ──────────────────────────────────────────────

    /// Render a sequence of records.
    ///
    /// `to_row` builds the table row for `table`, `plain_fn` the single line
    /// emitted per record for `plain`.
    pub fn list<T, R>(
        &self,
        data: &[T],
        to_row: impl Fn(&T) -> R,
        plain_fn: impl Fn(&T) -> String,
    ) -> String
    where
        T: Serialize,
        R: Tabled,
    {
        match self.format {
            OutputFormat::Table => table(&data.iter().map(to_row).collect::<Vec<_>>()),
            OutputFormat::Plain => data.iter().map(plain_fn).collect::<Vec<_>>().join("\n"),
            _ => self.structured(data),
        }
    }

    /// Render one report. `detail_fn` produces the human view used for
    /// `table`, `plain_fn` the terse scripting view.
    pub fn single<T: Serialize>(
        &self,
        data: &T,
        detail_fn: impl FnOnce(&T) -> String,
        plain_fn: impl FnOnce(&T) -> String,
    ) -> String {
        match self.format {
            OutputFormat::Table => detail_fn(data),
            OutputFormat::Plain => plain_fn(data),
            _ => self.structured(data),
        }
    }

    fn structured<T: Serialize + ?Sized>(&self, data: &T) -> String {
        let rendered = match self.format {
            OutputFormat::JsonCompact => serde_json::to_string(data).map_err(|e| e.to_string()),
            OutputFormat::Yaml => serde_yaml::to_string(data).map_err(|e| e.to_string()),
            _ => serde_json::to_string_pretty(data).map_err(|e| e.to_string()),
        };
        // Every report type is plain owned data with string keys.
        rendered.unwrap_or_else(|e| format!("serialization failed: {e}"))
    }

    /// Write `output` to stdout unless quiet or empty.
    pub fn emit(&self, output: &str) {
        if self.quiet || output.is_empty() {
            return;
        }
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", output.trim_end());
    }
}

/// Rounded table for `rows`.
pub fn table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}
