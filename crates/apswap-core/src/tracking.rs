//! Tracking spreadsheet: row layout and CSV boundary.
//!
//! The sheet is an ordered list of string rows. The first row is the
//! header; every other row describes one AP location. Only a handful of
//! column positions mean anything here, everything else is carried
//! through verbatim.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::CoreError;
use crate::model::JoinKey;

// ── Column layout ────────────────────────────────────────────────────

pub const AP_NAME: usize = 0;
pub const MAC: usize = 1;
pub const SERIAL: usize = 2;
pub const MERAKI_SERIAL: usize = 3;
pub const NEIGHBOR: usize = 7;
pub const PORT: usize = 8;

/// Rows shorter than this are never matched.
pub const MIN_COLUMNS: usize = 9;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One spreadsheet row.
pub type TrackingRow = Vec<String>;

/// Header plus data rows, in file order.
///
/// Blank lines are kept as zero-field rows so the sheet writes back with
/// the same row count and order it was read with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackingSheet {
    pub header: TrackingRow,
    pub rows: Vec<TrackingRow>,
    /// The file started with a UTF-8 byte order mark.
    #[serde(skip)]
    pub bom: bool,
}

impl TrackingSheet {
    /// Header followed by data rows.
    pub fn all_rows(&self) -> impl Iterator<Item = &TrackingRow> {
        std::iter::once(&self.header).chain(&self.rows)
    }
}

/// `true` if the row is long enough and names an AP.
pub fn is_candidate(row: &[String]) -> bool {
    row.len() >= MIN_COLUMNS && !row[AP_NAME].is_empty()
}

/// The switch port a candidate row was recorded at.
pub fn join_key(row: &[String]) -> Option<JoinKey> {
    is_candidate(row).then(|| JoinKey::new(row[NEIGHBOR].as_str(), row[PORT].as_str()))
}

/// `true` if a candidate row carries a MAC.
pub fn is_matched(row: &[String]) -> bool {
    is_candidate(row) && !row[MAC].is_empty()
}

// ── Reading ──────────────────────────────────────────────────────────

/// Read a tracking sheet from disk.
pub fn read_sheet(path: &Path) -> Result<TrackingSheet, CoreError> {
    if !path.exists() {
        return Err(CoreError::MissingInput {
            role: "Tracking CSV",
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| CoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_sheet_from(file, path)
}

/// Read a tracking sheet from any reader. `path` is used for error context.
///
/// A leading UTF-8 byte order mark is remembered on the sheet rather than
/// kept in the first header cell.
pub fn read_sheet_from<R: Read>(mut reader: R, path: &Path) -> Result<TrackingSheet, CoreError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw).map_err(|source| CoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (bom, body) = match raw.strip_prefix(UTF8_BOM) {
        Some(rest) => (true, rest),
        None => (false, raw.as_slice()),
    };

    let mut all = read_rows(body).map_err(|source| CoreError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    if all.is_empty() {
        return Err(CoreError::EmptySheet {
            path: path.to_path_buf(),
        });
    }
    let header = all.remove(0);

    debug!(path = %path.display(), rows = all.len(), bom, "read tracking sheet");
    Ok(TrackingSheet {
        header,
        rows: all,
        bom,
    })
}

/// Every CSV record in `body`, with a zero-field row for each blank line.
///
/// The `csv` reader skips blank lines, so they are recovered from the run
/// of line breaks between consecutive records. Record content never starts
/// or ends with a bare line break, so such a run is exactly the previous
/// record's terminator followed by one terminator per blank line.
fn read_rows(body: &[u8]) -> Result<Vec<TrackingRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body);

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        let start = usize::try_from(reader.position().byte()).unwrap_or(body.len());
        if !reader.read_record(&mut record)? {
            break;
        }
        let breaks = line_breaks_around(body, start);
        let blanks = if rows.is_empty() { breaks } else { breaks.saturating_sub(1) };
        if blanks > 0 {
            trace!(blanks, "keeping blank lines");
        }
        rows.extend(std::iter::repeat_with(TrackingRow::new).take(blanks));
        rows.push(to_row(&record));
    }

    let breaks = line_breaks_around(body, body.len());
    let blanks = if rows.is_empty() { breaks } else { breaks.saturating_sub(1) };
    rows.extend(std::iter::repeat_with(TrackingRow::new).take(blanks));
    Ok(rows)
}

/// Line terminators (`\r\n`, `\r` or `\n`) in the run of line-break bytes
/// that contains or touches `offset`.
fn line_breaks_around(body: &[u8], offset: usize) -> usize {
    let is_break = |b: &u8| matches!(b, b'\r' | b'\n');
    let offset = offset.min(body.len());
    let before = body[..offset].iter().rev().take_while(|b| is_break(b)).count();
    let after = body[offset..].iter().take_while(|b| is_break(b)).count();
    let run = &body[offset - before..offset + after];

    let mut count = 0;
    let mut i = 0;
    while i < run.len() {
        i += if run[i..].starts_with(b"\r\n") { 2 } else { 1 };
        count += 1;
    }
    count
}

fn to_row(record: &csv::StringRecord) -> TrackingRow {
    record.iter().map(str::to_owned).collect()
}

// ── Writing ──────────────────────────────────────────────────────────

/// Write a tracking sheet to disk, replacing any existing file.
///
/// Fields are quoted only where needed, so embedded commas, quotes and
/// line breaks survive a round trip through any standard CSV reader.
pub fn write_sheet(path: &Path, sheet: &TrackingSheet) -> Result<(), CoreError> {
    let write_err = |source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    write_sheet_to(file, sheet).map_err(|source| CoreError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), rows = sheet.rows.len(), "wrote tracking sheet");
    Ok(())
}

/// Write a tracking sheet to any writer.
///
/// Zero-field rows become empty lines and a byte order mark read from the
/// source is written back first.
pub fn write_sheet_to<W: Write>(mut writer: W, sheet: &TrackingSheet) -> Result<(), csv::Error> {
    if sheet.bom {
        writer.write_all(UTF8_BOM)?;
    }

    // csv writes `""` for a record with no fields, so blank runs bypass it.
    let rows: Vec<&TrackingRow> = sheet.all_rows().collect();
    for run in rows.chunk_by(|a, b| a.is_empty() == b.is_empty()) {
        if run.first().is_some_and(|row| row.is_empty()) {
            for _ in run {
                writer.write_all(b"\n")?;
            }
            continue;
        }

        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut writer);
        for row in run {
            csv_writer.write_record(row.iter())?;
        }
        csv_writer.flush()?;
    }
    writer.flush()?;
    Ok(())
}

// ── Output naming ────────────────────────────────────────────────────

/// Derive the output path by inserting `suffix` before the extension.
///
/// `sites/tracking.csv` -> `sites/tracking_updated.csv`. Inputs without an
/// extension get `.csv`.
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input
        .extension()
        .map_or_else(|| "csv".into(), |e| e.to_string_lossy().into_owned());

    input.with_file_name(format!("{stem}{suffix}.{extension}"))
}
