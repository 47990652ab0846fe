//! Transcript segmentation.
//!
//! Splits a combined terminal capture (several `show ap ...` commands and
//! their output pasted into one file) into per-command sections. Operators
//! type the shortest unambiguous IOS prefix, so prompts are recognized by
//! abbreviation-tolerant patterns: `sh ap cd n`, `sho ap cdp n` and
//! `show ap cdp neighbors` all open the same section.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use tracing::{debug, trace};

// ── Prompt patterns ──────────────────────────────────────────────────

/// `<device>#sh[ow] ap ...`: any AP show command.
static AP_PROMPT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)#\s*(sh|sho|show)\s+ap"));

/// `... ap sum[mary]`
static AP_SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)#\s*(sh|sho|show)\s+ap\s+sum"));

/// `... ap cd[p] [n[eighbors]]`
static CDP_NEIGHBORS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)#\s*(sh|sho|show)\s+ap\s+cd"));

/// `... ap me[raki] m[onitoring] [s[ummary]]`
static IDENTITY_MONITORING: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)#\s*(sh|sho|show)\s+ap\s+me\w*\s+m"));

/// `<device>#sh[ow] ...` without the `ap` qualifier.
static SHOW_PROMPT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)#\s*(sh|sho|show)"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static prompt pattern is valid")
}

// ── Section kinds ────────────────────────────────────────────────────

/// The command outputs a combined capture is split into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// `show ap summary`. Collected but not consumed downstream.
    ApSummary,
    /// `show ap cdp neighbors`.
    CdpNeighbors,
    /// `show ap meraki monitoring summary`.
    IdentityMonitoring,
}

/// How a single capture line affects segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    /// An AP show prompt. `Some` opens that section, `None` closes the
    /// active one (a different AP report).
    ApPrompt(Option<SectionKind>),
    /// A show prompt for something other than APs.
    OtherPrompt,
    Data,
}

fn classify(line: &str) -> LineClass {
    if !line.contains('#') {
        return LineClass::Data;
    }
    if AP_PROMPT.is_match(line) {
        // First match wins; order matters.
        let kind = if AP_SUMMARY.is_match(line) {
            Some(SectionKind::ApSummary)
        } else if CDP_NEIGHBORS.is_match(line) {
            Some(SectionKind::CdpNeighbors)
        } else if IDENTITY_MONITORING.is_match(line) {
            Some(SectionKind::IdentityMonitoring)
        } else {
            None
        };
        return LineClass::ApPrompt(kind);
    }
    if SHOW_PROMPT.is_match(line) {
        return LineClass::OtherPrompt;
    }
    LineClass::Data
}

// ── Sections ─────────────────────────────────────────────────────────

/// Lines collected for each section, in capture order.
///
/// Prompt lines are never part of a section. Lines borrow from the
/// capture text they were split from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections<'a> {
    pub ap_summary: Vec<&'a str>,
    pub cdp_neighbors: Vec<&'a str>,
    pub identity_monitoring: Vec<&'a str>,
}

impl<'a> Sections<'a> {
    fn lines_mut(&mut self, kind: SectionKind) -> &mut Vec<&'a str> {
        match kind {
            SectionKind::ApSummary => &mut self.ap_summary,
            SectionKind::CdpNeighbors => &mut self.cdp_neighbors,
            SectionKind::IdentityMonitoring => &mut self.identity_monitoring,
        }
    }

    /// Per-section line counts, for reporting.
    pub fn stats(&self) -> SectionStats {
        SectionStats {
            ap_summary: self.ap_summary.len(),
            cdp_neighbors: self.cdp_neighbors.len(),
            identity_monitoring: self.identity_monitoring.len(),
        }
    }
}

/// Line counts per section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionStats {
    pub ap_summary: usize,
    pub cdp_neighbors: usize,
    pub identity_monitoring: usize,
}

// ── Segmentation ─────────────────────────────────────────────────────

/// Split capture lines into sections.
///
/// A section stays open until the next show prompt. An AP prompt that
/// names none of the known reports, or a non-AP show prompt, closes the
/// active section and is itself discarded. Lines outside any section are
/// dropped.
pub fn segment<'a, I>(lines: I) -> Sections<'a>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sections = Sections::default();
    let mut current: Option<SectionKind> = None;

    for (index, line) in lines.into_iter().enumerate() {
        match classify(line) {
            LineClass::ApPrompt(kind) => {
                debug!(line = index + 1, section = ?kind, "AP show prompt");
                current = kind;
            }
            LineClass::OtherPrompt if current.is_some() => {
                debug!(line = index + 1, "non-AP show prompt closes section");
                current = None;
            }
            LineClass::OtherPrompt | LineClass::Data => {
                if let Some(kind) = current {
                    sections.lines_mut(kind).push(line);
                } else {
                    trace!(line = index + 1, "outside any section");
                }
            }
        }
    }

    sections
}

/// Split a whole capture on line boundaries and segment it.
pub fn segment_text(text: &str) -> Sections<'_> {
    segment(text.lines())
}
