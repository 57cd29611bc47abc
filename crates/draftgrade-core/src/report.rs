// Report output: comparison lines plus the per-manager summary, as text or JSON.

use std::io::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::replay::{PickComparison, ProjectionLookup, ReplayReport, ReplayStats};

pub const COMPARISON_HEADER: &str = "manager,round,pick,player,position,points,best_alternative,best_alternative_points,point_difference,was_best_pick";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: OutputFormat,
    /// Append the per-manager summary after the comparisons (text only;
    /// JSON always carries the ratings).
    pub summary: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            format: OutputFormat::Text,
            summary: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Shortest round-trip rendering, keeping a `.0` on integral values
/// (`30` -> `30.0`, `12.34` -> `12.34`).
///
/// Magnitudes of at least `1e16` or below `1e-4` switch to exponent form with
/// a signed, two-digit-minimum exponent (`1e+16`, `1.5e-05`).
pub fn format_points(points: f64) -> String {
    let magnitude = points.abs();
    if !points.is_finite() {
        format!("{points}")
    } else if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
        format_exponent(points)
    } else if points.fract() == 0.0 {
        format!("{points:.1}")
    } else {
        format!("{points}")
    }
}

fn format_exponent(points: f64) -> String {
    let shortest = format!("{points:e}");
    match shortest.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => shortest,
    }
}

fn format_picked(picked: &ProjectionLookup) -> String {
    match picked {
        ProjectionLookup::Found(points) => format_points(*points),
        ProjectionLookup::Missing => "0".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One comparison line, without the trailing newline.
pub fn comparison_line(c: &PickComparison) -> String {
    let alt_name = c.alternative.as_ref().map(|a| a.name.as_str()).unwrap_or("");
    format!(
        "{},{},{},{},{},{},{},{},{:.2},{}",
        c.manager,
        c.round,
        c.pick,
        c.player,
        c.position,
        format_picked(&c.picked),
        alt_name,
        format_points(c.alternative_points()),
        c.point_difference,
        u8::from(c.was_best_pick),
    )
}

pub fn write_comparisons<W: Write>(
    out: &mut W,
    comparisons: &[PickComparison],
) -> Result<(), ReportError> {
    writeln!(out, "{COMPARISON_HEADER}")?;
    for c in comparisons {
        writeln!(out, "{}", comparison_line(c))?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, report: &ReplayReport) -> Result<(), ReportError> {
    writeln!(out, "Pick Ratings:")?;
    for (manager, total) in report.ratings.iter() {
        writeln!(out, "Manager: {manager}, Total Points Difference: {total:.2}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct RatingEntry<'a> {
    manager: &'a str,
    total: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    comparisons: &'a [PickComparison],
    ratings: Vec<RatingEntry<'a>>,
    stats: ReplayStats,
}

pub fn write_json<W: Write>(out: &mut W, report: &ReplayReport) -> Result<(), ReportError> {
    let doc = JsonReport {
        comparisons: &report.comparisons,
        ratings: report
            .ratings
            .iter()
            .map(|(manager, total)| RatingEntry { manager, total })
            .collect(),
        stats: report.stats,
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}

/// Write the whole report in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ReplayReport,
    options: &ReportOptions,
) -> Result<(), ReportError> {
    match options.format {
        OutputFormat::Text => {
            write_comparisons(out, &report.comparisons)?;
            if options.summary {
                write_summary(out, report)?;
            }
        }
        OutputFormat::Json => write_json(out, report)?,
    }
    out.flush()?;
    Ok(())
}
