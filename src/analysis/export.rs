//! Tabular (CSV) projections of run results.

use anyhow::{anyhow, Context, Result};
use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{format_timestamp, RunAnalysis, TrialFilter};
use crate::models::{Kind, Side};

/// Column order of the one-row-per-run summary table.
pub const SUMMARY_COLUMNS: [&str; 22] = [
    "timestamp",
    "pain_level",
    "kinds",
    "duration",
    "count",
    "correct",
    "count_hands_left",
    "count_hands_right",
    "count_feet_left",
    "count_feet_right",
    "correct_hands_left",
    "correct_hands_right",
    "correct_feet_left",
    "correct_feet_right",
    "time_hands_left",
    "time_hands_right",
    "time_feet_left",
    "time_feet_right",
    "correct_time_hands_left",
    "correct_time_hands_right",
    "correct_time_feet_left",
    "correct_time_feet_right",
];

/// Column order of the one-row-per-trial detailed table.
pub const DETAIL_COLUMNS: [&str; 9] = [
    "timestamp",
    "image_id",
    "image",
    "type",
    "side",
    "time",
    "correct",
    "guess",
    "guess_time",
];

/// The (kind, side) combinations in summary-column order.
const COMBOS: [(Kind, Side); 4] = [
    (Kind::Hands, Side::Left),
    (Kind::Hands, Side::Right),
    (Kind::Feet, Side::Left),
    (Kind::Feet, Side::Right),
];

/// Write the summary table for `runs` to `dest`. With `append` the
/// header is skipped and rows are added to the existing file; otherwise
/// the file is created fresh.
pub fn write_summary_csv(runs: &[RunAnalysis], dest: &Path, append: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(append)
        .write(true)
        .truncate(!append)
        .open(dest)
        .with_context(|| format!("Failed to open summary CSV {}", dest.display()))?;
    let mut out = BufWriter::new(file);

    if !append {
        write_row(&mut out, &SUMMARY_COLUMNS.map(String::from))?;
    }
    for ra in runs {
        write_row(&mut out, &summary_row(ra))?;
    }
    out.flush()?;
    Ok(())
}

pub fn summary_row(ra: &RunAnalysis) -> Vec<String> {
    let mut row = vec![
        ra.start().map(format_timestamp).unwrap_or_default(),
        ra.pain_level().to_string(),
        ra.kinds(),
        ra.total_response_time().to_string(),
        ra.count().to_string(),
        ra.correct().to_string(),
    ];
    for correct_only in [false, true] {
        for (kind, side) in COMBOS {
            let filter = combo_filter(kind, side, correct_only);
            row.push(ra.count_of(filter).to_string());
        }
    }
    for correct_only in [false, true] {
        for (kind, side) in COMBOS {
            let filter = combo_filter(kind, side, correct_only);
            row.push(ra.response_time_of(filter).to_string());
        }
    }
    row
}

fn combo_filter(kind: Kind, side: Side, correct_only: bool) -> TrialFilter {
    let filter = TrialFilter::new().kind(kind).side(side);
    if correct_only {
        filter.correct(true)
    } else {
        filter
    }
}

/// Write one detailed table per run, each to `<index+1>_<basename>`
/// alongside `dest`.
pub fn write_detailed_csv(runs: &[RunAnalysis], dest: &Path) -> Result<()> {
    let dir = dest.parent().unwrap_or_else(|| Path::new(""));
    let name = dest
        .file_name()
        .ok_or_else(|| anyhow!("detailed CSV path {} has no file name", dest.display()))?
        .to_string_lossy();

    for (index, ra) in runs.iter().enumerate() {
        let path = dir.join(format!("{}_{}", index + 1, name));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create detailed CSV {}", path.display()))?;
        let mut out = BufWriter::new(file);

        write_row(&mut out, &DETAIL_COLUMNS.map(String::from))?;
        let start = ra.start().map(format_timestamp).unwrap_or_default();
        for record in &ra.result().guess_log {
            write_row(
                &mut out,
                &[
                    start.clone(),
                    record.image_id.clone(),
                    record.image.to_string_lossy().into_owned(),
                    record.kind.to_string(),
                    record.side.to_string(),
                    record.time.to_string(),
                    opt_to_string(record.correct),
                    opt_to_string(record.guess),
                    opt_to_string(record.guess_time),
                ],
            )?;
        }
        out.flush()?;
    }
    Ok(())
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_row<W: Write>(out: &mut W, fields: &[String]) -> Result<()> {
    let line = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{line}")?;
    Ok(())
}

/// Minimal CSV quoting: only fields containing a delimiter, quote, or
/// newline get wrapped.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
