//! Human-readable per-run summaries.

use anyhow::Result;
use std::io::Write;

use super::{format_timestamp, RunAnalysis, TrialFilter};
use crate::models::{Kind, Side};

/// Write the summary block for one run.
pub fn write_summary<W: Write>(out: &mut W, ra: &RunAnalysis) -> Result<()> {
    let start = match ra.start() {
        Some(ts) => format_timestamp(ts),
        None => "never started".to_string(),
    };
    let duration = ra.total_response_time();
    let n = ra.count();

    writeln!(out, "Run {} - {:.3} seconds for {} images", start, duration, n)?;
    writeln!(out, "Pain level: {}", ra.pain_level())?;
    writeln!(
        out,
        "Total accuracy: {}/{} {:.2}%",
        ra.correct(),
        n,
        ra.accuracy() * 100.0
    )?;
    write_breakdown(out, ra, "Hand", TrialFilter::new().kind(Kind::Hands))?;
    write_breakdown(out, ra, "Foot", TrialFilter::new().kind(Kind::Feet))?;
    write_breakdown(out, ra, "Left", TrialFilter::new().side(Side::Left))?;
    write_breakdown(out, ra, "Right", TrialFilter::new().side(Side::Right))?;
    writeln!(
        out,
        "Average time per image: {:.2} seconds",
        duration / n as f64
    )?;
    Ok(())
}

fn write_breakdown<W: Write>(
    out: &mut W,
    ra: &RunAnalysis,
    label: &str,
    filter: TrialFilter,
) -> Result<()> {
    let total = ra.count_of(filter);
    let correct = ra.count_of(filter.correct(true));
    let accuracy = ra.accuracy_of(filter.kind, filter.side) * 100.0;
    writeln!(
        out,
        "{} accuracy: {}/{} {:.2}%",
        label, correct, total, accuracy
    )?;
    Ok(())
}
