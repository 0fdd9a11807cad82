//! Aggregation and reporting over persisted run results.

pub mod export;
pub mod report;

use chrono::{DateTime, Local};

use crate::models::{Kind, RunResult, Side, TrialRecord};

/// Display format for run timestamps, e.g. "03 Aug 2026 14:05:59".
pub const TIME_FMT: &str = "%d %b %Y %H:%M:%S";

/// Render a float Unix timestamp in local time.
pub fn format_timestamp(ts: f64) -> String {
    let secs = ts.trunc() as i64;
    let nanos = (ts.fract() * 1e9) as u32;
    match DateTime::from_timestamp(secs, nanos) {
        Some(dt) => dt.with_timezone(&Local).format(TIME_FMT).to_string(),
        None => ts.to_string(),
    }
}

/// Trial record predicate; unset fields are wildcards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialFilter {
    pub kind: Option<Kind>,
    pub side: Option<Side>,
    pub correct: Option<bool>,
}

impl TrialFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn correct(mut self, correct: bool) -> Self {
        self.correct = Some(correct);
        self
    }

    pub fn matches(&self, record: &TrialRecord) -> bool {
        self.kind.map_or(true, |k| record.kind == k)
            && self.side.map_or(true, |s| record.side == s)
            && self.correct.map_or(true, |c| record.correct == Some(c))
    }
}

/// Aggregate statistics over one run's guess log.
pub struct RunAnalysis {
    result: RunResult,
}

impl RunAnalysis {
    pub fn new(result: RunResult) -> Self {
        Self { result }
    }

    /// Parse one run-log line.
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line).map(Self::new)
    }

    pub fn result(&self) -> &RunResult {
        &self.result
    }

    pub fn start(&self) -> Option<f64> {
        self.result.start_time
    }

    pub fn count(&self) -> usize {
        self.result.num_images
    }

    pub fn pain_level(&self) -> u8 {
        self.result.pain_level
    }

    /// The kinds tested, as the space-joined wire string.
    pub fn kinds(&self) -> String {
        self.result
            .test_items
            .iter()
            .map(Kind::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn count_of(&self, filter: TrialFilter) -> usize {
        self.result
            .guess_log
            .iter()
            .filter(|r| filter.matches(r))
            .count()
    }

    pub fn correct(&self) -> usize {
        self.count_of(TrialFilter::new().correct(true))
    }

    /// Fraction of trials guessed correctly. The trial count is >= 1 by
    /// construction, so this never divides by zero.
    pub fn accuracy(&self) -> f64 {
        self.correct() as f64 / self.count() as f64
    }

    /// Accuracy over the trials matching (kind, side). NaN when no
    /// trial matches, which is reachable (e.g. asking for hands on a
    /// feet-only run) and deliberately not an error.
    pub fn accuracy_of(&self, kind: Option<Kind>, side: Option<Side>) -> f64 {
        let filter = TrialFilter {
            kind,
            side,
            correct: None,
        };
        let total = self.count_of(filter);
        if total == 0 {
            return f64::NAN;
        }
        let correct = self.count_of(TrialFilter {
            correct: Some(true),
            ..filter
        });
        correct as f64 / total as f64
    }

    /// Summed response latency over the trials matching `filter`.
    /// Records without a recorded latency (an aborted run's open trial)
    /// contribute nothing.
    pub fn response_time_of(&self, filter: TrialFilter) -> f64 {
        self.result
            .guess_log
            .iter()
            .filter(|r| filter.matches(r))
            .filter_map(|r| r.guess_time)
            .sum()
    }

    pub fn total_response_time(&self) -> f64 {
        self.response_time_of(TrialFilter::new())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Kind, RunResult, Side, TrialRecord};

    /// Build an answered record; `guess_time` defaults to 1.0 seconds.
    pub fn answered(kind: Kind, side: Side, guess: Side, guess_time: f64) -> TrialRecord {
        TrialRecord {
            image: format!("assets/{kind}/{side}/img.png").into(),
            image_id: format!("{kind:?}{side:?}").to_lowercase(),
            kind,
            side,
            time: 1_700_000_000.0,
            correct: Some(side == guess),
            guess: Some(guess),
            guess_time: Some(guess_time),
        }
    }

    pub fn run_with(records: Vec<TrialRecord>, test_items: Vec<Kind>) -> RunResult {
        RunResult {
            pain_level: 5,
            num_images: records.len().max(1),
            test_items,
            start_time: Some(1_700_000_000.0),
            guess_log: records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{answered, run_with};
    use super::*;

    #[test]
    fn test_accuracy_over_mixed_guesses() {
        let result = run_with(
            vec![
                answered(Kind::Hands, Side::Left, Side::Left, 1.0),
                answered(Kind::Hands, Side::Right, Side::Left, 2.0),
                answered(Kind::Feet, Side::Left, Side::Left, 0.5),
                answered(Kind::Feet, Side::Right, Side::Right, 1.5),
            ],
            vec![Kind::Hands, Kind::Feet],
        );
        let ra = RunAnalysis::new(result);
        assert_eq!(ra.correct(), 3);
        assert!((ra.accuracy() - 0.75).abs() < 1e-12);
        assert!((ra.total_response_time() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_count_of_filter_combinations() {
        let result = run_with(
            vec![
                answered(Kind::Hands, Side::Left, Side::Left, 1.0),
                answered(Kind::Hands, Side::Left, Side::Right, 1.0),
                answered(Kind::Feet, Side::Right, Side::Right, 1.0),
            ],
            vec![Kind::Hands, Kind::Feet],
        );
        let ra = RunAnalysis::new(result);
        assert_eq!(ra.count_of(TrialFilter::new()), 3);
        assert_eq!(ra.count_of(TrialFilter::new().kind(Kind::Hands)), 2);
        assert_eq!(ra.count_of(TrialFilter::new().side(Side::Right)), 1);
        assert_eq!(
            ra.count_of(TrialFilter::new().kind(Kind::Hands).correct(true)),
            1
        );
        assert_eq!(
            ra.count_of(
                TrialFilter::new()
                    .kind(Kind::Feet)
                    .side(Side::Right)
                    .correct(true)
            ),
            1
        );
    }

    #[test]
    fn test_accuracy_of_absent_category_is_nan() {
        // Feet-only run: hands accuracy has a zero denominator.
        let result = run_with(
            vec![answered(Kind::Feet, Side::Left, Side::Left, 1.0)],
            vec![Kind::Feet],
        );
        let ra = RunAnalysis::new(result);
        assert!(ra.accuracy_of(Some(Kind::Hands), None).is_nan());
        assert!((ra.accuracy_of(Some(Kind::Feet), None) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unanswered_records_excluded_from_latency() {
        let mut open = answered(Kind::Hands, Side::Left, Side::Left, 1.0);
        open.guess = None;
        open.correct = None;
        open.guess_time = None;
        let result = run_with(
            vec![answered(Kind::Hands, Side::Right, Side::Right, 2.0), open],
            vec![Kind::Hands],
        );
        let ra = RunAnalysis::new(result);
        assert!((ra.total_response_time() - 2.0).abs() < 1e-12);
        assert_eq!(ra.correct(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed_line() {
        assert!(RunAnalysis::parse("{\"pain_level\": }").is_err());
    }
}
