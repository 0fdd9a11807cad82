//! End-to-end: sequence a run, persist it, read it back, and analyze.

use rand::rngs::StdRng;
use rand::SeedableRng;

use laterality::analysis::{export, RunAnalysis};
use laterality::assets::AssetBuckets;
use laterality::models::{Asset, Kind, Side};
use laterality::runlog;
use laterality::sequencer::{RunConfig, TrialSequencer};

fn synthetic_buckets(per_bucket: usize) -> AssetBuckets {
    let mut buckets = AssetBuckets::new();
    for kind in Kind::ALL {
        for side in Side::ALL {
            let assets = (0..per_bucket)
                .map(|n| {
                    Asset::new(
                        format!("assets/{kind}/{side}/{n}.png"),
                        format!("{kind}{side}{n:04}"),
                        kind,
                        side,
                    )
                })
                .collect();
            buckets.push(kind, side, assets);
        }
    }
    buckets
}

#[test]
fn finished_run_survives_persistence_and_analysis() {
    let config = RunConfig {
        pain_level: 7,
        num_trials: 2,
        ..RunConfig::default()
    };
    let mut seq =
        TrialSequencer::with_rng(config, synthetic_buckets(2), StdRng::seed_from_u64(42)).unwrap();

    // Guess left on the first trial's true side (forced correct), then
    // deliberately wrong on the second.
    let first = seq.next().unwrap().side;
    seq.record_guess(first).unwrap();
    let second = seq.current().unwrap().side;
    let wrong = match second {
        Side::Left => Side::Right,
        Side::Right => Side::Left,
    };
    seq.record_guess(wrong).unwrap();
    assert!(seq.is_done());

    let result = seq.result();
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.txt");
    runlog::append_result(&log_path, &result).unwrap();

    let read_back = runlog::read_results(&log_path).unwrap();
    assert_eq!(read_back, vec![result]);

    let ra = RunAnalysis::new(read_back.into_iter().next().unwrap());
    assert_eq!(ra.count(), 2);
    assert_eq!(ra.correct(), 1);
    assert!((ra.accuracy() - 0.5).abs() < 1e-12);

    let row = export::summary_row(&ra);
    assert_eq!(row[4], "2"); // count
    assert_eq!(row[5], "1"); // correct
}

#[test]
fn aborted_run_persists_partial_guess_log() {
    let config = RunConfig {
        pain_level: 3,
        num_trials: 10,
        ..RunConfig::default()
    };
    let mut seq =
        TrialSequencer::with_rng(config, synthetic_buckets(3), StdRng::seed_from_u64(1)).unwrap();

    seq.next().unwrap();
    seq.record_guess(Side::Left).unwrap();
    seq.record_guess(Side::Right).unwrap();
    // User walks away; the run is finalized as-is.
    let result = seq.result();

    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log.txt");
    runlog::append_result(&log_path, &result).unwrap();

    let read_back = runlog::read_results(&log_path).unwrap();
    assert_eq!(read_back[0].num_images, 10);
    assert_eq!(read_back[0].guess_log.len(), 3);
    let answered = read_back[0]
        .guess_log
        .iter()
        .filter(|r| r.is_answered())
        .count();
    assert_eq!(answered, 2);
}
