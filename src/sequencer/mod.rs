//! Trial sequencing: balanced sampling across the four asset buckets,
//! resizing to the requested trial count, and serving trials one at a
//! time without repetition until the set is exhausted.

pub mod config;

pub use config::RunConfig;

use chrono::Utc;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::AssetBuckets;
use crate::error::TestError;
use crate::models::{Asset, RunResult, Side, TrialRecord};

/// Current Unix time as float seconds, microsecond precision.
fn unix_now() -> f64 {
    Utc::now().timestamp_micros() as f64 * 1e-6
}

/// Owns the working set for one run and serves trials from it.
///
/// Exhaustion is modeled as a value: `next()` returns `None` once every
/// working-set entry has been presented, and stays `None` afterwards.
#[derive(Debug)]
pub struct TrialSequencer<R: Rng = ThreadRng> {
    config: RunConfig,
    working_set: Vec<Asset>,
    unseen: Vec<Asset>,
    seen: Vec<Asset>,
    current: Option<Asset>,
    guess_log: Vec<TrialRecord>,
    start_time: Option<f64>,
    done: bool,
    rng: R,
}

impl TrialSequencer<ThreadRng> {
    pub fn new(config: RunConfig, buckets: AssetBuckets) -> Result<Self, TestError> {
        Self::with_rng(config, buckets, rand::thread_rng())
    }
}

impl<R: Rng> TrialSequencer<R> {
    /// Build a sequencer with a caller-supplied RNG, so tests can seed
    /// the draws.
    pub fn with_rng(config: RunConfig, mut buckets: AssetBuckets, mut rng: R) -> Result<Self, TestError> {
        config.validate()?;
        if buckets.min_bucket_len() == 0 {
            return Err(TestError::InvalidConfiguration(
                "every selected asset bucket must contain at least one asset".into(),
            ));
        }

        if config.equalize {
            buckets.equalize(&mut rng);
        }
        let mut working_set = buckets.into_working_set();
        resize_to(&mut working_set, config.num_trials, &mut rng);

        let unseen = working_set.clone();
        Ok(Self {
            config,
            working_set,
            unseen,
            seen: Vec::new(),
            current: None,
            guess_log: Vec::new(),
            start_time: None,
            done: false,
            rng,
        })
    }

    /// Advance to the next trial. Returns the asset to present, or
    /// `None` once the run is over (idempotent from then on). Opens a
    /// trial record stamped with the presentation time; the first call
    /// also records the run start.
    pub fn next(&mut self) -> Option<&Asset> {
        let drawn = if self.config.allow_repeats {
            if self.guess_log.len() >= self.config.num_trials {
                None
            } else {
                self.working_set.choose(&mut self.rng).cloned()
            }
        } else if self.unseen.is_empty() {
            None
        } else {
            let idx = self.rng.gen_range(0..self.unseen.len());
            let asset = self.unseen.swap_remove(idx);
            self.seen.push(asset.clone());
            Some(asset)
        };

        let Some(asset) = drawn else {
            self.done = true;
            self.current = None;
            return None;
        };

        let now = unix_now();
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        self.guess_log.push(TrialRecord::open(&asset, now));
        self.current = Some(asset);
        self.current.as_ref()
    }

    /// Record the user's answer for the open trial, then advance.
    /// Returns whether the guess was correct.
    pub fn record_guess(&mut self, guess: Side) -> Result<bool, TestError> {
        let current = self
            .current
            .take()
            .ok_or(TestError::InvalidState("no trial is awaiting a guess"))?;
        let record = self
            .guess_log
            .last_mut()
            .ok_or(TestError::InvalidState("guess log is empty"))?;

        let correct = current.side == guess;
        record.guess = Some(guess);
        record.correct = Some(correct);
        record.guess_time = Some(unix_now() - record.time);

        self.next();
        Ok(correct)
    }

    /// The asset currently awaiting a guess, if any.
    pub fn current(&self) -> Option<&Asset> {
        self.current.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// 1-based index of the current trial; 0 before the first `next()`.
    pub fn trial_index(&self) -> usize {
        self.guess_log.len()
    }

    pub fn trial_count(&self) -> usize {
        self.working_set.len()
    }

    /// Snapshot the run as it stands. Valid mid-run, so an aborted run
    /// can persist its partial guess log.
    pub fn result(&self) -> RunResult {
        RunResult {
            pain_level: self.config.pain_level,
            num_images: self.working_set.len(),
            test_items: self.config.kinds(),
            start_time: self.start_time,
            guess_log: self.guess_log.clone(),
        }
    }
}

/// Resize `set` to exactly `target` entries: duplicate uniformly chosen
/// entries when short, remove uniformly chosen entries when long.
fn resize_to<R: Rng>(set: &mut Vec<Asset>, target: usize, rng: &mut R) {
    while set.len() < target {
        match set.choose(rng).cloned() {
            Some(extra) => set.push(extra),
            None => break,
        }
    }
    while set.len() > target {
        let idx = rng.gen_range(0..set.len());
        set.remove(idx);
    }
}
