//! Graded motor imagery left/right discrimination training.
//!
//! Shows a sequence of hand/foot images, records left/right guesses
//! with timing, and produces accuracy reports from the persisted run
//! log. The core is the trial sequencer ([`sequencer`]) and the result
//! analyzer ([`analysis`]); asset discovery, persistence, and the
//! terminal presentation loop are thin plumbing around them.

pub mod analysis;
pub mod assets;
pub mod cli;
pub mod error;
pub mod models;
pub mod runlog;
pub mod sequencer;
pub mod session;

pub use error::TestError;
pub use models::{Asset, Kind, RunResult, Side, TrialRecord};
pub use sequencer::{RunConfig, TrialSequencer};
