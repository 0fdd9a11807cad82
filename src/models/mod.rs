pub mod asset;
pub mod record;

pub use asset::{Asset, Kind, Side};
pub use record::{RunResult, TrialRecord};
