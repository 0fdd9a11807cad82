use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::asset::{Asset, Kind, Side};

/// One presented image and the response it received. Created the moment
/// an image is selected (guess fields unset) and filled exactly once
/// when the user answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub image: PathBuf,
    pub image_id: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub side: Side,
    /// Unix timestamp of when the image was presented.
    pub time: f64,
    pub correct: Option<bool>,
    pub guess: Option<Side>,
    /// Seconds between presentation and the guess.
    pub guess_time: Option<f64>,
}

impl TrialRecord {
    /// Open a fresh record for `asset`, presented at `time`.
    pub fn open(asset: &Asset, time: f64) -> Self {
        Self {
            image: asset.path.clone(),
            image_id: asset.id.clone(),
            kind: asset.kind,
            side: asset.side,
            time,
            correct: None,
            guess: None,
            guess_time: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.guess.is_some()
    }
}

/// A finished (or early-terminated) run, in the shape it is persisted:
/// one JSON object per line of the run log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub pain_level: u8,
    /// Size of the working set, i.e. the number of trials in a full run.
    pub num_images: usize,
    #[serde(with = "kinds_string")]
    pub test_items: Vec<Kind>,
    /// Unix timestamp of the first presented image; null until then.
    pub start_time: Option<f64>,
    pub guess_log: Vec<TrialRecord>,
}

/// `test_items` is persisted as a space-joined string ("hands feet"),
/// not a JSON array.
mod kinds_string {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::models::asset::Kind;

    pub fn serialize<S: Serializer>(kinds: &[Kind], serializer: S) -> Result<S::Ok, S::Error> {
        let joined = kinds
            .iter()
            .map(Kind::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        serializer.serialize_str(&joined)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Kind>, D::Error> {
        let joined = String::deserialize(deserializer)?;
        joined
            .split_whitespace()
            .map(|item| item.parse::<Kind>().map_err(D::Error::custom))
            .collect()
    }
}
