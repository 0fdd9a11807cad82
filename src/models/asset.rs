use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::TestError;

/// What an image depicts: a hand or a foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Hands,
    Feet,
}

impl Kind {
    pub const ALL: [Kind; 2] = [Kind::Hands, Kind::Feet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Hands => "hands",
            Kind::Feet => "feet",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = TestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hands" => Ok(Kind::Hands),
            "feet" => Ok(Kind::Feet),
            other => Err(TestError::InvalidConfiguration(format!(
                "unknown category '{other}', expected 'hands' or 'feet'"
            ))),
        }
    }
}

/// Which side of the body an image shows, and what the user answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = TestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(TestError::InvalidConfiguration(format!(
                "unknown side '{other}', expected 'left' or 'right'"
            ))),
        }
    }
}

/// One image in the asset store. Identity is a content fingerprint, not
/// the path, so identical bytes are never logged under two identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub path: PathBuf,
    /// First 8 hex characters of the SHA-256 of the file bytes.
    pub id: String,
    pub kind: Kind,
    pub side: Side,
}

impl Asset {
    pub fn new(path: impl Into<PathBuf>, id: impl Into<String>, kind: Kind, side: Side) -> Self {
        Self {
            path: path.into(),
            id: id.into(),
            kind,
            side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in Kind::ALL {
            assert_eq!(kind.as_str().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_side_round_trips_through_str() {
        for side in Side::ALL {
            assert_eq!(side.as_str().parse::<Side>().unwrap(), side);
        }
    }

    #[test]
    fn test_unknown_category_is_invalid_configuration() {
        let err = "arms".parse::<Kind>().unwrap_err();
        assert!(matches!(err, TestError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Kind::Hands).unwrap(), "\"hands\"");
        assert_eq!(serde_json::to_string(&Side::Right).unwrap(), "\"right\"");
    }
}
