use crate::error::TestError;
use crate::models::Kind;

/// Configuration for one test run, validated at sequencer construction.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Self-reported pain level, 0 through 10.
    pub pain_level: u8,
    /// Restrict the run to one kind of image; None tests both.
    pub limit_to: Option<Kind>,
    /// Number of trials to present.
    pub num_trials: usize,
    /// Sample every bucket down to the smallest before building the
    /// working set.
    pub equalize: bool,
    /// Draw with replacement instead of exhausting the working set.
    pub allow_repeats: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pain_level: 0,
            limit_to: None,
            num_trials: 30,
            equalize: true,
            allow_repeats: false,
        }
    }
}

impl RunConfig {
    /// The kinds this run draws from, in canonical order.
    pub fn kinds(&self) -> Vec<Kind> {
        match self.limit_to {
            Some(kind) => vec![kind],
            None => Kind::ALL.to_vec(),
        }
    }

    pub fn validate(&self) -> Result<(), TestError> {
        if self.pain_level > 10 {
            return Err(TestError::InvalidConfiguration(format!(
                "pain level must be between 0 and 10, got {}",
                self.pain_level
            )));
        }
        if self.num_trials < 1 {
            return Err(TestError::InvalidConfiguration(
                "number of trials must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pain_level_bounds() {
        for level in [0, 10] {
            let config = RunConfig {
                pain_level: level,
                ..RunConfig::default()
            };
            assert!(config.validate().is_ok());
        }
        let config = RunConfig {
            pain_level: 11,
            ..RunConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TestError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_trials_rejected() {
        let config = RunConfig {
            num_trials: 0,
            ..RunConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TestError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_kinds_reflect_limit() {
        let config = RunConfig::default();
        assert_eq!(config.kinds(), vec![Kind::Hands, Kind::Feet]);
        let config = RunConfig {
            limit_to: Some(Kind::Feet),
            ..RunConfig::default()
        };
        assert_eq!(config.kinds(), vec![Kind::Feet]);
    }
}
