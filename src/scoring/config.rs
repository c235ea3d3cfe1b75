use serde::{Deserialize, Serialize};

/// Scoring configuration.
///
/// The factor weights are fixed; the only knob is which way
/// `Buy Affordability` is ranked.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   buy_affordability: descending
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Rank direction for Buy Affordability (default: ascending, higher value ranks higher)
    #[serde(default)]
    pub buy_affordability: RankDirection,
}

/// Which end of a column earns the top percentile rank.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RankDirection {
    /// Largest value ranks 1.0
    #[default]
    Ascending,
    /// Smallest value ranks 1.0
    Descending,
}

impl RankDirection {
    /// Map a value so that ascending ranking of the result honours the direction
    pub fn orient(&self, value: f64) -> f64 {
        match self {
            RankDirection::Ascending => value,
            RankDirection::Descending => -value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.buy_affordability, RankDirection::Ascending);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig {
            buy_affordability: RankDirection::Descending,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_parse_descending() {
        let yaml = "buy_affordability: descending\n";
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.buy_affordability, RankDirection::Descending);
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "yield_weight: 0.5\n";
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }

    #[test]
    fn test_orient() {
        assert_eq!(RankDirection::Ascending.orient(2.0), 2.0);
        assert_eq!(RankDirection::Descending.orient(2.0), -2.0);
    }
}
