use anyhow::{Context, Result};
use rust_decimal::Decimal;
use standings::{StandingsConfig, TieDepth};

/// Engine settings from the environment; every variable is optional and
/// falls back to the engine defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub standings: StandingsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut standings = StandingsConfig::default();

        if let Some(value) = lookup("STANDINGS_TIE_VALUE") {
            standings.tie_value = value
                .trim()
                .parse::<Decimal>()
                .context("STANDINGS_TIE_VALUE must be a decimal number")?;
        }
        if let Some(value) = lookup("STANDINGS_TIE_DEPTH") {
            standings.tie_depth = value
                .parse::<TieDepth>()
                .context("Cannot parse STANDINGS_TIE_DEPTH")?;
        }
        if let Some(value) = lookup("STANDINGS_PRIZE_TOLERANCE") {
            standings.prize_tolerance = value
                .trim()
                .parse::<Decimal>()
                .context("STANDINGS_PRIZE_TOLERANCE must be a decimal number")?;
        }
        if let Some(value) = lookup("STANDINGS_TOTAL_ROUNDS") {
            standings.total_rounds = Some(
                value
                    .trim()
                    .parse()
                    .context("STANDINGS_TOTAL_ROUNDS must be a number")?,
            );
        }

        standings
            .validate()
            .context("Invalid standings configuration")?;

        Ok(Self { standings })
    }

    /// The snapshot's round count applies unless the environment set one.
    pub fn with_snapshot_rounds(mut self, total_rounds: Option<u32>) -> Self {
        if self.standings.total_rounds.is_none() {
            self.standings.total_rounds = total_rounds;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.standings, StandingsConfig::default());
    }

    #[test]
    fn test_variables_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("STANDINGS_TIE_VALUE", "0"),
            ("STANDINGS_TIE_DEPTH", "h2h"),
            ("STANDINGS_PRIZE_TOLERANCE", "2"),
            ("STANDINGS_TOTAL_ROUNDS", "7"),
        ]))
        .unwrap();
        assert!(config.standings.tie_value.is_zero());
        assert_eq!(config.standings.tie_depth, TieDepth::HeadToHead);
        assert_eq!(config.standings.prize_tolerance, Decimal::from(2));
        assert_eq!(config.standings.total_rounds, Some(7));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::from_lookup(lookup(&[("STANDINGS_TIE_VALUE", "half")])).is_err());
        assert!(Config::from_lookup(lookup(&[("STANDINGS_TIE_VALUE", "1.5")])).is_err());
        assert!(Config::from_lookup(lookup(&[("STANDINGS_TOTAL_ROUNDS", "0")])).is_err());
    }

    #[test]
    fn test_snapshot_rounds_only_fill_gaps() {
        let from_env = Config::from_lookup(lookup(&[("STANDINGS_TOTAL_ROUNDS", "7")]))
            .unwrap()
            .with_snapshot_rounds(Some(5));
        assert_eq!(from_env.standings.total_rounds, Some(7));

        let from_snapshot = Config::from_lookup(lookup(&[]))
            .unwrap()
            .with_snapshot_rounds(Some(5));
        assert_eq!(from_snapshot.standings.total_rounds, Some(5));
    }
}
