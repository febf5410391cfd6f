use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::cli::Cli;
use crate::error::Result;
use crate::models::DayName;
use crate::planner::RuleSet;
use crate::state::load_rules;

/// Runtime settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub state_path: PathBuf,
    pub rules_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub week_start: DayName,
    pub assume_yes: bool,
    pub verbose: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("meals.json"),
            state_path: PathBuf::from("planner_state.json"),
            rules_path: None,
            seed: None,
            week_start: DayName::Monday,
            assume_yes: false,
            verbose: 0,
        }
    }
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            catalog_path: cli.catalog.clone(),
            state_path: cli.state.clone(),
            rules_path: cli.rules.clone(),
            seed: cli.seed,
            week_start: cli.week_start,
            assume_yes: cli.yes,
            verbose: cli.verbose,
        }
    }
}

impl AppConfig {
    /// Random source: seeded when `--seed` was given, from entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// The rules file if one was given, else the built-in tables.
    pub fn rules(&self) -> Result<RuleSet> {
        match &self.rules_path {
            Some(path) => {
                debug!(path = %path.display(), "loading rule set");
                load_rules(path)
            }
            None => Ok(RuleSet::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rand::Rng;

    #[test]
    fn test_from_cli_defaults() {
        let cli = Cli::parse_from(["otorduak"]);
        let config = AppConfig::from(&cli);

        assert_eq!(config.catalog_path, AppConfig::default().catalog_path);
        assert_eq!(config.week_start, DayName::Monday);
        assert!(config.seed.is_none());
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_from_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "otorduak",
            "show",
            "--seed",
            "42",
            "--week-start",
            "sunday",
            "-y",
            "-vv",
        ]);
        let config = AppConfig::from(&cli);

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.week_start, DayName::Sunday);
        assert!(config.assume_yes);
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = AppConfig {
            seed: Some(5),
            ..AppConfig::default()
        };
        let a: u32 = config.rng().gen_range(0..1_000_000);
        let b: u32 = config.rng().gen_range(0..1_000_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_rules_without_file() {
        let config = AppConfig::default();
        assert_eq!(config.rules().unwrap(), RuleSet::default());
    }
}
