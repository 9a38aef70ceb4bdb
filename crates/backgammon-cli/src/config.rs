//! Startup configuration read from the environment.

use anyhow::{bail, Context};

/// Shell settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Fixed dice seed for reproducible sessions
    pub seed: Option<u64>,
    /// Print state as JSON instead of the text board
    pub json_output: bool,
}

impl Config {
    /// Read `BACKGAMMON_SEED` and `BACKGAMMON_JSON`
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(
            std::env::var("BACKGAMMON_SEED").ok(),
            std::env::var("BACKGAMMON_JSON").ok(),
        )
    }

    fn from_vars(seed: Option<String>, json: Option<String>) -> anyhow::Result<Self> {
        let seed = seed
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("BACKGAMMON_SEED must be an unsigned integer, got {:?}", raw))
            })
            .transpose()?;

        let json_output = match json.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) => parse_flag(v).context("BACKGAMMON_JSON")?,
        };

        Ok(Self { seed, json_output })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean flag, got {:?}", other),
    }
}
