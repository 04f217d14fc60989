//! Layered game configuration with per-value source tracking.
//!
//! Resolution order, lowest to highest precedence: built-in defaults, the
//! TOML file named by `STABLERACE_CONFIG`, `STABLERACE_*` environment
//! variables, then command-line flags.

use crate::cli::GameArgs;
use serde::{Deserialize, Serialize};
use stablerace_engine::engine::GameConfig;
use stablerace_engine::errors::GameError;
use std::fs;

pub const CONFIG_ENV: &str = "STABLERACE_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub starting_tokens: ValueSource,
    pub rounds: ValueSource,
    pub decks: ValueSource,
    pub fee_multiplier: ValueSource,
    pub no_cap: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            starting_tokens: ValueSource::Default,
            rounds: ValueSource::Default,
            decks: ValueSource::Default,
            fee_multiplier: ValueSource::Default,
            no_cap: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: GameConfig,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}
impl From<GameError> for ConfigError {
    fn from(e: GameError) -> Self {
        ConfigError::Invalid(e.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Resolves every layer including `flags`, then validates the result.
pub fn resolve(flags: &GameArgs) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = GameConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.starting_tokens {
            cfg.starting_tokens = v;
            sources.starting_tokens = ValueSource::File;
        }
        if let Some(v) = f.rounds {
            cfg.rounds = v;
            sources.rounds = ValueSource::File;
        }
        if let Some(v) = f.decks {
            cfg.decks = v;
            sources.decks = ValueSource::File;
        }
        if let Some(v) = f.fee_multiplier {
            cfg.fee_multiplier = v;
            sources.fee_multiplier = ValueSource::File;
        }
        if let Some(v) = f.no_cap {
            cfg.no_cap = v;
            sources.no_cap = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(v) = env_number("STABLERACE_PLAYERS", "players")? {
        cfg.players = v;
        sources.players = ValueSource::Env;
    }
    if let Some(v) = env_number("STABLERACE_TOKENS", "starting_tokens")? {
        cfg.starting_tokens = v;
        sources.starting_tokens = ValueSource::Env;
    }
    if let Some(v) = env_number("STABLERACE_ROUNDS", "rounds")? {
        cfg.rounds = v;
        sources.rounds = ValueSource::Env;
    }
    if let Some(v) = env_number("STABLERACE_DECKS", "decks")? {
        cfg.decks = v;
        sources.decks = ValueSource::Env;
    }
    if let Some(v) = env_number("STABLERACE_FEE", "fee_multiplier")? {
        cfg.fee_multiplier = v;
        sources.fee_multiplier = ValueSource::Env;
    }
    if let Ok(s) = std::env::var("STABLERACE_NO_CAP")
        && !s.is_empty()
    {
        cfg.no_cap =
            parse_bool(&s).ok_or_else(|| ConfigError::Invalid("Invalid no_cap".into()))?;
        sources.no_cap = ValueSource::Env;
    }
    if let Some(v) = env_number("STABLERACE_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }

    apply_flags(&mut cfg, &mut sources, flags);

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn apply_flags(cfg: &mut GameConfig, sources: &mut ConfigSources, flags: &GameArgs) {
    if let Some(v) = flags.players {
        cfg.players = v;
        sources.players = ValueSource::Flag;
    }
    if let Some(v) = flags.tokens {
        cfg.starting_tokens = v;
        sources.starting_tokens = ValueSource::Flag;
    }
    if let Some(v) = flags.rounds {
        cfg.rounds = v;
        sources.rounds = ValueSource::Flag;
    }
    if let Some(v) = flags.decks {
        cfg.decks = v;
        sources.decks = ValueSource::Flag;
    }
    if let Some(v) = flags.fee {
        cfg.fee_multiplier = v;
        sources.fee_multiplier = ValueSource::Flag;
    }
    // a bare switch can only turn the cap off
    if flags.no_cap {
        cfg.no_cap = true;
        sources.no_cap = ValueSource::Flag;
    }
    if let Some(v) = flags.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Flag;
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    players: Option<u32>,
    #[serde(default)]
    starting_tokens: Option<u64>,
    #[serde(default)]
    rounds: Option<u32>,
    #[serde(default)]
    decks: Option<u32>,
    #[serde(default)]
    fee_multiplier: Option<u64>,
    #[serde(default)]
    no_cap: Option<bool>,
    #[serde(default)]
    seed: Option<u64>,
}

fn env_number<T: std::str::FromStr>(var: &str, field: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(s) if !s.is_empty() => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {} in {}: {}", field, var, s))),
        _ => Ok(None),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        for s in ["1", "true", "ON", "Yes"] {
            assert_eq!(parse_bool(s), Some(true), "{}", s);
        }
        for s in ["0", "false", "Off", "NO"] {
            assert_eq!(parse_bool(s), Some(false), "{}", s);
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn flags_override_and_are_tagged() {
        let mut cfg = GameConfig::default();
        let mut sources = ConfigSources::default();
        let flags = GameArgs {
            players: Some(6),
            fee: Some(3),
            no_cap: true,
            ..GameArgs::default()
        };
        apply_flags(&mut cfg, &mut sources, &flags);
        assert_eq!(cfg.players, 6);
        assert_eq!(cfg.fee_multiplier, 3);
        assert!(cfg.no_cap);
        assert_eq!(sources.players, ValueSource::Flag);
        assert_eq!(sources.no_cap, ValueSource::Flag);
        assert_eq!(sources.rounds, ValueSource::Default);
        assert_eq!(cfg.starting_tokens, 100);
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        let res: Result<FileConfig, _> = toml::from_str("players = 3\nlevel = 2\n");
        assert!(res.is_err());
        let ok: FileConfig = toml::from_str("players = 3\nno_cap = true\n").unwrap();
        assert_eq!(ok.players, Some(3));
        assert_eq!(ok.no_cap, Some(true));
    }

    #[test]
    fn game_error_becomes_invalid() {
        let e: ConfigError = GameError::NoDecks.into();
        assert!(e.to_string().contains("decks must be >= 1"));
    }
}
