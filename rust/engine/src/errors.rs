use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: players must be >= 2 (got {players})")]
    TooFewPlayers { players: u32 },
    #[error("Invalid configuration: starting_tokens must be > 0")]
    NoStartingTokens,
    #[error("Invalid configuration: rounds must be > 0 unless no_cap is set")]
    NoRounds,
    #[error("Invalid configuration: decks must be >= 1")]
    NoDecks,
    #[error("Invalid configuration: fee_multiplier must be >= 1")]
    ZeroFeeMultiplier,
}
