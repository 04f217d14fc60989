use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::deck::Deck;
use crate::dice::{roll_dice, Roll};
use crate::errors::GameError;
use crate::game::{RoundState, Stage};
use crate::history::TokenHistory;
use crate::player::Player;
use crate::rng::{self, RandomSource};
use crate::rules::distribute_pot;
use crate::snapshot::{PlayerView, Payout, Settlement, Snapshot};
use crate::track;

/// Parameters fixed for the lifetime of one engine.
///
/// Missing fields take the documented defaults when deserialized, so partial
/// overrides can be merged with struct update syntax or from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub players: u32,
    pub starting_tokens: u64,
    /// Ignored when `no_cap` is set
    pub rounds: u32,
    pub decks: u32,
    pub fee_multiplier: u64,
    pub no_cap: bool,
    /// Fixes the random stream; `None` draws from OS entropy.
    ///
    /// Only the low 32 bits select the stream, so seeds equal modulo 2^32
    /// replay the same game. A negative seed `-n` corresponds to `2^32 - n`.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 4,
            starting_tokens: 100,
            rounds: 100,
            decks: 1,
            fee_multiplier: 1,
            no_cap: false,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.players < 2 {
            return Err(GameError::TooFewPlayers {
                players: self.players,
            });
        }
        if self.starting_tokens == 0 {
            return Err(GameError::NoStartingTokens);
        }
        if !self.no_cap && self.rounds == 0 {
            return Err(GameError::NoRounds);
        }
        if self.decks == 0 {
            return Err(GameError::NoDecks);
        }
        if self.fee_multiplier == 0 {
            return Err(GameError::ZeroFeeMultiplier);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndReason {
    RoundCap,
    TooFewPlayers,
}

impl EndReason {
    fn message(self) -> &'static str {
        match self {
            EndReason::RoundCap => "Round cap reached.",
            EndReason::TooFewPlayers => "Simulation ended: fewer than two players.",
        }
    }
}

/// The stabling-and-racing simulation.
///
/// Owns every piece of game state and advances it one atomic action per
/// [`Engine::step`]. Stage boundaries that must be crossed immediately (race
/// win → next deal, last player standing → done) are resolved inside the same
/// step, so callers never observe a half-applied action.
///
/// # Examples
///
/// ```
/// use stablerace_engine::engine::{Engine, GameConfig};
/// use stablerace_engine::game::Stage;
///
/// let config = GameConfig {
///     players: 3,
///     rounds: 2,
///     seed: Some(7),
///     ..GameConfig::default()
/// };
/// let mut engine = Engine::new(config).expect("valid config");
///
/// // The first step deals the opening round.
/// let snap = engine.step();
/// assert_eq!(snap.stage, Stage::Stabling);
/// assert_eq!(snap.round, 1);
///
/// let last = engine.run_until_done(1_000_000);
/// assert_eq!(last.stage, Stage::Done);
/// ```
#[derive(Debug)]
pub struct Engine {
    config: GameConfig,
    rng: Box<dyn RandomSource>,
    players: Vec<Player>,
    round: u32,
    stage: Stage,
    table: RoundState,
    /// Index into the alive players, in id order
    current_idx: usize,
    history: TokenHistory,
    last_event: String,
    events: Vec<String>,
    last_roll: Option<Roll>,
    last_settlement: Option<Settlement>,
    steps: u64,
}

impl Engine {
    /// Builds an engine drawing from the generator selected by `config.seed`.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let source = rng::from_seed(config.seed);
        Self::with_source(config, source)
    }

    /// Builds an engine drawing from `source`; `config.seed` is not consulted.
    pub fn with_source(
        config: GameConfig,
        source: Box<dyn RandomSource>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let players: Vec<Player> = (1..=config.players)
            .map(|id| Player::new(id, config.starting_tokens))
            .collect();
        let history = TokenHistory::seed(&players);
        Ok(Self {
            config,
            rng: source,
            players,
            round: 1,
            stage: Stage::Idle,
            table: RoundState::new(),
            current_idx: 0,
            history,
            last_event: "Ready to start.".to_string(),
            events: Vec::new(),
            last_roll: None,
            last_settlement: None,
            steps: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn round(&self) -> u32 {
        self.round
    }
    pub fn pot(&self) -> u64 {
        self.table.pot()
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn history(&self) -> &TokenHistory {
        &self.history
    }
    pub fn stabled(&self) -> &[u8] {
        self.table.stabled()
    }
    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Id of the player who rolls next, if a round is in play.
    pub fn current_roller(&self) -> Option<u32> {
        if !matches!(self.stage, Stage::Stabling | Stage::Race) {
            return None;
        }
        let alive = self.alive_indices();
        if alive.is_empty() {
            return None;
        }
        Some(self.players[alive[self.current_idx % alive.len()]].id())
    }

    /// Performs one atomic action and reports the resulting state.
    /// Once the engine is done this changes nothing.
    pub fn step(&mut self) -> Snapshot {
        if self.stage == Stage::Done {
            return self.snapshot();
        }
        self.events.clear();
        self.steps += 1;
        match self.stage {
            Stage::Idle | Stage::RoundComplete => self.begin_round_or_finish(),
            Stage::Stabling => self.stabling_turn(),
            Stage::Race => self.race_turn(),
            Stage::Done => {}
        }
        if self.stage == Stage::RoundComplete {
            self.begin_round_or_finish();
        }
        self.snapshot()
    }

    /// Steps until done or until `max_steps` steps have been applied.
    pub fn run_until_done(&mut self, max_steps: u64) -> Snapshot {
        let mut applied = 0;
        while self.stage != Stage::Done && applied < max_steps {
            self.step();
            applied += 1;
        }
        self.snapshot()
    }

    /// Deep copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let round = if self.stage == Stage::RoundComplete {
            self.round.saturating_sub(1)
        } else {
            self.round
        };
        Snapshot {
            round,
            stage: self.stage,
            step: self.steps,
            players: self.players.iter().map(PlayerView::from).collect(),
            board: track::board(),
            progress: self.table.progress().clone(),
            stabled: self.table.stabled().to_vec(),
            pot: self.table.pot(),
            last_event: self.last_event.clone(),
            events: self.events.clone(),
            history: self.history.as_map().clone(),
            last_roll: self.last_roll,
            last_settlement: self.last_settlement.clone(),
        }
    }

    fn alive_indices(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.eliminated())
            .map(|(i, _)| i)
            .collect()
    }

    fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| !p.eliminated()).count()
    }

    fn emit(&mut self, event: String) {
        debug!(round = self.round, stage = %self.stage, "{}", event);
        self.last_event.clone_from(&event);
        self.events.push(event);
    }

    /// Like `emit`, for events caused by a dice roll.
    fn emit_roll(&mut self, roller: u32, horse: u8, event: String) {
        debug!(
            round = self.round,
            stage = %self.stage,
            roller,
            horse,
            pot = self.table.pot(),
            "{}",
            event
        );
        self.last_event.clone_from(&event);
        self.events.push(event);
    }

    /// Player index of the next roller, or `None` when the contest is over.
    fn next_roller(&self) -> Option<usize> {
        let alive = self.alive_indices();
        if alive.len() < 2 {
            return None;
        }
        Some(alive[self.current_idx % alive.len()])
    }

    fn begin_round_or_finish(&mut self) {
        if !self.config.no_cap && self.round > self.config.rounds {
            self.finish(EndReason::RoundCap);
        } else if self.alive_count() < 2 {
            self.finish(EndReason::TooFewPlayers);
        } else {
            self.start_round();
        }
    }

    fn start_round(&mut self) {
        let mut deck = Deck::shoe(self.config.decks);
        deck.shuffle(&mut *self.rng);
        for p in &mut self.players {
            p.clear_hand();
        }
        let mut alive: Vec<&mut Player> = self
            .players
            .iter_mut()
            .filter(|p| !p.eliminated())
            .collect();
        let seats = alive.len();
        deck.deal_round_robin(&mut alive);
        self.table.reset_for_round();
        self.stage = Stage::Stabling;
        self.current_idx %= seats.max(1);
        info!(round = self.round, players = seats, "round started");
        self.emit(format!("Round {} started.", self.round));
    }

    fn stabling_turn(&mut self) {
        let Some(ri) = self.next_roller() else {
            self.finish(EndReason::TooFewPlayers);
            return;
        };
        let roll = roll_dice(&mut *self.rng);
        let horse = roll.sum;
        self.last_roll = Some(roll);
        let roller = self.players[ri].id();
        let multiplier = self.config.fee_multiplier;

        if let Some(fee) = self.table.fee_for(horse, multiplier) {
            let paid = self.players[ri].pay(fee);
            self.table.add_to_pot(paid);
            let event = format!(
                "P{} rolled {} (stabled) and paid {} to pot.",
                roller, horse, paid
            );
            self.emit_roll(roller, horse, event);
        } else {
            let tier = self.table.stable(horse);
            let fee = (tier as u64).saturating_mul(multiplier);
            let mut total = 0u64;
            for p in self.players.iter_mut().filter(|p| !p.eliminated()) {
                let removed = p.discard_value(horse);
                if removed > 0 {
                    total += p.pay(fee.saturating_mul(u64::from(removed)));
                }
            }
            self.table.add_to_pot(total);
            let mut event = format!(
                "P{} rolled {}. Horse stabled #{}; everyone paid {} per card ({} to pot).",
                roller, horse, tier, fee, total
            );
            if self.table.is_full() {
                self.stage = Stage::Race;
                event.push_str(" Race begins.");
            }
            self.emit_roll(roller, horse, event);
        }
        self.end_turn();
    }

    fn race_turn(&mut self) {
        let Some(ri) = self.next_roller() else {
            self.finish(EndReason::TooFewPlayers);
            return;
        };
        let roll = roll_dice(&mut *self.rng);
        let horse = roll.sum;
        self.last_roll = Some(roll);
        let roller = self.players[ri].id();

        if let Some(fee) = self.table.fee_for(horse, self.config.fee_multiplier) {
            let paid = self.players[ri].pay(fee);
            self.table.add_to_pot(paid);
            self.emit_roll(
                roller,
                horse,
                format!("P{} hit stabled {} and paid {}.", roller, horse, paid),
            );
        } else {
            let (progress, needed) = self.table.advance(horse);
            if progress >= needed {
                self.settle_race(horse);
                return;
            }
            let event = format!(
                "P{} rolled {}; progress {}/{}.",
                roller, horse, progress, needed
            );
            self.emit_roll(roller, horse, event);
        }
        self.end_turn();
    }

    /// Pays the pot to holders of the winning horse and closes the round.
    /// The turn does not pass; the roller opens the next round.
    fn settle_race(&mut self, horse: u8) {
        let mut winners: Vec<(u32, u32)> = Vec::new();
        for p in self.players.iter_mut().filter(|p| !p.eliminated()) {
            let held = p.discard_value(horse);
            if held > 0 {
                winners.push((p.id(), held));
            }
        }
        let pot = self.table.take_pot();
        let dist = distribute_pot(pot, &winners);
        for &(id, amount) in &dist.payouts {
            if let Some(p) = self.players.iter_mut().find(|p| p.id() == id) {
                p.award(amount);
            }
        }

        let payouts: Vec<Payout> = winners
            .iter()
            .map(|&(id, cards)| Payout {
                id,
                cards,
                amount: dist
                    .payouts
                    .iter()
                    .find(|(pid, _)| *pid == id)
                    .map_or(0, |&(_, amt)| amt),
            })
            .collect();
        let paid_to = if payouts.is_empty() {
            "no one".to_string()
        } else {
            payouts
                .iter()
                .map(|p| format!("P{} ({})", p.id, p.amount))
                .collect::<Vec<_>>()
                .join(", ")
        };
        info!(
            round = self.round,
            horse,
            pot,
            leftover = dist.leftover,
            winners = payouts.len(),
            "horse won"
        );
        self.last_settlement = Some(Settlement {
            step: self.steps,
            round: self.round,
            horse,
            pot,
            payouts,
            leftover: dist.leftover,
        });
        self.emit(format!("Horse {} wins! Pot of {} paid to {}.", horse, pot, paid_to));

        self.stage = Stage::RoundComplete;
        self.history.record(&self.players);
        self.round += 1;
        self.eliminate_broke();
    }

    fn end_turn(&mut self) {
        self.eliminate_broke();
        let alive = self.alive_count();
        if alive < 2 {
            self.finish(EndReason::TooFewPlayers);
            return;
        }
        self.current_idx = (self.current_idx + 1) % alive;
    }

    fn eliminate_broke(&mut self) {
        for p in &mut self.players {
            if p.eliminate_if_broke() {
                info!(round = self.round, player = p.id(), "player eliminated");
            }
        }
    }

    fn finish(&mut self, reason: EndReason) {
        self.history.record_if_changed(&self.players);
        self.stage = Stage::Done;
        info!(round = self.round, steps = self.steps, ?reason, "simulation finished");
        self.emit(reason.message().to_string());
    }
}
