//! Card, track and history formatters for terminal display.
//!
//! Pure functions over snapshot views. Suits render as Unicode symbols with
//! an ASCII fallback for terminals that cannot show them.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use stablerace_engine::cards::{Rank, Suit};
//! use stablerace_engine::snapshot::CardView;
//! use stablerace_cli::formatters::format_card;
//!
//! let queen = CardView { rank: Rank::Queen, suit: Suit::Spades, value: 12 };
//! assert!(format_card(&queen) == "Q♠" || format_card(&queen) == "Qs");
//! ```

use stablerace_engine::cards::{Rank, Suit};
use stablerace_engine::snapshot::{CardView, Settlement, Snapshot};
use std::collections::BTreeMap;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Rank label as printed on the card (2-10, J, Q).
pub fn format_rank(rank: &Rank) -> String {
    rank.label().to_string()
}

pub fn format_card(card: &CardView) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// A hand in dealt order, space separated; `-` when empty.
pub fn format_hand(cards: &[CardView]) -> String {
    if cards.is_empty() {
        "-".to_string()
    } else {
        cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
    }
}

/// Count of cards per horse, e.g. `2x1 7x3 12x1`.
pub fn format_holdings(cards: &[CardView]) -> String {
    let mut counts: BTreeMap<u8, u32> = BTreeMap::new();
    for c in cards {
        *counts.entry(c.value).or_default() += 1;
    }
    counts
        .iter()
        .map(|(v, n)| format!("{}x{}", v, n))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per horse: a progress bar for horses still racing, or the
/// stabling tier and the fee it carries.
pub fn format_track(snap: &Snapshot, fee_multiplier: u64) -> Vec<String> {
    let mut lines = Vec::with_capacity(snap.board.len());
    for (&horse, &needed) in &snap.board {
        if let Some(pos) = snap.stabled.iter().position(|&h| h == horse) {
            let tier = pos as u64 + 1;
            lines.push(format!(
                "{:>2} stabled #{} (fee {})",
                horse,
                tier,
                tier * fee_multiplier
            ));
            continue;
        }
        let at = snap.progress.get(&horse).copied().unwrap_or(0).max(0) as u32;
        let filled = at.min(needed) as usize;
        let bar = format!(
            "{}{}",
            "#".repeat(filled),
            ".".repeat(needed as usize - filled)
        );
        lines.push(format!("{:>2} [{}] {}/{}", horse, bar, at, needed));
    }
    lines
}

/// Pot split in the same wording the engine uses for win events.
pub fn format_settlement(s: &Settlement) -> String {
    let winners = if s.payouts.is_empty() {
        "no one".to_string()
    } else {
        s.payouts
            .iter()
            .map(|p| format!("P{} {} ({} cards)", p.id, p.amount, p.cards))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mut line = format!(
        "Round {}: horse {} paid {} of {} to {}",
        s.round,
        s.horse,
        s.paid(),
        s.pot,
        winners
    );
    if s.leftover > 0 {
        line.push_str(&format!("; {} left in pot", s.leftover));
    }
    line
}

/// Token history as CSV: one row per checkpoint, one column per player.
///
/// Expects the hold-forward padded series from
/// [`TokenHistory::padded`](stablerace_engine::history::TokenHistory::padded).
pub fn history_csv(series: &BTreeMap<u32, Vec<u64>>) -> String {
    let mut s = String::from("checkpoint");
    for id in series.keys() {
        s.push_str(&format!(",P{}", id));
    }
    s.push('\n');
    let rows = series.values().map(Vec::len).max().unwrap_or(0);
    for row in 0..rows {
        s.push_str(&row.to_string());
        for values in series.values() {
            s.push(',');
            if let Some(v) = values.get(row) {
                s.push_str(&v.to_string());
            }
        }
        s.push('\n');
    }
    s
}
