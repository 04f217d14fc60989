use serde::{Deserialize, Serialize};

/// Fee owed for landing on `horse`, if it is stabled.
///
/// The Nth horse stabled in a round carries a fee of `N * multiplier`.
///
/// # Examples
///
/// ```
/// use stablerace_engine::rules::stabling_fee;
///
/// let stabled = [7, 4, 11];
/// assert_eq!(stabling_fee(4, &stabled, 1), Some(2));
/// assert_eq!(stabling_fee(11, &stabled, 5), Some(15));
/// assert_eq!(stabling_fee(8, &stabled, 1), None);
/// ```
pub fn stabling_fee(horse: u8, stabled: &[u8], multiplier: u64) -> Option<u64> {
    stabled
        .iter()
        .position(|&h| h == horse)
        .map(|idx| (idx as u64 + 1).saturating_mul(multiplier))
}

/// Result of splitting a pot among race winners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// `(player_id, amount)` in the order winners were given
    pub payouts: Vec<(u32, u64)>,
    /// Remainder of the floor division, paid to no one
    pub leftover: u64,
}

/// Splits `pot` among winners in proportion to the winning cards they held.
///
/// Each card earns `pot / total_cards` (floor). The remainder is not paid out
/// and is reported as `leftover`.
///
/// # Arguments
///
/// * `pot` - Tokens in the pot at the moment the horse wins
/// * `winners` - `(player_id, cards_held)` for every winner
///
/// # Returns
///
/// A [`Distribution`] whose payouts plus leftover equal `pot`. With an empty
/// pot or no winning cards, payouts are empty and the whole pot is leftover.
///
/// # Examples
///
/// ```
/// use stablerace_engine::rules::distribute_pot;
///
/// let d = distribute_pot(10, &[(1, 1), (2, 2)]);
/// assert_eq!(d.payouts, vec![(1, 3), (2, 6)]);
/// assert_eq!(d.leftover, 1);
///
/// let nobody = distribute_pot(25, &[]);
/// assert!(nobody.payouts.is_empty());
/// assert_eq!(nobody.leftover, 25);
/// ```
pub fn distribute_pot(pot: u64, winners: &[(u32, u32)]) -> Distribution {
    let total_cards: u64 = winners.iter().map(|&(_, n)| u64::from(n)).sum();
    if total_cards == 0 || pot == 0 {
        return Distribution {
            payouts: Vec::new(),
            leftover: pot,
        };
    }
    let share = pot / total_cards;
    let payouts: Vec<(u32, u64)> = winners
        .iter()
        .map(|&(id, n)| (id, share * u64::from(n)))
        .collect();
    let distributed: u64 = payouts.iter().map(|&(_, amt)| amt).sum();
    Distribution {
        payouts,
        leftover: pot - distributed,
    }
}
