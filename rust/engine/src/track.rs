//! The race track: how many steps each horse needs to win.

use std::collections::BTreeMap;

/// `(horse, steps)` for every possible two-dice sum.
pub const TRACK: [(u8, u32); 11] = [
    (2, 3),
    (3, 6),
    (4, 8),
    (5, 11),
    (6, 14),
    (7, 17),
    (8, 14),
    (9, 11),
    (10, 8),
    (11, 6),
    (12, 3),
];

pub const HORSES: std::ops::RangeInclusive<u8> = 2..=12;

pub fn required_steps(horse: u8) -> Option<u32> {
    TRACK.iter().find(|(h, _)| *h == horse).map(|(_, s)| *s)
}

/// Owned copy of the track table.
pub fn board() -> BTreeMap<u8, u32> {
    TRACK.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_is_symmetric_around_seven() {
        for h in HORSES {
            assert_eq!(required_steps(h), required_steps(14 - h));
        }
        assert_eq!(required_steps(7), Some(17));
        assert_eq!(required_steps(1), None);
    }

    #[test]
    fn board_covers_every_horse() {
        let b = board();
        assert_eq!(b.len(), 11);
        assert_eq!(b.keys().copied().collect::<Vec<_>>(), HORSES.collect::<Vec<_>>());
    }
}
