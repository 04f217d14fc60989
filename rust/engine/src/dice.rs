use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Two six-sided dice and their sum, which names the horse.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Roll {
    pub d1: u8,
    pub d2: u8,
    pub sum: u8,
}

fn roll_die(rng: &mut dyn RandomSource) -> u8 {
    ((rng.next_f64() * 6.0) as u8).min(5) + 1
}

/// Draws `d1` then `d2`.
pub fn roll_dice(rng: &mut dyn RandomSource) -> Roll {
    let d1 = roll_die(rng);
    let d2 = roll_die(rng);
    Roll { d1, d2, sum: d1 + d2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;

    #[test]
    fn floors_each_draw_into_a_face() {
        let mut src = SequenceSource::new(vec![0.0, 0.999]);
        let r = roll_dice(&mut src);
        assert_eq!(r, Roll { d1: 1, d2: 6, sum: 7 });
    }

    #[test]
    fn boundaries_between_faces() {
        let mut src = SequenceSource::new(vec![1.0 / 6.0, 0.5]);
        let r = roll_dice(&mut src);
        assert_eq!((r.d1, r.d2), (2, 4));
    }
}
