//! Pseudorandom streams consumed by the engine.
//!
//! The engine draws every random decision (shuffles and dice) from a single
//! [`RandomSource`]. Seeded engines use [`Mulberry32`], whose output order is
//! fixed so traces recorded with one seed replay identically. Unseeded engines
//! draw from ChaCha20 seeded from OS entropy.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// A stream of floats in `[0, 1)`.
pub trait RandomSource: std::fmt::Debug {
    fn next_f64(&mut self) -> f64;
}

/// 32-bit multiplicative-hash generator.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Seeds wider than 32 bits are reduced modulo 2^32. A negative seed `-n`
    /// maps to `2^32 - n`, matching its two's-complement low word.
    pub fn new(seed: u64) -> Self {
        Self { state: seed as u32 }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RandomSource for Mulberry32 {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Adapter exposing any `rand` generator as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: RngCore + std::fmt::Debug> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Intended for tests that need to force particular rolls or shuffles.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.position % self.values.len()];
        self.position += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Source selected by configuration: [`Mulberry32`] when seeded, entropy-seeded
/// ChaCha20 otherwise.
pub fn from_seed(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(s) => Box::new(Mulberry32::new(s)),
        None => Box::new(RngSource(ChaCha20Rng::seed_from_u64(rand::random()))),
    }
}
