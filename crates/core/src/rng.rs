//! RNG module - randomizer for food placement and the entropy sources seeding it
//!
//! The randomizer is a 16-bit Galois LFSR (taps `0xB400`, maximal period), cheap
//! enough for a microcontroller. Its seed comes from an [`EntropySource`]:
//! [`ThreadEntropy`] on a desktop, or [`SimpleRng`] when a reproducible session is
//! wanted (same seed, same food sequence).

/// Pseudo-random integer source used by the food manager.
pub trait Randomizer {
    fn next_random(&mut self) -> u32;

    /// Pull a fresh seed from the entropy source.
    fn reseed(&mut self);
}

impl<R: Randomizer + ?Sized> Randomizer for &mut R {
    fn next_random(&mut self) -> u32 {
        (**self).next_random()
    }

    fn reseed(&mut self) {
        (**self).reseed()
    }
}

/// Supplier of raw seed material.
pub trait EntropySource {
    fn sample(&mut self) -> u16;
}

impl<E: EntropySource + ?Sized> EntropySource for Box<E> {
    fn sample(&mut self) -> u16 {
        (**self).sample()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl EntropySource for SimpleRng {
    fn sample(&mut self) -> u16 {
        // High bits of an LCG are the well-mixed ones.
        (self.next_u32() >> 16) as u16
    }
}

/// Entropy from the thread-local OS-seeded generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn sample(&mut self) -> u16 {
        rand::random::<u16>()
    }
}

const LFSR_TAPS: u16 = 0xB400;
const LFSR_FALLBACK_SEED: u16 = 0xACE1;

/// 16-bit Galois LFSR randomizer.
#[derive(Debug, Clone)]
pub struct Lfsr16<E> {
    state: u16,
    entropy: E,
    reseeds: u32,
}

impl<E: EntropySource> Lfsr16<E> {
    /// Seed immediately from `entropy`.
    pub fn new(mut entropy: E) -> Self {
        let state = Self::condition(entropy.sample());
        Self {
            state,
            entropy,
            reseeds: 0,
        }
    }

    /// Current register value.
    pub fn state(&self) -> u16 {
        self.state
    }

    /// Number of reseeds since construction.
    pub fn reseeds(&self) -> u32 {
        self.reseeds
    }

    /// Raise a raw sample into the upper half of the register range.
    ///
    /// An all-zero register would lock the LFSR, so zero falls back to a fixed seed.
    fn condition(sample: u16) -> u16 {
        if sample == 0 {
            return LFSR_FALLBACK_SEED;
        }
        let mut seed = sample;
        while seed < 0x8000 {
            seed <<= 1;
        }
        seed
    }
}

impl<E: EntropySource> Randomizer for Lfsr16<E> {
    fn next_random(&mut self) -> u32 {
        let lsb = self.state & 1;
        self.state >>= 1;
        if lsb == 1 {
            self.state ^= LFSR_TAPS;
        }
        self.state as u32
    }

    fn reseed(&mut self) {
        self.state = Self::condition(self.entropy.sample());
        self.reseeds = self.reseeds.wrapping_add(1);
    }
}
