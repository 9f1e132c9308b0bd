//! ISAAC64 random number generator
//!
//! Bob Jenkins' ISAAC64: a 256-word working pool `m`, a 256-word result
//! block `r`, and three accumulators. Results are consumed from the end of
//! the block downwards; when the block is exhausted the whole pool is
//! stirred again and a fresh block is produced.
//!
//! Indirection uses the low 8 bits of a word (`m[x & 255]`) and the next 8
//! bits of the new pool value (`m[(y >> 8) & 255]`).

use num_bigint::BigUint;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::trace;

use crate::bits::BitOrder;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::{WordGenerator, fill_bytes_from_words};

/// Size of the ISAAC64 state arrays (2^8 = 256)
const ISAAC64_SZ_LOG: usize = 8;
pub const ISAAC64_SZ: usize = 1 << ISAAC64_SZ_LOG;
const HALF: usize = ISAAC64_SZ / 2;

/// Golden ratio, the starting value of every scratch accumulator.
const GOLDEN_RATIO: u64 = 0x9E37_79B9_7F4A_7C13;

/// ISAAC64 generator state
#[derive(Clone)]
pub struct Isaac64 {
    /// Results buffer - random values to be consumed
    r: Vec<u64>,
    /// Memory state
    m: Vec<u64>,
    /// Accumulator
    a: u64,
    /// Previous result
    b: u64,
    /// Counter, bumped once per block
    c: u64,
    /// Number of results remaining (counts down from 256)
    n: usize,
}

impl core::fmt::Debug for Isaac64 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Isaac64")
            .field("a", &self.a)
            .field("b", &self.b)
            .field("c", &self.c)
            .field("n", &self.n)
            .finish()
    }
}

impl Isaac64 {
    /// Create a generator from a seed of exactly 256 words.
    ///
    /// An empty seed means "no seed": 256 words are drawn from the OS
    /// entropy source instead.
    pub fn new(seed: &[u64]) -> Result<Self, RngError> {
        if seed.is_empty() {
            return Ok(Self::from_entropy());
        }
        let seed: &[u64; ISAAC64_SZ] = seed.try_into().map_err(|_| RngError::SeedLength {
            expected: ISAAC64_SZ,
            found: seed.len(),
        })?;
        Ok(Self::from_seed(seed))
    }

    /// Create a generator from a full 256-word seed.
    pub fn from_seed(seed: &[u64; ISAAC64_SZ]) -> Self {
        let mut ctx = Self {
            r: seed.to_vec(),
            m: vec![0; ISAAC64_SZ],
            a: 0,
            b: 0,
            c: 0,
            n: 0,
        };
        ctx.init();
        ctx
    }

    /// Create a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::from_entropy_source(&mut OsRng)
    }

    /// Create a generator seeded with 256 words pulled from `source`.
    pub fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Self {
        let mut seed = [0u64; ISAAC64_SZ];
        for (slot, word) in seed.iter_mut().zip(source.words(ISAAC64_SZ)) {
            *slot = word;
        }
        Self::from_seed(&seed)
    }

    /// Scatter the seed held in `r` through the pool (randinit).
    fn init(&mut self) {
        let mut x = [GOLDEN_RATIO; 8];

        // Push the accumulators away from the all-equal starting point
        for _ in 0..4 {
            Self::mix(&mut x);
        }

        // First pass folds the seed in, second pass folds the first pass in
        for i in (0..ISAAC64_SZ).step_by(8) {
            for j in 0..8 {
                x[j] = x[j].wrapping_add(self.r[i + j]);
            }
            Self::mix(&mut x);
            self.m[i..i + 8].copy_from_slice(&x);
        }
        for i in (0..ISAAC64_SZ).step_by(8) {
            for j in 0..8 {
                x[j] = x[j].wrapping_add(self.m[i + j]);
            }
            Self::mix(&mut x);
            self.m[i..i + 8].copy_from_slice(&x);
        }

        self.update();
    }

    /// Scramble eight words with subtract / shift-xor / add rounds.
    ///
    /// The shift amounts and operand order must not change: they are what
    /// gives the generator its avalanche behaviour.
    #[rustfmt::skip]
    fn mix(x: &mut [u64; 8]) {
        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *x;

        a = a.wrapping_sub(e); f ^= h >> 9;  h = h.wrapping_add(a);
        b = b.wrapping_sub(f); g ^= a << 9;  a = a.wrapping_add(b);
        c = c.wrapping_sub(g); h ^= b >> 23; b = b.wrapping_add(c);
        d = d.wrapping_sub(h); a ^= c << 15; c = c.wrapping_add(d);
        e = e.wrapping_sub(a); b ^= d >> 14; d = d.wrapping_add(e);
        f = f.wrapping_sub(b); c ^= e << 20; e = e.wrapping_add(f);
        g = g.wrapping_sub(c); d ^= f >> 17; f = f.wrapping_add(g);
        h = h.wrapping_sub(d); e ^= g << 14; g = g.wrapping_add(h);

        *x = [a, b, c, d, e, f, g, h];
    }

    #[inline]
    fn ind(&self, x: u64) -> u64 {
        self.m[(x as usize) & (ISAAC64_SZ - 1)]
    }

    /// One pool step at index `i`, pairing with `i2` in the other half.
    #[inline]
    fn step(&mut self, mixed: u64, i: usize, i2: usize, a: &mut u64, b: &mut u64) {
        let x = self.m[i];
        *a = mixed.wrapping_add(self.m[i2]);
        let y = self.ind(x).wrapping_add(*a).wrapping_add(*b);
        self.m[i] = y;
        *b = self.ind(y >> ISAAC64_SZ_LOG).wrapping_add(x);
        self.r[i] = *b;
    }

    /// Generate 256 new results (block regeneration)
    fn update(&mut self) {
        let mut a = self.a;
        self.c = self.c.wrapping_add(1);
        let mut b = self.b.wrapping_add(self.c);

        for base in (0..ISAAC64_SZ).step_by(4) {
            let pair = (base + HALF) % ISAAC64_SZ;
            self.step(!(a ^ (a << 21)), base, pair, &mut a, &mut b);
            self.step(a ^ (a >> 5), base + 1, pair + 1, &mut a, &mut b);
            self.step(a ^ (a << 12), base + 2, pair + 2, &mut a, &mut b);
            self.step(a ^ (a >> 33), base + 3, pair + 3, &mut a, &mut b);
        }

        self.a = a;
        self.b = b;
        self.n = ISAAC64_SZ;
        trace!(block = self.c, "isaac64 block regenerated");
    }

    /// Get the next random u64
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        if self.n == 0 {
            self.update();
        }
        self.n -= 1;
        self.r[self.n]
    }

    /// Returns a value in `[0, 2^bits)`, high bits of each word first.
    pub fn randbits(&mut self, bits: u64) -> BigUint {
        WordGenerator::randbits(self, bits)
    }

    /// Results left in the current block before the next regeneration.
    pub fn remaining(&self) -> usize {
        self.n
    }

    /// Number of blocks generated so far, including the one from seeding.
    pub fn regenerations(&self) -> u64 {
        self.c
    }

    /// The full current result block, in storage order.
    pub fn block(&self) -> &[u64] {
        &self.r
    }
}

impl WordGenerator for Isaac64 {
    fn next_word(&mut self) -> u64 {
        self.next_u64()
    }

    fn bit_order(&self) -> BitOrder {
        BitOrder::HighFirst
    }
}

impl RngCore for Isaac64 {
    fn next_u32(&mut self) -> u32 {
        (Isaac64::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        Isaac64::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_from_words(dest, || Isaac64::next_u64(self));
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl Default for Isaac64 {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_seed() -> [u64; ISAAC64_SZ] {
        let mut seed = [0u64; ISAAC64_SZ];
        for (i, s) in seed.iter_mut().enumerate() {
            *s = i as u64;
        }
        seed
    }

    #[test]
    fn test_mix_matches_unrolled_rounds() {
        // Same rounds written as the classic index-rotating loop.
        const SHIFT: [u32; 8] = [9, 9, 23, 15, 14, 20, 17, 14];
        let mut looped = [1u64, 2, 3, 4, 5, 6, 7, 8];
        for i in (0..8).step_by(2) {
            looped[i] = looped[i].wrapping_sub(looped[(i + 4) & 7]);
            looped[(i + 5) & 7] ^= looped[(i + 7) & 7] >> SHIFT[i];
            looped[(i + 7) & 7] = looped[(i + 7) & 7].wrapping_add(looped[i]);

            let i = i + 1;
            looped[i] = looped[i].wrapping_sub(looped[(i + 4) & 7]);
            looped[(i + 5) & 7] ^= looped[(i + 7) & 7] << SHIFT[i];
            looped[(i + 7) & 7] = looped[(i + 7) & 7].wrapping_add(looped[i]);
        }

        let mut unrolled = [1u64, 2, 3, 4, 5, 6, 7, 8];
        Isaac64::mix(&mut unrolled);
        assert_eq!(unrolled, looped);
    }

    #[test]
    fn test_mix_is_not_identity() {
        let mut x = [GOLDEN_RATIO; 8];
        Isaac64::mix(&mut x);
        assert_ne!(x, [GOLDEN_RATIO; 8]);
    }

    #[test]
    fn test_seed_length_rejected() {
        let err = Isaac64::new(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, RngError::SeedLength { expected: 256, found: 3 });

        let long = vec![0u64; 257];
        assert!(matches!(
            Isaac64::new(&long),
            Err(RngError::SeedLength { found: 257, .. })
        ));
    }

    #[test]
    fn test_empty_seed_uses_entropy() {
        let mut rng1 = Isaac64::new(&[]).unwrap();
        let mut rng2 = Isaac64::new(&[]).unwrap();
        let a: Vec<u64> = (0..8).map(|_| rng1.next_u64()).collect();
        let b: Vec<u64> = (0..8).map(|_| rng2.next_u64()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_outputs_served_from_block_end() {
        let mut rng = Isaac64::from_seed(&counting_seed());
        let block = rng.block().to_vec();
        assert_eq!(rng.remaining(), ISAAC64_SZ);
        assert_eq!(rng.next_u64(), block[ISAAC64_SZ - 1]);
        assert_eq!(rng.next_u64(), block[ISAAC64_SZ - 2]);
        assert_eq!(rng.remaining(), ISAAC64_SZ - 2);
    }

    #[test]
    fn test_regeneration_exactly_at_exhaustion() {
        let mut rng = Isaac64::from_seed(&counting_seed());
        assert_eq!(rng.regenerations(), 1);

        for _ in 0..ISAAC64_SZ {
            rng.next_u64();
        }
        assert_eq!(rng.remaining(), 0);
        assert_eq!(rng.regenerations(), 1);

        let first_block = rng.block().to_vec();
        rng.next_u64();
        assert_eq!(rng.regenerations(), 2);
        assert_eq!(rng.remaining(), ISAAC64_SZ - 1);
        assert_ne!(rng.block(), &first_block[..]);
    }

    #[test]
    fn test_zero_seed_is_not_degenerate() {
        let mut rng = Isaac64::from_seed(&[0; ISAAC64_SZ]);
        let values: Vec<u64> = (0..512).map(|_| rng.next_u64()).collect();
        assert!(values.iter().any(|&v| v != 0));
        let mut dedup = values.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), values.len());
    }

    #[test]
    fn test_rngcore_matches_inherent() {
        let mut a = Isaac64::from_seed(&counting_seed());
        let mut b = Isaac64::from_seed(&counting_seed());
        assert_eq!(RngCore::next_u64(&mut a), b.next_u64());
        assert_eq!(a.next_u32(), (b.next_u64() >> 32) as u32);
    }
}
