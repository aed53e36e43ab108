//! Random number generation for map generation
//!
//! Uses a seeded ChaCha RNG so that a seed always reproduces the same map.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Seed as supplied by the caller: free text or a raw number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    /// Numeric value fed to the RNG.
    ///
    /// Text seeds are hashed with 64-bit FNV-1a, which unlike `std`'s hasher is
    /// stable across platforms and compiler versions.
    pub fn value(&self) -> u64 {
        match self {
            Seed::Number(n) => *n,
            Seed::Text(text) => hash_seed_text(text),
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Text(String::new())
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Number(n)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seed::Number(n) => write!(f, "{n}"),
            Seed::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// 64-bit FNV-1a over the UTF-8 bytes of `text`.
pub fn hash_seed_text(text: &str) -> u64 {
    text.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Map generation random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
#[derive(Debug, Clone)]
pub struct MapRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl MapRng {
    /// Create a new RNG with the given numeric seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG from a caller-supplied seed
    pub fn from_seed(seed: &Seed) -> Self {
        Self::new(seed.value())
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform draw in [0, 100)
    pub fn roll_percent(&mut self) -> u32 {
        self.rn2(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rn2_bounds() {
        let mut rng = MapRng::new(42);
        for _ in 0..1000 {
            assert!(rng.rn2(10) < 10);
        }
    }

    #[test]
    fn test_roll_percent_bounds() {
        let mut rng = MapRng::new(7);
        for _ in 0..1000 {
            assert!(rng.roll_percent() < 100);
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = MapRng::from_seed(&Seed::from("test"));
        let mut rng2 = MapRng::from_seed(&Seed::from("test"));

        for _ in 0..100 {
            assert_eq!(rng1.rn2(100), rng2.rn2(100));
        }
    }

    #[test]
    fn test_zero_input() {
        let mut rng = MapRng::new(42);
        assert_eq!(rng.rn2(0), 0);
    }

    #[test]
    fn test_fnv_known_values() {
        // Reference vectors for 64-bit FNV-1a
        assert_eq!(hash_seed_text(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(hash_seed_text("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_text_seeds_differ() {
        assert_ne!(Seed::from("test").value(), Seed::from("test2").value());
        assert_eq!(Seed::from(99u64).value(), 99);
    }

    #[test]
    fn test_seed_deserializes_untagged() {
        let n: Seed = serde_json::from_str("12").unwrap();
        assert_eq!(n, Seed::Number(12));
        let t: Seed = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(t, Seed::Text("abc".to_string()));
    }
}
