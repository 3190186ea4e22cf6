//! Run seeds and the deterministic random streams derived from them.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// An opaque seed string, the sole source of entropy for a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed(String);

impl Seed {
    /// Wrap an existing seed string.
    pub fn new(seed: impl Into<String>) -> Self {
        Self(seed.into())
    }

    /// A fresh eight-hex-digit seed from the thread-local generator.
    pub fn random() -> Self {
        let n: u32 = rand::rng().random();
        Self(format!("{n:08x}"))
    }

    /// The seed text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary stream, used once per world generation.
    pub fn rng(&self) -> StdRng {
        rng_from(self.0.as_bytes())
    }

    /// An independent stream for a named purpose (`"explore"`, `"chatter"`).
    ///
    /// Draws from one stream never shift the draws of another, so adding
    /// small talk cannot change which scenes exploration produces.
    pub fn stream(&self, label: &str) -> StdRng {
        rng_from(format!("{}/{label}", self.0).as_bytes())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

fn rng_from(bytes: &[u8]) -> StdRng {
    let digest = Sha256::digest(bytes);
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    StdRng::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let a: Vec<u64> = Seed::new("oak").rng().random_iter().take(4).collect();
        let b: Vec<u64> = Seed::new("oak").rng().random_iter().take(4).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a: u64 = Seed::new("oak").rng().random();
        let b: u64 = Seed::new("ash").rng().random();
        assert_ne!(a, b);
    }

    #[test]
    fn named_streams_are_independent() {
        let seed = Seed::new("oak");
        let main: u64 = seed.rng().random();
        let explore: u64 = seed.stream("explore").random();
        let chatter: u64 = seed.stream("chatter").random();
        assert_ne!(main, explore);
        assert_ne!(explore, chatter);
        assert_eq!(explore, seed.stream("explore").random::<u64>());
    }

    #[test]
    fn random_seeds_are_eight_hex_digits() {
        let seed = Seed::random();
        assert_eq!(seed.as_str().len(), 8);
        assert!(seed.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
