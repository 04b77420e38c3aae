use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariationMode {
    Random,
    ContentHash,
    Seeded,
}

impl Default for VariationMode {
    fn default() -> Self {
        VariationMode::ContentHash
    }
}

impl VariationMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "random" => Some(VariationMode::Random),
            "content-hash" | "content_hash" | "hash" => Some(VariationMode::ContentHash),
            "seeded" | "seed" => Some(VariationMode::Seeded),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VariationMode::Random => "random",
            VariationMode::ContentHash => "content-hash",
            VariationMode::Seeded => "seeded",
        }
    }
}

pub struct Variation {
    rng: StdRng,
}

impl Variation {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn for_key(key: &str) -> Self {
        Self::seeded(stable_hash64(key))
    }

    pub fn for_mode(mode: VariationMode, seed: u64, key: &str) -> Self {
        match mode {
            VariationMode::Random => Self::from_entropy(),
            VariationMode::ContentHash => Self::for_key(key),
            VariationMode::Seeded => Self::seeded(seed ^ stable_hash64(key)),
        }
    }

    pub fn uniform(&mut self, (low, high): (f64, f64)) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

fn stable_hash64(value: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_reproduces_draws() {
        let mut first = Variation::for_key("content-1");
        let mut second = Variation::for_key("content-1");
        for _ in 0..5 {
            assert_eq!(first.uniform((0.0, 1.0)), second.uniform((0.0, 1.0)));
        }
    }

    #[test]
    fn seeded_mode_mixes_seed_with_key() {
        let draw = |seed: u64, key: &str| {
            Variation::for_mode(VariationMode::Seeded, seed, key).uniform((0.0, 1.0))
        };
        let expected = Variation::seeded(7 ^ stable_hash64("analysis:a")).uniform((0.0, 1.0));

        assert_eq!(draw(7, "analysis:a"), expected);
        assert_ne!(draw(7, "analysis:a"), draw(7, "analysis:b"));
        assert_ne!(draw(7, "analysis:a"), draw(8, "analysis:a"));
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut variation = Variation::from_entropy();
        for _ in 0..200 {
            let value = variation.uniform((6.0, 9.0));
            assert!((6.0..=9.0).contains(&value));
        }
        assert_eq!(variation.uniform((2.0, 2.0)), 2.0);
    }

    #[test]
    fn pick_empty_is_none() {
        let mut variation = Variation::seeded(7);
        let empty: [&str; 0] = [];
        assert!(variation.pick(&empty).is_none());
        assert_eq!(variation.pick(&["only"]), Some(&"only"));
    }

    #[test]
    fn mode_parse_accepts_aliases() {
        assert_eq!(VariationMode::parse("Content_Hash"), Some(VariationMode::ContentHash));
        assert_eq!(VariationMode::parse("random"), Some(VariationMode::Random));
        assert_eq!(VariationMode::parse("nope"), None);
    }
}
