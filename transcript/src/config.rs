use std::{fmt, str::FromStr};

use crate::TranscriptError;

/// The permutation the transcript sponge runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermutationType {
    /// keccak-f[1600] over constrained bytes, read with the byte-grained reader
    #[default]
    Keccak,
    /// Skyscraper over BN254 Fr, read with the field-grained reader
    Skyscraper,
}

impl fmt::Display for PermutationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermutationType::Keccak => write!(f, "keccak"),
            PermutationType::Skyscraper => write!(f, "skyscraper"),
        }
    }
}

impl FromStr for PermutationType {
    type Err = TranscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keccak" | "keccak-f1600" => Ok(PermutationType::Keccak),
            "skyscraper" => Ok(PermutationType::Skyscraper),
            _ => Err(TranscriptError::UnknownPermutation(s.to_string())),
        }
    }
}

/// Where the session tag is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagDerivation {
    /// Off-circuit; the tag enters the circuit as 32 constant bytes.
    #[default]
    Native,
    /// With the keccak gadget. Same tag, paid for in constraints.
    InCircuit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptConfig {
    pub permutation: PermutationType,
    pub tag_derivation: TagDerivation,
    /// Word size of the Skyscraper S-box lookups, 8 or 16.
    pub skyscraper_word_bits: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self::keccak()
    }
}

impl TranscriptConfig {
    pub fn keccak() -> Self {
        Self {
            permutation: PermutationType::Keccak,
            tag_derivation: TagDerivation::Native,
            skyscraper_word_bits: 8,
        }
    }

    pub fn skyscraper(word_bits: usize) -> Self {
        Self {
            permutation: PermutationType::Skyscraper,
            tag_derivation: TagDerivation::Native,
            skyscraper_word_bits: word_bits,
        }
    }

    pub fn with_permutation(mut self, permutation: PermutationType) -> Self {
        self.permutation = permutation;
        self
    }

    pub fn with_tag_derivation(mut self, tag_derivation: TagDerivation) -> Self {
        self.tag_derivation = tag_derivation;
        self
    }

    pub fn with_skyscraper_word_bits(mut self, word_bits: usize) -> Self {
        self.skyscraper_word_bits = word_bits;
        self
    }
}
