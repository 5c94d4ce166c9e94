//! Permutations and the duplex sponge built on them.

mod errors;
pub use errors::{HasherError, HasherResult};

mod traits;
pub use traits::{Permutation, Unit};

mod sponge;
pub use sponge::DuplexSponge;

pub mod keccak;
pub use keccak::{KeccakPermutation, NativeKeccakSponge};

pub mod skyscraper;
pub use skyscraper::{Skyscraper, SkyscraperNative, SkyscraperPermutation};

#[cfg(test)]
mod tests;
