//! The Skyscraper permutation over the BN254 scalar field.
//!
//! The state is a pair `(l, r)` of field elements. Each of the ten rounds maps
//! `(l, r) -> (r + f(l) + c, l)` where `f` is either [`square`](Skyscraper::square),
//! `x -> sigma * x^2`, or [`bar`](Skyscraper::bar), which swaps the two 128-bit halves of the
//! canonical byte representation of `x` and runs every byte through an 8-bit S-box.

use arith::{BN254Fr, FieldForECC};
use ethnum::U256;

use crate::{HasherError, HasherResult};

mod gadget;
pub use gadget::{Skyscraper, SkyscraperPermutation};

mod native;
pub use native::SkyscraperNative;

pub(crate) const ROUND_CONSTANTS: [U256; 8] = [
    U256([0x873125f708a7d269903c4324270bd744, 0x276b1823ea6d7667081dd27906c83855]),
    U256([0xe29d79f3d99e2cb77ac8edbb4b378d71, 0x0cf02bd758a484a6751417914c1a5a18]),
    U256([0x1c3f8e297cca387dfa7adc6769e5bc36, 0x25b0e03f18ede5440eb7730d63481db0]),
    U256([0x33440b966887340457847e652f03cfb7, 0x002882fcbe14ae70955a32e849af80bc]),
    U256([0x29989c3e1b37d3c1979231396257d4d7, 0x039ad8571e2b7a9c12ef02b47f1277ba]),
    U256([0xa72a6bc5e6ba2d2bb5b48465abbb7887, 0x1142d5410fc1fc1a4cd48043712f7b29]),
    U256([0x17cb3594047999b27ab2c156059075d3, 0x1d78439f69bc0bec44f2c93598f289f7]),
    U256([0x36ef35a3d55c48b105d7a965138b8edb, 0x258588a508f4ff828ddfb8a1ac6f1628]),
];

pub(crate) const SIGMA: U256 = U256([
    0x090ef5a9e111ec87dc5ba0056db1194e,
    0x15ebf95182c5551cc8260de4aeb85d5d,
]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundFunction {
    Square,
    Bar,
}

/// Round function and round constant index of each of the ten rounds.
pub(crate) const ROUNDS: [(RoundFunction, Option<usize>); 10] = [
    (RoundFunction::Square, None),
    (RoundFunction::Square, Some(0)),
    (RoundFunction::Bar, Some(1)),
    (RoundFunction::Bar, Some(2)),
    (RoundFunction::Square, Some(3)),
    (RoundFunction::Square, Some(4)),
    (RoundFunction::Bar, Some(5)),
    (RoundFunction::Bar, Some(6)),
    (RoundFunction::Square, Some(7)),
    (RoundFunction::Square, None),
];

/// `rotl(b ^ (rotl(!b, 1) & rotl(b, 2) & rotl(b, 3)), 1)`
#[inline]
pub fn sbox_byte(b: u8) -> u8 {
    let x = (!b).rotate_left(1);
    let y = b.rotate_left(2);
    let z = b.rotate_left(3);
    (b ^ (x & y & z)).rotate_left(1)
}

/// The S-box applied to each byte of a `word_bits`-bit word.
#[inline]
pub fn sbox_word(word: u64, word_bits: usize) -> u64 {
    (0..word_bits / 8).fold(0, |acc, i| {
        let byte = ((word >> (8 * i)) & 0xff) as u8;
        acc | ((sbox_byte(byte) as u64) << (8 * i))
    })
}

pub(crate) fn check_field<F: FieldForECC>() -> HasherResult<()> {
    if F::MODULUS != <BN254Fr as FieldForECC>::MODULUS {
        return Err(HasherError::UnsupportedField {
            field: F::NAME,
            what: "skyscraper constants",
        });
    }
    Ok(())
}

pub(crate) fn round_constants<F: FieldForECC>() -> [F; 8] {
    ROUND_CONSTANTS.map(F::from_u256)
}
