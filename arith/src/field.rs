use std::{
    fmt::Debug,
    iter::{Product, Sum},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use rand::RngCore;

/// Field definitions.
pub trait Field:
    Copy
    + Clone
    + Debug
    + Default
    + PartialEq
    + Eq
    + From<u64>
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Sum
    + Product
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> Sum<&'a Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
{
    /// name
    const NAME: &'static str;

    /// zero
    const ZERO: Self;

    /// One
    const ONE: Self;

    // ====================================
    // constants
    // ====================================
    /// Zero element
    fn zero() -> Self {
        Self::ZERO
    }

    /// Is zero
    #[inline(always)]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Identity element
    fn one() -> Self {
        Self::ONE
    }

    // ====================================
    // generators
    // ====================================
    /// create a random element from rng.
    /// test only -- the output may not be uniformly random.
    fn random_unsafe(rng: impl RngCore) -> Self;

    // ====================================
    // arithmetics
    // ====================================
    /// Squaring
    #[inline(always)]
    fn square(&self) -> Self {
        *self * *self
    }

    /// Doubling
    #[inline(always)]
    fn double(&self) -> Self {
        *self + *self
    }

    /// find the inverse of the element; return None if not exist
    fn inv(&self) -> Option<Self>;
}

/// A prime field that can be viewed as canonical 256-bit integers.
///
/// Circuit gadgets that reason about the integer value of a field element go through this trait.
pub trait FieldForECC: Field {
    /// The field modulus.
    const MODULUS: ethnum::U256;

    /// Bit length of the modulus, i.e. the number of bits of a canonical element.
    const MODULUS_BITS: usize;

    /// Reduce a 256-bit integer into the field.
    fn from_u256(x: ethnum::U256) -> Self;

    /// The canonical representative, strictly below `MODULUS`.
    fn to_u256(&self) -> ethnum::U256;

    /// Number of bytes needed to carry any canonical element.
    #[inline(always)]
    fn modulus_bytes() -> usize {
        (Self::MODULUS_BITS + 7) / 8
    }
}
