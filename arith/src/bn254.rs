use ethnum::U256;
use halo2curves::ff::{Field as Halo2Field, PrimeField};
use rand::RngCore;

use crate::{Field, FieldForECC};

pub use halo2curves::bn256::Fr as BN254Fr;
use halo2curves::bn256::Fr;

const MODULUS: U256 = U256([
    0x2833e84879b9709143e1f593f0000001,
    0x30644e72e131a029b85045b68181585d,
]);

impl Field for Fr {
    /// name
    const NAME: &'static str = "bn254 scalar field";

    /// zero
    const ZERO: Self = <Fr as Halo2Field>::ZERO;

    /// One
    const ONE: Self = <Fr as Halo2Field>::ONE;

    // ====================================
    // generators
    // ====================================
    /// create a random element from rng.
    /// test only -- the output may not be uniformly random.
    #[inline(always)]
    fn random_unsafe(rng: impl RngCore) -> Self {
        <Fr as Halo2Field>::random(rng)
    }

    /// find the inverse of the element; return None if not exist
    #[inline(always)]
    fn inv(&self) -> Option<Self> {
        self.invert().into()
    }
}

impl FieldForECC for Fr {
    const MODULUS: U256 = MODULUS;

    const MODULUS_BITS: usize = 254;

    fn from_u256(x: U256) -> Self {
        let (hi, lo) = x.into_words();
        let two_pow_128 = Fr::from_u128(u128::MAX) + <Fr as Halo2Field>::ONE;
        Fr::from_u128(hi) * two_pow_128 + Fr::from_u128(lo)
    }

    fn to_u256(&self) -> U256 {
        // the halo2curves representation is little-endian
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(self.to_repr().as_ref());
        U256::from_le_bytes(bytes)
    }
}
