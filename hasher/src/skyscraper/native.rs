use arith::FieldForECC;
use ethnum::U256;

use super::{check_field, round_constants, sbox_byte, RoundFunction, ROUNDS, SIGMA};
use crate::HasherResult;

/// Skyscraper evaluated directly on field elements.
///
/// Word size does not matter outside the circuit: the 16-bit S-box is the 8-bit one applied to
/// both bytes.
#[derive(Debug, Clone)]
pub struct SkyscraperNative<F: FieldForECC> {
    round_constants: [F; 8],
    sigma: F,
}

impl<F: FieldForECC> SkyscraperNative<F> {
    pub fn new() -> HasherResult<Self> {
        check_field::<F>()?;
        Ok(Self {
            round_constants: round_constants::<F>(),
            sigma: F::from_u256(SIGMA),
        })
    }

    #[inline]
    pub fn square(&self, x: F) -> F {
        x.square() * self.sigma
    }

    pub fn bar(&self, x: F) -> F {
        let mut bytes = x.to_u256().to_be_bytes();
        bytes.rotate_left(16);
        bytes.iter_mut().for_each(|b| *b = sbox_byte(*b));
        F::from_u256(U256::from_be_bytes(bytes))
    }

    pub fn permute(&self, state: &mut [F; 2]) {
        let [mut l, mut r] = *state;
        for (round, rc) in ROUNDS {
            let f = match round {
                RoundFunction::Square => self.square(l),
                RoundFunction::Bar => self.bar(l),
            };
            let mut next = r + f;
            if let Some(i) = rc {
                next += self.round_constants[i];
            }
            r = l;
            l = next;
        }
        *state = [l, r];
    }

    pub fn compress(&self, l: F, r: F) -> F {
        let mut state = [l, r];
        self.permute(&mut state);
        l + state[0]
    }
}
