use std::array;

use arith::FieldForECC;
use circuit::{
    gadgets::compose_le, CircuitEngine, CircuitError, CircuitResult, HintId, Variable, U8,
};
use ethnum::U256;

use super::{KECCAK_RATE, KECCAK_WIDTH, ROTATION_OFFSETS, ROUND_CONSTANTS};
use crate::{HasherResult, Permutation};

pub const BYTE_BITS_HINT: &str = "keccak_byte_bits";

/// A 64-bit lane, least significant bit first. Every wire is boolean constrained.
type Lane = [Variable; 64];

fn byte_bits_hint<F: FieldForECC>(inputs: &[F], outputs: &mut [F]) -> CircuitResult<()> {
    if inputs.len() != 1 || outputs.len() != 8 {
        return Err(CircuitError::HintArity {
            name: BYTE_BITS_HINT,
            what: "outputs",
            expected: 8,
            actual: outputs.len(),
        });
    }
    let byte = inputs[0].to_u256();
    for (i, out) in outputs.iter_mut().enumerate() {
        *out = if (byte >> i as u32) & U256::ONE == U256::ONE {
            F::ONE
        } else {
            F::ZERO
        };
    }
    Ok(())
}

/// keccak-f[1600] over 200 constrained bytes.
///
/// Byte `i` of the state is byte `i % 8` of the little-endian lane `i / 8`. The permutation runs
/// on boolean wires: each byte is split into hinted bits that are boolean constrained and
/// recomposed, the 24 rounds use `a ^ b = a + b - 2ab`, and the output bytes are weighted sums of
/// bits, hence in range by construction.
#[derive(Debug, Clone)]
pub struct KeccakPermutation {
    state: Vec<U8>,
    byte_bits: HintId,
}

impl KeccakPermutation {
    pub fn new<A: CircuitEngine>(api: &mut A) -> Self {
        let zero = U8::constant(api, 0);
        Self {
            state: vec![zero; KECCAK_WIDTH],
            byte_bits: api.register_hint(BYTE_BITS_HINT, byte_bits_hint::<A::F>),
        }
    }

    pub fn bytes(&self) -> &[U8] {
        &self.state
    }

    fn to_bits<A: CircuitEngine>(&self, api: &mut A) -> HasherResult<Vec<Variable>> {
        let mut bits = Vec::with_capacity(KECCAK_WIDTH * 8);
        for byte in &self.state {
            let byte_bits = api.new_hint(self.byte_bits, &[byte.val], 8)?;
            byte_bits.iter().for_each(|b| api.assert_is_boolean(*b));
            let recomposed = compose_le(api, &byte_bits, 1);
            api.assert_is_equal(recomposed, byte.val);
            bits.extend(byte_bits);
        }
        Ok(bits)
    }
}

#[inline]
fn xor<A: CircuitEngine>(api: &mut A, a: Variable, b: Variable) -> Variable {
    let ab = api.mul(a, b);
    let two_ab = api.add(ab, ab);
    let sum = api.add(a, b);
    api.sub(sum, two_ab)
}

/// `!a & b`
#[inline]
fn and_not<A: CircuitEngine>(api: &mut A, a: Variable, b: Variable) -> Variable {
    let ab = api.mul(a, b);
    api.sub(b, ab)
}

fn xor_lanes<A: CircuitEngine>(api: &mut A, a: &Lane, b: &Lane) -> Lane {
    array::from_fn(|i| xor(api, a[i], b[i]))
}

#[inline]
fn rotate_left(lane: &Lane, n: usize) -> Lane {
    array::from_fn(|i| lane[(i + 64 - n) % 64])
}

fn keccak_f<A: CircuitEngine>(api: &mut A, a: &mut [Lane; 25]) {
    let one = api.one();
    for rc in ROUND_CONSTANTS {
        // theta
        let c: [Lane; 5] = array::from_fn(|x| {
            let mut acc = a[x];
            for y in 1..5 {
                acc = xor_lanes(api, &acc, &a[x + 5 * y]);
            }
            acc
        });
        let d: [Lane; 5] =
            array::from_fn(|x| xor_lanes(api, &c[(x + 4) % 5], &rotate_left(&c[(x + 1) % 5], 1)));
        for (i, lane) in a.iter_mut().enumerate() {
            *lane = xor_lanes(api, lane, &d[i % 5]);
        }

        // rho and pi
        let mut b = *a;
        for x in 0..5 {
            for y in 0..5 {
                b[y + 5 * ((2 * x + 3 * y) % 5)] =
                    rotate_left(&a[x + 5 * y], ROTATION_OFFSETS[x + 5 * y]);
            }
        }

        // chi
        for y in 0..5 {
            for x in 0..5 {
                a[x + 5 * y] = array::from_fn(|i| {
                    let t = and_not(api, b[(x + 1) % 5 + 5 * y][i], b[(x + 2) % 5 + 5 * y][i]);
                    xor(api, b[x + 5 * y][i], t)
                });
            }
        }

        // iota
        for (i, bit) in a[0].iter_mut().enumerate() {
            if (rc >> i) & 1 == 1 {
                *bit = api.sub(one, *bit);
            }
        }
    }
}

impl<A: CircuitEngine> Permutation<A> for KeccakPermutation {
    const NAME: &'static str = "keccak-f[1600]";

    type Unit = U8;

    const N: usize = KECCAK_WIDTH;

    const R: usize = KECCAK_RATE;

    fn initialize(&mut self, api: &mut A, iv: &[U8; 32]) -> HasherResult<()> {
        let zero = U8::constant(api, 0);
        self.state.iter_mut().for_each(|s| *s = zero);
        self.state[KECCAK_RATE..KECCAK_RATE + 32].copy_from_slice(iv);
        Ok(())
    }

    fn permute(&mut self, api: &mut A) -> HasherResult<()> {
        let bits = self.to_bits(api)?;
        let mut lanes: [Lane; 25] = array::from_fn(|x| array::from_fn(|k| bits[64 * x + k]));

        keccak_f(api, &mut lanes);

        for (i, byte) in self.state.iter_mut().enumerate() {
            let (x, k) = (i / 8, i % 8);
            let val = compose_le(api, &lanes[x][8 * k..8 * k + 8], 1);
            *byte = U8::from_variable_unchecked(val);
        }
        Ok(())
    }

    fn state(&self) -> &[U8] {
        &self.state
    }

    fn state_mut(&mut self) -> &mut [U8] {
        &mut self.state
    }

    fn zeroize(&mut self, api: &mut A, index: usize) {
        self.state[index] = U8::constant(api, 0);
    }
}
