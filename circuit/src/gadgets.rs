//! Decomposition gadgets over the native field.
//!
//! A canonical decomposition of `x` is the unique sequence of words whose big-endian
//! recomposition, read as an integer, equals the canonical representative of `x` (strictly below
//! the modulus). Recomposition alone only pins the words modulo `p`; the modulus comparison is what
//! rules out the representations of `x + p`, `x + 2p`, ...

use arith::FieldForECC;
use ethnum::U256;

use crate::{CircuitEngine, CircuitError, CircuitResult, HintId, Variable};

pub const WORDS_BE_HINT: &str = "words_be";
pub const GT_HINT: &str = "gt";

/// Total bit width covered by a decomposition.
const DECOMPOSITION_BITS: usize = 256;

const HALF_BITS: usize = 128;

/// Hint: big-endian words of the canonical value of `inputs[0]`.
///
/// The word size is `256 / outputs.len()` bits.
pub fn words_be_hint<F: FieldForECC>(inputs: &[F], outputs: &mut [F]) -> CircuitResult<()> {
    if inputs.len() != 1 {
        return Err(CircuitError::HintArity {
            name: WORDS_BE_HINT,
            what: "inputs",
            expected: 1,
            actual: inputs.len(),
        });
    }
    let n_words = outputs.len();
    if n_words == 0 || DECOMPOSITION_BITS % n_words != 0 {
        return Err(CircuitError::HintFailed {
            name: WORDS_BE_HINT,
            reason: format!("{n_words} words do not tile {DECOMPOSITION_BITS} bits"),
        });
    }
    let word_bits = DECOMPOSITION_BITS / n_words;
    let mask = (U256::ONE << word_bits as u32) - U256::ONE;

    let mut x = inputs[0].to_u256();
    for out in outputs.iter_mut().rev() {
        *out = F::from_u256(x & mask);
        x = x >> word_bits as u32;
    }
    Ok(())
}

/// Hint: `1` if the canonical value of `inputs[0]` exceeds that of `inputs[1]`, else `0`.
pub fn gt_hint<F: FieldForECC>(inputs: &[F], outputs: &mut [F]) -> CircuitResult<()> {
    if inputs.len() != 2 || outputs.len() != 1 {
        return Err(CircuitError::HintArity {
            name: GT_HINT,
            what: "inputs and 1 output",
            expected: 2,
            actual: inputs.len(),
        });
    }
    outputs[0] = if inputs[0].to_u256() > inputs[1].to_u256() {
        F::ONE
    } else {
        F::ZERO
    };
    Ok(())
}

#[inline]
fn radix<F: FieldForECC>(word_bits: usize) -> F {
    F::from_u256(U256::ONE << word_bits as u32)
}

/// `Σ words[i] · 2^(w·(n-1-i))`, i.e. the most significant word first.
pub fn compose_be<A: CircuitEngine>(api: &mut A, words: &[Variable], word_bits: usize) -> Variable {
    let radix = radix::<A::F>(word_bits);
    let mut acc = api.zero();
    for word in words {
        acc = api.mul_const(acc, radix);
        acc = api.add(acc, *word);
    }
    acc
}

/// `Σ words[i] · 2^(w·i)`, i.e. the least significant word first.
pub fn compose_le<A: CircuitEngine>(api: &mut A, words: &[Variable], word_bits: usize) -> Variable {
    let radix = radix::<A::F>(word_bits);
    let mut acc = api.zero();
    for word in words.iter().rev() {
        acc = api.mul_const(acc, radix);
        acc = api.add(acc, *word);
    }
    acc
}

/// Canonical big-endian decomposition into `256 / word_bits` words.
///
/// The words are not range checked here. Callers either feed them into a lookup (which range
/// checks its index) or constrain them themselves.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalDecomposer {
    word_bits: usize,
    words_hint: HintId,
    gt_hint: HintId,
}

impl CanonicalDecomposer {
    pub fn new<A: CircuitEngine>(api: &mut A, word_bits: usize) -> CircuitResult<Self> {
        if word_bits == 0 || word_bits > 32 || HALF_BITS % word_bits != 0 {
            return Err(CircuitError::UnsupportedWordSize(word_bits));
        }
        Ok(Self {
            word_bits,
            words_hint: api.register_hint(WORDS_BE_HINT, words_be_hint::<A::F>),
            gt_hint: api.register_hint(GT_HINT, gt_hint::<A::F>),
        })
    }

    #[inline]
    pub fn word_bits(&self) -> usize {
        self.word_bits
    }

    #[inline]
    pub fn n_words(&self) -> usize {
        DECOMPOSITION_BITS / self.word_bits
    }

    /// Decompose `x` into its canonical big-endian words.
    pub fn decompose<A: CircuitEngine>(
        &self,
        api: &mut A,
        x: Variable,
    ) -> CircuitResult<Vec<Variable>> {
        let n = self.n_words();
        let words = api.new_hint(self.words_hint, &[x], n)?;

        let recomposed = compose_be(api, &words, self.word_bits);
        api.assert_is_equal(recomposed, x);

        let hi = compose_be(api, &words[..n / 2], self.word_bits);
        let lo = compose_be(api, &words[n / 2..], self.word_bits);
        self.assert_less_than_modulus(api, hi, lo)?;

        Ok(words)
    }

    /// Assert `hi · 2^128 + lo < p`, with `hi` and `lo` the two 128-bit halves of an integer.
    ///
    /// Computes `(p - 1) - (hi, lo)` limb-wise with a hinted borrow and range checks both result
    /// limbs to 128 bits; a negative difference wraps around the field and fails the checks.
    pub fn assert_less_than_modulus<A: CircuitEngine>(
        &self,
        api: &mut A,
        hi: Variable,
        lo: Variable,
    ) -> CircuitResult<()> {
        let (mod_hi, mod_lo_minus_one) = (A::F::MODULUS - U256::ONE).into_words();
        let mod_hi = A::F::from_u256(U256::from(mod_hi));
        let mod_lo_minus_one = A::F::from_u256(U256::from(mod_lo_minus_one));

        let mod_lo_var = api.constant(mod_lo_minus_one);
        let borrow = api.new_hint(self.gt_hint, &[lo, mod_lo_var], 1)?[0];
        api.assert_is_boolean(borrow);

        // lo limb: (p_lo - 1) - lo + borrow · 2^128
        let shifted_borrow = api.mul_const(borrow, radix::<A::F>(HALF_BITS));
        let diff_lo = api.sub(mod_lo_var, lo);
        let result_lo = api.add(diff_lo, shifted_borrow);
        api.range_check(result_lo, HALF_BITS);

        // hi limb: p_hi - hi - borrow
        let mod_hi_var = api.constant(mod_hi);
        let diff_hi = api.sub(mod_hi_var, hi);
        let result_hi = api.sub(diff_hi, borrow);
        api.range_check(result_hi, HALF_BITS);

        Ok(())
    }
}

/// Canonical little-endian bit decomposition of `x`, 256 boolean-constrained bits.
pub fn to_binary<A: CircuitEngine>(api: &mut A, x: Variable) -> CircuitResult<Vec<Variable>> {
    let decomposer = CanonicalDecomposer::new(api, 1)?;
    let mut bits = decomposer.decompose(api, x)?;
    for bit in &bits {
        api.assert_is_boolean(*bit);
    }
    bits.reverse();
    Ok(bits)
}
