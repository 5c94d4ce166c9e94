use arith::FieldForECC;
use circuit::{
    gadgets::{compose_be, compose_le, CanonicalDecomposer},
    CircuitEngine, TableId, Variable, U8,
};

use super::{check_field, round_constants, sbox_word, RoundFunction, ROUNDS, SIGMA};
use crate::{HasherError, HasherResult, Permutation};

/// Skyscraper as circuit constraints.
///
/// `bar` decomposes its input into words of 8 or 16 bits. The S-box is a lookup table with one
/// row per word value, so a 16-bit word costs one lookup where two 8-bit words cost two, at the
/// price of a 65536-row table.
#[derive(Debug, Clone)]
pub struct Skyscraper<F: FieldForECC> {
    word_bits: usize,
    decomposer: CanonicalDecomposer,
    sbox_table: TableId,
    round_constants: [F; 8],
    sigma: F,
}

impl<F: FieldForECC> Skyscraper<F> {
    pub fn new<A: CircuitEngine<F = F>>(api: &mut A, word_bits: usize) -> HasherResult<Self> {
        check_field::<F>()?;
        if word_bits != 8 && word_bits != 16 {
            return Err(HasherError::UnsupportedWordSize(word_bits));
        }
        let decomposer = CanonicalDecomposer::new(api, word_bits)?;
        let rows = (0..1u64 << word_bits)
            .map(|w| F::from(sbox_word(w, word_bits)))
            .collect();
        let sbox_table = api.new_lookup_table(rows);

        Ok(Self {
            word_bits,
            decomposer,
            sbox_table,
            round_constants: round_constants::<F>(),
            sigma: F::from_u256(SIGMA),
        })
    }

    #[inline]
    pub fn word_bits(&self) -> usize {
        self.word_bits
    }

    /// The S-box on one word. The lookup also range checks the word.
    #[inline]
    pub fn sbox<A: CircuitEngine<F = F>>(&self, api: &mut A, word: Variable) -> Variable {
        api.lookup(self.sbox_table, word)
    }

    /// `sigma * x^2`
    pub fn square<A: CircuitEngine<F = F>>(&self, api: &mut A, x: Variable) -> Variable {
        let x2 = api.mul(x, x);
        api.mul_const(x2, self.sigma)
    }

    pub fn bar<A: CircuitEngine<F = F>>(&self, api: &mut A, x: Variable) -> HasherResult<Variable> {
        let mut words = self.decomposer.decompose(api, x)?;
        let half = words.len() / 2;
        words.rotate_left(half);
        let substituted = words
            .iter()
            .map(|w| self.sbox(api, *w))
            .collect::<Vec<_>>();
        Ok(compose_be(api, &substituted, self.word_bits))
    }

    /// Apply the ten rounds to `state = [l, r]` in place.
    pub fn permute<A: CircuitEngine<F = F>>(
        &self,
        api: &mut A,
        state: &mut [Variable; 2],
    ) -> HasherResult<()> {
        let [mut l, mut r] = *state;
        for (round, rc) in ROUNDS {
            let f = match round {
                RoundFunction::Square => self.square(api, l),
                RoundFunction::Bar => self.bar(api, l)?,
            };
            let mut next = api.add(r, f);
            if let Some(i) = rc {
                next = api.add_const(next, self.round_constants[i]);
            }
            r = l;
            l = next;
        }
        *state = [l, r];
        Ok(())
    }

    /// Two-to-one compression: `l + permute(l, r).l`.
    pub fn compress<A: CircuitEngine<F = F>>(
        &self,
        api: &mut A,
        l: Variable,
        r: Variable,
    ) -> HasherResult<Variable> {
        let mut state = [l, r];
        self.permute(api, &mut state)?;
        Ok(api.add(l, state[0]))
    }
}

/// Skyscraper as a sponge permutation: `N = 2`, `R = 1`, the rate is `l`.
#[derive(Debug, Clone)]
pub struct SkyscraperPermutation<F: FieldForECC> {
    skyscraper: Skyscraper<F>,
    state: [Variable; 2],
}

impl<F: FieldForECC> SkyscraperPermutation<F> {
    pub fn new<A: CircuitEngine<F = F>>(api: &mut A, word_bits: usize) -> HasherResult<Self> {
        let skyscraper = Skyscraper::new(api, word_bits)?;
        let zero = api.zero();
        Ok(Self {
            skyscraper,
            state: [zero; 2],
        })
    }

    /// The current `[l, r]`.
    pub fn elements(&self) -> [Variable; 2] {
        self.state
    }

    pub fn skyscraper(&self) -> &Skyscraper<F> {
        &self.skyscraper
    }
}

impl<F: FieldForECC, A: CircuitEngine<F = F>> Permutation<A> for SkyscraperPermutation<F> {
    const NAME: &'static str = "skyscraper";

    type Unit = Variable;

    const N: usize = 2;

    const R: usize = 1;

    /// `l = 0` and `r` is the little-endian integer of the IV, reduced into the field.
    fn initialize(&mut self, api: &mut A, iv: &[U8; 32]) -> HasherResult<()> {
        let bytes = iv.iter().map(|b| b.val).collect::<Vec<_>>();
        let r = compose_le(api, &bytes, 8);
        let l = api.zero();
        self.state = [l, r];
        Ok(())
    }

    fn permute(&mut self, api: &mut A) -> HasherResult<()> {
        self.skyscraper.permute(api, &mut self.state)
    }

    fn state(&self) -> &[Variable] {
        &self.state
    }

    fn state_mut(&mut self) -> &mut [Variable] {
        &mut self.state
    }

    fn zeroize(&mut self, api: &mut A, index: usize) {
        self.state[index] = api.zero();
    }
}
