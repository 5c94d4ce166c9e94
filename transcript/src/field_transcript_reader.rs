use arith::{BN254Fr, FieldForECC};
use circuit::{
    gadgets::{compose_le, to_binary},
    CircuitEngine, Variable, U8,
};
use fs_hashers::{DuplexSponge, Permutation};

use crate::{
    Safe, TagDerivation, TranscriptCursor, TranscriptError, TranscriptReader, TranscriptResult,
};

/// Number of low-order bytes of a squeezed element that are statistically close to uniform.
pub fn safe_bytes_per_element<F: FieldForECC>() -> TranscriptResult<usize> {
    if F::MODULUS == <BN254Fr as FieldForECC>::MODULUS {
        Ok(15)
    } else {
        Err(TranscriptError::UnsupportedField(F::NAME))
    }
}

/// A transcript reader over a field-element sponge.
///
/// Prover bytes are absorbed one field element per byte, prover scalars as the elements
/// themselves. Challenge bytes are the low [`safe_bytes_per_element`] little-endian bytes of
/// squeezed elements.
#[derive(Debug)]
pub struct FieldTranscriptReader<A: CircuitEngine, P: Permutation<A, Unit = Variable>> {
    safe: Safe<A, P>,
    cursor: TranscriptCursor,
}

impl<A: CircuitEngine, P: Permutation<A, Unit = Variable>> FieldTranscriptReader<A, P> {
    pub fn new(
        api: &mut A,
        sponge: DuplexSponge<A, P>,
        protocol: &[u8],
        transcript: Vec<U8>,
        tag_derivation: TagDerivation,
    ) -> TranscriptResult<Self> {
        Ok(Self {
            safe: Safe::new(api, sponge, protocol, tag_derivation)?,
            cursor: TranscriptCursor::new(transcript),
        })
    }

    pub fn safe(&self) -> &Safe<A, P> {
        &self.safe
    }
}

impl<A: CircuitEngine, P: Permutation<A, Unit = Variable>> TranscriptReader<A>
    for FieldTranscriptReader<A, P>
{
    fn fill_next_bytes(&mut self, api: &mut A, out: &mut [U8]) -> TranscriptResult<()> {
        out.copy_from_slice(self.cursor.peek(out.len())?);
        let elements = out.iter().map(|b| b.val).collect::<Vec<_>>();
        self.safe.absorb(api, &elements)?;
        self.cursor.advance(out.len());
        Ok(())
    }

    fn fill_challenge_bytes(&mut self, api: &mut A, out: &mut [U8]) -> TranscriptResult<()> {
        let n_safe = safe_bytes_per_element::<A::F>()?;
        if out.is_empty() {
            return Ok(());
        }

        let zero = api.zero();
        let mut elements = vec![zero; out.len().div_ceil(n_safe)];
        self.safe.squeeze(api, &mut elements)?;

        for (chunk, element) in out.chunks_mut(n_safe).zip(elements) {
            let bits = to_binary(api, element)?;
            for (k, byte) in chunk.iter_mut().enumerate() {
                let val = compose_le(api, &bits[8 * k..8 * k + 8], 1);
                *byte = U8::from_variable_unchecked(val);
            }
        }
        Ok(())
    }

    fn fill_next_scalars(&mut self, api: &mut A, out: &mut [Variable]) -> TranscriptResult<()> {
        let n_bytes = <A::F as FieldForECC>::modulus_bytes();
        let vals = self
            .cursor
            .peek(n_bytes * out.len())?
            .iter()
            .map(|b| b.val)
            .collect::<Vec<_>>();
        for (scalar, chunk) in out.iter_mut().zip(vals.chunks(n_bytes)) {
            *scalar = compose_le(api, chunk, 8);
        }
        self.safe.absorb(api, out)?;
        self.cursor.advance(vals.len());
        Ok(())
    }

    fn fill_challenge_scalars(
        &mut self,
        api: &mut A,
        out: &mut [Variable],
    ) -> TranscriptResult<()> {
        self.safe.squeeze(api, out)
    }

    fn fill_next_hint_bytes(&mut self, _api: &mut A, out: &mut [U8]) -> TranscriptResult<()> {
        out.copy_from_slice(self.cursor.peek(out.len())?);
        self.safe.hint(out.len())?;
        self.cursor.advance(out.len());
        Ok(())
    }

    fn ratchet(&mut self, api: &mut A) -> TranscriptResult<()> {
        self.safe.ratchet(api)
    }

    fn finish(&self) -> TranscriptResult<()> {
        self.safe.finish()
    }

    fn remaining_bytes(&self) -> usize {
        self.cursor.remaining()
    }

    fn debug_state(&self, api: &mut A) {
        log::debug!("remaining transcript bytes: {}", self.cursor.remaining());
        self.safe.debug_state(api);
    }
}
