use arith::FieldForECC;
use circuit::{
    gadgets::{compose_be, compose_le},
    CircuitEngine, Variable, U8,
};
use fs_hashers::{DuplexSponge, Permutation};

use crate::{Safe, TagDerivation, TranscriptCursor, TranscriptReader, TranscriptResult};

/// Statistical security margin of challenge scalars, in bits.
const CHALLENGE_MARGIN_BITS: usize = 128;

/// A transcript reader over a byte sponge.
///
/// Prover scalars are `ceil(bits / 8)` little-endian bytes. Challenge scalars are built from
/// `ceil((bits + 128) / 8)` squeezed bytes read big-endian, so that their reduction modulo `p`
/// is statistically close to uniform.
#[derive(Debug)]
pub struct ByteTranscriptReader<A: CircuitEngine, P: Permutation<A, Unit = U8>> {
    safe: Safe<A, P>,
    cursor: TranscriptCursor,
}

impl<A: CircuitEngine, P: Permutation<A, Unit = U8>> ByteTranscriptReader<A, P> {
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

    #[inline]
    fn challenge_bytes_per_scalar() -> usize {
        (<A::F as FieldForECC>::MODULUS_BITS + CHALLENGE_MARGIN_BITS).div_ceil(8)
    }
}

impl<A: CircuitEngine, P: Permutation<A, Unit = U8>> TranscriptReader<A>
    for ByteTranscriptReader<A, P>
{
    fn fill_next_bytes(&mut self, api: &mut A, out: &mut [U8]) -> TranscriptResult<()> {
        out.copy_from_slice(self.cursor.peek(out.len())?);
        self.safe.absorb(api, out)?;
        self.cursor.advance(out.len());
        Ok(())
    }

    fn fill_challenge_bytes(&mut self, api: &mut A, out: &mut [U8]) -> TranscriptResult<()> {
        self.safe.squeeze(api, out)
    }

    fn fill_next_scalars(&mut self, api: &mut A, out: &mut [Variable]) -> TranscriptResult<()> {
        let zero = U8::constant(api, 0);
        let mut bytes = vec![zero; <A::F as FieldForECC>::modulus_bytes()];
        for scalar in out.iter_mut() {
            self.fill_next_bytes(api, &mut bytes)?;
            let vals = bytes.iter().map(|b| b.val).collect::<Vec<_>>();
            *scalar = compose_le(api, &vals, 8);
        }
        Ok(())
    }

    fn fill_challenge_scalars(
        &mut self,
        api: &mut A,
        out: &mut [Variable],
    ) -> TranscriptResult<()> {
        let zero = U8::constant(api, 0);
        let mut bytes = vec![zero; Self::challenge_bytes_per_scalar()];
        for scalar in out.iter_mut() {
            self.fill_challenge_bytes(api, &mut bytes)?;
            let vals = bytes.iter().map(|b| b.val).collect::<Vec<_>>();
            *scalar = compose_be(api, &vals, 8);
        }
        Ok(())
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
