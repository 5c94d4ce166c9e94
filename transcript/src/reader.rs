use circuit::{CircuitEngine, Variable, U8};
use fs_hashers::{DuplexSponge, KeccakPermutation, SkyscraperPermutation};

use crate::{
    ByteTranscriptReader, FieldTranscriptReader, PermutationType, TranscriptConfig,
    TranscriptError, TranscriptResult,
};

/// Replays a prover transcript inside a circuit.
///
/// Prover messages are read from the transcript bytes, left to right, and absorbed; verifier
/// challenges are squeezed. Every request is checked against the protocol description and the
/// first failure is returned; outputs are meaningless after an error.
pub trait TranscriptReader<A: CircuitEngine> {
    /// Read prover bytes and absorb them.
    fn fill_next_bytes(&mut self, api: &mut A, out: &mut [U8]) -> TranscriptResult<()>;

    /// Squeeze challenge bytes.
    fn fill_challenge_bytes(&mut self, api: &mut A, out: &mut [U8]) -> TranscriptResult<()>;

    /// Read prover field elements, each encoded as little-endian bytes, and absorb them.
    fn fill_next_scalars(&mut self, api: &mut A, out: &mut [Variable]) -> TranscriptResult<()>;

    /// Squeeze challenge field elements.
    fn fill_challenge_scalars(
        &mut self,
        api: &mut A,
        out: &mut [Variable],
    ) -> TranscriptResult<()>;

    /// Read prover hint bytes. Hints are checked against the protocol but not absorbed.
    fn fill_next_hint_bytes(&mut self, api: &mut A, out: &mut [U8]) -> TranscriptResult<()>;

    fn ratchet(&mut self, api: &mut A) -> TranscriptResult<()>;

    /// Succeeds only if every operation of the protocol has been run.
    fn finish(&self) -> TranscriptResult<()>;

    /// Number of transcript bytes not read yet.
    fn remaining_bytes(&self) -> usize;

    fn debug_state(&self, api: &mut A);
}

/// The prover's claimed bytes, consumed strictly left to right.
#[derive(Debug, Clone)]
pub struct TranscriptCursor {
    bytes: Vec<U8>,
    pos: usize,
}

impl TranscriptCursor {
    pub fn new(bytes: Vec<U8>) -> Self {
        Self { bytes, pos: 0 }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// The next `n` bytes, without consuming them.
    pub fn peek(&self, n: usize) -> TranscriptResult<&[U8]> {
        if n > self.remaining() {
            return Err(TranscriptError::TranscriptExhausted {
                requested: n,
                remaining: self.remaining(),
            });
        }
        Ok(&self.bytes[self.pos..self.pos + n])
    }

    /// Consume `n` bytes previously returned by [`Self::peek`].
    pub fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.pos += n;
    }
}

/// Build the reader matching `config` for a protocol description and transcript.
pub fn new_reader<A: CircuitEngine + 'static>(
    api: &mut A,
    config: &TranscriptConfig,
    protocol: &[u8],
    transcript: Vec<U8>,
) -> TranscriptResult<Box<dyn TranscriptReader<A>>> {
    log::debug!(
        "{} transcript reader, {:?} tag derivation",
        config.permutation,
        config.tag_derivation
    );
    let reader: Box<dyn TranscriptReader<A>> = match config.permutation {
        PermutationType::Keccak => {
            let sponge = DuplexSponge::new(KeccakPermutation::new(api));
            Box::new(ByteTranscriptReader::new(
                api,
                sponge,
                protocol,
                transcript,
                config.tag_derivation,
            )?)
        }
        PermutationType::Skyscraper => {
            let permutation =
                SkyscraperPermutation::<A::F>::new(api, config.skyscraper_word_bits)?;
            Box::new(FieldTranscriptReader::new(
                api,
                DuplexSponge::new(permutation),
                protocol,
                transcript,
                config.tag_derivation,
            )?)
        }
    };
    Ok(reader)
}
