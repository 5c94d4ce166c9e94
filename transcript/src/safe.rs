use circuit::{CircuitEngine, U8};
use fs_hashers::{DuplexSponge, KeccakPermutation, NativeKeccakSponge, Permutation};

use crate::{IOPattern, OpQueue, TagDerivation, TranscriptResult};

/// Derive the session tag with the keccak gadget.
pub fn derive_tag_in_circuit<A: CircuitEngine>(
    api: &mut A,
    protocol: &[u8],
) -> TranscriptResult<[U8; 32]> {
    let keccak = KeccakPermutation::new(api);
    let mut sponge = DuplexSponge::<A, _>::new(keccak);
    let iv = [U8::constant(api, 0); 32];
    sponge.initialize(api, &iv)?;

    let protocol = U8::constants(api, protocol);
    sponge.absorb(api, &protocol)?;
    let mut tag = [iv[0]; 32];
    sponge.squeeze(api, &mut tag)?;
    Ok(tag)
}

/// Binds a sponge to a protocol description.
///
/// The sponge is keyed with a tag hashed from the description text, and every operation is
/// checked against the conformance queue before it reaches the sponge: a rejected request leaves
/// the sponge untouched.
#[derive(Debug)]
pub struct Safe<A: CircuitEngine, P: Permutation<A>> {
    sponge: DuplexSponge<A, P>,
    queue: OpQueue,
    io_pattern: IOPattern,
}

impl<A: CircuitEngine, P: Permutation<A>> Safe<A, P> {
    pub fn new(
        api: &mut A,
        mut sponge: DuplexSponge<A, P>,
        protocol: &[u8],
        tag_derivation: TagDerivation,
    ) -> TranscriptResult<Self> {
        let io_pattern = IOPattern::parse(protocol)?;

        let tag = match tag_derivation {
            TagDerivation::Native => {
                let tag = NativeKeccakSponge::derive_tag(protocol);
                log::debug!("session tag {tag:?}");
                std::array::from_fn(|i| U8::constant(api, tag[i]))
            }
            TagDerivation::InCircuit => derive_tag_in_circuit(api, protocol)?,
        };
        sponge.initialize(api, &tag)?;

        Ok(Self {
            sponge,
            queue: io_pattern.op_queue(),
            io_pattern,
        })
    }

    pub fn io_pattern(&self) -> &IOPattern {
        &self.io_pattern
    }

    pub fn sponge(&self) -> &DuplexSponge<A, P> {
        &self.sponge
    }

    pub fn absorb(&mut self, api: &mut A, input: &[P::Unit]) -> TranscriptResult<()> {
        if input.is_empty() {
            return Ok(());
        }
        self.queue.absorb(input.len() as u64)?;
        self.sponge.absorb(api, input)?;
        Ok(())
    }

    pub fn squeeze(&mut self, api: &mut A, output: &mut [P::Unit]) -> TranscriptResult<()> {
        if output.is_empty() {
            return Ok(());
        }
        self.queue.squeeze(output.len() as u64)?;
        self.sponge.squeeze(api, output)?;
        Ok(())
    }

    pub fn ratchet(&mut self, api: &mut A) -> TranscriptResult<()> {
        self.queue.ratchet()?;
        self.sponge.ratchet(api)?;
        Ok(())
    }

    /// Account for `size` units of prover hints; hints never reach the sponge.
    pub fn hint(&mut self, size: usize) -> TranscriptResult<()> {
        if size == 0 {
            return Ok(());
        }
        self.queue.hint(size as u64)?;
        Ok(())
    }

    /// Succeeds only if the whole protocol has been run.
    pub fn finish(&self) -> TranscriptResult<()> {
        self.queue.finish()?;
        Ok(())
    }

    pub fn debug_state(&self, api: &mut A) {
        log::debug!("{} operations left", self.queue.len());
        self.sponge.debug_state(api);
    }
}
