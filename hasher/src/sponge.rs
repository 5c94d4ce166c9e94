use std::marker::PhantomData;

use circuit::{CircuitEngine, Variable, U8};

use crate::{HasherResult, Permutation, Unit};

/// A duplex sponge in overwrite mode over an arbitrary [`Permutation`].
///
/// Absorbed units overwrite the rate; squeezing after absorbing always permutes first, so that
/// every output depends on everything absorbed before it.
#[derive(Debug)]
pub struct DuplexSponge<A: CircuitEngine, P: Permutation<A>> {
    permutation: P,
    absorb_pos: usize,
    squeeze_pos: usize,
    _phantom: PhantomData<fn(&mut A)>,
}

impl<A: CircuitEngine, P: Permutation<A>> DuplexSponge<A, P> {
    pub fn new(permutation: P) -> Self {
        Self {
            permutation,
            absorb_pos: 0,
            squeeze_pos: 0,
            _phantom: PhantomData,
        }
    }

    pub fn permutation(&self) -> &P {
        &self.permutation
    }

    #[inline]
    pub fn absorb_pos(&self) -> usize {
        self.absorb_pos
    }

    #[inline]
    pub fn squeeze_pos(&self) -> usize {
        self.squeeze_pos
    }

    pub fn initialize(&mut self, api: &mut A, iv: &[U8; 32]) -> HasherResult<()> {
        self.permutation.initialize(api, iv)?;
        self.absorb_pos = 0;
        self.squeeze_pos = P::R;
        Ok(())
    }

    pub fn absorb(&mut self, api: &mut A, mut input: &[P::Unit]) -> HasherResult<()> {
        while !input.is_empty() {
            if self.absorb_pos == P::R {
                self.permute(api)?;
                self.absorb_pos = 0;
            } else {
                let chunk_len = input.len().min(P::R - self.absorb_pos);
                let (chunk, rest) = input.split_at(chunk_len);
                self.permutation.state_mut()[self.absorb_pos..self.absorb_pos + chunk_len]
                    .copy_from_slice(chunk);
                self.absorb_pos += chunk_len;
                input = rest;
            }
        }
        self.squeeze_pos = P::R;
        Ok(())
    }

    pub fn squeeze(&mut self, api: &mut A, mut output: &mut [P::Unit]) -> HasherResult<()> {
        while !output.is_empty() {
            if self.squeeze_pos == P::R {
                self.squeeze_pos = 0;
                self.absorb_pos = 0;
                self.permute(api)?;
            }
            let chunk_len = output.len().min(P::R - self.squeeze_pos);
            let (chunk, rest) = std::mem::take(&mut output).split_at_mut(chunk_len);
            chunk.copy_from_slice(
                &self.permutation.state()[self.squeeze_pos..self.squeeze_pos + chunk_len],
            );
            self.squeeze_pos += chunk_len;
            output = rest;
        }
        Ok(())
    }

    /// Permute and clear the rate, so that the previous state cannot be recovered from outputs.
    pub fn ratchet(&mut self, api: &mut A) -> HasherResult<()> {
        self.permute(api)?;
        for i in 0..P::R {
            self.permutation.zeroize(api, i);
        }
        self.squeeze_pos = P::R;
        Ok(())
    }

    /// Log the cursors and, through the engine, the state values.
    pub fn debug_state(&self, api: &mut A) {
        log::debug!(
            "{} sponge: absorb_pos {} squeeze_pos {}",
            P::NAME,
            self.absorb_pos,
            self.squeeze_pos
        );
        let vars = self
            .permutation
            .state()
            .iter()
            .map(Unit::variable)
            .collect::<Vec<Variable>>();
        api.println(P::NAME, &vars);
    }

    #[inline]
    fn permute(&mut self, api: &mut A) -> HasherResult<()> {
        log::trace!("{} permutation", P::NAME);
        self.permutation.permute(api)
    }
}
