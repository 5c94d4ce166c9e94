use tiny_keccak::keccakf;

use super::{KECCAK_RATE, KECCAK_WIDTH};

/// The keccak duplex sponge evaluated outside the circuit.
///
/// Same absorb/squeeze discipline as [`crate::DuplexSponge`] over [`super::KeccakPermutation`],
/// on plain bytes. Used to derive session tags without paying for them in constraints.
#[derive(Debug, Clone)]
pub struct NativeKeccakSponge {
    state: [u8; KECCAK_WIDTH],
    absorb_pos: usize,
    squeeze_pos: usize,
}

impl NativeKeccakSponge {
    pub fn new(iv: &[u8; 32]) -> Self {
        let mut state = [0u8; KECCAK_WIDTH];
        state[KECCAK_RATE..KECCAK_RATE + 32].copy_from_slice(iv);
        Self {
            state,
            absorb_pos: 0,
            squeeze_pos: KECCAK_RATE,
        }
    }

    /// Hash a protocol description into a 32-byte session tag.
    pub fn derive_tag(protocol: &[u8]) -> [u8; 32] {
        let mut sponge = Self::new(&[0u8; 32]);
        sponge.absorb(protocol);
        let mut tag = [0u8; 32];
        sponge.squeeze(&mut tag);
        tag
    }

    pub fn absorb(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            if self.absorb_pos == KECCAK_RATE {
                self.permute();
                self.absorb_pos = 0;
            } else {
                let chunk_len = input.len().min(KECCAK_RATE - self.absorb_pos);
                let (chunk, rest) = input.split_at(chunk_len);
                self.state[self.absorb_pos..self.absorb_pos + chunk_len].copy_from_slice(chunk);
                self.absorb_pos += chunk_len;
                input = rest;
            }
        }
        self.squeeze_pos = KECCAK_RATE;
    }

    pub fn squeeze(&mut self, output: &mut [u8]) {
        let mut written = 0;
        while written < output.len() {
            if self.squeeze_pos == KECCAK_RATE {
                self.squeeze_pos = 0;
                self.absorb_pos = 0;
                self.permute();
            }
            let chunk_len = (output.len() - written).min(KECCAK_RATE - self.squeeze_pos);
            output[written..written + chunk_len]
                .copy_from_slice(&self.state[self.squeeze_pos..self.squeeze_pos + chunk_len]);
            self.squeeze_pos += chunk_len;
            written += chunk_len;
        }
    }

    pub fn ratchet(&mut self) {
        self.permute();
        self.state[..KECCAK_RATE].fill(0);
        self.squeeze_pos = KECCAK_RATE;
    }

    pub fn state(&self) -> &[u8; KECCAK_WIDTH] {
        &self.state
    }

    fn permute(&mut self) {
        let mut lanes = [0u64; 25];
        for (lane, bytes) in lanes.iter_mut().zip(self.state.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(bytes);
            *lane = u64::from_le_bytes(buf);
        }
        keccakf(&mut lanes);
        for (bytes, lane) in self.state.chunks_exact_mut(8).zip(lanes.iter()) {
            bytes.copy_from_slice(&lane.to_le_bytes());
        }
    }
}
