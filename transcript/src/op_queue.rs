use std::collections::VecDeque;

use crate::{Op, OpKind, ProtocolMismatch};

/// Runtime conformance checker for a protocol description.
///
/// Only the head operation may be partially consumed. Requests are checked against the head
/// only: an exact size pops it, a smaller one shrinks it, a larger one is an error. A ratchet
/// always pops its operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpQueue {
    ops: VecDeque<Op>,
}

impl OpQueue {
    pub fn new(ops: &[Op]) -> Self {
        Self {
            ops: ops.iter().cloned().collect(),
        }
    }

    pub fn absorb(&mut self, size: u64) -> Result<(), ProtocolMismatch> {
        self.do_op(OpKind::Absorb, size)
    }

    pub fn squeeze(&mut self, size: u64) -> Result<(), ProtocolMismatch> {
        self.do_op(OpKind::Squeeze, size)
    }

    pub fn hint(&mut self, size: u64) -> Result<(), ProtocolMismatch> {
        self.do_op(OpKind::Hint, size)
    }

    pub fn ratchet(&mut self) -> Result<(), ProtocolMismatch> {
        self.do_op(OpKind::Ratchet, 0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// The head operation, with its remaining size.
    pub fn peek(&self) -> Option<&Op> {
        self.ops.front()
    }

    /// Succeeds only once every operation has been consumed.
    pub fn finish(&self) -> Result<(), ProtocolMismatch> {
        match self.ops.front() {
            None => Ok(()),
            Some(head) => Err(ProtocolMismatch::Unfinished {
                kind: head.kind,
                label: head.label_lossy(),
                remaining: self.ops.len(),
            }),
        }
    }

    fn do_op(&mut self, kind: OpKind, size: u64) -> Result<(), ProtocolMismatch> {
        let result = self.check_and_consume(kind, size);
        if let Err(e) = &result {
            log::debug!("conformance failure: {e}");
        }
        result
    }

    fn check_and_consume(&mut self, kind: OpKind, size: u64) -> Result<(), ProtocolMismatch> {
        let head = self.ops.front_mut().ok_or(ProtocolMismatch::EmptyQueue {
            requested: kind,
            size,
        })?;
        if head.kind != kind {
            return Err(ProtocolMismatch::KindMismatch {
                expected: head.kind,
                label: head.label_lossy(),
                requested: kind,
            });
        }
        // a ratchet consumes its operation whatever size the description carries
        if kind == OpKind::Ratchet {
            self.ops.pop_front();
            return Ok(());
        }
        if head.size < size {
            return Err(ProtocolMismatch::SizeExceeded {
                kind,
                label: head.label_lossy(),
                remaining: head.size,
                requested: size,
            });
        }
        if head.size > size {
            head.size -= size;
        } else {
            self.ops.pop_front();
        }
        Ok(())
    }
}
