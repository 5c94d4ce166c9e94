use crate::CircuitEngine;

/// An opaque handle to a wire of the constraint system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable(pub(crate) usize);

impl Variable {
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Handle of a lookup table owned by an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub(crate) usize);

/// Handle of a hint function registered on an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HintId(pub(crate) usize);

/// A circuit byte: a wire whose value is known to be in `[0, 256)`.
///
/// A `U8` is either range-checked on creation, a constant, or a composition of eight
/// boolean-constrained bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct U8 {
    pub val: Variable,
}

impl U8 {
    pub fn constant<A: CircuitEngine>(api: &mut A, byte: u8) -> Self {
        Self {
            val: api.constant(A::F::from(byte as u64)),
        }
    }

    pub fn constants<A: CircuitEngine>(api: &mut A, bytes: &[u8]) -> Vec<Self> {
        bytes.iter().map(|b| Self::constant(api, *b)).collect()
    }

    /// Wrap an arbitrary wire, range checking it to 8 bits.
    pub fn from_variable_checked<A: CircuitEngine>(api: &mut A, val: Variable) -> Self {
        api.range_check(val, 8);
        Self { val }
    }

    /// Wrap a wire whose value is already known to fit in a byte, e.g. the weighted sum of
    /// eight boolean wires.
    #[inline(always)]
    pub fn from_variable_unchecked(val: Variable) -> Self {
        Self { val }
    }
}
