use std::fmt::Debug;

use circuit::{CircuitEngine, Variable, U8};

use crate::HasherResult;

/// The unit a permutation state is made of: a constrained byte or a native field element.
pub trait Unit: Copy + Debug + PartialEq {
    /// The wire carrying the unit.
    fn variable(&self) -> Variable;
}

impl Unit for U8 {
    #[inline(always)]
    fn variable(&self) -> Variable {
        self.val
    }
}

impl Unit for Variable {
    #[inline(always)]
    fn variable(&self) -> Variable {
        *self
    }
}

/// A fixed-width permutation over a state of `N` units, expressed as circuit constraints.
///
/// The first `R` units are the rate; the remaining `N - R` are the capacity and are only ever
/// touched by [`Permutation::permute`] and [`Permutation::initialize`].
pub trait Permutation<A: CircuitEngine>: Debug {
    /// Name of the permutation
    const NAME: &'static str;

    /// State unit
    type Unit: Unit;

    /// State width, in units
    const N: usize;

    /// Rate, in units
    const R: usize;

    /// Load the 32-byte initialization vector; the rest of the state becomes zero.
    fn initialize(&mut self, api: &mut A, iv: &[U8; 32]) -> HasherResult<()>;

    /// Apply the permutation to the whole state.
    fn permute(&mut self, api: &mut A) -> HasherResult<()>;

    /// The whole state, rate first.
    fn state(&self) -> &[Self::Unit];

    /// Mutable access to the state; the sponge only writes the rate through it.
    fn state_mut(&mut self) -> &mut [Self::Unit];

    /// Set the unit at `index` to zero.
    fn zeroize(&mut self, api: &mut A, index: usize);
}
