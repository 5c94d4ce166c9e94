use arith::{Field, FieldForECC};
use ethnum::U256;

use crate::{CircuitResult, HintId, TableId, Variable};

/// A nondeterministic helper: computes `outputs` from the values of `inputs`.
///
/// Hint outputs are untrusted. Every call site that requests a hint must constrain its outputs.
pub type HintFn<F> = fn(inputs: &[F], outputs: &mut [F]) -> CircuitResult<()>;

/// The capability a constraint-system backend exposes to the transcript gadgets.
///
/// All arithmetic is over the native field `F`. Assertions never fail eagerly: whether they hold
/// is a property of the witness, decided by the backend.
pub trait CircuitEngine {
    /// The native field of the constraint system.
    type F: FieldForECC;

    /// Allocate a wire fixed to a constant value.
    fn constant(&mut self, value: Self::F) -> Variable;

    fn add(&mut self, a: Variable, b: Variable) -> Variable;

    fn sub(&mut self, a: Variable, b: Variable) -> Variable;

    fn mul(&mut self, a: Variable, b: Variable) -> Variable;

    /// `a + c` for a constant `c`.
    fn add_const(&mut self, a: Variable, c: Self::F) -> Variable {
        let c = self.constant(c);
        self.add(a, c)
    }

    /// `a * c` for a constant `c`.
    fn mul_const(&mut self, a: Variable, c: Self::F) -> Variable {
        let c = self.constant(c);
        self.mul(a, c)
    }

    fn assert_is_equal(&mut self, a: Variable, b: Variable);

    fn assert_is_boolean(&mut self, a: Variable);

    /// Assert that the canonical value of `a` is below `2^bits`.
    fn range_check(&mut self, a: Variable, bits: usize);

    /// Create a lookup table whose `i`-th row holds `rows[i]`.
    fn new_lookup_table(&mut self, rows: Vec<Self::F>) -> TableId;

    /// Query `table` at `index`. Querying an index outside the table is unsatisfiable, so a
    /// lookup also range checks its index.
    fn lookup(&mut self, table: TableId, index: Variable) -> Variable;

    /// Register a hint on this engine instance. Registering the same name twice returns the
    /// handle of the first registration.
    fn register_hint(&mut self, name: &'static str, hint: HintFn<Self::F>) -> HintId;

    /// Obtain `n_outputs` fresh wires computed by a registered hint.
    fn new_hint(
        &mut self,
        hint: HintId,
        inputs: &[Variable],
        n_outputs: usize,
    ) -> CircuitResult<Vec<Variable>>;

    // ====================================
    // provided
    // ====================================
    /// Print the values of `vars` once they are known. Backends without a witness ignore it.
    fn println(&mut self, _msg: &str, _vars: &[Variable]) {}

    fn zero(&mut self) -> Variable {
        self.constant(Self::F::ZERO)
    }

    fn one(&mut self) -> Variable {
        self.constant(Self::F::ONE)
    }

    /// `Σ coef_i · var_i`
    fn linear_combination(&mut self, terms: &[(Variable, Self::F)]) -> Variable {
        let mut acc = self.zero();
        for (var, coef) in terms {
            let term = self.mul_const(*var, *coef);
            acc = self.add(acc, term);
        }
        acc
    }

    /// Bit length of the native field modulus.
    fn field_bits(&self) -> usize {
        Self::F::MODULUS_BITS
    }

    fn modulus(&self) -> U256 {
        Self::F::MODULUS
    }
}
