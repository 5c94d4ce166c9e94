use arith::FieldForECC;
use ethnum::U256;

use crate::{
    CircuitEngine, CircuitError, CircuitResult, ConstraintKind, HintFn, HintId, TableId, Variable,
};

/// Constraint counts collected by a [`WitnessBuilder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintStats {
    pub n_wires: usize,
    pub n_muls: usize,
    pub n_equalities: usize,
    pub n_booleans: usize,
    pub n_range_checks: usize,
    pub n_lookups: usize,
    pub n_hint_outputs: usize,
}

impl ConstraintStats {
    /// Number of recorded assertions of any kind.
    pub fn n_constraints(&self) -> usize {
        self.n_equalities + self.n_booleans + self.n_range_checks + self.n_lookups
    }
}

/// A [`CircuitEngine`] that evaluates every wire on concrete values.
///
/// Every assertion is recorded and checked as soon as it is made. The first one that does not
/// hold is kept and reported by [`WitnessBuilder::check`]; building continues so that the caller
/// still gets the full statistics.
#[derive(Debug, Clone)]
pub struct WitnessBuilder<F: FieldForECC> {
    values: Vec<F>,
    tables: Vec<Vec<F>>,
    hints: Vec<(&'static str, HintFn<F>)>,
    overrides: Vec<(&'static str, HintFn<F>)>,
    first_failure: Option<(ConstraintKind, usize)>,
    stats: ConstraintStats,
}

impl<F: FieldForECC> Default for WitnessBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FieldForECC> WitnessBuilder<F> {
    pub fn new() -> Self {
        Self {
            values: vec![],
            tables: vec![],
            hints: vec![],
            overrides: vec![],
            first_failure: None,
            stats: ConstraintStats::default(),
        }
    }

    /// Allocate a free witness wire.
    pub fn input(&mut self, value: F) -> Variable {
        self.push(value)
    }

    pub fn inputs(&mut self, values: &[F]) -> Vec<Variable> {
        values.iter().map(|v| self.push(*v)).collect()
    }

    #[inline]
    pub fn value(&self, v: Variable) -> F {
        self.values[v.0]
    }

    pub fn values(&self, vs: &[Variable]) -> Vec<F> {
        vs.iter().map(|v| self.value(*v)).collect()
    }

    /// Replace the function behind a hint name, whether it is registered already or later.
    ///
    /// Meant for soundness tests: a malicious hint must never yield a satisfied circuit.
    pub fn override_hint(&mut self, name: &'static str, hint: HintFn<F>) {
        match self.overrides.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = hint,
            None => self.overrides.push((name, hint)),
        }
        if let Some(entry) = self.hints.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = hint;
        }
    }

    pub fn stats(&self) -> ConstraintStats {
        self.stats
    }

    pub fn is_satisfied(&self) -> bool {
        self.first_failure.is_none()
    }

    /// Report the first assertion that does not hold.
    pub fn check(&self) -> CircuitResult<()> {
        log::info!(
            "witness builder: {} wires, {} muls, {} constraints ({} eq, {} bool, {} range, {} lookup), {} hint outputs",
            self.stats.n_wires,
            self.stats.n_muls,
            self.stats.n_constraints(),
            self.stats.n_equalities,
            self.stats.n_booleans,
            self.stats.n_range_checks,
            self.stats.n_lookups,
            self.stats.n_hint_outputs,
        );
        match self.first_failure {
            None => Ok(()),
            Some((kind, index)) => Err(CircuitError::Unsatisfied { kind, index }),
        }
    }

    #[inline]
    fn push(&mut self, value: F) -> Variable {
        self.values.push(value);
        self.stats.n_wires += 1;
        Variable(self.values.len() - 1)
    }

    fn record(&mut self, kind: ConstraintKind, holds: bool) {
        let index = self.stats.n_constraints() - 1;
        if !holds && self.first_failure.is_none() {
            log::debug!("{kind} constraint #{index} is not satisfied");
            self.first_failure = Some((kind, index));
        }
    }
}

impl<F: FieldForECC> CircuitEngine for WitnessBuilder<F> {
    type F = F;

    fn constant(&mut self, value: F) -> Variable {
        self.push(value)
    }

    fn add(&mut self, a: Variable, b: Variable) -> Variable {
        let value = self.value(a) + self.value(b);
        self.push(value)
    }

    fn sub(&mut self, a: Variable, b: Variable) -> Variable {
        let value = self.value(a) - self.value(b);
        self.push(value)
    }

    fn mul(&mut self, a: Variable, b: Variable) -> Variable {
        self.stats.n_muls += 1;
        let value = self.value(a) * self.value(b);
        self.push(value)
    }

    fn add_const(&mut self, a: Variable, c: F) -> Variable {
        let value = self.value(a) + c;
        self.push(value)
    }

    fn mul_const(&mut self, a: Variable, c: F) -> Variable {
        let value = self.value(a) * c;
        self.push(value)
    }

    fn assert_is_equal(&mut self, a: Variable, b: Variable) {
        self.stats.n_equalities += 1;
        let holds = self.value(a) == self.value(b);
        self.record(ConstraintKind::Equality, holds);
    }

    fn assert_is_boolean(&mut self, a: Variable) {
        self.stats.n_booleans += 1;
        let v = self.value(a);
        self.record(ConstraintKind::Boolean, v == F::ZERO || v == F::ONE);
    }

    fn range_check(&mut self, a: Variable, bits: usize) {
        self.stats.n_range_checks += 1;
        let holds = bits >= 256 || self.value(a).to_u256() < (U256::ONE << bits as u32);
        self.record(ConstraintKind::RangeCheck(bits), holds);
    }

    fn println(&mut self, msg: &str, vars: &[Variable]) {
        log::debug!("{msg}: {:?}", self.values(vars));
    }

    fn new_lookup_table(&mut self, rows: Vec<F>) -> TableId {
        self.tables.push(rows);
        TableId(self.tables.len() - 1)
    }

    fn lookup(&mut self, table: TableId, index: Variable) -> Variable {
        self.stats.n_lookups += 1;
        let idx = self.value(index).to_u256();
        let row = if idx < U256::from(self.tables[table.0].len() as u64) {
            Some(self.tables[table.0][idx.as_usize()])
        } else {
            None
        };
        self.record(ConstraintKind::Lookup, row.is_some());
        self.push(row.unwrap_or(F::ZERO))
    }

    fn register_hint(&mut self, name: &'static str, hint: HintFn<F>) -> HintId {
        if let Some(pos) = self.hints.iter().position(|(n, _)| *n == name) {
            return HintId(pos);
        }
        let hint = self
            .overrides
            .iter()
            .find(|(n, _)| *n == name)
            .map_or(hint, |(_, f)| *f);
        self.hints.push((name, hint));
        HintId(self.hints.len() - 1)
    }

    fn new_hint(
        &mut self,
        hint: HintId,
        inputs: &[Variable],
        n_outputs: usize,
    ) -> CircuitResult<Vec<Variable>> {
        let (name, f) = *self
            .hints
            .get(hint.0)
            .ok_or_else(|| CircuitError::UnknownHint(format!("#{}", hint.0)))?;
        let input_values = self.values(inputs);
        let mut outputs = vec![F::ZERO; n_outputs];
        f(&input_values, &mut outputs)?;
        log::trace!("hint `{name}`: {} inputs, {} outputs", inputs.len(), n_outputs);

        self.stats.n_hint_outputs += n_outputs;
        Ok(outputs.into_iter().map(|v| self.push(v)).collect())
    }
}
