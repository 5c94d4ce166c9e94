//! Constraint-system engine capability.
//!
//! - [`CircuitEngine`]: the set of operations a host proof system has to offer for the
//!   transcript gadgets to be expressed (field arithmetic, assertions, range checks, lookups and
//!   nondeterministic hints).
//! - [`WitnessBuilder`]: an engine that evaluates every wire over concrete values and records
//!   every constraint, reporting the first unsatisfied one.
//! - [`gadgets`]: canonical decomposition and modulus comparison shared by the hashers and the
//!   transcript readers.

mod errors;
pub use errors::{CircuitError, CircuitResult, ConstraintKind};

mod variable;
pub use variable::{HintId, TableId, Variable, U8};

mod engine;
pub use engine::{CircuitEngine, HintFn};

mod witness_builder;
pub use witness_builder::{ConstraintStats, WitnessBuilder};

pub mod gadgets;
