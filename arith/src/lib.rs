mod field;
pub use field::*;

mod bn254;
pub use bn254::*;
