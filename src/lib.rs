//! Montgomery arithmetic over `p = 2^e2 · 3^e3 − 1` and its quadratic
//! extension, with p217 (`e2 = 110`, `e3 = 67`) as the fixed instance, and
//! an optimal-strategy planner for isogeny trees.

pub mod bigint;
pub mod error;
pub mod field;
pub mod strategy;

pub use error::{Error, Result};
pub use field::{FieldConfig, Fp, Fp2, ModulusParameters, Montgomery, Plain};
pub use strategy::{plan_strategy, Preset, Strategy};
