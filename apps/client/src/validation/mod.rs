pub mod cross_field;
pub mod field;
pub mod patterns;

pub use cross_field::{check_rules, first_violation, CrossFieldRule};
pub use field::{check, FieldChecks, Rule};
