//! Neufert Core - Design Parameter Validation
//!
//! # Ground Rules
//! 1. Standards load once and are never mutated
//! 2. A missing standard is unchecked, not a failure
//! 3. Findings are data, never panics
//! 4. Same input, same output

pub mod checker;
pub mod error;
pub mod standards;
pub mod validation;

pub use checker::StandardsChecker;
pub use error::StandardsError;
pub use standards::{default_standards_path, ConstraintSpec, Measure, StandardsTable};
pub use validation::{
    validate, DesignParameters, Finding, RangeRule, ValidationResult, ValidationRule, Validator,
    DOOR_WIDTH, ROOM_SIZE,
};
