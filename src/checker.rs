//! Standards Checker - Single Entry Point
//!
//! Owns the standards table for the life of the process. Load it once,
//! then share `&StandardsChecker` across as many callers as needed.

use std::path::Path;

use crate::standards::StandardsTable;
use crate::validation::{DesignParameters, ValidationResult, Validator};

pub struct StandardsChecker {
    standards: StandardsTable,
    validator: Validator,
}

impl StandardsChecker {
    pub fn new(standards: StandardsTable) -> Self {
        Self {
            standards,
            validator: Validator::new(),
        }
    }

    pub fn with_validator(standards: StandardsTable, validator: Validator) -> Self {
        Self { standards, validator }
    }

    /// Missing or malformed files give a checker whose every result reports
    /// the standards as unavailable.
    pub fn from_path(path: &Path) -> Self {
        Self::new(StandardsTable::load(path))
    }

    pub fn standards(&self) -> &StandardsTable {
        &self.standards
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn check(&self, params: &DesignParameters) -> ValidationResult {
        self.validator.validate(params, &self.standards)
    }
}

impl Default for StandardsChecker {
    fn default() -> Self {
        Self::new(StandardsTable::default())
    }
}
