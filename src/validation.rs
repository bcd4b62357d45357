//! Validation System - Design Parameters vs. Standards
//!
//! Rules produce findings. The validator collects them, in registration
//! order, into errors, warnings and suggestions.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::standards::{Measure, StandardsTable};

pub const STANDARDS_UNAVAILABLE: &str = "Neufert standards data is unavailable.";

/// One classified validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Error(String),
    Warning(String),
    Suggestion(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result returned for every call while no standards are loaded.
    pub fn unavailable() -> Self {
        Self {
            errors: vec![STANDARDS_UNAVAILABLE.to_string()],
            ..Self::default()
        }
    }

    pub fn push(&mut self, finding: Finding) {
        match finding {
            Finding::Error(msg) => self.errors.push(msg),
            Finding::Warning(msg) => self.warnings.push(msg),
            Finding::Suggestion(msg) => self.suggestions.push(msg),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.suggestions.is_empty()
    }
}

impl Extend<Finding> for ValidationResult {
    fn extend<I: IntoIterator<Item = Finding>>(&mut self, iter: I) {
        for finding in iter {
            self.push(finding);
        }
    }
}

/// Design parameters submitted for validation, in meters / square meters.
///
/// Deserializes from any JSON object; entries whose value is not a number
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct DesignParameters {
    values: BTreeMap<String, f64>,
}

impl DesignParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for DesignParameters {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut values = BTreeMap::new();
        for (name, value) in raw {
            match value.as_f64() {
                Some(number) => {
                    values.insert(name, number);
                }
                None => tracing::debug!(parameter = %name, %value, "ignoring non-numeric parameter"),
            }
        }
        Self { values }
    }
}

impl Serialize for DesignParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for DesignParameters {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Validation rule trait - produces findings
pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn evaluate(&self, params: &DesignParameters, standards: &StandardsTable) -> Vec<Finding>;
}

// --- Concrete Rules ---

/// Checks one parameter against the min/max bounds of one standards category.
///
/// Below the minimum is an error (plus the category's recommendation, if any);
/// above the maximum is a warning. The maximum is only consulted when the
/// minimum holds, so a parameter yields at most one error or warning.
#[derive(Debug, Clone, Copy)]
pub struct RangeRule {
    parameter: &'static str,
    category: &'static str,
    label: &'static str,
    measure: Measure,
}

pub const DOOR_WIDTH: RangeRule =
    RangeRule::new("door_width", "door_dimensions", "Door width", Measure::Width);

pub const ROOM_SIZE: RangeRule = RangeRule::new("room_size", "room_size", "Room size", Measure::Area);

impl RangeRule {
    pub const fn new(
        parameter: &'static str,
        category: &'static str,
        label: &'static str,
        measure: Measure,
    ) -> Self {
        Self { parameter, category, label, measure }
    }

    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    pub fn category(&self) -> &'static str {
        self.category
    }
}

impl ValidationRule for RangeRule {
    fn name(&self) -> &'static str {
        self.parameter
    }

    fn evaluate(&self, params: &DesignParameters, standards: &StandardsTable) -> Vec<Finding> {
        let Some(value) = params.get(self.parameter) else {
            return vec![];
        };
        // Unknown categories are unchecked, not failures.
        let Some(spec) = standards.get(self.category) else {
            return vec![];
        };
        let unit = self.measure.unit();

        let min = spec.effective_min(self.measure);
        if value < min {
            let mut findings = vec![Finding::Error(format!(
                "{} ({}{unit}) is below the minimum standard ({}{unit}).",
                self.label,
                format_number(value),
                format_number(min),
            ))];
            if let Some(recommendation) = &spec.recommendation {
                findings.push(Finding::Suggestion(recommendation.clone()));
            }
            return findings;
        }

        let max = spec.effective_max(self.measure);
        if value > max {
            return vec![Finding::Warning(format!(
                "{} ({}{unit}) exceeds the maximum standard ({}{unit}).",
                self.label,
                format_number(value),
                format_number(max),
            ))];
        }

        vec![]
    }
}

/// Renders a number the way Python's float repr does: integral values keep one
/// decimal place (`9.0`), others use the shortest round-trip form (`0.5`), and
/// magnitudes outside `[1e-4, 1e16)` switch to exponent form (`1e+16`, `1e-05`).
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return format!("{value:.1}");
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Validator runs the registered rules in order
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::with_rules(vec![Box::new(DOOR_WIDTH), Box::new(ROOM_SIZE)])
    }

    pub fn with_rules(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    pub fn register(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, params: &DesignParameters, standards: &StandardsTable) -> ValidationResult {
        if standards.is_empty() {
            tracing::warn!("no standards loaded, skipping validation");
            return ValidationResult::unavailable();
        }

        let mut result = ValidationResult::new();
        for rule in &self.rules {
            let findings = rule.evaluate(params, standards);
            for finding in &findings {
                tracing::debug!(rule = rule.name(), ?finding, "finding");
            }
            result.extend(findings);
        }
        result
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate with the default rule set.
pub fn validate(params: &DesignParameters, standards: &StandardsTable) -> ValidationResult {
    Validator::new().validate(params, standards)
}
