//! Standards Store - Reference Constraints by Category
//!
//! Loaded once at startup, then only read. A missing or malformed source
//! yields an empty table, never an error to the caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StandardsError;

/// File name the standards are read from when nothing else is configured.
pub const DEFAULT_STANDARDS_FILE: &str = "neufert_standards.json";

/// Environment variable overriding [`DEFAULT_STANDARDS_FILE`].
pub const STANDARDS_ENV_VAR: &str = "NEUFERT_STANDARDS";

pub fn default_standards_path() -> PathBuf {
    match std::env::var_os(STANDARDS_ENV_VAR) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_STANDARDS_FILE),
    }
}

/// Physical quantity a category constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Width,
    Area,
}

impl Measure {
    pub fn unit(self) -> &'static str {
        match self {
            Measure::Width => "m",
            Measure::Area => "m²",
        }
    }
}

/// Permissible range for one category, plus optional remediation text.
///
/// An unset bound is not enforced: the minimum falls back to zero and the
/// maximum to unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl ConstraintSpec {
    pub fn min(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Width => self.min_width,
            Measure::Area => self.min_area,
        }
    }

    pub fn max(&self, measure: Measure) -> Option<f64> {
        match measure {
            Measure::Width => self.max_width,
            Measure::Area => self.max_area,
        }
    }

    pub fn effective_min(&self, measure: Measure) -> f64 {
        self.min(measure).unwrap_or(0.0)
    }

    pub fn effective_max(&self, measure: Measure) -> f64 {
        self.max(measure).unwrap_or(f64::INFINITY)
    }
}

/// Standards table - category name to constraint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardsTable {
    categories: BTreeMap<String, ConstraintSpec>,
}

impl StandardsTable {
    pub fn new() -> Self {
        Self { categories: BTreeMap::new() }
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn try_load(path: &Path) -> Result<Self, StandardsError> {
        let content = fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        Self::from_json_str(&content).map_err(|e| StandardsError::parse(path, e))
    }

    /// Load standards, degrading to an empty table on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(table) => {
                tracing::info!(
                    path = %path.display(),
                    categories = table.len(),
                    "loaded standards"
                );
                table
            }
            Err(e) => {
                tracing::error!(error = %e, "standards unavailable, continuing with an empty table");
                Self::new()
            }
        }
    }

    pub fn load_default() -> Self {
        Self::load(&default_standards_path())
    }

    pub fn get(&self, category: &str) -> Option<&ConstraintSpec> {
        self.categories.get(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &ConstraintSpec)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn register(&mut self, category: impl Into<String>, spec: ConstraintSpec) {
        self.categories.insert(category.into(), spec);
    }
}

impl<K: Into<String>> FromIterator<(K, ConstraintSpec)> for StandardsTable {
    fn from_iter<I: IntoIterator<Item = (K, ConstraintSpec)>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_width_and_area_categories() {
        let table = StandardsTable::from_json_str(
            r#"{
                "door_dimensions": {"min_width": 0.7, "max_width": 1.2, "recommendation": "Use a standard 0.8m door"},
                "room_size": {"min_area": 8.0}
            }"#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        let door = table.get("door_dimensions").unwrap();
        assert_eq!(door.min(Measure::Width), Some(0.7));
        assert_eq!(door.max(Measure::Width), Some(1.2));
        assert_eq!(door.recommendation.as_deref(), Some("Use a standard 0.8m door"));

        let room = table.get("room_size").unwrap();
        assert_eq!(room.min(Measure::Area), Some(8.0));
        assert_eq!(room.max(Measure::Area), None);
        assert!(room.recommendation.is_none());
    }

    #[test]
    fn test_unset_bounds_default_to_open_range() {
        let spec = ConstraintSpec::default();
        assert_eq!(spec.effective_min(Measure::Width), 0.0);
        assert_eq!(spec.effective_max(Measure::Area), f64::INFINITY);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let table =
            StandardsTable::from_json_str(r#"{"stairs": {"max_riser": 0.19, "min_width": 0.9}}"#)
                .unwrap();
        assert_eq!(table.get("stairs").unwrap().min_width, Some(0.9));
    }

    #[test]
    fn test_get_unknown_category_is_none() {
        let table = StandardsTable::from_json_str(r#"{"room_size": {"min_area": 8.0}}"#).unwrap();
        assert!(table.get("door_dimensions").is_none());
        assert!(!table.contains("door_dimensions"));
    }

    #[test]
    fn test_wrong_shape_rejected() {
        assert!(StandardsTable::from_json_str("[1, 2, 3]").is_err());
        assert!(StandardsTable::from_json_str(r#"{"door_dimensions": 0.8}"#).is_err());
        assert!(StandardsTable::from_json_str(r#"{"door_dimensions": {"min_width": "wide"}}"#).is_err());
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        assert!(matches!(
            StandardsTable::try_load(&path),
            Err(StandardsError::Io { .. })
        ));
        assert!(StandardsTable::load(&path).is_empty());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(
            StandardsTable::try_load(file.path()),
            Err(StandardsError::Parse { .. })
        ));
        assert!(StandardsTable::load(file.path()).is_empty());
    }

    #[test]
    fn test_categories_listed_in_order() {
        let table: StandardsTable = [
            ("room_size", ConstraintSpec::default()),
            ("door_dimensions", ConstraintSpec::default()),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = table.categories().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["door_dimensions", "room_size"]);
    }

    #[test]
    fn test_measure_units() {
        assert_eq!(Measure::Width.unit(), "m");
        assert_eq!(Measure::Area.unit(), "m²");
    }
}
