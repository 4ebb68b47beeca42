//! Resolution of semantic column roles against the headers actually
//! present in a loaded file. Lookup is case-insensitive; the resolved
//! name keeps the file's original spelling. Fallback chains are plain
//! candidate lists so each chain can be tested on its own.

use std::collections::HashMap;

use common::ComparisonMetric;
use polars::prelude::DataFrame;

use crate::error::{DatasetError, Result};

/// Ordered fallback candidates for the "latest high" metric.
pub const HIGH_SOURCE: &[&str] = &["actual_high", "predicted_high", "predicted_low"];

/// Ordered fallback candidates for the "latest low" metric.
pub const LOW_SOURCE: &[&str] = &["actual_low", "predicted_low", "predicted_high"];

/// Ordered fallback candidates for the "latest close" metric.
pub const CLOSE_SOURCE: &[&str] = &["close", "predicted_high", "predicted_low"];

/// Roles the intraday prediction view cannot render without.
pub const MANDATORY_PREDICTION_ROLES: &[&str] = &["actual_low", "predicted_low"];

/// Columns the combined daily predictions file must provide.
pub const DAILY_PREDICTION_ROLES: &[&str] = &["company_name", "target", "y_true", "y_pred"];

/// Columns the metrics file must provide.
pub const METRICS_ROLES: &[&str] = &["company_name"];

/// Map from lowercase semantic role name to the column header as it is
/// spelled in the loaded file. Built fresh per load; never persisted.
#[derive(Debug, Clone)]
pub struct ColumnRoleMap {
    lower_to_original: HashMap<String, String>,
}

impl ColumnRoleMap {
    pub fn from_frame(frame: &DataFrame) -> Self {
        Self::from_headers(frame.get_column_names().into_iter().map(|name| name.as_str()))
    }

    /// Later duplicate headers shadow earlier ones when two headers
    /// collide case-insensitively.
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut lower_to_original = HashMap::new();
        for header in headers {
            lower_to_original.insert(header.to_lowercase(), header.to_string());
        }
        Self { lower_to_original }
    }

    /// Resolve one role; `None` when no header matches.
    pub fn resolve(&self, role: &str) -> Option<&str> {
        self.lower_to_original
            .get(&role.to_lowercase())
            .map(String::as_str)
    }

    /// First present candidate wins; `None` when the whole chain is absent.
    pub fn resolve_first(&self, candidates: &[&str]) -> Option<&str> {
        candidates.iter().find_map(|role| self.resolve(role))
    }

    /// Resolve roles that must all be present, or report every missing
    /// one together with the columns the file does have.
    pub fn require(&self, roles: &[&str]) -> Result<Vec<String>> {
        let mut resolved = Vec::with_capacity(roles.len());
        let mut missing = Vec::new();
        for role in roles {
            match self.resolve(role) {
                Some(name) => resolved.push(name.to_string()),
                None => missing.push((*role).to_string()),
            }
        }
        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(DatasetError::MissingColumn {
                missing,
                available: self.available(),
            })
        }
    }

    /// Column headers in their original spelling, sorted, for error
    /// reporting.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lower_to_original.values().cloned().collect();
        names.sort();
        names
    }

    /// The (actual, predicted) columns backing the trend chart. The
    /// high pair is only used when both of its columns are present;
    /// otherwise the low pair applies.
    pub fn comparison_pair(&self, metric: ComparisonMetric) -> Option<(String, String)> {
        match metric {
            ComparisonMetric::High => {
                match (self.resolve("actual_high"), self.resolve("predicted_high")) {
                    (Some(actual), Some(predicted)) => {
                        Some((actual.to_string(), predicted.to_string()))
                    }
                    _ => self.low_pair(),
                }
            }
            ComparisonMetric::Low => self.low_pair(),
        }
    }

    fn low_pair(&self) -> Option<(String, String)> {
        match (self.resolve("actual_low"), self.resolve("predicted_low")) {
            (Some(actual), Some(predicted)) => Some((actual.to_string(), predicted.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_case_insensitive_and_case_preserving() {
        let roles = ColumnRoleMap::from_headers(["Date", "Actual_High", "PREDICTED_HIGH"]);
        assert_eq!(roles.resolve("actual_high"), Some("Actual_High"));
        assert_eq!(roles.resolve("predicted_high"), Some("PREDICTED_HIGH"));
        assert_eq!(roles.resolve("close"), None);
    }

    #[test]
    fn high_source_prefers_actual_high() {
        let roles =
            ColumnRoleMap::from_headers(["Actual_High", "predicted_high", "predicted_low"]);
        assert_eq!(roles.resolve_first(HIGH_SOURCE), Some("Actual_High"));
    }

    #[test]
    fn high_source_falls_back_in_order() {
        let roles = ColumnRoleMap::from_headers(["predicted_low", "predicted_high"]);
        assert_eq!(roles.resolve_first(HIGH_SOURCE), Some("predicted_high"));

        let roles = ColumnRoleMap::from_headers(["predicted_low"]);
        assert_eq!(roles.resolve_first(HIGH_SOURCE), Some("predicted_low"));

        let roles = ColumnRoleMap::from_headers(["open", "volume"]);
        assert_eq!(roles.resolve_first(HIGH_SOURCE), None);
    }

    #[test]
    fn close_source_prefers_literal_close() {
        let roles = ColumnRoleMap::from_headers(["Close", "predicted_high", "predicted_low"]);
        assert_eq!(roles.resolve_first(CLOSE_SOURCE), Some("Close"));
    }

    #[test]
    fn require_reports_all_missing_roles_and_available_columns() {
        let roles = ColumnRoleMap::from_headers(["date", "open", "close"]);
        let err = roles.require(MANDATORY_PREDICTION_ROLES).unwrap_err();
        match err {
            DatasetError::MissingColumn { missing, available } => {
                assert_eq!(missing, vec!["actual_low", "predicted_low"]);
                assert_eq!(available, vec!["close", "date", "open"]);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn require_resolves_original_spellings() {
        let roles = ColumnRoleMap::from_headers(["Company_Name", "Target", "y_true", "Y_PRED"]);
        let resolved = roles.require(DAILY_PREDICTION_ROLES).unwrap();
        assert_eq!(resolved, vec!["Company_Name", "Target", "y_true", "Y_PRED"]);
    }

    #[test]
    fn high_comparison_pair_needs_both_high_columns() {
        let both = ColumnRoleMap::from_headers([
            "actual_low",
            "predicted_low",
            "actual_high",
            "predicted_high",
        ]);
        assert_eq!(
            both.comparison_pair(ComparisonMetric::High),
            Some(("actual_high".to_string(), "predicted_high".to_string()))
        );

        // One high column alone is not enough; the low pair applies.
        let partial = ColumnRoleMap::from_headers(["actual_low", "predicted_low", "actual_high"]);
        assert_eq!(
            partial.comparison_pair(ComparisonMetric::High),
            Some(("actual_low".to_string(), "predicted_low".to_string()))
        );
    }

    #[test]
    fn low_comparison_pair_requires_both_low_columns() {
        let roles = ColumnRoleMap::from_headers(["actual_low", "close"]);
        assert_eq!(roles.comparison_pair(ComparisonMetric::Low), None);
    }
}
