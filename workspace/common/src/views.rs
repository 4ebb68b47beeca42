use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::range::DateRange;

/// Which actual/predicted column pair the trend chart compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMetric {
    #[default]
    Low,
    High,
}

impl ComparisonMetric {
    /// Chart heading shown above the trend for this comparison.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Low => "Actual vs Predicted Sell Price (Low)",
            Self::High => "Actual vs Predicted Sell Price (High)",
        }
    }
}

/// One point on an actual-vs-predicted trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrendPoint {
    /// X-axis label: ISO date when the source has a date column, row
    /// ordinal otherwise
    pub label: String,
    pub actual: Option<f64>,
    pub predicted: Option<f64>,
}

/// A two-series trend ready for chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrendSeries {
    /// Chart heading
    pub title: String,
    /// Legend name of the actual-value series
    pub actual_name: String,
    /// Legend name of the predicted-value series
    pub predicted_name: String,
    pub points: Vec<TrendPoint>,
}

/// Latest-day summary values, preformatted for display ("N/A" when the
/// backing column is absent or null).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LatestQuote {
    pub high: String,
    pub low: String,
    pub close: String,
}

/// Model accuracy scores for one (company, target), preformatted for
/// display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModelScores {
    pub rmse: String,
    pub mae: String,
    pub mape: String,
    pub r2: String,
}

/// A dataframe flattened into displayable header and cell strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the intraday (per-company file) dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IntradayView {
    pub company: String,
    /// Header of the detected date column, if any
    pub date_column: Option<String>,
    /// Min/max dates present in the file, for date-picker bounds
    pub available: Option<DateRange>,
    /// Most recent buy/sell signal, when the file carries labels
    pub latest_signal: Option<String>,
    pub latest: LatestQuote,
    pub trend: TrendSeries,
    pub rows: RawTable,
}

/// Selector options for the daily (combined file) dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyFilters {
    pub companies: Vec<String>,
    pub targets: Vec<String>,
    pub models: Vec<String>,
}

/// Everything the daily dashboard page renders for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyView {
    pub company: String,
    pub target: String,
    pub model: String,
    pub trend: TrendSeries,
    /// Absent when the metrics file has no row for the company
    pub scores: Option<ModelScores>,
    pub rows: RawTable,
    /// Raw metrics row for the company, when present
    pub metrics_row: Option<RawTable>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_metric_uses_lowercase_wire_format() {
        assert_eq!(
            serde_json::to_string(&ComparisonMetric::High).unwrap(),
            r#""high""#
        );
        let parsed: ComparisonMetric = serde_json::from_str(r#""low""#).unwrap();
        assert_eq!(parsed, ComparisonMetric::Low);
    }

    #[test]
    fn comparison_metric_defaults_to_low() {
        assert_eq!(ComparisonMetric::default(), ComparisonMetric::Low);
        assert!(ComparisonMetric::Low.title().ends_with("(Low)"));
        assert!(ComparisonMetric::High.title().ends_with("(High)"));
    }

    #[test]
    fn trend_point_keeps_nulls_for_gaps() {
        let point = TrendPoint {
            label: "2023-01-01".to_string(),
            actual: None,
            predicted: Some(1.5),
        };
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(
            json,
            r#"{"label":"2023-01-01","actual":null,"predicted":1.5}"#
        );
    }
}
