//! Row narrowing: inclusive date ranges and categorical equality.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, instrument};

use crate::error::{DatasetError, Result};

/// Calendar dates of `column`, row by row. Datetime columns are
/// truncated to their date part.
pub fn calendar_dates(frame: &DataFrame, column: &str) -> Result<Vec<Option<NaiveDate>>> {
    let series = frame.column(column)?.as_materialized_series();
    match series.dtype() {
        DataType::Date => Ok(series.date()?.as_date_iter().collect()),
        DataType::Datetime(_, _) => Ok(series
            .datetime()?
            .as_datetime_iter()
            .map(|value| value.map(|datetime| datetime.date()))
            .collect()),
        other => Err(DatasetError::Frame(format!(
            "column '{column}' has dtype {other:?}, expected a date"
        ))),
    }
}

/// Keep rows whose `date_column` value falls within [start, end], both
/// ends inclusive, at calendar-date granularity. A frame without a
/// date column passes through unfiltered; a reversed range is a
/// validation error.
#[instrument(skip(frame))]
pub fn by_date_range(
    frame: &DataFrame,
    date_column: Option<&str>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DataFrame> {
    if end < start {
        return Err(DatasetError::InvalidRange { start, end });
    }
    let Some(column) = date_column else {
        return Ok(frame.clone());
    };

    let values: Vec<bool> = calendar_dates(frame, column)?
        .into_iter()
        .map(|date| date.is_some_and(|date| start <= date && date <= end))
        .collect();
    let mask = BooleanChunked::new("mask".into(), &values);
    let filtered = frame.filter(&mask)?;
    debug!(
        "date filter kept {} of {} rows",
        filtered.height(),
        frame.height()
    );
    Ok(filtered)
}

/// Smallest and largest date present in `column`; `None` for an empty
/// or all-null column.
pub fn date_bounds(frame: &DataFrame, column: &str) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let mut min = None;
    let mut max = None;
    for date in calendar_dates(frame, column)?.into_iter().flatten() {
        min = Some(min.map_or(date, |current: NaiveDate| current.min(date)));
        max = Some(max.map_or(date, |current: NaiveDate| current.max(date)));
    }
    Ok(min.zip(max))
}

/// Keep rows whose `column` equals `value` exactly (case-sensitive).
/// An empty result is a valid outcome here; the view layer decides
/// whether it constitutes an EmptySelection.
#[instrument(skip(frame))]
pub fn by_value(frame: &DataFrame, column: &str, value: &str) -> Result<DataFrame> {
    let series = frame.column(column)?.as_materialized_series();
    let strings = series.str().map_err(|_| {
        DatasetError::Frame(format!(
            "column '{column}' has dtype {:?}, expected strings",
            series.dtype()
        ))
    })?;
    let values: Vec<bool> = strings
        .into_iter()
        .map(|cell| cell == Some(value))
        .collect();
    let mask = BooleanChunked::new("mask".into(), &values);
    Ok(frame.filter(&mask)?)
}

/// Logical AND of several equality selections.
pub fn by_values(frame: &DataFrame, selections: &[(&str, &str)]) -> Result<DataFrame> {
    let mut current = frame.clone();
    for (column, value) in selections {
        current = by_value(&current, column, value)?;
    }
    Ok(current)
}

/// Sorted distinct values of a string column.
pub fn distinct_values(frame: &DataFrame, column: &str) -> Result<Vec<String>> {
    let series = frame.column(column)?.as_materialized_series();
    let strings = series.str().map_err(|_| {
        DatasetError::Frame(format!(
            "column '{column}' has dtype {:?}, expected strings",
            series.dtype()
        ))
    })?;
    let distinct: BTreeSet<String> = strings
        .into_iter()
        .flatten()
        .map(|value| value.to_string())
        .collect();
    Ok(distinct.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::prepare_frame;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_frame() -> (DataFrame, String) {
        let frame = df! {
            "date" => ["2023-01-01", "2023-01-02", "2023-01-03"],
            "company_name" => ["Acme", "Acme", "Globex"],
            "target" => ["close", "high", "close"],
            "y_true" => [1.0, 2.0, 3.0],
        }
        .unwrap();
        let loaded = prepare_frame(frame).unwrap();
        let column = loaded.date_column.unwrap();
        (loaded.frame, column)
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let (frame, column) = sample_frame();
        let filtered = by_date_range(
            &frame,
            Some(&column),
            date(2023, 1, 2),
            date(2023, 1, 2),
        )
        .unwrap();
        assert_eq!(filtered.height(), 1);
        let companies = distinct_values(&filtered, "company_name").unwrap();
        assert_eq!(companies, vec!["Acme"]);
    }

    #[test]
    fn date_range_excludes_rows_outside() {
        let (frame, column) = sample_frame();
        let filtered = by_date_range(
            &frame,
            Some(&column),
            date(2023, 1, 2),
            date(2023, 1, 9),
        )
        .unwrap();
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let (frame, column) = sample_frame();
        let err = by_date_range(
            &frame,
            Some(&column),
            date(2023, 1, 3),
            date(2023, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRange { .. }));
    }

    #[test]
    fn frame_without_date_column_passes_through() {
        let frame = df! { "y_true" => [1.0, 2.0] }.unwrap();
        let filtered =
            by_date_range(&frame, None, date(2023, 1, 1), date(2023, 1, 2)).unwrap();
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn bounds_cover_min_and_max() {
        let (frame, column) = sample_frame();
        let bounds = date_bounds(&frame, &column).unwrap();
        assert_eq!(bounds, Some((date(2023, 1, 1), date(2023, 1, 3))));
    }

    #[test]
    fn equality_selection_is_case_sensitive() {
        let (frame, _) = sample_frame();
        let acme = by_value(&frame, "company_name", "Acme").unwrap();
        assert_eq!(acme.height(), 2);
        let lower = by_value(&frame, "company_name", "acme").unwrap();
        assert_eq!(lower.height(), 0);
    }

    #[test]
    fn combined_selection_is_a_logical_and() {
        let (frame, _) = sample_frame();
        let selected = by_values(
            &frame,
            &[("company_name", "Acme"), ("target", "close")],
        )
        .unwrap();
        assert_eq!(selected.height(), 1);

        let empty = by_values(
            &frame,
            &[("company_name", "Globex"), ("target", "high")],
        )
        .unwrap();
        assert_eq!(empty.height(), 0);
    }

    #[test]
    fn distinct_values_are_sorted_and_deduplicated() {
        let (frame, _) = sample_frame();
        assert_eq!(
            distinct_values(&frame, "company_name").unwrap(),
            vec!["Acme", "Globex"]
        );
        assert_eq!(
            distinct_values(&frame, "target").unwrap(),
            vec!["close", "high"]
        );
    }
}
