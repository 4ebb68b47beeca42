//! Conversion of filtered DataFrames into the transport types the
//! dashboard pages render.

use common::{RawTable, TrendPoint, TrendSeries};
use dataset::error::{DatasetError, Result};
use dataset::filter;
use polars::prelude::{AnyValue, DataFrame, DataType};

/// Flatten a DataFrame into displayable header and cell strings.
pub fn frame_to_table(frame: &DataFrame) -> Result<RawTable> {
    let columns: Vec<String> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let cells = frame.get_columns();
    let mut rows = Vec::with_capacity(frame.height());
    for i in 0..frame.height() {
        let mut row = Vec::with_capacity(cells.len());
        for column in cells {
            let value = column
                .get(i)
                .map_err(|e| DatasetError::Frame(format!("row {}: {}", i, e)))?;
            row.push(any_value_to_string(value));
        }
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

fn any_value_to_string(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => format!("{}", other),
    }
}

/// A numeric column as f64 values, nulls preserved.
pub fn numeric_values(frame: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let series = frame
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|_| {
            DatasetError::Frame(format!("column '{column}' is not numeric"))
        })?;
    Ok(series.f64()?.into_iter().collect())
}

/// Last value of a numeric column; `None` on an empty frame or a
/// trailing null. Rows are already date-sorted by the loader, so the
/// last row is the latest observation.
pub fn latest_value(frame: &DataFrame, column: &str) -> Result<Option<f64>> {
    Ok(numeric_values(frame, column)?.last().copied().flatten())
}

/// Last value of a column rendered as a display string.
pub fn latest_label(frame: &DataFrame, column: &str) -> Result<Option<String>> {
    if frame.height() == 0 {
        return Ok(None);
    }
    let value = frame
        .column(column)?
        .get(frame.height() - 1)
        .map_err(|e| DatasetError::Frame(format!("column '{column}': {e}")))?;
    Ok(match value {
        AnyValue::Null => None,
        other => Some(any_value_to_string(other)),
    })
}

/// X-axis labels: ISO dates when a date column exists, row ordinals
/// otherwise.
pub fn axis_labels(frame: &DataFrame, date_column: Option<&str>) -> Result<Vec<String>> {
    match date_column {
        Some(column) => Ok(filter::calendar_dates(frame, column)?
            .into_iter()
            .map(|date| match date {
                Some(date) => date.to_string(),
                None => String::new(),
            })
            .collect()),
        None => Ok((0..frame.height()).map(|i| i.to_string()).collect()),
    }
}

/// Assemble the two-series trend payload for a chart.
pub fn trend_series(
    frame: &DataFrame,
    date_column: Option<&str>,
    title: &str,
    actual_column: &str,
    predicted_column: &str,
    actual_name: &str,
    predicted_name: &str,
) -> Result<TrendSeries> {
    let labels = axis_labels(frame, date_column)?;
    let actual = numeric_values(frame, actual_column)?;
    let predicted = numeric_values(frame, predicted_column)?;

    let points = labels
        .into_iter()
        .zip(actual)
        .zip(predicted)
        .map(|((label, actual), predicted)| TrendPoint {
            label,
            actual,
            predicted,
        })
        .collect();

    Ok(TrendSeries {
        title: title.to_string(),
        actual_name: actual_name.to_string(),
        predicted_name: predicted_name.to_string(),
        points,
    })
}
