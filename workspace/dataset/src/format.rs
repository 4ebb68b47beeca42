//! Display formatting for dashboard scalars.

/// Placeholder for values the source files do not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Price-like values: 2 decimal places.
pub fn price(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Accuracy scores (RMSE, MAE, R2): 4 decimal places.
pub fn score(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.4}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Percentage scores (MAPE): 2 decimal places with a unit suffix.
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.2} %"),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_use_two_decimals() {
        assert_eq!(price(Some(104.0)), "104.00");
        assert_eq!(price(Some(98.765)), "98.77");
        assert_eq!(price(None), "N/A");
    }

    #[test]
    fn scores_use_four_decimals() {
        assert_eq!(score(Some(1.2345)), "1.2345");
        assert_eq!(score(Some(0.98)), "0.9800");
        assert_eq!(score(None), "N/A");
    }

    #[test]
    fn percentages_use_two_decimals_and_a_suffix() {
        assert_eq!(percent(Some(3.2)), "3.20 %");
        assert_eq!(percent(None), "N/A");
    }
}
