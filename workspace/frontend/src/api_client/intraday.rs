use chrono::NaiveDate;
use common::IntradayView;

use crate::api_client;

pub async fn get_companies() -> Result<Vec<String>, String> {
    api_client::get("/intraday/companies").await
}

pub async fn get_company_view(
    company: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    comparison: &str,
) -> Result<IntradayView, String> {
    log::trace!(
        "Fetching intraday view for {} ({} to {}, comparison={})",
        company,
        start_date.map_or_else(|| "open".to_string(), |d| d.to_string()),
        end_date.map_or_else(|| "open".to_string(), |d| d.to_string()),
        comparison
    );

    let mut url = format!(
        "/intraday/companies/{}/view?comparison={}",
        company, comparison
    );
    if let Some(start) = start_date {
        url.push_str(&format!("&start_date={}", start));
    }
    if let Some(end) = end_date {
        url.push_str(&format!("&end_date={}", end));
    }

    let result = api_client::get::<IntradayView>(&url).await;

    if let Err(ref e) = result {
        log::error!("Failed to fetch intraday view: {}", e);
    } else {
        log::info!("Successfully fetched intraday view for {}", company);
    }

    result
}
