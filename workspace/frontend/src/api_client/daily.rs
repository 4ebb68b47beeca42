use common::{DailyFilters, DailyView};

use crate::api_client;

pub async fn get_filters() -> Result<DailyFilters, String> {
    api_client::get("/daily/filters").await
}

pub async fn get_view(company: &str, target: &str, model: &str) -> Result<DailyView, String> {
    log::trace!(
        "Fetching daily view for company={}, target={}, model={}",
        company,
        target,
        model
    );

    let url = format!(
        "/daily/view?company={}&target={}&model={}",
        company, target, model
    );
    let result = api_client::get::<DailyView>(&url).await;

    if let Err(ref e) = result {
        log::error!("Failed to fetch daily view: {}", e);
    } else {
        log::info!("Successfully fetched daily view for {}", company);
    }

    result
}
