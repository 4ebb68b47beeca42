use chrono::NaiveDate;
use common::IntradayView;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api_client;
use crate::components::charts::TrendChart;
use crate::components::stats::{StatGrid, StatItem};
use crate::components::tables::RawTableView;
use crate::hooks::FetchState;

fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Per-company intraday prediction dashboard: company selector, date
/// range, Low/High comparison toggle, latest metrics, trend chart and
/// raw data.
#[function_component(IntradayDashboard)]
pub fn intraday_dashboard() -> Html {
    let companies = use_state(|| FetchState::<Vec<String>>::Loading);
    let selected = use_state(|| Option::<String>::None);
    let comparison = use_state(|| "low".to_string());
    let start_date = use_state(String::new);
    let end_date = use_state(String::new);
    let view = use_state(FetchState::<IntradayView>::default);

    // Discover companies on mount.
    {
        let companies = companies.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api_client::intraday::get_companies().await {
                    Ok(data) => companies.set(FetchState::Success(data)),
                    Err(err) => companies.set(FetchState::Error(err)),
                }
            });
            || ()
        });
    }

    // Default to the first company once the listing arrives.
    {
        let selected = selected.clone();
        use_effect_with(companies.clone(), move |companies| {
            if selected.is_none() {
                if let FetchState::Success(list) = &**companies {
                    if let Some(first) = list.first() {
                        selected.set(Some(first.clone()));
                    }
                }
            }
            || ()
        });
    }

    // Fetch the view whenever a control changes.
    {
        let view = view.clone();
        use_effect_with(
            (
                selected.clone(),
                comparison.clone(),
                start_date.clone(),
                end_date.clone(),
            ),
            move |(selected, comparison, start_date, end_date)| {
                if let Some(company) = (**selected).clone() {
                    let comparison = (**comparison).clone();
                    let start = parse_date(start_date);
                    let end = parse_date(end_date);
                    view.set(FetchState::Loading);
                    wasm_bindgen_futures::spawn_local(async move {
                        match api_client::intraday::get_company_view(
                            &company, start, end, &comparison,
                        )
                        .await
                        {
                            Ok(data) => view.set(FetchState::Success(data)),
                            Err(err) => view.set(FetchState::Error(err)),
                        }
                    });
                }
                || ()
            },
        );
    }

    let on_company_change = {
        let selected = selected.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            selected.set(Some(value));
        })
    };
    let on_comparison_change = {
        let comparison = comparison.clone();
        Callback::from(move |e: Event| {
            comparison.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_start_change = {
        let start_date = start_date.clone();
        Callback::from(move |e: Event| {
            start_date.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_end_change = {
        let end_date = end_date.clone();
        Callback::from(move |e: Event| {
            end_date.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let sidebar = html! {
        <aside class="w-64 shrink-0 space-y-4">
            <h2 class="font-semibold">{"Filters"}</h2>
            <label class="form-control">
                <span class="label-text">{"Select company"}</span>
                <select class="select select-bordered" onchange={on_company_change}>
                    { match &*companies {
                        FetchState::Success(list) => list.iter().map(|company| html! {
                            <option selected={Some(company) == (*selected).as_ref()}>{company}</option>
                        }).collect::<Html>(),
                        _ => html! {},
                    } }
                </select>
            </label>
            <label class="form-control">
                <span class="label-text">{"Start date"}</span>
                <input type="date" class="input input-bordered" value={(*start_date).clone()} onchange={on_start_change} />
            </label>
            <label class="form-control">
                <span class="label-text">{"End date"}</span>
                <input type="date" class="input input-bordered" value={(*end_date).clone()} onchange={on_end_change} />
            </label>
            <div>
                <span class="label-text">{"Comparison metric"}</span>
                { for ["low", "high"].iter().map(|option| html! {
                    <label class="label cursor-pointer justify-start gap-2">
                        <input
                            type="radio"
                            name="comparison"
                            class="radio"
                            value={*option}
                            checked={*comparison == *option}
                            onchange={on_comparison_change.clone()}
                        />
                        <span>{option.to_uppercase()}</span>
                    </label>
                }) }
            </div>
        </aside>
    };

    let content = match &*view {
        FetchState::NotStarted | FetchState::Loading => html! {
            <div class="flex justify-center p-12"><span class="loading loading-spinner loading-lg"></span></div>
        },
        FetchState::Error(err) => html! {
            <div class="alert alert-error">{err}</div>
        },
        FetchState::Success(data) => html! {
            <div class="grow space-y-4">
                <h2 class="text-xl font-semibold text-amber-500">{format!("Predictions for {}", data.company)}</h2>
                { if let Some(signal) = &data.latest_signal {
                    html! { <p class="text-lg">{"Latest Signal: "}<strong>{signal}</strong></p> }
                } else {
                    html! {}
                } }
                <StatGrid items={vec![
                    StatItem::new("Latest high", data.latest.high.clone()),
                    StatItem::new("Latest low", data.latest.low.clone()),
                    StatItem::new("Latest close", data.latest.close.clone()),
                ]} />
                <TrendChart id="chart-intraday-trend" series={data.trend.clone()} />
                <h2 class="text-lg font-semibold text-amber-500 mt-6">{"Raw data"}</h2>
                <RawTableView table={data.rows.clone()} />
            </div>
        },
    };

    html! {
        <div>
            <h1 class="text-2xl font-bold text-sky-400 mb-4">{"Intraday Stock Prediction Dashboard"}</h1>
            <div class="flex gap-8">
                { sidebar }
                { content }
            </div>
        </div>
    }
}
