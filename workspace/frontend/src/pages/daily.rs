use common::{DailyFilters, DailyView};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::api_client;
use crate::components::charts::TrendChart;
use crate::components::stats::{StatGrid, StatItem};
use crate::components::tables::RawTableView;
use crate::hooks::FetchState;

/// Daily prediction dashboard over the combined predictions and
/// metrics files: company/target/model selectors, accuracy scores,
/// trend chart and raw data.
#[function_component(DailyDashboard)]
pub fn daily_dashboard() -> Html {
    let filters = use_state(|| FetchState::<DailyFilters>::Loading);
    let company = use_state(|| Option::<String>::None);
    let target = use_state(|| Option::<String>::None);
    let model = use_state(|| Option::<String>::None);
    let view = use_state(FetchState::<DailyView>::default);

    // Discover the selector options on mount.
    {
        let filters = filters.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api_client::daily::get_filters().await {
                    Ok(data) => filters.set(FetchState::Success(data)),
                    Err(err) => filters.set(FetchState::Error(err)),
                }
            });
            || ()
        });
    }

    // Default every selector to its first option.
    {
        let company = company.clone();
        let target = target.clone();
        let model = model.clone();
        use_effect_with(filters.clone(), move |filters| {
            if let FetchState::Success(options) = &**filters {
                if company.is_none() {
                    company.set(options.companies.first().cloned());
                }
                if target.is_none() {
                    target.set(options.targets.first().cloned());
                }
                if model.is_none() {
                    model.set(options.models.first().cloned());
                }
            }
            || ()
        });
    }

    // Fetch the view whenever the selection changes.
    {
        let view = view.clone();
        use_effect_with(
            (company.clone(), target.clone(), model.clone()),
            move |(company, target, model)| {
                if let (Some(company), Some(target), Some(model)) =
                    ((**company).clone(), (**target).clone(), (**model).clone())
                {
                    view.set(FetchState::Loading);
                    wasm_bindgen_futures::spawn_local(async move {
                        match api_client::daily::get_view(&company, &target, &model).await {
                            Ok(data) => view.set(FetchState::Success(data)),
                            Err(err) => view.set(FetchState::Error(err)),
                        }
                    });
                }
                || ()
            },
        );
    }

    let select = |label: &str,
                  options: Vec<String>,
                  current: &Option<String>,
                  state: UseStateHandle<Option<String>>| {
        let onchange = Callback::from(move |e: Event| {
            state.set(Some(e.target_unchecked_into::<HtmlSelectElement>().value()));
        });
        html! {
            <label class="form-control">
                <span class="label-text">{label.to_string()}</span>
                <select class="select select-bordered" {onchange}>
                    { for options.iter().map(|option| html! {
                        <option selected={Some(option) == current.as_ref()}>{option}</option>
                    }) }
                </select>
            </label>
        }
    };

    let sidebar = match &*filters {
        FetchState::Success(options) => html! {
            <aside class="w-64 shrink-0 space-y-4">
                <h2 class="font-semibold">{"Filters"}</h2>
                { select("Company", options.companies.clone(), &company, company.clone()) }
                { select("Target (OHLC)", options.targets.clone(), &target, target.clone()) }
                { select("Model", options.models.clone(), &model, model.clone()) }
                { if let Some(model) = &*model {
                    html! { <p class="text-sm">{"Selected model: "}<strong>{model}</strong></p> }
                } else {
                    html! {}
                } }
            </aside>
        },
        FetchState::Error(err) => html! {
            <aside class="w-64 shrink-0"><div class="alert alert-error">{err}</div></aside>
        },
        _ => html! {
            <aside class="w-64 shrink-0"><span class="loading loading-spinner"></span></aside>
        },
    };

    let content = match &*view {
        FetchState::NotStarted | FetchState::Loading => html! {
            <div class="flex justify-center p-12"><span class="loading loading-spinner loading-lg"></span></div>
        },
        FetchState::Error(err) => html! {
            <div class="alert alert-warning">{err}</div>
        },
        FetchState::Success(data) => {
            let scores = match &data.scores {
                Some(scores) => html! {
                    <>
                        <h2 class="text-lg font-semibold mt-6">{"Model Metrics"}</h2>
                        <StatGrid items={vec![
                            StatItem::new("RMSE", scores.rmse.clone()),
                            StatItem::new("MAE", scores.mae.clone()),
                            StatItem::new("MAPE", scores.mape.clone()),
                            StatItem::new("R2", scores.r2.clone()),
                        ]} />
                    </>
                },
                None => html! {
                    <div class="alert alert-warning mt-6">{"No metrics found for this company in metrics file."}</div>
                },
            };
            html! {
                <div class="grow space-y-4">
                    <h2 class="text-xl font-semibold">{&data.trend.title}</h2>
                    <p class="text-sm opacity-70">{"Trend of actual vs predicted values on the test set."}</p>
                    <TrendChart id="chart-daily-trend" series={data.trend.clone()} />
                    { scores }
                    <details class="collapse collapse-arrow bg-base-100 shadow">
                        <summary class="collapse-title">{"Show raw prediction data"}</summary>
                        <div class="collapse-content">
                            <RawTableView table={data.rows.clone()} />
                        </div>
                    </details>
                    { if let Some(metrics_row) = &data.metrics_row {
                        html! {
                            <details class="collapse collapse-arrow bg-base-100 shadow">
                                <summary class="collapse-title">{"Show metrics row for this company"}</summary>
                                <div class="collapse-content">
                                    <RawTableView table={metrics_row.clone()} />
                                </div>
                            </details>
                        }
                    } else {
                        html! {}
                    } }
                </div>
            }
        }
    };

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-4">{"Stock Price Prediction Dashboard"}</h1>
            <div class="flex gap-8">
                { sidebar }
                { content }
            </div>
        </div>
    }
}
