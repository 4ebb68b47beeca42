use common::TrendSeries;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    pub fn newPlot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    pub id: String,
    pub series: TrendSeries,
}

/// Actual-vs-predicted line chart. Null values become gaps, matching
/// how the backend reports missing observations.
#[function_component(TrendChart)]
pub fn trend_chart(props: &TrendChartProps) -> Html {
    let chart_ref = use_node_ref();

    {
        let series = props.series.clone();
        use_effect_with((chart_ref.clone(), series), move |(chart_ref, series)| {
            if let Some(element) = chart_ref.cast::<Element>() {
                let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
                let actual: Vec<Option<f64>> = series.points.iter().map(|p| p.actual).collect();
                let predicted: Vec<Option<f64>> =
                    series.points.iter().map(|p| p.predicted).collect();

                let traces = serde_json::json!([
                    {
                        "x": labels,
                        "y": actual,
                        "type": "scatter",
                        "mode": "lines",
                        "line": {"color": "#22c55e"},
                        "name": series.actual_name,
                    },
                    {
                        "x": labels,
                        "y": predicted,
                        "type": "scatter",
                        "mode": "lines",
                        "line": {"color": "#3b82f6", "dash": "dot"},
                        "name": series.predicted_name,
                    }
                ]);

                let layout = serde_json::json!({
                    "margin": {"t": 10, "r": 10, "l": 50, "b": 30},
                    "paper_bgcolor": "rgba(0,0,0,0)",
                    "plot_bgcolor": "rgba(0,0,0,0)",
                    "xaxis": {"showgrid": false},
                    "yaxis": {"showgrid": true, "gridcolor": "#eee"},
                    "showlegend": true,
                    "legend": {"orientation": "h", "y": -0.2}
                });

                let config = serde_json::json!({"responsive": true, "displayModeBar": false});

                let div_id = element.id();
                if !div_id.is_empty() {
                    newPlot(
                        &div_id,
                        serde_wasm_bindgen::to_value(&traces).unwrap(),
                        serde_wasm_bindgen::to_value(&layout).unwrap(),
                        serde_wasm_bindgen::to_value(&config).unwrap(),
                    );
                }
            }
            || ()
        });
    }

    html! {
        <div>
            <h2 class="text-lg font-semibold text-amber-500 mt-6 mb-2">{&props.series.title}</h2>
            <div ref={chart_ref} id={props.id.clone()} class="chart-container" style="height: 400px;"></div>
        </div>
    }
}
