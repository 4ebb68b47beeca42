use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct StatItem {
    pub title: String,
    pub value: String,
}

impl StatItem {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct StatGridProps {
    pub items: Vec<StatItem>,
}

/// A row of scalar metric tiles ("Latest high", "RMSE", ...).
#[function_component(StatGrid)]
pub fn stat_grid(props: &StatGridProps) -> Html {
    html! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            { for props.items.iter().map(|item| {
                let value_class = if item.value == "N/A" { "stat-value text-base-300" } else { "stat-value" };
                html! {
                    <div class="stats shadow bg-base-100">
                        <div class="stat">
                            <div class="stat-title">{&item.title}</div>
                            <div class={value_class}>{&item.value}</div>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
