use common::RawTable;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RawTableProps {
    pub table: RawTable,
}

/// Full raw-data table, as loaded (and filtered) from the CSV source.
#[function_component(RawTableView)]
pub fn raw_table_view(props: &RawTableProps) -> Html {
    if props.table.is_empty() {
        return html! { <p class="text-sm opacity-60">{"No rows to display."}</p> };
    }

    html! {
        <div class="overflow-x-auto">
            <table class="table table-zebra table-sm">
                <thead>
                    <tr>
                        { for props.table.columns.iter().map(|column| html! { <th>{column}</th> }) }
                    </tr>
                </thead>
                <tbody>
                    { for props.table.rows.iter().map(|row| html! {
                        <tr>
                            { for row.iter().map(|cell| html! { <td>{cell}</td> }) }
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}
