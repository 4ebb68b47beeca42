use wasm_bindgen::prelude::wasm_bindgen;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod api_client;
mod components;
pub mod hooks;
mod pages;
pub mod settings;

use pages::daily::DailyDashboard;
use pages::intraday::IntradayDashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/intraday")]
    Intraday,
    #[at("/daily")]
    Daily,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home | Route::Intraday => {
            html! { <IntradayDashboard /> }
        }
        Route::Daily => {
            html! { <DailyDashboard /> }
        }
        Route::NotFound => {
            html! { <div class="p-8 text-center">{"Page not found"}</div> }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <nav class="navbar bg-base-100 shadow mb-4">
                <span class="text-xl font-bold px-4">{"Stockdash"}</span>
                <Link<Route> to={Route::Intraday} classes="btn btn-ghost">{"Intraday"}</Link<Route>>
                <Link<Route> to={Route::Daily} classes="btn btn-ghost">{"Daily"}</Link<Route>>
            </nav>
            <main class="px-4 pb-8">
                <Switch<Route> render={switch} />
            </main>
        </BrowserRouter>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();
    wasm_logger::init(wasm_logger::Config::new(settings::get_settings().log_level));
    log::info!("Stockdash frontend starting");
    yew::Renderer::<App>::new().render();
}
