//! Main module for the Ekklesia front-end using Yew.
//! Loads persisted state once, provides it to the tree and wires the router.

use ekklesia::session::BrowserStorage;
use ekklesia::{AppAction, AppState};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

mod chart;
mod components;
mod config;
mod hooks;
mod logging;
mod pages;
mod qr;
mod routes;

use components::NavBar;
use routes::{switch, Route};

/// Application state behind the context provider. Every action is persisted
/// to local storage as it is reduced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedState {
    pub state: AppState,
}

impl Reducible for SharedState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(SharedState {
            state: self.state.apply(action, &BrowserStorage),
        })
    }
}

pub type AppContext = UseReducerHandle<SharedState>;

/// Root component: single read of local storage, theme applied to `<html>`.
#[function_component]
pub fn App() -> Html {
    let app = use_reducer(|| SharedState {
        state: AppState::load(&BrowserStorage),
    });

    use_effect_with(app.state.theme, |theme| {
        if gloo_utils::document_element()
            .set_attribute("data-theme", theme.as_str())
            .is_err()
        {
            log::warn!("Could not apply theme {}", theme);
        }
        || ()
    });

    html! {
        <ContextProvider<AppContext> context={app}>
            <BrowserRouter>
                <NavBar />
                <main>
                    <Switch<Route> render={switch} />
                </main>
            </BrowserRouter>
        </ContextProvider<AppContext>>
    }
}

/// Entry point: installs panic and log hooks, then renders the App.
fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    yew::Renderer::<App>::new().render();
}
