use crate::hooks::use_app;
use crate::pages::*;
use ekklesia::Workspace;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/sorteio/nomes")]
    NameDraw,
    #[at("/sorteio/numeros")]
    NumberDraw,
    #[at("/sorteio/bingo")]
    Bingo,
    #[at("/ekklesia/login")]
    Login,
    /// Lands staff on their department's screen
    #[at("/ekklesia")]
    Operations,
    #[at("/ekklesia/checkin")]
    Checkpoints,
    #[at("/ekklesia/pdv")]
    PointOfSale,
    #[at("/ekklesia/pedidos")]
    Orders,
    #[at("/ekklesia/reunioes")]
    Meetings,
    #[at("/ekklesia/painel")]
    Dashboard,
    #[at("/ekklesia/loja")]
    Checkout,
    #[at("/ekklesia/consulta")]
    Lookup,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn for_workspace(workspace: Workspace) -> Self {
        match workspace {
            Workspace::Checkpoint => Route::Checkpoints,
            Workspace::PointOfSale => Route::PointOfSale,
            Workspace::Orders => Route::Orders,
            Workspace::Dashboard => Route::Dashboard,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RequireStaffProps {
    pub workspace: Workspace,
    pub children: Html,
}

/// Renders children only for a logged-in staff member allowed into
/// `workspace`; everyone else is redirected.
#[function_component(RequireStaff)]
pub fn require_staff(props: &RequireStaffProps) -> Html {
    let app = use_app();
    match &app.state.staff {
        None => html! { <Redirect<Route> to={Route::Login} /> },
        Some(staff) if !staff.may_access(props.workspace) => {
            html! { <Redirect<Route> to={Route::for_workspace(staff.workspace())} /> }
        }
        Some(_) => props.children.clone(),
    }
}

#[function_component(Operations)]
fn operations() -> Html {
    let app = use_app();
    let target = match &app.state.staff {
        Some(staff) => Route::for_workspace(staff.workspace()),
        None => Route::Login,
    };
    html! { <Redirect<Route> to={target} /> }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::NameDraw => html! { <NameDrawPage /> },
        Route::NumberDraw => html! { <NumberDrawPage /> },
        Route::Bingo => html! { <BingoPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Operations => html! { <Operations /> },
        Route::Checkpoints => html! {
            <RequireStaff workspace={Workspace::Checkpoint}><CheckpointPage /></RequireStaff>
        },
        Route::PointOfSale => html! {
            <RequireStaff workspace={Workspace::PointOfSale}><PointOfSalePage /></RequireStaff>
        },
        Route::Orders => html! {
            <RequireStaff workspace={Workspace::Orders}><OrdersPage /></RequireStaff>
        },
        Route::Meetings => html! {
            <RequireStaff workspace={Workspace::Dashboard}><MeetingsPage /></RequireStaff>
        },
        Route::Dashboard => html! {
            <RequireStaff workspace={Workspace::Dashboard}><DashboardPage /></RequireStaff>
        },
        Route::Checkout => html! { <CheckoutPage /> },
        Route::Lookup => html! { <LookupPage /> },
        Route::NotFound => html! {
            <div class="container">
                <h1>{ "Página não encontrada" }</h1>
                <Link<Route> to={Route::Home}>{ "Voltar ao início" }</Link<Route>>
            </div>
        },
    }
}
