use crate::hooks::use_app;
use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let app = use_app();

    html! {
        <div class="container home">
            <h1>{ "Ekklesia" }</h1>
            <section class="card-grid">
                <Link<Route> to={Route::NameDraw} classes="card">
                    <h2>{ "Sorteio de Nomes" }</h2>
                    <p>{ "Cole a lista de participantes e sorteie um nome." }</p>
                </Link<Route>>
                <Link<Route> to={Route::NumberDraw} classes="card">
                    <h2>{ "Sorteio de Números" }</h2>
                    <p>{ "Sorteie um número dentro de um intervalo." }</p>
                </Link<Route>>
                <Link<Route> to={Route::Bingo} classes="card">
                    <h2>{ "Bingo" }</h2>
                    <p>{ "Bolas de 1 a 75, sem repetição." }</p>
                </Link<Route>>
            </section>
            <section class="card-grid">
                <Link<Route> to={Route::Checkout} classes="card">
                    <h2>{ "Loja da conferência" }</h2>
                    <p>{ "Faça seu pedido e envie o comprovante." }</p>
                </Link<Route>>
                <Link<Route> to={Route::Lookup} classes="card">
                    <h2>{ "Meus pedidos" }</h2>
                    <p>{ "Consulte pedidos e sua credencial QR." }</p>
                </Link<Route>>
                if app.state.is_authenticated() {
                    <Link<Route> to={Route::Operations} classes="card staff">
                        <h2>{ "Área da equipe" }</h2>
                        <p>{ "Ir para a tela do seu departamento." }</p>
                    </Link<Route>>
                } else {
                    <Link<Route> to={Route::Login} classes="card staff">
                        <h2>{ "Equipe" }</h2>
                        <p>{ "Entrar com e-mail e senha." }</p>
                    </Link<Route>>
                }
            </section>
        </div>
    }
}
