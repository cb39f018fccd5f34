use crate::components::StatusLine;
use crate::hooks::{use_api, use_app};
use crate::routes::Route;
use ekklesia::api::LoginRequest;
use ekklesia::utils::is_valid_email;
use ekklesia::AppAction;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let app = use_app();
    let api = use_api();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let loading = use_state(|| false);
    let error = use_state(|| None::<String>);

    if app.state.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Operations} /> };
    }

    let bind = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            handle.set(input.value());
        })
    };

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !is_valid_email(&email) || password.is_empty() {
                error.set(Some("Informe e-mail e senha".to_string()));
                return;
            }
            let request = LoginRequest {
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            let api = api.clone();
            let app = app.clone();
            let loading = loading.clone();
            let error = error.clone();
            loading.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api.login(&request).await {
                    Ok(user) => app.dispatch(AppAction::Login(user)),
                    Err(e) => {
                        let message = if e.is_unauthorized() {
                            "E-mail ou senha incorretos".to_string()
                        } else {
                            e.to_string()
                        };
                        error.set(Some(message));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="container narrow">
            <h1>{ "Entrar" }</h1>
            <form {onsubmit}>
                <div class="form-group">
                    <label for="email">{ "E-mail" }</label>
                    <input id="email" type="email" autocomplete="username"
                        value={(*email).clone()} oninput={bind(&email)} />
                </div>
                <div class="form-group">
                    <label for="password">{ "Senha" }</label>
                    <input id="password" type="password" autocomplete="current-password"
                        value={(*password).clone()} oninput={bind(&password)} />
                </div>
                <button class="btn-primary" type="submit" disabled={*loading}>
                    { if *loading { "Entrando..." } else { "Entrar" } }
                </button>
                <StatusLine error={(*error).clone()} />
            </form>
        </div>
    }
}
