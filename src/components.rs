//! Shared Yew view components.
//!
//! Most of these are stateless and render purely from props; `QrCode` and
//! `QrScanner` bridge to the JavaScript helpers in their effects.

use crate::config::SCANNER_ELEMENT_ID;
use crate::hooks::use_app;
use crate::qr::{render_qr, DecodeFilter, Scanner};
use crate::routes::Route;
use ekklesia::{AppAction, Countdown, DrawValue, Theme, Workspace};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

/// Big display of the current draw: countdown, result or validation message.
#[derive(Properties, PartialEq)]
pub struct DrawStageProps {
    pub result: Option<DrawValue>,
    pub remaining: Option<u32>,
    pub message: Option<String>,
    #[prop_or_default]
    pub placeholder: AttrValue,
}

#[function_component(DrawStage)]
pub fn draw_stage(props: &DrawStageProps) -> Html {
    let content = if let Some(seconds) = props.remaining {
        html! { <span class="draw-countdown">{ seconds }</span> }
    } else if let Some(message) = &props.message {
        html! { <span class="draw-message">{ message }</span> }
    } else if let Some(result) = &props.result {
        html! { <span class="draw-result">{ result.to_string() }</span> }
    } else {
        html! { <span class="draw-placeholder">{ props.placeholder.clone() }</span> }
    };

    html! {
        <div class="draw-stage" aria-live="polite">{ content }</div>
    }
}

/// Countdown toggle and seconds field.
#[derive(Properties, PartialEq)]
pub struct CountdownControlsProps {
    pub countdown: Countdown,
    pub disabled: bool,
    pub onchange: Callback<Countdown>,
}

#[function_component(CountdownControls)]
pub fn countdown_controls(props: &CountdownControlsProps) -> Html {
    let current = props.countdown;

    let on_toggle = {
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            onchange.emit(Countdown::new(input.checked(), current.seconds()));
        })
    };
    let on_seconds = {
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let seconds = Countdown::parse_seconds(&input.value());
            input.set_value(&seconds.to_string());
            onchange.emit(Countdown::new(current.enabled(), seconds));
        })
    };

    html! {
        <div class="form-row countdown-controls">
            <label class="checkbox-group">
                <input type="checkbox"
                    checked={current.enabled()}
                    disabled={props.disabled}
                    onchange={on_toggle}
                />
                { "Contagem regressiva" }
            </label>
            if current.enabled() {
                <label>
                    { "Segundos:" }
                    <input type="number"
                        min={ekklesia::defaults::MIN_COUNTDOWN_SECONDS.to_string()}
                        max={ekklesia::defaults::MAX_COUNTDOWN_SECONDS.to_string()}
                        value={current.seconds().to_string()}
                        disabled={props.disabled}
                        onchange={on_seconds}
                    />
                </label>
            }
        </div>
    }
}

/// Yes/no dialog used before destructive actions.
#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub open: bool,
    pub title: AttrValue,
    pub message: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    if !props.open {
        return html! {};
    }
    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <h3>{ props.title.clone() }</h3>
                <p>{ props.message.clone() }</p>
                <div class="modal-actions">
                    <button class="btn-secondary" onclick={props.on_cancel.reform(|_| ())}>
                        { "Cancelar" }
                    </button>
                    <button class="btn-danger" onclick={props.on_confirm.reform(|_| ())}>
                        { "Confirmar" }
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Inline error or success line under a form.
#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    pub error: Option<String>,
    #[prop_or_default]
    pub success: Option<String>,
}

#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    match (&props.error, &props.success) {
        (Some(err), _) => html! { <div class="input-error">{ err }</div> },
        (None, Some(ok)) => html! { <div class="input-success">{ ok }</div> },
        _ => html! {},
    }
}

/// QR symbol for an identifier, with the literal text underneath.
#[derive(Properties, PartialEq)]
pub struct QrCodeProps {
    pub value: AttrValue,
    #[prop_or(200)]
    pub size: u32,
    #[prop_or_default]
    pub caption: Option<AttrValue>,
}

#[function_component(QrCode)]
pub fn qr_code(props: &QrCodeProps) -> Html {
    let element_id = format!("qr-{}", props.value.replace(|c: char| !c.is_ascii_alphanumeric(), "-"));
    {
        let element_id = element_id.clone();
        use_effect_with((props.value.clone(), props.size), move |(value, size)| {
            render_qr(&element_id, value, *size);
            || ()
        });
    }
    html! {
        <figure class="qr-code">
            <div id={element_id}></div>
            <figcaption>{ props.caption.clone().unwrap_or_else(|| props.value.clone()) }</figcaption>
        </figure>
    }
}

/// Camera scanner that emits each newly decoded string while mounted.
#[derive(Properties, PartialEq)]
pub struct QrScannerProps {
    pub on_scan: Callback<String>,
}

#[function_component(QrScanner)]
pub fn qr_scanner(props: &QrScannerProps) -> Html {
    let error = use_state(|| None::<String>);
    let scanner: Rc<RefCell<Option<Scanner>>> = use_mut_ref(|| None);
    {
        let on_scan = props.on_scan.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            let mut filter = DecodeFilter::default();
            let on_decoded = move |text: String| {
                if filter.accept(&text) {
                    on_scan.emit(text);
                }
            };
            match Scanner::start(SCANNER_ELEMENT_ID, on_decoded) {
                Ok(started) => *scanner.borrow_mut() = Some(started),
                Err(e) => {
                    warn!("QR scanner failed to start: {}", e);
                    error.set(Some(e));
                }
            }
            move || drop(scanner.borrow_mut().take())
        });
    }
    html! {
        <div class="qr-scanner">
            <div id={SCANNER_ELEMENT_ID}></div>
            <StatusLine error={(*error).clone()} />
        </div>
    }
}

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let app = use_app();
    let label = match app.state.theme {
        Theme::Light => "🌙",
        Theme::Dark => "☀️",
    };
    let onclick = Callback::from(move |_| app.dispatch(AppAction::ToggleTheme));
    html! {
        <button class="theme-toggle" title="Alternar tema" {onclick}>{ label }</button>
    }
}

/// Top navigation; operational links only appear for the matching staff.
#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let app = use_app();
    let staff = app.state.staff.clone();
    let allowed = |workspace: Workspace| staff.as_ref().is_some_and(|s| s.may_access(workspace));

    let on_logout = {
        let app = app.clone();
        Callback::from(move |_| app.dispatch(AppAction::Logout))
    };

    html! {
        <nav class="navbar">
            <Link<Route> to={Route::Home} classes="brand">{ "Ekklesia" }</Link<Route>>
            <Link<Route> to={Route::NameDraw}>{ "Nomes" }</Link<Route>>
            <Link<Route> to={Route::NumberDraw}>{ "Números" }</Link<Route>>
            <Link<Route> to={Route::Bingo}>{ "Bingo" }</Link<Route>>
            if allowed(Workspace::Checkpoint) {
                <Link<Route> to={Route::Checkpoints}>{ "Check-in" }</Link<Route>>
            }
            if allowed(Workspace::PointOfSale) {
                <Link<Route> to={Route::PointOfSale}>{ "PDV" }</Link<Route>>
            }
            if allowed(Workspace::Orders) {
                <Link<Route> to={Route::Orders}>{ "Pedidos" }</Link<Route>>
            }
            if allowed(Workspace::Dashboard) {
                <Link<Route> to={Route::Meetings}>{ "Reuniões" }</Link<Route>>
                <Link<Route> to={Route::Dashboard}>{ "Painel" }</Link<Route>>
            }
            <Link<Route> to={Route::Checkout}>{ "Loja" }</Link<Route>>
            <Link<Route> to={Route::Lookup}>{ "Consulta" }</Link<Route>>
            <span class="navbar-spacer"></span>
            <ThemeToggle />
            if let Some(user) = &staff {
                <span class="navbar-user">{ format!("{} · {}", user.name, user.department) }</span>
                <button class="btn-secondary small" onclick={on_logout}>{ "Sair" }</button>
            } else {
                <Link<Route> to={Route::Login}>{ "Entrar" }</Link<Route>>
            }
        </nav>
    }
}
