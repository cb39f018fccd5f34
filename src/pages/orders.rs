use crate::components::{QrScanner, StatusLine};
use crate::config::ORDERS_REFRESH_MS;
use crate::hooks::use_api;
use ekklesia::api::{ApiClient, ApiError, Order};
use ekklesia::utils::{format_brl, normalize_order_code};
use gloo_timers::callback::Interval;
use std::future::Future;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct OrderCardProps {
    pub order: Order,
    #[prop_or_default]
    pub on_pay: Option<Callback<String>>,
    #[prop_or_default]
    pub on_reject: Option<Callback<String>>,
    #[prop_or_default]
    pub on_deliver: Option<Callback<String>>,
}

/// One order with whichever actions its status allows.
#[function_component(OrderCard)]
pub fn order_card(props: &OrderCardProps) -> Html {
    let order = &props.order;
    let action = |cb: &Option<Callback<String>>, allowed: bool, label: &'static str, class: &'static str| {
        match cb {
            Some(cb) if allowed => {
                let code = order.code.clone();
                let onclick = cb.reform(move |_: MouseEvent| code.clone());
                html! { <button class={class} {onclick}>{ label }</button> }
            }
            _ => html! {},
        }
    };

    html! {
        <div class={classes!("order-card", format!("status-{:?}", order.status).to_lowercase())}>
            <div class="order-header">
                <strong>{ order.code.clone() }</strong>
                <span class="order-status">{ order.status.to_string() }</span>
            </div>
            if let Some(name) = &order.person_name {
                <div class="order-person">{ name.clone() }</div>
            }
            <ul class="order-items">
                { order.items.iter().map(|item| html! {
                    <li>{ format!("{}x {}", item.quantity, item.name) }</li>
                }).collect::<Html>() }
            </ul>
            <div class="order-total">{ format_brl(order.total_cents()) }</div>
            if let Some(method) = &order.payment_method {
                <div class="order-payment">{ method.clone() }</div>
            }
            if let Some(url) = &order.proof_url {
                <a href={url.clone()} target="_blank" rel="noopener">{ "Ver comprovante" }</a>
            }
            <div class="order-actions">
                { action(&props.on_pay, order.can_pay(), "Confirmar pagamento", "btn-primary") }
                { action(&props.on_reject, order.can_reject(), "Recusar", "btn-danger") }
                { action(&props.on_deliver, order.can_deliver(), "Entregar", "btn-primary") }
            </div>
        </div>
    }
}

fn load_pending(api: ApiClient, orders: UseStateHandle<Vec<Order>>, error: UseStateHandle<Option<String>>) {
    wasm_bindgen_futures::spawn_local(async move {
        match api.pending_orders().await {
            Ok(list) => orders.set(list),
            Err(e) => error.set(Some(e.to_string())),
        }
    });
}

/// Handles the page keeps around to run an order mutation.
#[derive(Clone)]
struct OrderDesk {
    api: ApiClient,
    orders: UseStateHandle<Vec<Order>>,
    delivery: UseStateHandle<Option<Order>>,
    error: UseStateHandle<Option<String>>,
    success: UseStateHandle<Option<String>>,
}

impl OrderDesk {
    /// Runs the mutation, then reloads the pending list.
    fn run<F>(&self, action: F)
    where
        F: Future<Output = Result<Order, ApiError>> + 'static,
    {
        let desk = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match action.await {
                Ok(updated) => {
                    desk.success
                        .set(Some(format!("Pedido {}: {}", updated.code, updated.status)));
                    desk.error.set(None);
                    if (*desk.delivery).as_ref().is_some_and(|d| d.code == updated.code) {
                        desk.delivery.set(Some(updated));
                    }
                    load_pending(desk.api, desk.orders, desk.error);
                }
                Err(e) => desk.error.set(Some(e.to_string())),
            }
        });
    }
}

/// Pending online orders to reconcile, plus delivery by code or QR scan.
#[function_component(OrdersPage)]
pub fn orders_page() -> Html {
    let api = use_api();
    let orders = use_state(Vec::<Order>::new);
    let delivery = use_state(|| None::<Order>);
    let code_text = use_state(String::new);
    let scanning = use_state(|| false);
    let rejecting = use_state(|| None::<String>);
    let reason = use_state(String::new);
    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);

    {
        let api = api.clone();
        let orders = orders.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            load_pending(api.clone(), orders.clone(), error.clone());
            let interval = Interval::new(ORDERS_REFRESH_MS, move || {
                load_pending(api.clone(), orders.clone(), error.clone());
            });
            move || drop(interval)
        });
    }

    let desk = OrderDesk {
        api: api.clone(),
        orders: orders.clone(),
        delivery: delivery.clone(),
        error: error.clone(),
        success: success.clone(),
    };

    let on_pay = {
        let desk = desk.clone();
        Callback::from(move |code: String| {
            let client = desk.api.clone();
            desk.run(async move { client.pay_order(&code).await });
        })
    };

    let on_deliver = {
        let desk = desk.clone();
        Callback::from(move |code: String| {
            let client = desk.api.clone();
            desk.run(async move { client.deliver_order(&code).await });
        })
    };

    let on_reject = {
        let rejecting = rejecting.clone();
        let reason = reason.clone();
        Callback::from(move |code: String| {
            reason.set(String::new());
            rejecting.set(Some(code));
        })
    };
    let on_confirm_reject = {
        let desk = desk.clone();
        let rejecting = rejecting.clone();
        let reason = reason.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(code) = (*rejecting).clone() else {
                return;
            };
            let client = desk.api.clone();
            let why = Some(reason.trim().to_string()).filter(|r| !r.is_empty());
            desk.run(async move { client.reject_order(&code, why).await });
            rejecting.set(None);
        })
    };
    let on_cancel_reject = {
        let rejecting = rejecting.clone();
        Callback::from(move |_: MouseEvent| rejecting.set(None))
    };
    let on_reason = {
        let reason = reason.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            reason.set(input.value());
        })
    };

    let find_order = {
        let api = api.clone();
        let delivery = delivery.clone();
        let error = error.clone();
        let scanning = scanning.clone();
        Callback::from(move |raw: String| {
            let code = match normalize_order_code(&raw) {
                Ok(code) => code,
                Err(e) => {
                    error.set(Some(e));
                    return;
                }
            };
            scanning.set(false);
            let api = api.clone();
            let delivery = delivery.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.order(&code).await {
                    Ok(order) => {
                        delivery.set(Some(order));
                        error.set(None);
                    }
                    Err(e) => {
                        delivery.set(None);
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };
    let on_code_input = {
        let code_text = code_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            code_text.set(input.value());
        })
    };
    let on_find = {
        let code_text = code_text.clone();
        let find_order = find_order.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            find_order.emit((*code_text).clone());
        })
    };
    let toggle_scan = {
        let scanning = scanning.clone();
        Callback::from(move |_: MouseEvent| scanning.set(!*scanning))
    };

    html! {
        <div class="container orders">
            <h1>{ "Pedidos" }</h1>
            <StatusLine error={(*error).clone()} success={(*success).clone()} />

            <section class="delivery">
                <h2>{ "Entrega" }</h2>
                <form class="form-row" onsubmit={on_find}>
                    <input type="text" placeholder="Código do pedido"
                        value={(*code_text).clone()} oninput={on_code_input} />
                    <button class="btn-secondary" type="submit">{ "Buscar" }</button>
                    <button class="btn-secondary" type="button" onclick={toggle_scan}>
                        { if *scanning { "Fechar câmera" } else { "Ler QR" } }
                    </button>
                </form>
                if *scanning {
                    <QrScanner on_scan={find_order.clone()} />
                }
                if let Some(order) = &*delivery {
                    <OrderCard order={order.clone()} on_deliver={on_deliver.clone()} />
                }
            </section>

            if let Some(code) = &*rejecting {
                <div class="reject-panel">
                    <h3>{ format!("Recusar o pedido {}?", code) }</h3>
                    <input type="text" placeholder="Motivo (opcional)"
                        value={(*reason).clone()} oninput={on_reason} />
                    <div class="modal-actions">
                        <button class="btn-secondary" onclick={on_cancel_reject}>{ "Cancelar" }</button>
                        <button class="btn-danger" onclick={on_confirm_reject}>{ "Recusar" }</button>
                    </div>
                </div>
            }

            <section>
                <h2>{ format!("Aguardando pagamento ({})", orders.len()) }</h2>
                if orders.is_empty() {
                    <p class="no-results-message">{ "Nenhum pedido pendente" }</p>
                }
                { orders.iter().map(|order| html! {
                    <OrderCard
                        key={order.code.clone()}
                        order={order.clone()}
                        on_pay={on_pay.clone()}
                        on_reject={on_reject.clone()}
                    />
                }).collect::<Html>() }
            </section>
        </div>
    }
}
