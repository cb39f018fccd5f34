use super::pos::{CartTable, PaymentSelect, ProductGrid};
use crate::components::{QrCode, StatusLine};
use crate::config::MAX_PROOF_BYTES;
use crate::hooks::use_api;
use ekklesia::api::{Cart, CheckoutForm, CheckoutResponse, PaymentMethod, Product};
use log::info;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

/// Pix orders are paid up front, so they need the receipt attached.
fn check_proof(method: PaymentMethod, proof: Option<&File>) -> Result<(), String> {
    match proof {
        Some(file) if file.size() > MAX_PROOF_BYTES => {
            Err("O comprovante deve ter no máximo 5 MB".to_string())
        }
        None if method == PaymentMethod::Pix => Err("Anexe o comprovante do Pix".to_string()),
        _ => Ok(()),
    }
}

/// Public store: attendees order online and upload the payment proof.
#[function_component(CheckoutPage)]
pub fn checkout_page() -> Html {
    let api = use_api();
    let products = use_state(Vec::<Product>::new);
    let cart = use_state(Cart::default);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let phone = use_state(String::new);
    let payment = use_state(PaymentMethod::default);
    let proof = use_state(|| None::<File>);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);
    let placed = use_state(|| None::<CheckoutResponse>);

    {
        let api = api.clone();
        let products = products.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api.products().await {
                    Ok(list) => products.set(list),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        });
    }

    let bind = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            handle.set(input.value());
        })
    };

    let on_add = {
        let cart = cart.clone();
        Callback::from(move |product: Product| {
            let mut next = (*cart).clone();
            next.add(&product);
            cart.set(next);
        })
    };
    let on_quantity = {
        let cart = cart.clone();
        Callback::from(move |(id, quantity): (String, u32)| {
            let mut next = (*cart).clone();
            next.set_quantity(&id, quantity);
            cart.set(next);
        })
    };
    let on_payment = {
        let payment = payment.clone();
        Callback::from(move |method: PaymentMethod| payment.set(method))
    };
    let on_proof = {
        let proof = proof.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            proof.set(input.files().and_then(|files| files.get(0)));
        })
    };

    let onsubmit = {
        let cart = cart.clone();
        let name = name.clone();
        let email = email.clone();
        let phone = phone.clone();
        let payment = payment.clone();
        let proof = proof.clone();
        let busy = busy.clone();
        let error = error.clone();
        let placed = placed.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let form = CheckoutForm {
                name: (*name).clone(),
                email: (*email).clone(),
                phone: (*phone).clone(),
                items: cart.items(),
                payment_method: *payment,
            };
            if let Err(message) = form
                .validate()
                .and_then(|_| check_proof(*payment, (*proof).as_ref()))
            {
                error.set(Some(message));
                return;
            }
            let api = api.clone();
            let proof = (*proof).clone();
            let cart = cart.clone();
            let busy = busy.clone();
            let error = error.clone();
            let placed = placed.clone();
            busy.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api.checkout(&form, proof.as_ref()).await {
                    Ok(response) => {
                        info!("Online order {} placed", response.order_code);
                        cart.set(Cart::default());
                        placed.set(Some(response));
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        })
    };

    if let Some(done) = &*placed {
        return html! {
            <div class="container narrow checkout-done">
                <h1>{ "Pedido recebido!" }</h1>
                <p>{ format!("Situação: {}", done.status) }</p>
                <QrCode value={done.order_code.clone()} caption={format!("Pedido {}", done.order_code)} />
                if let Some(person) = &done.person_id {
                    <p>{ "Sua credencial para retirada:" }</p>
                    <QrCode value={person.clone()} size={160} />
                }
                <p class="hint">{ "Guarde este código; ele será pedido na entrega." }</p>
            </div>
        };
    }

    html! {
        <div class="container checkout">
            <h1>{ "Loja da conferência" }</h1>
            <ProductGrid products={(*products).clone()} {on_add} />
            <form class="checkout-form" {onsubmit}>
                <CartTable cart={(*cart).clone()} {on_quantity} />
                <div class="form-group">
                    <label for="name">{ "Nome" }</label>
                    <input id="name" type="text" value={(*name).clone()} oninput={bind(&name)} />
                </div>
                <div class="form-group">
                    <label for="email">{ "E-mail" }</label>
                    <input id="email" type="email" value={(*email).clone()} oninput={bind(&email)} />
                </div>
                <div class="form-group">
                    <label for="phone">{ "Telefone" }</label>
                    <input id="phone" type="tel" value={(*phone).clone()} oninput={bind(&phone)} />
                </div>
                <div class="form-group">
                    <label>{ "Pagamento:" }</label>
                    <PaymentSelect value={*payment} onchange={on_payment} />
                </div>
                <div class="form-group">
                    <label for="proof">{ "Comprovante" }</label>
                    <input id="proof" type="file" accept="image/*,application/pdf" onchange={on_proof} />
                </div>
                <button class="btn-primary big" type="submit" disabled={*busy || cart.is_empty()}>
                    { if *busy { "Enviando..." } else { "Finalizar pedido" } }
                </button>
                <StatusLine error={(*error).clone()} />
            </form>
        </div>
    }
}
