use crate::components::{QrCode, StatusLine};
use crate::hooks::{use_api, use_app};
use ekklesia::api::{Cart, PaymentMethod, Product};
use ekklesia::utils::{format_brl, validate_quantity};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CartTableProps {
    pub cart: Cart,
    pub on_quantity: Callback<(String, u32)>,
}

/// Cart lines with editable quantity; shared by the POS and the online store.
#[function_component(CartTable)]
pub fn cart_table(props: &CartTableProps) -> Html {
    if props.cart.is_empty() {
        return html! { <p class="no-results-message">{ "Carrinho vazio" }</p> };
    }

    html! {
        <table class="cart-table">
            <thead>
                <tr>
                    <th>{ "Produto" }</th>
                    <th>{ "Qtd." }</th>
                    <th>{ "Subtotal" }</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                { props.cart.lines().iter().map(|line| {
                    let id = line.product.id.clone();
                    let on_change = {
                        let id = id.clone();
                        let on_quantity = props.on_quantity.clone();
                        Callback::from(move |e: Event| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            if let Ok(quantity) = validate_quantity(&input.value()) {
                                on_quantity.emit((id.clone(), quantity));
                            }
                        })
                    };
                    let on_remove = props.on_quantity.reform(move |_: MouseEvent| (id.clone(), 0));
                    html! {
                        <tr>
                            <td>{ line.product.name.clone() }</td>
                            <td>
                                <input type="number" min="1" class="qty"
                                    value={line.quantity.to_string()}
                                    onchange={on_change}
                                />
                            </td>
                            <td>{ format_brl(line.subtotal_cents()) }</td>
                            <td><button class="btn-secondary small" onclick={on_remove}>{ "✕" }</button></td>
                        </tr>
                    }
                }).collect::<Html>() }
            </tbody>
            <tfoot>
                <tr>
                    <td>{ "Total" }</td>
                    <td>{ props.cart.item_count() }</td>
                    <td colspan="2">{ format_brl(props.cart.total_cents()) }</td>
                </tr>
            </tfoot>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProductGridProps {
    pub products: Vec<Product>,
    pub on_add: Callback<Product>,
}

#[function_component(ProductGrid)]
pub fn product_grid(props: &ProductGridProps) -> Html {
    html! {
        <div class="product-grid">
            { props.products.iter().map(|product| {
                let on_add = {
                    let product = product.clone();
                    props.on_add.reform(move |_: MouseEvent| product.clone())
                };
                html! {
                    <button class="product-card" disabled={!product.in_stock()} onclick={on_add}>
                        <span class="product-name">{ product.name.clone() }</span>
                        <span class="product-price">{ format_brl(product.price_cents()) }</span>
                        if let Some(stock) = product.stock {
                            <span class="product-stock">{ format!("Estoque: {}", stock) }</span>
                        }
                    </button>
                }
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PaymentSelectProps {
    pub value: PaymentMethod,
    pub onchange: Callback<PaymentMethod>,
}

#[function_component(PaymentSelect)]
pub fn payment_select(props: &PaymentSelectProps) -> Html {
    let onchange = props.onchange.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        PaymentMethod::from_code(&select.value()).unwrap_or_default()
    });
    html! {
        <select class="payment-method" {onchange}>
            { PaymentMethod::ALL.iter().map(|m| html! {
                <option value={m.code()} selected={*m == props.value}>{ m.to_string() }</option>
            }).collect::<Html>() }
        </select>
    }
}

/// Counter sale: pick products, choose payment, register, hand over the QR.
#[function_component(PointOfSalePage)]
pub fn point_of_sale_page() -> Html {
    let api = use_api();
    let app = use_app();
    let products = use_state(Vec::<Product>::new);
    let cart = use_state(Cart::default);
    let payment = use_state(PaymentMethod::default);
    let last_code = use_state(|| None::<String>);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

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

    let on_submit = {
        let cart = cart.clone();
        let payment = payment.clone();
        let last_code = last_code.clone();
        let busy = busy.clone();
        let error = error.clone();
        let staff_id = app.state.staff.as_ref().and_then(|s| s.id.clone());
        Callback::from(move |_: MouseEvent| {
            if cart.is_empty() {
                error.set(Some("Adicione ao menos um produto".to_string()));
                return;
            }
            let sale = cart.to_sale(*payment, staff_id.clone());
            let api = api.clone();
            let cart = cart.clone();
            let last_code = last_code.clone();
            let busy = busy.clone();
            let error = error.clone();
            busy.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match api.register_sale(&sale).await {
                    Ok(response) => {
                        last_code.set(Some(response.order_code));
                        cart.set(Cart::default());
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <div class="container pos">
            <h1>{ "Ponto de Venda" }</h1>
            <div class="pos-layout">
                <ProductGrid products={(*products).clone()} {on_add} />
                <aside class="pos-cart">
                    <CartTable cart={(*cart).clone()} {on_quantity} />
                    <div class="form-group">
                        <label>{ "Pagamento:" }</label>
                        <PaymentSelect value={*payment} onchange={on_payment} />
                    </div>
                    <button class="btn-primary big" disabled={*busy || cart.is_empty()} onclick={on_submit}>
                        { if *busy { "Registrando..." } else { "Registrar venda" } }
                    </button>
                    <StatusLine error={(*error).clone()} />
                    if let Some(code) = &*last_code {
                        <div class="sale-done">
                            <h3>{ "Venda registrada" }</h3>
                            <QrCode value={code.clone()} caption={format!("Pedido {}", code)} />
                        </div>
                    }
                </aside>
            </div>
        </div>
    }
}
