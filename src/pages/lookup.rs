use super::orders::OrderCard;
use crate::components::{QrCode, QrScanner, StatusLine};
use crate::hooks::use_api;
use ekklesia::api::{ApiClient, ApiError, Order};
use ekklesia::utils::{is_valid_email, normalize_order_code};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Code,
    Person,
    Email,
}

impl Mode {
    fn from_value(value: &str) -> Self {
        match value {
            "person" => Mode::Person,
            "email" => Mode::Email,
            _ => Mode::Code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Query {
    Order(String),
    Person(String),
    Email(String),
    /// Scanned credential: tried as an order code first, then as a person id.
    Scanned {
        code: Option<String>,
        person: String,
    },
}

impl Query {
    fn parse(mode: Mode, raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        match mode {
            Mode::Code => normalize_order_code(raw).map(Query::Order),
            Mode::Person if raw.is_empty() => Err("Informe o código da pessoa".to_string()),
            Mode::Person => Ok(Query::Person(raw.to_string())),
            Mode::Email if is_valid_email(raw) => Ok(Query::Email(raw.to_lowercase())),
            Mode::Email => Err("Informe um e-mail válido".to_string()),
        }
    }

    /// A scanned credential is either an order code or a person id; numeric
    /// person ids look like order codes too, so both stay possible.
    fn scanned(text: &str) -> Result<Self, String> {
        let person = text.trim().to_string();
        if person.is_empty() {
            return Err("QR vazio".to_string());
        }
        Ok(Query::Scanned {
            code: normalize_order_code(&person).ok(),
            person,
        })
    }
}

/// Only a missing order sends a scanned code on to the person lookup.
fn falls_back_to_person(err: &ApiError) -> bool {
    matches!(err, ApiError::Status(404))
}

async fn person_orders(api: &ApiClient, id: String) -> Result<Found, ApiError> {
    Ok(Found {
        orders: api.person_orders(&id).await?,
        person_id: Some(id),
        person_name: None,
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Found {
    person_id: Option<String>,
    person_name: Option<String>,
    orders: Vec<Order>,
}

async fn resolve(api: &ApiClient, query: Query) -> Result<Found, ApiError> {
    match query {
        Query::Order(code) => Ok(Found {
            orders: vec![api.order(&code).await?],
            ..Found::default()
        }),
        Query::Person(id) => person_orders(api, id).await,
        Query::Email(email) => {
            let person = api.person_by_email(&email).await?;
            Ok(Found {
                orders: api.person_orders(&person.id).await?,
                person_id: Some(person.id),
                person_name: Some(person.name),
            })
        }
        Query::Scanned { code: None, person } => person_orders(api, person).await,
        Query::Scanned {
            code: Some(code),
            person,
        } => match api.order(&code).await {
            Ok(order) => Ok(Found {
                orders: vec![order],
                ..Found::default()
            }),
            Err(e) if falls_back_to_person(&e) => person_orders(api, person).await,
            Err(e) => Err(e),
        },
    }
}

/// Attendees find their orders and show their pickup credential.
#[function_component(LookupPage)]
pub fn lookup_page() -> Html {
    let api = use_api();
    let mode = use_state(Mode::default);
    let text = use_state(String::new);
    let scanning = use_state(|| false);
    let busy = use_state(|| false);
    let found = use_state(|| None::<Found>);
    let error = use_state(|| None::<String>);

    let search = {
        let found = found.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |query: Result<Query, String>| {
            let query = match query {
                Ok(query) => query,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            let api = api.clone();
            let found = found.clone();
            let busy = busy.clone();
            let error = error.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match resolve(&api, query).await {
                    Ok(result) => {
                        found.set(Some(result));
                        error.set(None);
                    }
                    Err(e) => {
                        found.set(None);
                        let message = match e {
                            ApiError::Status(404) => "Nada encontrado".to_string(),
                            other => other.to_string(),
                        };
                        error.set(Some(message));
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_mode = {
        let mode = mode.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            mode.set(Mode::from_value(&select.value()));
        })
    };
    let on_text = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };
    let onsubmit = {
        let search = search.clone();
        let mode = mode.clone();
        let text = text.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            search.emit(Query::parse(*mode, &text));
        })
    };
    let on_scan = {
        let search = search.clone();
        let scanning = scanning.clone();
        Callback::from(move |decoded: String| {
            scanning.set(false);
            search.emit(Query::scanned(&decoded));
        })
    };
    let toggle_scan = {
        let scanning = scanning.clone();
        Callback::from(move |_: MouseEvent| scanning.set(!*scanning))
    };

    html! {
        <div class="container lookup">
            <h1>{ "Meus pedidos" }</h1>
            <form class="form-row" {onsubmit}>
                <select onchange={on_mode}>
                    <option value="code" selected={*mode == Mode::Code}>{ "Código do pedido" }</option>
                    <option value="person" selected={*mode == Mode::Person}>{ "Código da pessoa" }</option>
                    <option value="email" selected={*mode == Mode::Email}>{ "E-mail" }</option>
                </select>
                <input type="text" value={(*text).clone()} oninput={on_text} />
                <button class="btn-primary" type="submit" disabled={*busy}>{ "Consultar" }</button>
                <button class="btn-secondary" type="button" onclick={toggle_scan}>
                    { if *scanning { "Fechar câmera" } else { "Ler QR" } }
                </button>
            </form>
            if *scanning {
                <QrScanner {on_scan} />
            }
            <StatusLine error={(*error).clone()} />
            if let Some(result) = &*found {
                if let Some(id) = &result.person_id {
                    <section class="credential">
                        <h2>{ result.person_name.clone().unwrap_or_else(|| "Credencial".to_string()) }</h2>
                        <QrCode value={id.clone()} />
                    </section>
                }
                <section>
                    if result.orders.is_empty() {
                        <p class="no-results-message">{ "Nenhum pedido encontrado" }</p>
                    }
                    { result.orders.iter().map(|order| html! {
                        <OrderCard key={order.code.clone()} order={order.clone()} />
                    }).collect::<Html>() }
                </section>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_mode() {
        assert_eq!(
            Query::parse(Mode::Code, " ab12 cd "),
            Ok(Query::Order("AB12CD".to_string()))
        );
        assert_eq!(
            Query::parse(Mode::Email, "Ana@Igreja.org"),
            Ok(Query::Email("ana@igreja.org".to_string()))
        );
        assert!(Query::parse(Mode::Email, "ana").is_err());
        assert!(Query::parse(Mode::Person, "  ").is_err());
    }

    #[test]
    fn test_scanned_keeps_both_readings() {
        assert_eq!(
            Query::scanned("ek-2026"),
            Ok(Query::Scanned {
                code: Some("EK-2026".to_string()),
                person: "ek-2026".to_string(),
            })
        );
        assert_eq!(
            Query::scanned("p_42"),
            Ok(Query::Scanned {
                code: None,
                person: "p_42".to_string(),
            })
        );
        assert!(Query::scanned("  ").is_err());
    }

    #[test]
    fn test_numeric_person_id_reaches_person_lookup() {
        // "1024" is also a well-formed order code
        let Ok(Query::Scanned { code, person }) = Query::scanned(" 1024\n") else {
            panic!("scan of a numeric id was rejected");
        };
        assert_eq!(code.as_deref(), Some("1024"));
        assert_eq!(person, "1024");
        assert!(falls_back_to_person(&ApiError::Status(404)));
    }

    #[test]
    fn test_only_missing_orders_fall_back() {
        assert!(!falls_back_to_person(&ApiError::Status(500)));
        assert!(!falls_back_to_person(&ApiError::Status(401)));
        assert!(!falls_back_to_person(&ApiError::Network("offline".into())));
    }

    #[test]
    fn test_mode_from_value() {
        assert_eq!(Mode::from_value("email"), Mode::Email);
        assert_eq!(Mode::from_value("person"), Mode::Person);
        assert_eq!(Mode::from_value("anything"), Mode::Code);
    }
}
