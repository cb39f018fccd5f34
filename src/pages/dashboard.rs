use crate::chart::{destroy_chart, show_checkpoints, show_sales};
use crate::components::StatusLine;
use crate::config::{CHART_CANVAS_ID, SALES_CANVAS_ID};
use crate::hooks::use_api;
use ekklesia::api::{Consolidation, DashboardSummary};
use ekklesia::utils::{format_brl, to_cents};
use log::info;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct StatCardProps {
    label: AttrValue,
    value: AttrValue,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat-card">
            <div class="stat-value">{ props.value.clone() }</div>
            <div class="stat-label">{ props.label.clone() }</div>
        </div>
    }
}

/// Follow-up form for people who made a decision during the event.
#[function_component(ConsolidationForm)]
fn consolidation_form() -> Html {
    let api = use_api();
    let record = use_state(Consolidation::default);
    let email = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);
    let success = use_state(|| None::<String>);

    let field = |apply: fn(&mut Consolidation, String)| {
        let record = record.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*record).clone();
            apply(&mut next, input.value());
            record.set(next);
        })
    };
    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };
    let on_notes = {
        let record = record.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*record).clone();
            next.notes = area.value();
            record.set(next);
        })
    };

    let onsubmit = {
        let record = record.clone();
        let email = email.clone();
        let busy = busy.clone();
        let error = error.clone();
        let success = success.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut submission = (*record).clone();
            let typed = email.trim();
            submission.email = (!typed.is_empty()).then(|| typed.to_string());
            if let Err(message) = submission.validate() {
                error.set(Some(message));
                success.set(None);
                return;
            }
            let api = api.clone();
            let record = record.clone();
            let email = email.clone();
            let busy = busy.clone();
            let error = error.clone();
            let success = success.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.save_consolidation(&submission).await {
                    Ok(()) => {
                        info!("Consolidation saved for {}", submission.name);
                        record.set(Consolidation::default());
                        email.set(String::new());
                        error.set(None);
                        success.set(Some(format!("{} registrado(a)", submission.name.trim())));
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <form class="consolidation-form" {onsubmit}>
            <h2>{ "Consolidação" }</h2>
            <div class="form-group">
                <label>{ "Nome" }</label>
                <input type="text" value={record.name.clone()} oninput={field(|r, v| r.name = v)} />
            </div>
            <div class="form-group">
                <label>{ "Telefone" }</label>
                <input type="tel" value={record.phone.clone()} oninput={field(|r, v| r.phone = v)} />
            </div>
            <div class="form-group">
                <label>{ "E-mail (opcional)" }</label>
                <input type="email" value={(*email).clone()} oninput={on_email} />
            </div>
            <div class="form-group">
                <label>{ "Decisão" }</label>
                <input type="text" placeholder="Aceitou / Reconciliou"
                    value={record.decision.clone()} oninput={field(|r, v| r.decision = v)} />
            </div>
            <div class="form-group">
                <label>{ "Observações" }</label>
                <textarea rows="2" value={record.notes.clone()} oninput={on_notes} />
            </div>
            <button class="btn-primary" type="submit" disabled={*busy}>
                { if *busy { "Salvando..." } else { "Salvar" } }
            </button>
            <StatusLine error={(*error).clone()} success={(*success).clone()} />
        </form>
    }
}

/// Event overview: totals, per-checkpoint and daily sales charts, follow-ups
/// and the spreadsheet export.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let api = use_api();
    let summary = use_state(|| None::<DashboardSummary>);
    let attendance = use_state(|| None::<i64>);
    let reload = use_state(|| 0u32);
    let error = use_state(|| None::<String>);

    {
        let api = api.clone();
        let summary = summary.clone();
        let attendance = attendance.clone();
        let error = error.clone();
        use_effect_with(*reload, move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api.overview().await {
                    Ok((data, meeting)) => {
                        summary.set(Some(data));
                        attendance.set(Some(meeting.count));
                        error.set(None);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        });
    }

    // Charts draw into canvases that exist only once the summary is rendered
    use_effect_with((*summary).clone(), |summary| {
        if let Some(data) = summary {
            show_checkpoints(CHART_CANVAS_ID, data);
            show_sales(SALES_CANVAS_ID, &data.sales_by_day);
        }
        || {
            destroy_chart(CHART_CANVAS_ID);
            destroy_chart(SALES_CANVAS_ID);
        }
    });

    let on_refresh = {
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| reload.set((*reload).wrapping_add(1)))
    };

    html! {
        <div class="container dashboard">
            <div class="page-header">
                <h1>{ "Painel" }</h1>
                <button class="btn-secondary" onclick={on_refresh}>{ "Atualizar" }</button>
                <a class="btn-secondary" href={api.export_url()} download="ekklesia.csv">
                    { "Exportar planilha" }
                </a>
            </div>
            <StatusLine error={(*error).clone()} />
            if let Some(data) = &*summary {
                <section class="stat-grid">
                    <StatCard label="Check-ins" value={data.total_checkins.to_string()} />
                    <StatCard label="Vendas" value={format_brl(to_cents(data.total_sales))} />
                    <StatCard label="Pedidos pendentes" value={data.pending_orders.to_string()} />
                    <StatCard label="Pedidos entregues" value={data.delivered_orders.to_string()} />
                    <StatCard
                        label="Presentes na reunião"
                        value={(*attendance).map(|c| c.to_string()).unwrap_or_else(|| "–".to_string())}
                    />
                </section>
                <section class="charts">
                    <div class="chart-box">
                        <h2>{ "Check-ins por posto" }</h2>
                        <canvas id={CHART_CANVAS_ID}></canvas>
                    </div>
                    <div class="chart-box">
                        <h2>{ "Vendas por dia" }</h2>
                        <canvas id={SALES_CANVAS_ID}></canvas>
                    </div>
                </section>
            } else {
                <p class="loading">{ "Carregando..." }</p>
            }
            <ConsolidationForm />
        </div>
    }
}
