use crate::components::{ConfirmModal, StatusLine};
use crate::hooks::use_api;
use ekklesia::api::{ApiClient, Meeting};
use log::info;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

fn reload(api: ApiClient, meetings: UseStateHandle<Vec<Meeting>>, error: UseStateHandle<Option<String>>) {
    wasm_bindgen_futures::spawn_local(async move {
        match api.meetings().await {
            Ok(list) => meetings.set(list),
            Err(e) => error.set(Some(e.to_string())),
        }
    });
}

#[derive(Properties, PartialEq)]
struct MeetingFormProps {
    meeting: Meeting,
    busy: bool,
    on_save: Callback<Meeting>,
    on_cancel: Callback<()>,
}

/// Create/edit dialog. Keeps a draft so cancelling discards the edits.
#[function_component(MeetingForm)]
fn meeting_form(props: &MeetingFormProps) -> Html {
    let draft = use_state(|| props.meeting.clone());
    let error = use_state(|| None::<String>);

    let field = |apply: fn(&mut Meeting, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            apply(&mut next, input.value());
            draft.set(next);
        })
    };
    let on_notes = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.notes = area.value();
            draft.set(next);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let error = error.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match draft.validate() {
                Ok(()) => {
                    error.set(None);
                    on_save.emit((*draft).clone());
                }
                Err(message) => error.set(Some(message)),
            }
        })
    };

    let title = if props.meeting.id.is_some() { "Editar reunião" } else { "Nova reunião" };

    html! {
        <div class="modal-backdrop">
            <form class="modal" {onsubmit}>
                <h3>{ title }</h3>
                <div class="form-group">
                    <label>{ "Título" }</label>
                    <input type="text" value={draft.title.clone()}
                        oninput={field(|m, v| m.title = v)} />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>{ "Data" }</label>
                        <input type="date" value={draft.date.clone()}
                            oninput={field(|m, v| m.date = v)} />
                    </div>
                    <div class="form-group">
                        <label>{ "Horário" }</label>
                        <input type="time" value={draft.time.clone()}
                            oninput={field(|m, v| m.time = v)} />
                    </div>
                </div>
                <div class="form-group">
                    <label>{ "Local" }</label>
                    <input type="text" value={draft.location.clone()}
                        oninput={field(|m, v| m.location = v)} />
                </div>
                <div class="form-group">
                    <label>{ "Líder" }</label>
                    <input type="text" value={draft.leader.clone()}
                        oninput={field(|m, v| m.leader = v)} />
                </div>
                <div class="form-group">
                    <label>{ "Observações" }</label>
                    <textarea rows="3" value={draft.notes.clone()} oninput={on_notes} />
                </div>
                <StatusLine error={(*error).clone()} />
                <div class="modal-actions">
                    <button class="btn-secondary" type="button"
                        onclick={props.on_cancel.reform(|_: MouseEvent| ())}>
                        { "Cancelar" }
                    </button>
                    <button class="btn-primary" type="submit" disabled={props.busy}>
                        { if props.busy { "Salvando..." } else { "Salvar" } }
                    </button>
                </div>
            </form>
        </div>
    }
}

/// Meeting agenda plus the attendance counter.
#[function_component(MeetingsPage)]
pub fn meetings_page() -> Html {
    let api = use_api();
    let meetings = use_state(Vec::<Meeting>::new);
    let editing = use_state(|| None::<Meeting>);
    let deleting = use_state(|| None::<Meeting>);
    let attendance = use_state(|| None::<i64>);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    {
        let api = api.clone();
        let meetings = meetings.clone();
        let attendance = attendance.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            reload(api.clone(), meetings, error.clone());
            wasm_bindgen_futures::spawn_local(async move {
                match api.meeting_count().await {
                    Ok(current) => attendance.set(Some(current.count)),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        });
    }

    let on_new = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(Some(Meeting::default())))
    };
    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    let on_save = {
        let api = api.clone();
        let meetings = meetings.clone();
        let editing = editing.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |meeting: Meeting| {
            let api = api.clone();
            let meetings = meetings.clone();
            let editing = editing.clone();
            let busy = busy.clone();
            let error = error.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let saved = match &meeting.id {
                    Some(id) => api.update_meeting(id, &meeting).await,
                    None => api.create_meeting(&meeting).await,
                };
                match saved {
                    Ok(stored) => {
                        info!("Meeting '{}' saved", stored.title);
                        editing.set(None);
                        error.set(None);
                        reload(api, meetings, error);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        })
    };

    let on_confirm_delete = {
        let api = api.clone();
        let meetings = meetings.clone();
        let deleting = deleting.clone();
        let error = error.clone();
        Callback::from(move |_: ()| {
            let Some(id) = (*deleting).as_ref().and_then(|m| m.id.clone()) else {
                deleting.set(None);
                return;
            };
            deleting.set(None);
            let api = api.clone();
            let meetings = meetings.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.delete_meeting(&id).await {
                    Ok(()) => reload(api, meetings, error),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };
    let on_cancel_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_: ()| deleting.set(None))
    };

    let on_increment = {
        let attendance = attendance.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let api = api.clone();
            let attendance = attendance.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.increment_meeting_count().await {
                    Ok(current) => attendance.set(Some(current.count)),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        })
    };

    let delete_message = (*deleting)
        .as_ref()
        .map(|m| format!("Excluir a reunião \"{}\"?", m.title))
        .unwrap_or_default();

    html! {
        <div class="container meetings">
            <h1>{ "Reuniões" }</h1>
            <div class="counter small">
                <div class="counter-label">{ "Presentes na reunião" }</div>
                <div class="counter-value">
                    { (*attendance).map(|c| c.to_string()).unwrap_or_else(|| "–".to_string()) }
                </div>
                <button class="btn-primary" onclick={on_increment}>{ "+1 Presença" }</button>
            </div>
            <StatusLine error={(*error).clone()} />
            <button class="btn-primary" onclick={on_new}>{ "Nova reunião" }</button>
            if meetings.is_empty() {
                <p class="no-results-message">{ "Nenhuma reunião agendada" }</p>
            }
            <ul class="meeting-list">
                { meetings.iter().map(|meeting| {
                    let on_edit = {
                        let editing = editing.clone();
                        let meeting = meeting.clone();
                        Callback::from(move |_: MouseEvent| editing.set(Some(meeting.clone())))
                    };
                    let on_delete = {
                        let deleting = deleting.clone();
                        let meeting = meeting.clone();
                        Callback::from(move |_: MouseEvent| deleting.set(Some(meeting.clone())))
                    };
                    html! {
                        <li class="meeting-item" key={meeting.id.clone().unwrap_or_default()}>
                            <div class="meeting-when">{ format!("{} {}", meeting.date, meeting.time) }</div>
                            <div class="meeting-title">{ meeting.title.clone() }</div>
                            if !meeting.location.is_empty() {
                                <div class="meeting-where">{ meeting.location.clone() }</div>
                            }
                            if !meeting.leader.is_empty() {
                                <div class="meeting-leader">{ format!("Líder: {}", meeting.leader) }</div>
                            }
                            <div class="meeting-actions">
                                <button class="btn-secondary small" onclick={on_edit}>{ "Editar" }</button>
                                <button class="btn-danger small" onclick={on_delete}>{ "Excluir" }</button>
                            </div>
                        </li>
                    }
                }).collect::<Html>() }
            </ul>

            if let Some(meeting) = &*editing {
                <MeetingForm
                    key={meeting.id.clone().unwrap_or_else(|| "new".to_string())}
                    meeting={meeting.clone()}
                    busy={*busy}
                    {on_save}
                    {on_cancel}
                />
            }
            <ConfirmModal
                open={deleting.is_some()}
                title="Excluir reunião"
                message={delete_message}
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel_delete}
            />
        </div>
    }
}
