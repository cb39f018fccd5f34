use crate::components::StatusLine;
use crate::config::CHECKPOINT_REFRESH_MS;
use crate::hooks::{use_api, use_app};
use ekklesia::api::{ApiClient, ApiError, Checkpoint, CheckpointCount, TrackRequest};
use gloo_timers::callback::Interval;
use log::debug;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

fn refresh_count(
    api: ApiClient,
    checkpoint_id: String,
    count: UseStateHandle<Option<i64>>,
    error: UseStateHandle<Option<String>>,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let polled = api.checkpoint_count(&checkpoint_id).await;
        if let Ok(current) = &polled {
            count.set(Some(current.count));
        }
        error.set(poll_error(&polled));
    });
}

/// A successful poll clears whatever error an earlier one left behind.
fn poll_error(polled: &Result<CheckpointCount, ApiError>) -> Option<String> {
    polled.as_ref().err().map(ToString::to_string)
}

/// Staff counter at a checkpoint: one tap per person coming in.
#[function_component(CheckpointPage)]
pub fn checkpoint_page() -> Html {
    let api = use_api();
    let app = use_app();
    let checkpoints = use_state(Vec::<Checkpoint>::new);
    let selected = use_state(|| None::<String>);
    let count = use_state(|| None::<i64>);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);
    let staff_id = app.state.staff.as_ref().and_then(|s| s.id.clone());

    // Load checkpoint list on mount
    {
        let api = api.clone();
        let checkpoints = checkpoints.clone();
        let selected = selected.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api.checkpoints().await {
                    Ok(list) => {
                        if let Some(first) = list.first() {
                            selected.set(Some(first.id.clone()));
                        }
                        checkpoints.set(list);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        });
    }

    // Poll the count of the selected checkpoint; other devices count too
    {
        let api = api.clone();
        let count = count.clone();
        let error = error.clone();
        use_effect_with((*selected).clone(), move |selected| {
            let interval = selected.clone().map(|id| {
                refresh_count(api.clone(), id.clone(), count.clone(), error.clone());
                Interval::new(CHECKPOINT_REFRESH_MS, move || {
                    debug!("Refreshing count of checkpoint {}", id);
                    refresh_count(api.clone(), id.clone(), count.clone(), error.clone());
                })
            });
            move || drop(interval)
        });
    }

    let on_select = {
        let selected = selected.clone();
        let count = count.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            count.set(None);
            selected.set(Some(select.value()));
        })
    };

    let track = |delta: i32| {
        let api = api.clone();
        let selected = selected.clone();
        let count = count.clone();
        let busy = busy.clone();
        let error = error.clone();
        let staff_id = staff_id.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(id) = (*selected).clone() else {
                return;
            };
            let request = if delta > 0 {
                TrackRequest::entry(&id, staff_id.clone())
            } else {
                TrackRequest::correction(&id, staff_id.clone())
            };
            let api = api.clone();
            let count = count.clone();
            let busy = busy.clone();
            let error = error.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match api.track(&request).await {
                    Ok(updated) => {
                        count.set(Some(updated.count));
                        error.set(None);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        })
    };

    let name = checkpoints
        .iter()
        .find(|c| Some(&c.id) == (*selected).as_ref())
        .map(|c| c.name.clone())
        .unwrap_or_default();

    html! {
        <div class="container checkpoint">
            <h1>{ "Check-in" }</h1>
            <div class="form-group">
                <label for="checkpoint">{ "Posto:" }</label>
                <select id="checkpoint" onchange={on_select}>
                    { checkpoints.iter().map(|c| html! {
                        <option value={c.id.clone()} selected={Some(&c.id) == (*selected).as_ref()}>
                            { c.name.clone() }
                        </option>
                    }).collect::<Html>() }
                </select>
            </div>
            <div class="counter">
                <div class="counter-label">{ name }</div>
                <div class="counter-value">
                    { (*count).map(|c| c.to_string()).unwrap_or_else(|| "–".to_string()) }
                </div>
                <div class="form-row">
                    <button class="btn-secondary" disabled={*busy || selected.is_none()} onclick={track(-1)}>
                        { "−1" }
                    </button>
                    <button class="btn-primary big" disabled={*busy || selected.is_none()} onclick={track(1)}>
                        { "+1 Entrada" }
                    </button>
                </div>
            </div>
            <StatusLine error={(*error).clone()} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_recovers_after_failure() {
        let failed: Result<CheckpointCount, ApiError> = Err(ApiError::Network("offline".into()));
        let message = poll_error(&failed).unwrap();
        assert!(!message.is_empty());

        let recovered = Ok(CheckpointCount {
            checkpoint_id: "2".to_string(),
            count: 41,
        });
        assert_eq!(poll_error(&recovered), None);
    }
}
