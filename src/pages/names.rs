use crate::components::{CountdownControls, DrawStage};
use crate::config::DEFAULT_NAMES_PLACEHOLDER;
use crate::hooks::use_draw;
use ekklesia::{Countdown, DrawPool};
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

/// Draws one name from a free-text list, repetition allowed.
#[function_component(NameDrawPage)]
pub fn name_draw_page() -> Html {
    let text = use_state(String::new);
    let draw = use_draw(Countdown::default());

    let oninput = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let onclick = {
        let text = text.clone();
        let trigger = draw.draw.clone();
        Callback::from(move |_| trigger.emit(DrawPool::names(&text)))
    };

    let count = DrawPool::names(&text)
        .map(|pool| match pool {
            DrawPool::Names(names) => names.len(),
            _ => 0,
        })
        .unwrap_or(0);

    html! {
        <div class="container draw-page">
            <h1>{ "Sorteio de Nomes" }</h1>
            <div class="form-group">
                <label for="names">{ format!("Participantes ({}), um por linha:", count) }</label>
                <textarea id="names"
                    rows="10"
                    placeholder={DEFAULT_NAMES_PLACEHOLDER}
                    value={(*text).clone()}
                    disabled={draw.remaining.is_some()}
                    {oninput}
                />
            </div>
            <CountdownControls
                countdown={draw.countdown}
                disabled={draw.remaining.is_some()}
                onchange={draw.set_countdown.clone()}
            />
            <button class="btn-primary big" disabled={!draw.can_draw} {onclick}>
                { if draw.remaining.is_some() { "Sorteando..." } else { "Sortear" } }
            </button>
            <DrawStage
                result={draw.result.clone()}
                remaining={draw.remaining}
                message={draw.message.clone()}
                placeholder="?"
            />
        </div>
    }
}
