use crate::components::{CountdownControls, DrawStage};
use crate::config::{DEFAULT_RANGE_MAX, DEFAULT_RANGE_MIN};
use crate::hooks::use_draw;
use ekklesia::{Countdown, DrawPool};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Draws an integer from an inclusive range, repetition allowed.
#[function_component(NumberDrawPage)]
pub fn number_draw_page() -> Html {
    let min = use_state(|| DEFAULT_RANGE_MIN.to_string());
    let max = use_state(|| DEFAULT_RANGE_MAX.to_string());
    let draw = use_draw(Countdown::default());

    let text_input = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            handle.set(input.value());
        })
    };

    let onclick = {
        let min = min.clone();
        let max = max.clone();
        let trigger = draw.draw.clone();
        Callback::from(move |_| trigger.emit(DrawPool::range(&min, &max)))
    };
    let counting = draw.remaining.is_some();

    html! {
        <div class="container draw-page">
            <h1>{ "Sorteio de Números" }</h1>
            <div class="form-row">
                <div class="form-group">
                    <label for="range_min">{ "Mínimo:" }</label>
                    <input id="range_min" type="number" min="1"
                        value={(*min).clone()}
                        disabled={counting}
                        oninput={text_input(&min)}
                    />
                </div>
                <div class="form-group">
                    <label for="range_max">{ "Máximo:" }</label>
                    <input id="range_max" type="number" min="2"
                        value={(*max).clone()}
                        disabled={counting}
                        oninput={text_input(&max)}
                    />
                </div>
            </div>
            <CountdownControls
                countdown={draw.countdown}
                disabled={counting}
                onchange={draw.set_countdown.clone()}
            />
            <button class="btn-primary big" disabled={!draw.can_draw} {onclick}>
                { if counting { "Sorteando..." } else { "Sortear número" } }
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
