use crate::components::{ConfirmModal, CountdownControls, DrawStage};
use crate::hooks::use_draw;
use ekklesia::defaults::BINGO_MAX;
use ekklesia::utils::bingo_letter;
use ekklesia::{Countdown, DrawPool, DrawValue};
use std::collections::HashSet;
use yew::prelude::*;

/// Labels a bingo number with its column letter, e.g. `G-52`.
fn bingo_label(n: u32) -> String {
    match bingo_letter(n) {
        Some(letter) => format!("{}-{}", letter, n),
        None => n.to_string(),
    }
}

/// 75-ball bingo: numbers never repeat until a confirmed reset.
#[function_component(BingoPage)]
pub fn bingo_page() -> Html {
    let draw = use_draw(Countdown::default());
    let confirm_open = use_state(|| false);

    let on_draw = {
        let trigger = draw.draw.clone();
        Callback::from(move |_| trigger.emit(Ok(DrawPool::bingo())))
    };
    let ask_reset = {
        let confirm_open = confirm_open.clone();
        Callback::from(move |_| confirm_open.set(true))
    };
    let on_confirm = {
        let confirm_open = confirm_open.clone();
        let reset = draw.reset.clone();
        Callback::from(move |_| {
            reset.emit(());
            confirm_open.set(false);
        })
    };
    let on_cancel = {
        let confirm_open = confirm_open.clone();
        Callback::from(move |_| confirm_open.set(false))
    };

    let drawn: HashSet<u32> = draw.history.iter().copied().collect();
    let counting = draw.remaining.is_some();
    let latest = match &draw.result {
        Some(DrawValue::Number(n)) => Some(DrawValue::Name(bingo_label(*n))),
        other => other.clone(),
    };

    html! {
        <div class="container draw-page bingo">
            <h1>{ "Bingo" }</h1>
            <CountdownControls
                countdown={draw.countdown}
                disabled={counting}
                onchange={draw.set_countdown.clone()}
            />
            <div class="form-row">
                <button class="btn-primary big" disabled={!draw.can_draw} onclick={on_draw}>
                    { if counting { "Sorteando..." } else { "Sortear bola" } }
                </button>
                <button class="btn-secondary"
                    disabled={counting || draw.history.is_empty()}
                    onclick={ask_reset}
                >
                    { "Reiniciar" }
                </button>
            </div>
            <DrawStage
                result={latest}
                remaining={draw.remaining}
                message={draw.message.clone()}
                placeholder="?"
            />
            <p class="bingo-progress">
                { format!("{}/{} bolas sorteadas", draw.history.len(), BINGO_MAX) }
            </p>

            <div class="bingo-board">
                { "BINGO".chars().enumerate().map(|(col, letter)| {
                    let start = col as u32 * 15 + 1;
                    html! {
                        <div class="bingo-column">
                            <div class="bingo-letter">{ letter.to_string() }</div>
                            { (start..start + 15).map(|n| html! {
                                <div class={classes!("bingo-cell", drawn.contains(&n).then_some("drawn"))}>
                                    { n }
                                </div>
                            }).collect::<Html>() }
                        </div>
                    }
                }).collect::<Html>() }
            </div>

            <h3>{ "Histórico" }</h3>
            <ol class="bingo-history">
                { draw.history.iter().map(|&n| html! {
                    <li>{ bingo_label(n) }</li>
                }).collect::<Html>() }
            </ol>

            <ConfirmModal
                open={*confirm_open}
                title="Reiniciar bingo"
                message="Todas as bolas sorteadas serão apagadas. Deseja continuar?"
                {on_confirm}
                {on_cancel}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_carry_column_letter() {
        assert_eq!(bingo_label(1), "B-1");
        assert_eq!(bingo_label(52), "G-52");
        assert_eq!(bingo_label(75), "O-75");
    }
}
