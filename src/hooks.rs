use crate::config::{API_BASE_URL, TICK_MS};
use crate::AppContext;
use ekklesia::api::ApiClient;
use ekklesia::{Countdown, DrawEngine, DrawError, DrawPool, DrawStep, DrawValue};
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Snapshot of a draw engine plus the callbacks that drive it.
#[derive(Clone)]
pub struct UseDrawHandle {
    pub result: Option<DrawValue>,
    /// Seconds still on display while a countdown runs
    pub remaining: Option<u32>,
    pub history: Rc<Vec<u32>>,
    pub can_draw: bool,
    pub exhausted: bool,
    pub countdown: Countdown,
    /// Validation message shown in place of the result
    pub message: Option<String>,
    pub draw: Callback<Result<DrawPool, DrawError>>,
    pub reset: Callback<()>,
    pub set_countdown: Callback<Countdown>,
}

/// Owns one [`DrawEngine`] for the lifetime of the component and ticks its
/// countdown once per second.
#[hook]
pub fn use_draw(initial: Countdown) -> UseDrawHandle {
    let engine = use_mut_ref(|| DrawEngine::new(initial));
    let ticker: Rc<RefCell<Option<Interval>>> = use_mut_ref(|| None);
    let message = use_state(|| None::<String>);
    let update = use_force_update();

    // Stop ticking when the component goes away
    {
        let ticker = ticker.clone();
        use_effect_with((), move |_| move || drop(ticker.borrow_mut().take()));
    }

    let draw = {
        let engine = engine.clone();
        let ticker = ticker.clone();
        let message = message.clone();
        let update = update.clone();
        Callback::from(move |pool: Result<DrawPool, DrawError>| {
            let step = pool.and_then(|pool| engine.borrow_mut().draw(&pool, &mut rand::rng()));
            match step {
                Ok(DrawStep::Ignored) => return,
                Ok(DrawStep::Counting(_)) => {
                    message.set(None);
                    let engine = engine.clone();
                    let ticker_slot = ticker.clone();
                    let update = update.clone();
                    let interval = Interval::new(TICK_MS, move || {
                        let step = engine.borrow_mut().tick();
                        if let DrawStep::Revealed(_) = step {
                            // The interval cannot be dropped from inside its own callback
                            let ticker_slot = ticker_slot.clone();
                            wasm_bindgen_futures::spawn_local(async move {
                                ticker_slot.borrow_mut().take();
                            });
                        }
                        if step != DrawStep::Ignored {
                            update.force_update();
                        }
                    });
                    *ticker.borrow_mut() = Some(interval);
                }
                Ok(DrawStep::Revealed(_)) => message.set(None),
                Err(err) => message.set(Some(err.to_string())),
            }
            update.force_update();
        })
    };

    let reset = {
        let engine = engine.clone();
        let ticker = ticker.clone();
        let message = message.clone();
        let update = update.clone();
        Callback::from(move |_| {
            ticker.borrow_mut().take();
            engine.borrow_mut().reset();
            message.set(None);
            update.force_update();
        })
    };

    let set_countdown = {
        let engine = engine.clone();
        let update = update.clone();
        Callback::from(move |countdown: Countdown| {
            engine.borrow_mut().set_countdown(countdown);
            update.force_update();
        })
    };

    let engine = engine.borrow();
    UseDrawHandle {
        result: engine.result().cloned(),
        remaining: engine.remaining(),
        history: Rc::new(engine.history().as_slice().to_vec()),
        can_draw: engine.can_draw(),
        exhausted: engine.is_exhausted(),
        countdown: engine.countdown(),
        message: (*message).clone(),
        draw,
        reset,
        set_countdown,
    }
}

/// Shared application state provided by `App`.
#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext is provided by App")
}

/// Backend client carrying the current staff token.
#[hook]
pub fn use_api() -> ApiClient {
    let app = use_app();
    let token = app.state.token();
    use_memo(token, |token| {
        ApiClient::new(API_BASE_URL).with_token(token.clone())
    })
    .as_ref()
    .clone()
}
