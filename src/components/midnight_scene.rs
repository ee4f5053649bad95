use yew::prelude::*;

use super::app::SceneContext;
use crate::audio::SoundClip;
use crate::config::CountdownRules;
use crate::model::SceneType;
use crate::state::{Countdown, CountdownStep};
use crate::util::Interval;

#[function_component(MidnightScene)]
pub fn midnight_scene() -> Html {
    let ctx = use_context::<SceneContext>().expect("MidnightScene needs a SceneContext");
    let countdown = use_mut_ref(|| Countdown::new(CountdownRules::default()));
    let remaining = use_state(|| countdown.borrow().remaining());
    let ticker = use_mut_ref(|| None::<Interval>);

    {
        let countdown = countdown.clone();
        let remaining = remaining.clone();
        let ticker = ticker.clone();
        let ctx = ctx.clone();
        use_effect_with((), move |_| {
            let tick_ms = countdown.borrow().tick_ms();
            let ticker_cb = ticker.clone();
            let interval = Interval::new(tick_ms, move || {
                let step = countdown.borrow_mut().tick();
                match step {
                    CountdownStep::Remaining(n) => remaining.set(n),
                    CountdownStep::Midnight => {
                        remaining.set(0);
                        ctx.play(SoundClip::Fanfare);
                    }
                    CountdownStep::Idle => {}
                }
                if !step.keeps_running() {
                    if let Some(interval) = ticker_cb.borrow_mut().as_mut() {
                        interval.cancel();
                    }
                }
            });
            *ticker.borrow_mut() = Some(interval);
            // leaving mid-countdown stops the ticks
            move || drop(ticker.borrow_mut().take())
        });
    }

    let to_room = ctx.go(SceneType::Room);
    html! {
        <div style="display:flex; flex-direction:column; align-items:center; justify-content:center; height:100%; gap:18px;">
            if *remaining > 0 {
                <div class="countdown" aria-live="polite" style="font-size:120px; font-weight:700; font-variant-numeric:tabular-nums;">{ *remaining }</div>
                <div style="opacity:0.7;">{"until midnight"}</div>
            } else {
                <h1 class="greeting" style="font-size:48px; margin:0; color:#f778ba;">{"Happy Birthday!"}</h1>
                <button onclick={to_room}>{"Come inside"}</button>
            }
        </div>
    }
}
