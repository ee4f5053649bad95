use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use super::app::SceneContext;
use crate::audio::SoundClip;
use crate::config::BlowRules;
use crate::mic::MicCapture;
use crate::model::{ProgressPatch, SceneType};
use crate::state::{Candles, FlameState, MicStatus};
use crate::util::{FrameLoop, Timeout};

type SharedCandles = Rc<RefCell<Candles<MicCapture>>>;

/// Everything the candle scene must cancel when it goes away.
#[derive(Default)]
struct Pending {
    frames: Option<FrameLoop>,
    settle: Option<Timeout>,
}

/// Runs once when the flames start going out, whichever path triggered it.
fn on_blow_out(
    ctx: &SceneContext,
    candles: &SharedCandles,
    pending: &Rc<RefCell<Pending>>,
    redraw: &UseForceUpdateHandle,
) {
    log::info!("candles blown out");
    ctx.play(SoundClip::Blow);
    ctx.update_progress(ProgressPatch {
        candle_blown: Some(true),
        ..Default::default()
    });
    let settle_ms = BlowRules::default().settle_ms;
    let candles = candles.clone();
    let redraw_done = redraw.clone();
    let timeout = Timeout::new(settle_ms as u32, move || {
        if candles.borrow_mut().finish() {
            redraw_done.force_update();
        }
    });
    pending.borrow_mut().settle = Some(timeout);
    redraw.force_update();
}

fn start_listening(
    ctx: SceneContext,
    candles: SharedCandles,
    pending: Rc<RefCell<Pending>>,
    redraw: UseForceUpdateHandle,
    strength: UseStateHandle<f32>,
) {
    let frames = {
        let candles = candles.clone();
        let pending = pending.clone();
        let mut shown = 0.0_f32;
        FrameLoop::start(move || {
            let reading = candles.borrow_mut().readings().next();
            match reading {
                Some(r) => {
                    // meter only needs coarse updates
                    if (r.strength - shown).abs() > 0.02 {
                        shown = r.strength;
                        strength.set(r.strength);
                    }
                    if r.triggered {
                        on_blow_out(&ctx, &candles, &pending, &redraw);
                        return false;
                    }
                    true
                }
                None => false,
            }
        })
    };
    pending.borrow_mut().frames = Some(frames);
}

#[function_component(CandleScene)]
pub fn candle_scene() -> Html {
    let ctx = use_context::<SceneContext>().expect("CandleScene needs a SceneContext");
    let already_blown = ctx.store.progress.candle_blown;
    let candles: SharedCandles = use_mut_ref(|| {
        if already_blown {
            Candles::extinguished(BlowRules::default())
        } else {
            Candles::new(BlowRules::default())
        }
    });
    let pending = use_mut_ref(Pending::default);
    let redraw = use_force_update();
    let strength = use_state(|| 0.0_f32);

    // Leaving the scene releases the microphone and cancels frames and timers.
    {
        let candles = candles.clone();
        let pending = pending.clone();
        use_effect_with((), move |_| {
            move || {
                candles.borrow_mut().close();
                let mut p = pending.borrow_mut();
                p.frames = None;
                p.settle = None;
            }
        });
    }

    let on_manual = {
        let ctx = ctx.clone();
        let candles = candles.clone();
        let pending = pending.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            let started = candles.borrow_mut().blow_out();
            if started {
                on_blow_out(&ctx, &candles, &pending, &redraw);
            }
        })
    };

    let on_mic = {
        let ctx = ctx.clone();
        let candles = candles.clone();
        let pending = pending.clone();
        let redraw = redraw.clone();
        let strength = strength.clone();
        Callback::from(move |_: MouseEvent| {
            if !candles.borrow_mut().begin_mic_request() {
                return;
            }
            log::info!("requesting microphone");
            redraw.force_update();
            let ctx = ctx.clone();
            let candles = candles.clone();
            let pending = pending.clone();
            let redraw = redraw.clone();
            let strength = strength.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let fraction = BlowRules::default().low_band_fraction;
                match MicCapture::acquire(fraction).await {
                    Ok(capture) => {
                        candles.borrow_mut().attach(capture);
                        if *candles.borrow().mic_status() == MicStatus::Listening {
                            start_listening(ctx, candles, pending, redraw.clone(), strength);
                        }
                    }
                    Err(err) => {
                        log::warn!("{err}");
                        candles.borrow_mut().mic_failed(err.user_message());
                    }
                }
                redraw.force_update();
            });
        })
    };

    let c = candles.borrow();
    let flames = c.flames();
    let lit = c.is_lit();
    let status = match c.mic_status() {
        MicStatus::Off if lit => "Blow into your microphone, or tap the button.".to_string(),
        MicStatus::Off => String::new(),
        MicStatus::Requesting => "Waiting for microphone permission…".to_string(),
        MicStatus::Listening => "Listening… blow!".to_string(),
        MicStatus::Unavailable(msg) => msg.clone(),
    };
    let can_request = c.can_request_mic();
    let listening = *c.mic_status() == MicStatus::Listening;
    let meter = (*strength / BlowRules::default().threshold).min(1.0) * 100.0;

    html! {
        <div style="display:flex; flex-direction:column; align-items:center; justify-content:center; height:100%; gap:18px;">
            <div class="candles" style="display:flex; gap:22px; align-items:flex-end; height:160px;">
                { for (0..c.flame_count()).map(|_| html! {
                    <div style="display:flex; flex-direction:column; align-items:center;">
                        <span class={classes!("flame", (!lit).then_some("out"))} style="font-size:34px;">
                            { if lit { "🔥" } else { "💨" } }
                        </span>
                        <div style="width:14px; height:80px; border-radius:4px; background:repeating-linear-gradient(45deg, #f778ba, #f778ba 6px, #fff 6px, #fff 12px);" />
                    </div>
                }) }
            </div>
            if listening {
                <div style="width:220px; height:10px; border:1px solid #30363d; border-radius:5px; overflow:hidden;" aria-label="blow strength">
                    <div style={format!("width:{meter:.0}%; height:100%; background:#58a6ff;")} />
                </div>
            }
            <div aria-live="polite" style="min-height:20px;">{ status }</div>
            if lit {
                <div style="display:flex; gap:12px;">
                    if can_request {
                        <button onclick={on_mic}>{"🎤 Use microphone"}</button>
                    }
                    <button onclick={on_manual}>{"💨 Blow"}</button>
                </div>
            }
            {
                match flames {
                    FlameState::Extinguishing => html! { <div style="font-size:20px;">{"Make a wish…"}</div> },
                    FlameState::Out => html! {
                        <div style="display:flex; flex-direction:column; align-items:center; gap:10px;">
                            <div style="font-size:20px;">{"Your wish is on its way ✨"}</div>
                            <button onclick={ctx.go(SceneType::Room)}>{"Back to the room"}</button>
                        </div>
                    },
                    FlameState::Lit => html! {},
                }
            }
        </div>
    }
}
