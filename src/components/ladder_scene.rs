use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use super::app::SceneContext;
use crate::audio::SoundClip;
use crate::config::LadderRules;
use crate::model::{ProgressPatch, SceneType};
use crate::state::{ClimbOutcome, Ladder};
use crate::storage;
use crate::util::{Timeout, now_ms};

fn persist(progress: u8) {
    if let Err(err) = storage::save_ladder_progress(progress) {
        log::warn!("ladder progress not saved: {err}");
    }
}

#[function_component(LadderScene)]
pub fn ladder_scene() -> Html {
    let ctx = use_context::<SceneContext>().expect("LadderScene needs a SceneContext");
    let ladder = use_mut_ref(|| Ladder::resume(LadderRules::default(), storage::load_ladder_progress()));
    let shown = use_state(|| ladder.borrow().progress());
    let feedback = use_state(|| None::<&'static str>);
    let climbing = use_state(|| false);
    let climb_anim = use_mut_ref(|| None::<Timeout>);

    // Saved progress becomes the shared value on entry.
    {
        let ctx = ctx.clone();
        let saved = ladder.borrow().progress();
        let goal = ladder.borrow().goal();
        use_effect_with((), move |_| {
            ctx.update_progress(ProgressPatch {
                ladder_progress: Some(saved),
                unlocked_gifts: (saved >= goal).then_some(true),
                ..Default::default()
            });
            || ()
        });
    }

    let climb: Rc<dyn Fn()> = {
        let ctx = ctx.clone();
        let ladder = ladder.clone();
        let shown = shown.clone();
        let feedback = feedback.clone();
        let climbing = climbing.clone();
        let climb_anim = climb_anim.clone();
        Rc::new(move || {
            let outcome = ladder.borrow_mut().climb(now_ms());
            match outcome {
                ClimbOutcome::Ignored => return,
                ClimbOutcome::Climbed { progress, reached_top } => {
                    persist(progress);
                    ctx.update_progress(ProgressPatch {
                        ladder_progress: Some(progress),
                        unlocked_gifts: reached_top.then_some(true),
                        ..Default::default()
                    });
                    if reached_top {
                        log::info!("ladder complete, gifts unlocked");
                        ctx.play(SoundClip::Fanfare);
                        feedback.set(Some("You made it to the top! The gifts are unlocked."));
                    } else {
                        ctx.play(SoundClip::Climb);
                        feedback.set(None);
                    }
                    shown.set(progress);
                }
                ClimbOutcome::Fell(reason) => {
                    log::debug!("ladder fall: {reason:?}");
                    persist(0);
                    ctx.update_progress(ProgressPatch {
                        ladder_progress: Some(0),
                        ..Default::default()
                    });
                    ctx.play(SoundClip::Fail);
                    feedback.set(Some(reason.message()));
                    shown.set(0);
                }
            }
            climbing.set(true);
            let climbing = climbing.clone();
            let delay = LadderRules::default().resolve_delay_ms as u32;
            *climb_anim.borrow_mut() = Some(Timeout::new(delay, move || climbing.set(false)));
        })
    };

    // Keyboard: Space or ArrowUp climbs.
    {
        let climb = climb.clone();
        use_effect_with((), move |_| {
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if e.repeat() {
                    return;
                }
                if e.code() == "Space" || e.key() == "ArrowUp" {
                    e.prevent_default();
                    climb();
                }
            }) as Box<dyn FnMut(_)>);
            let window = web_sys::window();
            if let Some(win) = &window {
                win.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                    .ok();
            }
            move || {
                if let Some(win) = &window {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let on_click = {
        let climb = climb.clone();
        Callback::from(move |_: MouseEvent| climb())
    };
    let goal = ladder.borrow().goal();
    let at_top = *shown >= goal;
    let to_gifts = ctx.go(SceneType::Gifts);
    let climber_bottom = (*shown as f64 / goal as f64) * 100.0;

    html! {
        <div style="display:flex; gap:32px; height:100%; align-items:center; justify-content:center; padding:16px;">
            <div class="ladder" style="position:relative; width:120px; height:80%; border-left:6px solid #8b5a2b; border-right:6px solid #8b5a2b;">
                { for (0..goal).map(|i| {
                    let bottom = (i as f64 + 0.5) / goal as f64 * 100.0;
                    let lit = i < *shown;
                    html! { <div style={format!("position:absolute; left:0; right:0; bottom:{bottom:.2}%; height:4px; background:{};", if lit { "#d4af37" } else { "#8b5a2b" })} /> }
                }) }
                <div class={classes!("climber", (*climbing).then_some("climbing"))}
                    style={format!("position:absolute; left:50%; bottom:{climber_bottom:.2}%; transform:translate(-50%, 50%); font-size:32px;")}>
                    {"🧗"}
                </div>
            </div>
            <div style="display:flex; flex-direction:column; gap:12px; max-width:320px;">
                <div style="font-size:28px; font-weight:700; font-variant-numeric:tabular-nums;">{ format!("{} / {}", *shown, goal) }</div>
                <div style="font-size:13px; opacity:0.8;">{"Press Space (or tap Climb) in a steady rhythm: not faster than every 0.4s, not slower than every 1.2s."}</div>
                if at_top {
                    <button onclick={to_gifts}>{"Go to the gifts 🎁"}</button>
                } else {
                    <button onclick={on_click} style="font-size:20px; padding:12px;">{"Climb"}</button>
                }
                if let Some(msg) = *feedback {
                    <div aria-live="polite" style="background:#1c2128; border:1px solid #30363d; padding:6px 8px; border-radius:6px;">{ msg }</div>
                }
            </div>
        </div>
    }
}
