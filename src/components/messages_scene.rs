use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use super::app::SceneContext;
use crate::audio::SoundClip;
use crate::catalog::{self, LETTERS};

#[function_component(MessagesScene)]
pub fn messages_scene() -> Html {
    let ctx = use_context::<SceneContext>().expect("MessagesScene needs a SceneContext");
    let open = use_state(|| None::<u8>);

    // Escape closes the open letter.
    {
        let open = open.clone();
        use_effect_with(*open, move |current| {
            let listener = current.map(|_| {
                let open = open.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    if e.key() == "Escape" {
                        open.set(None);
                    }
                }) as Box<dyn FnMut(_)>)
            });
            let window = web_sys::window();
            if let (Some(win), Some(cb)) = (&window, &listener) {
                win.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref())
                    .ok();
            }
            move || {
                if let (Some(win), Some(cb)) = (&window, &listener) {
                    let _ = win
                        .remove_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
                }
            }
        });
    }

    let select = |id: u8| {
        let ctx = ctx.clone();
        let open = open.clone();
        Callback::from(move |_: MouseEvent| {
            ctx.play(SoundClip::Unwrap);
            open.set(Some(id));
        })
    };
    let close = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(None))
    };

    html! {
        <div style="display:flex; flex-direction:column; align-items:center; gap:18px; padding:24px;">
            <div style="opacity:0.8;">{"Letters from the people who love you."}</div>
            <div style="display:grid; grid-template-columns:repeat(auto-fill, minmax(180px, 1fr)); gap:14px; width:100%; max-width:760px;">
                { for LETTERS.iter().map(|l| html! {
                    <button class="letter" onclick={select(l.id)}
                        style="display:flex; flex-direction:column; align-items:flex-start; gap:4px; padding:14px; border-radius:10px; text-align:left;">
                        <span style="font-size:11px; text-transform:uppercase; opacity:0.7;">{ l.kind.label() }</span>
                        <span style="font-weight:600;">{ l.title }</span>
                        <span style="font-size:12px; opacity:0.8;">{ format!("from {}", l.author) }</span>
                    </button>
                }) }
            </div>
            {
                match (*open).and_then(catalog::letter) {
                    Some(l) => html! {
                        <div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.6); z-index:45;">
                            <div role="dialog" aria-modal="true" style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:20px 24px; max-width:480px; display:flex; flex-direction:column; gap:10px;">
                                <h3 style="margin:0;">{ l.title }</h3>
                                <p style="margin:0; white-space:pre-line; line-height:1.5;">{ l.body }</p>
                                <div style="text-align:right; font-style:italic;">{ format!("love, {}", l.author) }</div>
                                <button onclick={close}>{"Close"}</button>
                            </div>
                        </div>
                    },
                    None => html! {},
                }
            }
        </div>
    }
}
