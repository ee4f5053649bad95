use yew::prelude::*;

use super::app::SceneContext;
use crate::audio::SoundClip;
use crate::catalog::{self, GIFTS};
use crate::model::{SceneAction, SceneType};
use crate::state::{GiftClick, GiftGallery};

#[function_component(GiftsScene)]
pub fn gifts_scene() -> Html {
    let ctx = use_context::<SceneContext>().expect("GiftsScene needs a SceneContext");
    let gallery = use_mut_ref(GiftGallery::default);
    let revealed = use_state(|| None::<u8>);
    let redraw = use_force_update();
    let progress = ctx.store.progress.clone();

    if !progress.unlocked_gifts {
        return html! {
            <div style="display:flex; flex-direction:column; align-items:center; justify-content:center; height:100%; gap:12px;">
                <div style="font-size:48px;">{"🔒"}</div>
                <div>{"The gifts are locked. Reach the top of the ladder first."}</div>
                <button onclick={ctx.go(SceneType::Ladder)}>{"To the ladder 🪜"}</button>
            </div>
        };
    }

    let on_gift = |id: u8| {
        let ctx = ctx.clone();
        let gallery = gallery.clone();
        let revealed = revealed.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            let opened = ctx.store.progress.gifts_opened.clone();
            let click = gallery.borrow_mut().click(id, &opened);
            match click {
                GiftClick::Chosen(id) => {
                    log::debug!("gift {id} chosen");
                    ctx.play(SoundClip::Click);
                    redraw.force_update();
                }
                GiftClick::Opened { id, opened, finale } => {
                    log::info!("gift {id} opened ({} total)", opened.len());
                    ctx.play(if finale { SoundClip::Fanfare } else { SoundClip::Unwrap });
                    ctx.store.dispatch(SceneAction::OpenGift(id));
                    revealed.set(Some(id));
                }
                GiftClick::AlreadyOpen(id) => revealed.set(Some(id)),
                GiftClick::Unknown(id) => log::warn!("no gift with id {id}"),
            }
        })
    };
    let close_reveal = {
        let revealed = revealed.clone();
        Callback::from(move |_: MouseEvent| revealed.set(None))
    };

    let chosen = gallery.borrow().chosen();
    let finale = progress.all_gifts_opened();
    let hint = match chosen {
        None => "Pick the box you like best.",
        Some(_) if finale => "",
        Some(_) => "Now open them, one at a time.",
    };

    html! {
        <div style="display:flex; flex-direction:column; align-items:center; gap:18px; padding:24px;">
            <div style="opacity:0.8;">{ hint }</div>
            <div style="display:grid; grid-template-columns:repeat(auto-fill, minmax(140px, 1fr)); gap:14px; width:100%; max-width:760px;">
                { for GIFTS.iter().map(|g| {
                    let open = progress.gifts_opened.contains(g.id);
                    let picked = chosen == Some(g.id);
                    html! {
                        <button
                            class={classes!("gift", open.then_some("opened"), picked.then_some("chosen"))}
                            onclick={on_gift(g.id)}
                            style="display:flex; flex-direction:column; align-items:center; gap:6px; padding:18px; border-radius:12px;"
                        >
                            <span style="font-size:40px;">{ if open { g.kind.icon() } else { "🎁" } }</span>
                            <span style="font-weight:600;">{ g.title }</span>
                        </button>
                    }
                }) }
            </div>
            if finale {
                <div class="finale" style="font-size:22px; color:#f778ba; text-align:center;">{"That's all of them. Happy birthday! 🎉"}</div>
            }
            {
                match (*revealed).and_then(catalog::gift) {
                    Some(g) => html! {
                        <div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.6); z-index:45;">
                            <div role="dialog" aria-modal="true" style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:20px 24px; max-width:420px; text-align:center; display:flex; flex-direction:column; gap:10px;">
                                <div style="font-size:48px;">{ g.kind.icon() }</div>
                                <h3 style="margin:0;">{ g.title }</h3>
                                <p style="margin:0;">{ g.reveal }</p>
                                <button onclick={close_reveal}>{"Close"}</button>
                            </div>
                        </div>
                    },
                    None => html! {},
                }
            }
        </div>
    }
}
