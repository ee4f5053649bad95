use yew::prelude::*;

use super::achievements_panel::AchievementsPanel;
use super::app::SceneContext;
use crate::catalog::GIFTS;
use crate::config::LadderRules;
use crate::model::SceneType;

#[derive(Properties, PartialEq, Clone)]
struct DoorProps {
    pub icon: AttrValue,
    pub label: AttrValue,
    pub status: AttrValue,
    #[prop_or(false)]
    pub locked: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component]
fn Door(props: &DoorProps) -> Html {
    html! {
        <button class="door" disabled={props.locked} onclick={props.onclick.clone()} style="display:flex; flex-direction:column; align-items:center; gap:6px; padding:18px; min-width:130px; border-radius:12px;">
            <span style="font-size:36px;">{ if props.locked { AttrValue::from("🔒") } else { props.icon.clone() } }</span>
            <span style="font-weight:600;">{ props.label.clone() }</span>
            <span style="font-size:11px; opacity:0.7;">{ props.status.clone() }</span>
        </button>
    }
}

/// Hub: one door per activity plus the achievements board.
#[function_component(RoomScene)]
pub fn room_scene() -> Html {
    let ctx = use_context::<SceneContext>().expect("RoomScene needs a SceneContext");
    let p = ctx.store.progress.clone();
    let done = |flag: bool| AttrValue::from(if flag { "done ✓" } else { "not yet" });

    html! {
        <div style="display:flex; flex-wrap:wrap; gap:24px; padding:24px; align-items:flex-start; justify-content:center;">
            <div style="display:grid; grid-template-columns:repeat(auto-fill, minmax(140px, 1fr)); gap:14px; flex:1; max-width:640px;">
                <Door icon="🪜" label="Ladder"
                    status={format!("{}/{}", p.ladder_progress, LadderRules::default().goal)}
                    onclick={ctx.go(SceneType::Ladder)} />
                <Door icon="🎂" label="Cake" status={done(p.cake_sliced)} onclick={ctx.go(SceneType::Cake)} />
                <Door icon="🕯" label="Candles" status={done(p.candle_blown)} onclick={ctx.go(SceneType::Candle)} />
                <Door icon="🎁" label="Gifts"
                    locked={!p.unlocked_gifts}
                    status={if p.unlocked_gifts {
                        AttrValue::from(format!("{}/{} opened", p.gifts_opened.len(), GIFTS.len()))
                    } else {
                        AttrValue::from("climb the ladder first")
                    }}
                    onclick={ctx.go(SceneType::Gifts)} />
                <Door icon="💌" label="Letters" status="from your friends" onclick={ctx.go(SceneType::Messages)} />
            </div>
            <AchievementsPanel progress={p} />
        </div>
    }
}
