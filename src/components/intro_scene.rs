use yew::prelude::*;

use super::app::SceneContext;
use crate::model::SceneType;

#[function_component(IntroScene)]
pub fn intro_scene() -> Html {
    let ctx = use_context::<SceneContext>().expect("IntroScene needs a SceneContext");
    let begin = ctx.go(SceneType::Midnight);
    let skip = ctx.go(SceneType::Room);
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.8); border:2px solid #30363d; padding:28px 36px; border-radius:14px; max-width:520px; width:90%; font-size:14px; line-height:1.4; text-align:center;">
            <h2 style="margin:0 0 12px 0; font-size:24px; color:#f778ba;">{"Psst… it's almost your day"}</h2>
            <p style="margin:4px 0 10px 0; opacity:0.85;">{"A few little things are waiting for you. Turn your sound on if you can."}</p>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px; text-align:left;">
                <li>{"Climb the ladder in rhythm to unlock the gifts."}</li>
                <li>{"Swipe across the cake to cut it."}</li>
                <li>{"Blow into the microphone to put the candles out."}</li>
                <li>{"Read the letters your friends left for you."}</li>
            </ul>
            <div style="display:flex; gap:12px; justify-content:center; margin-top:8px;">
                <button onclick={begin}>{"Begin"}</button>
                <button onclick={skip}>{"Skip to the room"}</button>
            </div>
        </div>
    }
}
