use yew::prelude::*;

use super::app::SceneContext;
use super::{
    cake_scene::CakeScene, candle_scene::CandleScene, gifts_scene::GiftsScene,
    intro_scene::IntroScene, ladder_scene::LadderScene, messages_scene::MessagesScene,
    midnight_scene::MidnightScene, room_scene::RoomScene,
};
use crate::config::TransitionTiming;
use crate::model::{SceneAction, SceneType};
use crate::state::transition::should_animate;
use crate::state::SceneFade;
use crate::util::Timeout;

fn render_scene(scene: SceneType) -> Html {
    match scene {
        SceneType::Intro => html! { <IntroScene /> },
        SceneType::Midnight => html! { <MidnightScene /> },
        SceneType::Room => html! { <RoomScene /> },
        SceneType::Ladder => html! { <LadderScene /> },
        SceneType::Cake => html! { <CakeScene /> },
        SceneType::Candle => html! { <CandleScene /> },
        SceneType::Gifts => html! { <GiftsScene /> },
        SceneType::Messages => html! { <MessagesScene /> },
    }
}

/// Shows the store's current scene, cross-fading from the previous one.
#[function_component(SceneRouter)]
pub fn scene_router() -> Html {
    let ctx = use_context::<SceneContext>().expect("SceneRouter needs a SceneContext");
    let state = ctx.store.clone();
    let fade = use_state(|| SceneFade::settled(state.nav_seq, state.current_scene));

    {
        let fade = fade.clone();
        let store = ctx.store.clone();
        let seq = state.nav_seq;
        let to = state.current_scene;
        let animate = should_animate(state.previous_scene, state.settings.reduced_motion);
        use_effect_with(seq, move |_| {
            let mut timers: Vec<Timeout> = Vec::new();
            if fade.seq != seq {
                let start = SceneFade::begin(seq, fade.displayed(), to, animate, TransitionTiming::default());
                if animate {
                    store.dispatch(SceneAction::TransitionStarted { seq });
                    let mut entering = start;
                    entering.advance();
                    let mut settled = entering;
                    settled.advance();
                    let out_ms = start.phase_ms().unwrap_or(0);
                    let in_ms = entering.phase_ms().unwrap_or(0);
                    {
                        let fade = fade.clone();
                        timers.push(Timeout::new(out_ms, move || fade.set(entering)));
                    }
                    {
                        let fade = fade.clone();
                        let store = store.clone();
                        timers.push(Timeout::new(out_ms + in_ms, move || {
                            fade.set(settled);
                            store.dispatch(SceneAction::TransitionFinished { seq });
                        }));
                    }
                } else {
                    store.dispatch(SceneAction::TransitionFinished { seq });
                }
                fade.set(start);
            }
            // A newer navigation drops these timers before they fire.
            move || drop(timers)
        });
    }

    html! {
        <main class={fade.phase().css_class()} style="position:absolute; inset:44px 0 0 0; overflow:hidden;">
            { render_scene(fade.displayed()) }
        </main>
    }
}
