use web_sys::{Element, PointerEvent};
use yew::prelude::*;

use super::app::SceneContext;
use crate::audio::SoundClip;
use crate::config::SliceRules;
use crate::model::{ProgressPatch, SceneType};
use crate::state::{CakeSlicer, Point};
use crate::util::{now_ms, percent_in_rect};

fn surface_point(surface: &NodeRef, e: &PointerEvent) -> Option<Point> {
    let el = surface.cast::<Element>()?;
    let rect = el.get_bounding_client_rect();
    let (x, y) = percent_in_rect(e.client_x() as f64, e.client_y() as f64, &rect);
    Some(Point::new(x, y))
}

#[function_component(CakeScene)]
pub fn cake_scene() -> Html {
    let ctx = use_context::<SceneContext>().expect("CakeScene needs a SceneContext");
    let surface = use_node_ref();
    let slicer = use_mut_ref(|| CakeSlicer::new(SliceRules::default()));
    let redraw = use_force_update();

    let on_down = {
        let slicer = slicer.clone();
        let surface = surface.clone();
        Callback::from(move |e: PointerEvent| {
            let Some(p) = surface_point(&surface, &e) else { return };
            if let Some(el) = surface.cast::<Element>() {
                let _ = el.set_pointer_capture(e.pointer_id());
            }
            slicer.borrow_mut().pointer_down(p);
        })
    };
    let on_move = {
        let slicer = slicer.clone();
        let surface = surface.clone();
        let redraw = redraw.clone();
        let ctx = ctx.clone();
        Callback::from(move |e: PointerEvent| {
            let Some(p) = surface_point(&surface, &e) else { return };
            let event = slicer.borrow_mut().pointer_move(p, now_ms());
            let Some(ev) = event else { return };
            log::debug!("slice {} accepted", ev.count);
            ctx.play(SoundClip::Slice);
            if ev.first {
                ctx.update_progress(ProgressPatch {
                    cake_sliced: Some(true),
                    ..Default::default()
                });
            }
            if ev.complete {
                ctx.play(SoundClip::Fanfare);
            }
            redraw.force_update();
        })
    };
    let on_up = {
        let slicer = slicer.clone();
        Callback::from(move |_: PointerEvent| slicer.borrow_mut().pointer_up())
    };

    let s = slicer.borrow();
    let status = if s.is_complete() {
        "Eight perfect slices. Time for candles!".to_string()
    } else if s.count() == 0 {
        "Drag across the cake to cut it.".to_string()
    } else {
        format!("{} slices left", s.remaining())
    };

    html! {
        <div style="display:flex; flex-direction:column; align-items:center; justify-content:center; height:100%; gap:16px;">
            <div
                ref={surface}
                class={classes!("cake", s.is_split().then_some("split"))}
                style="position:relative; width:min(70vw, 420px); aspect-ratio:1; touch-action:none; user-select:none; cursor:crosshair;"
                onpointerdown={on_down}
                onpointermove={on_move}
                onpointerup={on_up.clone()}
                onpointercancel={on_up.clone()}
                onpointerleave={on_up}
            >
                <div class="cake-body" style="position:absolute; inset:10%; border-radius:50%; background:radial-gradient(circle, #ffd1dc 0%, #f4a6c0 60%, #c96b8d 100%); box-shadow:0 10px 30px rgba(0,0,0,0.4);" />
                <svg viewBox="0 0 100 100" style="position:absolute; inset:0; width:100%; height:100%; pointer-events:none;">
                    { for s.slices().iter().map(|sl| html! {
                        <line x1={sl.from.x.to_string()} y1={sl.from.y.to_string()}
                              x2={sl.to.x.to_string()} y2={sl.to.y.to_string()}
                              stroke="#fff" stroke-width="0.8" stroke-linecap="round" />
                    }) }
                </svg>
            </div>
            <div aria-live="polite" style="font-size:15px;">{ status }</div>
            if s.is_complete() {
                <button onclick={ctx.go(SceneType::Candle)}>{"Light the candles 🕯"}</button>
            }
        </div>
    }
}
