use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{FileReader, HtmlInputElement};
use yew::prelude::*;

use crate::model::Settings;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: Settings,
    pub on_close: Callback<()>,
    pub on_toggle_sound: Callback<()>,
    pub on_toggle_music: Callback<()>,
    pub on_toggle_reduced_motion: Callback<()>,
    pub on_toggle_high_contrast: Callback<()>,
    pub on_wallpaper: Callback<Option<String>>,
}

fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Reads the first selected file as a data URL and hands it to `on_done`.
fn read_wallpaper(input: &HtmlInputElement, on_done: Callback<Option<String>>) {
    let Some(file) = input.files().and_then(|files| files.get(0)) else { return };
    if !is_image_mime(&file.type_()) {
        log::warn!("wallpaper ignored: {} is not an image", file.type_());
        return;
    }
    let reader = match FileReader::new() {
        Ok(r) => r,
        Err(err) => {
            log::warn!("wallpaper: no FileReader ({err:?})");
            return;
        }
    };
    let reader_done = reader.clone();
    let onload = Closure::once_into_js(move || match reader_done.result() {
        Ok(value) => match value.as_string() {
            Some(url) => on_done.emit(Some(url)),
            None => log::warn!("wallpaper: unexpected reader result"),
        },
        Err(err) => log::warn!("wallpaper: read failed ({err:?})"),
    });
    reader.set_onload(Some(onload.unchecked_ref()));
    if let Err(err) = reader.read_as_data_url(&file) {
        log::warn!("wallpaper: read failed ({err:?})");
    }
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let close_cb = emit(&props.on_close);
    let on_file = {
        let cb = props.on_wallpaper.clone();
        Callback::from(move |e: Event| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                read_wallpaper(&input, cb.clone());
            }
        })
    };
    let clear_wallpaper = {
        let cb = props.on_wallpaper.clone();
        Callback::from(move |_| cb.emit(None))
    };
    let s = &props.settings;

    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div role="dialog" aria-modal="true" style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:320px; max-width:460px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.sound_enabled} onclick={emit(&props.on_toggle_sound)} />
                    <span>{"Sound"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.music_enabled} disabled={!s.sound_enabled} onclick={emit(&props.on_toggle_music)} />
                    <span>{"Music"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.reduced_motion} onclick={emit(&props.on_toggle_reduced_motion)} />
                    <span>{"Reduce motion"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={s.high_contrast} onclick={emit(&props.on_toggle_high_contrast)} />
                    <span>{"High contrast"}</span>
                </label>
            </div>
            <div style="display:flex; flex-direction:column; gap:6px;">
                <span style="font-weight:500;">{"Wallpaper"}</span>
                <input type="file" accept="image/*" onchange={on_file} />
                if s.custom_wallpaper.is_some() {
                    <button onclick={clear_wallpaper}>{"Remove wallpaper"}</button>
                }
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Settings last for this visit only. Ladder progress is remembered on this device."}</div>
        </div>
    </div>}
}

#[cfg(test)]
mod tests {
    use super::is_image_mime;

    #[test]
    fn only_images_become_wallpaper() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/jpeg"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime(""));
    }
}
