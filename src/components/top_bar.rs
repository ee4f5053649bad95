use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TopBarProps {
    pub title: AttrValue,
    pub show_home: bool,
    pub on_home: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn TopBar(props: &TopBarProps) -> Html {
    let home_cb = {
        let cb = props.on_home.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div id="top-bar" style="position:fixed; top:0; left:0; right:0; height:44px; display:flex; align-items:center; justify-content:space-between; padding:0 12px; background:rgba(22,27,34,0.75); border-bottom:1px solid #30363d; z-index:40;">
        <div style="display:flex; gap:8px; align-items:center;">
            if props.show_home {
                <button onclick={home_cb} aria-label="Back to the room">{"🏠 Room"}</button>
            }
            <span style="font-weight:600;">{ props.title.clone() }</span>
        </div>
        <button onclick={settings_cb} aria-label="Settings">{"⚙ Settings"}</button>
    </div>}
}
