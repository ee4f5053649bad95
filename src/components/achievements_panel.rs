use yew::prelude::*;

use crate::model::{Achievement, Progress, Theme, earned_count, unlocked_themes};

#[derive(Properties, PartialEq, Clone)]
pub struct AchievementsPanelProps {
    pub progress: Progress,
}

#[function_component]
pub fn AchievementsPanel(props: &AchievementsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let themes = unlocked_themes(&props.progress);
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:8px; font-size:14px;">
            <div style="font-weight:600;">{ format!("Achievements {}/{}", earned_count(&props.progress), Achievement::ALL.len()) }</div>
            { for Achievement::ALL.iter().map(|a| {
                let earned = a.is_earned(&props.progress);
                let color = if earned { "#d4af37" } else { "#8b949e" };
                html! {
                    <div style={format!("{row_style} color:{color};")} title={a.hint()}>
                        <span style={icon_style}>{ if earned { "🏆" } else { "·" } }</span>
                        <span>{ a.title() }</span>
                    </div>
                }
            }) }
            <div style="font-size:12px; opacity:0.8;">
                {"Themes: "}
                { for Theme::ALL.iter().map(|t| {
                    let open = themes.contains(t);
                    html! { <span style={if open { "margin-right:6px;" } else { "margin-right:6px; opacity:0.35;" }}>{ t.title() }</span> }
                }) }
            </div>
        </div>
    }
}
