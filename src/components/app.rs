use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

use super::{scene_router::SceneRouter, settings_modal::SettingsModal, top_bar::TopBar};
use crate::audio::{AudioSession, SoundClip};
use crate::config::MUSIC_FALLBACK_URL;
use crate::model::{ProgressPatch, SceneAction, SceneState, SceneType};

/// Store and audio session, shared with every scene without prop drilling.
#[derive(Clone)]
pub struct SceneContext {
    pub store: UseReducerHandle<SceneState>,
    pub audio: Rc<RefCell<AudioSession>>,
}

impl PartialEq for SceneContext {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store && Rc::ptr_eq(&self.audio, &other.audio)
    }
}

impl SceneContext {
    pub fn navigate(&self, scene: SceneType) {
        self.store.dispatch(SceneAction::NavigateTo(scene));
    }

    pub fn update_progress(&self, patch: ProgressPatch) {
        self.store.dispatch(SceneAction::UpdateProgress(patch));
    }

    pub fn play(&self, clip: SoundClip) {
        self.audio.borrow().play(clip);
    }

    /// Callback that plays a click and moves to `scene`.
    pub fn go(&self, scene: SceneType) -> Callback<MouseEvent> {
        let ctx = self.clone();
        Callback::from(move |_| {
            ctx.play(SoundClip::Click);
            ctx.navigate(scene);
        })
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_reducer(SceneState::default);
    let audio = use_mut_ref(|| AudioSession::new(true));
    let show_settings = use_state(|| false);
    let music_blocked = use_state(|| false);

    // Audio elements live exactly as long as the app shell.
    {
        let audio = audio.clone();
        use_effect_with((), move |_| {
            audio.borrow_mut().initialize();
            move || audio.borrow_mut().teardown()
        });
    }

    // Keep the session in step with the sound/music settings.
    {
        let audio = audio.clone();
        let music_blocked = music_blocked.clone();
        let sound = store.settings.sound_enabled;
        let music = store.settings.music_enabled;
        use_effect_with((sound, music), move |&(sound, music)| {
            let mut session = audio.borrow_mut();
            session.set_enabled(sound);
            if sound && music {
                music_blocked.set(false);
                let blocked = music_blocked.clone();
                session.start_music(move |_| blocked.set(true));
            } else {
                session.stop_music();
            }
            || ()
        });
    }

    {
        let scene = store.current_scene;
        let previous = store.previous_scene;
        use_effect_with(store.nav_seq, move |seq| {
            log::info!(
                "scene #{seq}: {} -> {}",
                previous.map(|p| p.slug()).unwrap_or("-"),
                scene.slug()
            );
            || ()
        });
    }

    let ctx = SceneContext { store: store.clone(), audio: audio.clone() };

    let dispatch = |action: fn() -> SceneAction| {
        let store = store.clone();
        Callback::from(move |_: ()| store.dispatch(action()))
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: ()| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: ()| show_settings.set(false))
    };
    let on_wallpaper = {
        let store = store.clone();
        Callback::from(move |url: Option<String>| store.dispatch(SceneAction::SetCustomWallpaper(url)))
    };
    let go_home = {
        let ctx = ctx.clone();
        Callback::from(move |_: ()| {
            ctx.play(SoundClip::Click);
            ctx.navigate(SceneType::Room);
        })
    };

    let settings = store.settings.clone();
    let mut classes = classes!("app");
    if settings.high_contrast {
        classes.push("high-contrast");
    }
    if settings.reduced_motion {
        classes.push("reduced-motion");
    }
    let root_style = match &settings.custom_wallpaper {
        Some(url) => format!(
            "background-image:url('{}'); background-size:cover; background-position:center;",
            url.replace('\'', "%27")
        ),
        None => String::new(),
    };
    let show_home = !matches!(
        store.current_scene,
        SceneType::Intro | SceneType::Midnight | SceneType::Room
    );

    html! {
        <ContextProvider<SceneContext> context={ctx}>
            <div id="root" class={classes} style={root_style}>
                <TopBar
                    title={store.current_scene.title()}
                    show_home={show_home}
                    on_home={go_home}
                    on_open_settings={open_settings}
                />
                if *music_blocked {
                    <div class="banner">
                        {"The browser blocked the music. "}
                        <a href={MUSIC_FALLBACK_URL} target="_blank" rel="noopener noreferrer">{"Listen here"}</a>
                    </div>
                }
                <SceneRouter />
                <SettingsModal
                    show={*show_settings}
                    settings={settings}
                    on_close={close_settings}
                    on_toggle_sound={dispatch(|| SceneAction::ToggleSound)}
                    on_toggle_music={dispatch(|| SceneAction::ToggleMusic)}
                    on_toggle_reduced_motion={dispatch(|| SceneAction::ToggleReducedMotion)}
                    on_toggle_high_contrast={dispatch(|| SceneAction::ToggleHighContrast)}
                    on_wallpaper={on_wallpaper}
                />
            </div>
        </ContextProvider<SceneContext>>
    }
}
