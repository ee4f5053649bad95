//! Audio session: a fixed set of named clips and one looping music track.
//! Owned by the app shell; nothing plays unless the session is enabled.

use std::collections::HashMap;
use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::config::MUSIC_SRC;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundClip {
    Click,
    Climb,
    Fail,
    Slice,
    Blow,
    Unwrap,
    Fanfare,
}

impl SoundClip {
    pub const ALL: [SoundClip; 7] = [
        SoundClip::Click,
        SoundClip::Climb,
        SoundClip::Fail,
        SoundClip::Slice,
        SoundClip::Blow,
        SoundClip::Unwrap,
        SoundClip::Fanfare,
    ];

    fn src(self) -> &'static str {
        match self {
            SoundClip::Click => "audio/click.mp3",
            SoundClip::Climb => "audio/climb.mp3",
            SoundClip::Fail => "audio/fail.mp3",
            SoundClip::Slice => "audio/slice.mp3",
            SoundClip::Blow => "audio/blow.mp3",
            SoundClip::Unwrap => "audio/unwrap.mp3",
            SoundClip::Fanfare => "audio/fanfare.mp3",
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio element could not be created: {0}")]
    Unavailable(String),
    #[error("playback refused: {0}")]
    PlaybackBlocked(String),
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

pub struct AudioSession {
    clips: HashMap<SoundClip, HtmlAudioElement>,
    music: Option<HtmlAudioElement>,
    enabled: bool,
    volume: f64,
}

impl AudioSession {
    pub fn new(enabled: bool) -> Self {
        Self {
            clips: HashMap::new(),
            music: None,
            enabled,
            volume: 0.8,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.music.is_some() || !self.clips.is_empty()
    }

    /// Creates the audio elements. Clips that fail are skipped and logged.
    pub fn initialize(&mut self) {
        if self.is_initialized() {
            return;
        }
        for clip in SoundClip::ALL {
            match HtmlAudioElement::new_with_src(clip.src()) {
                Ok(el) => {
                    el.set_preload("auto");
                    el.set_volume(self.volume);
                    self.clips.insert(clip, el);
                }
                Err(err) => log::warn!(
                    "{}",
                    AudioError::Unavailable(format!("{clip:?}: {}", describe(&err)))
                ),
            }
        }
        match HtmlAudioElement::new_with_src(MUSIC_SRC) {
            Ok(el) => {
                el.set_loop(true);
                el.set_volume(self.volume * 0.6);
                self.music = Some(el);
            }
            Err(err) => log::warn!("{}", AudioError::Unavailable(describe(&err))),
        }
        log::debug!("audio session ready ({} clips)", self.clips.len());
    }

    pub fn teardown(&mut self) {
        self.stop_music();
        for el in self.clips.values() {
            let _ = el.pause();
        }
        self.clips.clear();
        self.music = None;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.stop_music();
        }
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        for el in self.clips.values() {
            el.set_volume(self.volume);
        }
        if let Some(music) = &self.music {
            music.set_volume(self.volume * 0.6);
        }
    }

    pub fn effective_volume(&self) -> f64 {
        if self.enabled { self.volume } else { 0.0 }
    }

    pub fn play(&self, clip: SoundClip) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        let Some(el) = self.clips.get(&clip) else { return };
        el.set_current_time(0.0);
        if let Ok(promise) = el.play() {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::debug!("{clip:?}: {}", AudioError::PlaybackBlocked(describe(&err)));
                }
            });
        }
    }

    /// Starts the music track. Browsers may refuse without a user gesture;
    /// `on_blocked` then receives the error so the UI can offer a link.
    pub fn start_music(&self, on_blocked: impl FnOnce(AudioError) + 'static) {
        if !self.enabled {
            return;
        }
        let Some(music) = &self.music else {
            on_blocked(AudioError::Unavailable("music track missing".into()));
            return;
        };
        match music.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    let err = AudioError::PlaybackBlocked(describe(&err));
                    log::warn!("music: {err}");
                    on_blocked(err);
                }
            }),
            Err(err) => on_blocked(AudioError::PlaybackBlocked(describe(&err))),
        }
    }

    pub fn stop_music(&self) {
        if let Some(music) = &self.music {
            let _ = music.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_session_is_silent() {
        let mut s = AudioSession::new(true);
        s.set_volume(1.7);
        assert_eq!(s.effective_volume(), 1.0);
        s.set_enabled(false);
        assert_eq!(s.effective_volume(), 0.0);
        assert!(!s.is_initialized());
    }
}
