//! Shared scene, progress and settings state.
//! One `SceneState` lives in the app shell and is handed to every scene through
//! a context; all mutation goes through `SceneAction`.

use std::rc::Rc;
use yew::Reducible;

use crate::catalog::GIFTS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneType {
    Intro,
    Midnight,
    Room,
    Ladder,
    Cake,
    Candle,
    Gifts,
    Messages,
}

impl SceneType {
    pub fn slug(self) -> &'static str {
        match self {
            SceneType::Intro => "intro",
            SceneType::Midnight => "midnight",
            SceneType::Room => "room",
            SceneType::Ladder => "ladder",
            SceneType::Cake => "cake",
            SceneType::Candle => "candle",
            SceneType::Gifts => "gifts",
            SceneType::Messages => "messages",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SceneType::Intro => "Welcome",
            SceneType::Midnight => "Midnight",
            SceneType::Room => "The Room",
            SceneType::Ladder => "Ladder",
            SceneType::Cake => "Cake",
            SceneType::Candle => "Candles",
            SceneType::Gifts => "Gifts",
            SceneType::Messages => "Letters",
        }
    }
}

/// Opened gift ids in the order they were opened. Inserting an id twice is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GiftSet(Vec<u8>);

impl GiftSet {
    /// Returns true when the id was not present before.
    pub fn insert(&mut self, id: u8) -> bool {
        if self.0.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn contains(&self, id: u8) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    /// Ladder rungs climbed in the current run, 0..=20.
    pub ladder_progress: u8,
    pub cake_sliced: bool,
    pub candle_blown: bool,
    pub gifts_opened: GiftSet,
    /// Set once the ladder reaches the top; opens the gifts door in the room.
    pub unlocked_gifts: bool,
}

impl Progress {
    /// Shallow merge: only fields present in the patch are overwritten.
    pub fn merge(&mut self, patch: ProgressPatch) {
        if let Some(v) = patch.ladder_progress {
            self.ladder_progress = v;
        }
        if let Some(v) = patch.cake_sliced {
            self.cake_sliced = v;
        }
        if let Some(v) = patch.candle_blown {
            self.candle_blown = v;
        }
        if let Some(v) = patch.gifts_opened {
            self.gifts_opened = v;
        }
        if let Some(v) = patch.unlocked_gifts {
            self.unlocked_gifts = v;
        }
    }

    pub fn all_gifts_opened(&self) -> bool {
        GIFTS.iter().all(|g| self.gifts_opened.contains(g.id))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressPatch {
    pub ladder_progress: Option<u8>,
    pub cake_sliced: Option<bool>,
    pub candle_blown: Option<bool>,
    pub gifts_opened: Option<GiftSet>,
    pub unlocked_gifts: Option<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub reduced_motion: bool,
    pub high_contrast: bool,
    /// Data URL of an uploaded background image.
    pub custom_wallpaper: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: false,
            reduced_motion: false,
            high_contrast: false,
            custom_wallpaper: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    pub current_scene: SceneType,
    pub previous_scene: Option<SceneType>,
    /// True only while the router is animating between scenes.
    pub is_transitioning: bool,
    /// Bumped on every navigation; transition messages carry it so stale ones are dropped.
    pub nav_seq: u64,
    pub progress: Progress,
    pub settings: Settings,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            current_scene: SceneType::Intro,
            previous_scene: None,
            is_transitioning: false,
            nav_seq: 0,
            progress: Progress::default(),
            settings: Settings::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum SceneAction {
    NavigateTo(SceneType),
    TransitionStarted { seq: u64 },
    TransitionFinished { seq: u64 },
    UpdateProgress(ProgressPatch),
    /// Idempotent insert into `progress.gifts_opened`.
    OpenGift(u8),
    ToggleSound,
    ToggleMusic,
    ToggleReducedMotion,
    ToggleHighContrast,
    SetCustomWallpaper(Option<String>),
}

impl SceneState {
    /// Applies one action in place. `Reducible::reduce` wraps this.
    pub fn apply(&mut self, action: SceneAction) {
        use SceneAction::*;
        match action {
            NavigateTo(scene) => {
                self.previous_scene = Some(self.current_scene);
                self.current_scene = scene;
                self.nav_seq = self.nav_seq.wrapping_add(1);
                // any in-flight animation belongs to the old sequence
                self.is_transitioning = false;
            }
            TransitionStarted { seq } => {
                if seq == self.nav_seq {
                    self.is_transitioning = true;
                }
            }
            TransitionFinished { seq } => {
                if seq == self.nav_seq {
                    self.is_transitioning = false;
                }
            }
            UpdateProgress(patch) => self.progress.merge(patch),
            OpenGift(id) => {
                self.progress.gifts_opened.insert(id);
            }
            ToggleSound => self.settings.sound_enabled = !self.settings.sound_enabled,
            ToggleMusic => self.settings.music_enabled = !self.settings.music_enabled,
            ToggleReducedMotion => self.settings.reduced_motion = !self.settings.reduced_motion,
            ToggleHighContrast => self.settings.high_contrast = !self.settings.high_contrast,
            SetCustomWallpaper(url) => self.settings.custom_wallpaper = url,
        }
    }
}

impl Reducible for SceneState {
    type Action = SceneAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        new.apply(action);
        Rc::new(new)
    }
}

// ---------------- Achievements & themes -----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Achievement {
    Climber,
    CakeCutter,
    WishMaker,
    GiftHunter,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::Climber,
        Achievement::CakeCutter,
        Achievement::WishMaker,
        Achievement::GiftHunter,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Achievement::Climber => "Climber",
            Achievement::CakeCutter => "Cake Cutter",
            Achievement::WishMaker => "Wish Maker",
            Achievement::GiftHunter => "Gift Hunter",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Achievement::Climber => "Reach the top of the ladder",
            Achievement::CakeCutter => "Cut the first slice",
            Achievement::WishMaker => "Blow out every candle",
            Achievement::GiftHunter => "Open every gift",
        }
    }

    pub fn is_earned(self, progress: &Progress) -> bool {
        match self {
            Achievement::Climber => progress.unlocked_gifts,
            Achievement::CakeCutter => progress.cake_sliced,
            Achievement::WishMaker => progress.candle_blown,
            Achievement::GiftHunter => progress.all_gifts_opened(),
        }
    }
}

pub fn earned_count(progress: &Progress) -> usize {
    Achievement::ALL
        .iter()
        .filter(|a| a.is_earned(progress))
        .count()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Classic,
    Golden,
    Starlight,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Classic, Theme::Golden, Theme::Starlight];

    pub fn required_achievements(self) -> usize {
        match self {
            Theme::Classic => 0,
            Theme::Golden => 2,
            Theme::Starlight => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Golden => "Golden",
            Theme::Starlight => "Starlight",
        }
    }
}

pub fn unlocked_themes(progress: &Progress) -> Vec<Theme> {
    let earned = earned_count(progress);
    Theme::ALL
        .into_iter()
        .filter(|t| earned >= t.required_achievements())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce_all(actions: Vec<SceneAction>) -> SceneState {
        let mut state = Rc::new(SceneState::default());
        for a in actions {
            state = state.reduce(a);
        }
        (*state).clone()
    }

    #[test]
    fn defaults_start_at_intro_with_empty_progress() {
        let s = SceneState::default();
        assert_eq!(s.current_scene, SceneType::Intro);
        assert_eq!(s.previous_scene, None);
        assert!(!s.is_transitioning);
        assert_eq!(s.progress, Progress::default());
        assert!(s.settings.sound_enabled);
    }

    #[test]
    fn back_to_back_navigation_keeps_last_writer() {
        let s = reduce_all(vec![
            SceneAction::NavigateTo(SceneType::Gifts),
            SceneAction::NavigateTo(SceneType::Room),
        ]);
        assert_eq!(s.previous_scene, Some(SceneType::Gifts));
        assert_eq!(s.current_scene, SceneType::Room);
        assert!(!s.is_transitioning);
        assert_eq!(s.nav_seq, 2);
    }

    #[test]
    fn navigating_to_current_scene_still_bumps_sequence() {
        let s = reduce_all(vec![SceneAction::NavigateTo(SceneType::Intro)]);
        assert_eq!(s.previous_scene, Some(SceneType::Intro));
        assert_eq!(s.current_scene, SceneType::Intro);
        assert_eq!(s.nav_seq, 1);
    }

    #[test]
    fn stale_transition_messages_are_ignored() {
        let s = reduce_all(vec![
            SceneAction::NavigateTo(SceneType::Room),
            SceneAction::TransitionStarted { seq: 1 },
            SceneAction::NavigateTo(SceneType::Cake),
            SceneAction::TransitionStarted { seq: 1 },
        ]);
        assert!(!s.is_transitioning);

        let s = reduce_all(vec![
            SceneAction::NavigateTo(SceneType::Room),
            SceneAction::TransitionStarted { seq: 1 },
            SceneAction::NavigateTo(SceneType::Cake),
            SceneAction::TransitionStarted { seq: 2 },
            SceneAction::TransitionFinished { seq: 1 },
        ]);
        assert!(s.is_transitioning);
        let s = Rc::new(s).reduce(SceneAction::TransitionFinished { seq: 2 });
        assert!(!s.is_transitioning);
    }

    #[test]
    fn progress_patch_is_a_shallow_merge() {
        let s = reduce_all(vec![
            SceneAction::UpdateProgress(ProgressPatch {
                ladder_progress: Some(7),
                ..Default::default()
            }),
            SceneAction::UpdateProgress(ProgressPatch {
                cake_sliced: Some(true),
                ..Default::default()
            }),
        ]);
        assert_eq!(s.progress.ladder_progress, 7);
        assert!(s.progress.cake_sliced);
        assert!(!s.progress.candle_blown);
    }

    #[test]
    fn gift_set_ignores_duplicates() {
        let mut set = GiftSet::default();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert_eq!(set.as_slice(), &[3]);
    }

    #[test]
    fn opening_gifts_twice_keeps_one_entry() {
        let s = reduce_all(vec![
            SceneAction::OpenGift(1),
            SceneAction::OpenGift(1),
            SceneAction::OpenGift(2),
            SceneAction::OpenGift(3),
            SceneAction::OpenGift(4),
            SceneAction::OpenGift(5),
        ]);
        assert_eq!(s.progress.gifts_opened.as_slice(), &[1, 2, 3, 4, 5]);
        assert!(s.progress.all_gifts_opened());
    }

    #[test]
    fn toggles_flip_their_own_flag_only() {
        let s = reduce_all(vec![
            SceneAction::ToggleSound,
            SceneAction::ToggleHighContrast,
            SceneAction::ToggleHighContrast,
            SceneAction::ToggleReducedMotion,
            SceneAction::SetCustomWallpaper(Some("data:image/png;base64,AA".into())),
        ]);
        assert!(!s.settings.sound_enabled);
        assert!(!s.settings.high_contrast);
        assert!(s.settings.reduced_motion);
        assert!(!s.settings.music_enabled);
        assert!(s.settings.custom_wallpaper.is_some());
        let s = Rc::new(s).reduce(SceneAction::SetCustomWallpaper(None));
        assert_eq!(s.settings.custom_wallpaper, None);
    }

    #[test]
    fn themes_unlock_by_achievement_count() {
        let mut p = Progress::default();
        assert_eq!(unlocked_themes(&p), vec![Theme::Classic]);
        p.cake_sliced = true;
        p.candle_blown = true;
        assert_eq!(unlocked_themes(&p), vec![Theme::Classic, Theme::Golden]);
        p.unlocked_gifts = true;
        for g in GIFTS {
            p.gifts_opened.insert(g.id);
        }
        assert_eq!(earned_count(&p), 4);
        assert_eq!(unlocked_themes(&p).len(), 3);
    }
}
