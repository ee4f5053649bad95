// Cross-fade bookkeeping for the scene router.
use crate::config::TransitionTiming;
use crate::model::SceneType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadePhase {
    /// Old content fading/scaling out.
    Leaving,
    /// New content fading/scaling in.
    Entering,
    Settled,
}

impl FadePhase {
    pub fn css_class(self) -> &'static str {
        match self {
            FadePhase::Leaving => "scene scene-leaving",
            FadePhase::Entering => "scene scene-entering",
            FadePhase::Settled => "scene",
        }
    }
}

/// The first scene is shown without animation, as is everything under reduced motion.
pub fn should_animate(previous: Option<SceneType>, reduced_motion: bool) -> bool {
    previous.is_some() && !reduced_motion
}

/// One navigation's animation. A newer navigation simply replaces it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFade {
    pub seq: u64,
    from: SceneType,
    to: SceneType,
    phase: FadePhase,
    timing: TransitionTiming,
}

impl SceneFade {
    pub fn begin(
        seq: u64,
        from: SceneType,
        to: SceneType,
        animate: bool,
        timing: TransitionTiming,
    ) -> Self {
        let phase = if animate { FadePhase::Leaving } else { FadePhase::Settled };
        Self { seq, from, to, phase, timing }
    }

    /// A fade that is already finished, showing `scene`.
    pub fn settled(seq: u64, scene: SceneType) -> Self {
        Self::begin(seq, scene, scene, false, TransitionTiming::default())
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn is_settled(&self) -> bool {
        self.phase == FadePhase::Settled
    }

    /// Scene whose content should be on screen in the current phase.
    pub fn displayed(&self) -> SceneType {
        match self.phase {
            FadePhase::Leaving => self.from,
            FadePhase::Entering | FadePhase::Settled => self.to,
        }
    }

    /// How long the current phase lasts before `advance` should be called.
    pub fn phase_ms(&self) -> Option<u32> {
        match self.phase {
            FadePhase::Leaving => Some(self.timing.fade_out_ms),
            FadePhase::Entering => Some(self.timing.fade_in_ms),
            FadePhase::Settled => None,
        }
    }

    pub fn advance(&mut self) {
        self.phase = match self.phase {
            FadePhase::Leaving => FadePhase::Entering,
            FadePhase::Entering | FadePhase::Settled => FadePhase::Settled,
        };
    }

    pub fn total_ms(&self) -> u32 {
        self.timing.fade_out_ms + self.timing.fade_in_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_scene_and_reduced_motion_skip_animation() {
        assert!(!should_animate(None, false));
        assert!(!should_animate(Some(SceneType::Intro), true));
        assert!(should_animate(Some(SceneType::Intro), false));
    }

    #[test]
    fn two_phases_then_settled() {
        let mut f = SceneFade::begin(
            3,
            SceneType::Room,
            SceneType::Cake,
            true,
            TransitionTiming::default(),
        );
        assert_eq!(f.displayed(), SceneType::Room);
        assert_eq!(f.phase_ms(), Some(350));
        f.advance();
        assert_eq!(f.phase(), FadePhase::Entering);
        assert_eq!(f.displayed(), SceneType::Cake);
        assert_eq!(f.phase_ms(), Some(500));
        f.advance();
        assert!(f.is_settled());
        assert_eq!(f.phase_ms(), None);
        assert!(f.total_ms() <= 900);
    }

    #[test]
    fn unanimated_fade_is_settled_on_target() {
        let f = SceneFade::begin(
            1,
            SceneType::Room,
            SceneType::Gifts,
            false,
            TransitionTiming::default(),
        );
        assert!(f.is_settled());
        assert_eq!(f.displayed(), SceneType::Gifts);
    }

    #[test]
    fn old_scene_is_only_kept_for_one_leaving_phase() {
        let timing = TransitionTiming::default();
        let first = SceneFade::begin(1, SceneType::Ladder, SceneType::Room, true, timing);
        assert_eq!(first.displayed(), SceneType::Ladder);
        assert_eq!(first.phase_ms(), Some(timing.fade_out_ms));

        // a second navigation mid-fade starts from what is on screen
        let mut second = SceneFade::begin(2, first.displayed(), SceneType::Cake, true, timing);
        assert_eq!(second.displayed(), SceneType::Ladder);
        second.advance();
        assert_eq!(second.displayed(), SceneType::Cake);
    }
}
