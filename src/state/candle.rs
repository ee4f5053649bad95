//! Candle blow-out state.
//!
//! Two ways in: a manual button, or a microphone whose low-band energy is
//! smoothed frame by frame until it crosses a threshold. Either way the flames
//! go out once, and the capture handle is released at that moment. The handle
//! is consumed by `EnergySource::release`, so a second release cannot happen.

use crate::config::BlowRules;

/// Live audio input, reduced to what the candles need.
pub trait EnergySource {
    /// Normalised (0..1) energy of the lower frequency band right now.
    fn low_band_energy(&mut self) -> f32;
    /// Stops the input and frees the processing graph.
    fn release(self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MicStatus {
    Off,
    Requesting,
    Listening,
    /// Microphone path failed; the manual button is still there.
    Unavailable(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlameState {
    Lit,
    /// Blow-out began; effects are still playing.
    Extinguishing,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlowReading {
    pub strength: f32,
    /// This reading put the candles out.
    pub triggered: bool,
}

pub struct Candles<S: EnergySource> {
    rules: BlowRules,
    flames: FlameState,
    capture: Option<S>,
    mic: MicStatus,
    strength: f32,
    closed: bool,
}

impl<S: EnergySource> Candles<S> {
    pub fn new(rules: BlowRules) -> Self {
        Self {
            rules,
            flames: FlameState::Lit,
            capture: None,
            mic: MicStatus::Off,
            strength: 0.0,
            closed: false,
        }
    }

    /// Candles that were already blown out earlier in the visit.
    pub fn extinguished(rules: BlowRules) -> Self {
        Self {
            flames: FlameState::Out,
            ..Self::new(rules)
        }
    }

    pub fn flames(&self) -> FlameState {
        self.flames
    }

    pub fn is_lit(&self) -> bool {
        self.flames == FlameState::Lit
    }

    pub fn mic_status(&self) -> &MicStatus {
        &self.mic
    }

    pub fn flame_count(&self) -> u8 {
        self.rules.flames
    }

    /// Whether a microphone request may be started now.
    pub fn can_request_mic(&self) -> bool {
        self.is_lit()
            && !self.closed
            && matches!(self.mic, MicStatus::Off | MicStatus::Unavailable(_))
    }

    pub fn begin_mic_request(&mut self) -> bool {
        if !self.can_request_mic() {
            return false;
        }
        self.mic = MicStatus::Requesting;
        true
    }

    /// Hands a freshly granted capture to the candles. If they no longer need it
    /// (already out, or the scene was left while the prompt was open) it is
    /// released straight away.
    pub fn attach(&mut self, source: S) {
        if !self.is_lit() || self.closed {
            source.release();
            return;
        }
        if let Some(old) = self.capture.replace(source) {
            old.release();
        }
        self.strength = 0.0;
        self.mic = MicStatus::Listening;
    }

    pub fn mic_failed(&mut self, reason: impl Into<String>) {
        if self.is_lit() {
            self.mic = MicStatus::Unavailable(reason.into());
        }
    }

    /// Starts the blow-out sequence. Returns false if it already started.
    pub fn blow_out(&mut self) -> bool {
        if !self.is_lit() {
            return false;
        }
        self.flames = FlameState::Extinguishing;
        self.release_capture();
        true
    }

    /// Ends the blow-out sequence once the settle delay has run. Returns true
    /// exactly once; the caller's timer owns the delay.
    pub fn finish(&mut self) -> bool {
        if self.flames != FlameState::Extinguishing {
            return false;
        }
        self.flames = FlameState::Out;
        true
    }

    /// Scene teardown: drops the capture and refuses any late one.
    pub fn close(&mut self) {
        self.closed = true;
        self.release_capture();
    }

    /// Lazy per-frame readings from the attached capture. Ends as soon as the
    /// candles stop being lit or the capture goes away.
    pub fn readings(&mut self) -> Readings<'_, S> {
        Readings { candles: self }
    }

    fn release_capture(&mut self) {
        if let Some(source) = self.capture.take() {
            source.release();
        }
        if self.mic == MicStatus::Listening || self.mic == MicStatus::Requesting {
            self.mic = MicStatus::Off;
        }
        self.strength = 0.0;
    }

    fn sample(&mut self) -> Option<BlowReading> {
        if !self.is_lit() || self.closed {
            return None;
        }
        let raw = self.capture.as_mut()?.low_band_energy().clamp(0.0, 1.0);
        let a = self.rules.smoothing;
        self.strength = self.strength * (1.0 - a) + raw * a;
        let strength = self.strength;
        let triggered = strength > self.rules.threshold;
        if triggered {
            self.blow_out();
        }
        Some(BlowReading { strength, triggered })
    }
}

pub struct Readings<'a, S: EnergySource> {
    candles: &'a mut Candles<S>,
}

impl<S: EnergySource> Iterator for Readings<'_, S> {
    type Item = BlowReading;

    fn next(&mut self) -> Option<BlowReading> {
        self.candles.sample()
    }
}

/// Averages the lower `fraction` of byte-valued analyser bins into 0..1.
pub fn low_band_level(bins: &[u8], fraction: f32) -> f32 {
    let take = ((bins.len() as f32 * fraction).ceil() as usize).clamp(1, bins.len().max(1));
    let band = &bins[..take.min(bins.len())];
    if band.is_empty() {
        return 0.0;
    }
    let sum: u32 = band.iter().map(|&b| b as u32).sum();
    sum as f32 / (band.len() as f32 * 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeMic {
        level: Rc<Cell<f32>>,
        releases: Rc<Cell<u32>>,
    }

    impl EnergySource for FakeMic {
        fn low_band_energy(&mut self) -> f32 {
            self.level.get()
        }
        fn release(self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    fn rig() -> (Candles<FakeMic>, Rc<Cell<f32>>, Rc<Cell<u32>>) {
        let level = Rc::new(Cell::new(0.0));
        let releases = Rc::new(Cell::new(0));
        let mut c = Candles::new(BlowRules::default());
        assert!(c.begin_mic_request());
        c.attach(FakeMic { level: level.clone(), releases: releases.clone() });
        (c, level, releases)
    }

    #[test]
    fn quiet_room_keeps_candles_lit() {
        let (mut c, level, releases) = rig();
        level.set(0.1);
        for _ in 0..200 {
            assert!(c.readings().next().is_some());
        }
        assert!(c.is_lit());
        assert_eq!(releases.get(), 0);
        assert_eq!(c.mic_status(), &MicStatus::Listening);
    }

    #[test]
    fn sustained_blow_puts_candles_out_and_releases_once() {
        let (mut c, level, releases) = rig();
        level.set(1.0);
        let mut frames = 0;
        while let Some(r) = c.readings().next() {
            frames += 1;
            if r.triggered {
                break;
            }
        }
        // smoothing needs a few frames to climb over the threshold
        assert!(frames > 1);
        assert!(!c.is_lit());
        assert_eq!(releases.get(), 1);
        assert!(c.readings().next().is_none());

        // manual press in the same tick changes nothing
        assert!(!c.blow_out());
        c.close();
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn single_spike_is_smoothed_away() {
        let (mut c, level, _) = rig();
        level.set(1.0);
        c.readings().next();
        level.set(0.0);
        for _ in 1..10 {
            c.readings().next();
        }
        assert!(c.is_lit());
    }

    #[test]
    fn manual_blow_releases_mic_and_finishes_once() {
        let (mut c, _, releases) = rig();
        assert!(c.blow_out());
        assert_eq!(releases.get(), 1);
        assert_eq!(c.flames(), FlameState::Extinguishing);
        assert!(c.finish());
        assert_eq!(c.flames(), FlameState::Out);
        assert!(!c.finish());
        assert!(!c.blow_out());
    }

    #[test]
    fn finish_does_not_depend_on_clock_precision() {
        // an early or coarse timer firing must still end the sequence
        let mut c: Candles<FakeMic> = Candles::new(BlowRules::default());
        assert!(!c.finish());
        assert!(c.is_lit());
        assert!(c.blow_out());
        assert!(c.finish());
        assert_eq!(c.flames(), FlameState::Out);
    }

    #[test]
    fn candles_blown_earlier_stay_out() {
        let level = Rc::new(Cell::new(1.0));
        let releases = Rc::new(Cell::new(0));
        let mut c: Candles<FakeMic> = Candles::extinguished(BlowRules::default());
        assert_eq!(c.flames(), FlameState::Out);
        assert!(!c.can_request_mic());
        assert!(!c.begin_mic_request());
        assert!(!c.blow_out());
        assert!(!c.finish());
        c.attach(FakeMic { level, releases: releases.clone() });
        assert_eq!(releases.get(), 1);
        assert!(c.readings().next().is_none());
    }

    #[test]
    fn late_capture_after_leaving_is_released_immediately() {
        let level = Rc::new(Cell::new(0.0));
        let releases = Rc::new(Cell::new(0));
        let mut c: Candles<FakeMic> = Candles::new(BlowRules::default());
        c.begin_mic_request();
        c.close();
        c.attach(FakeMic { level, releases: releases.clone() });
        assert_eq!(releases.get(), 1);
        assert!(c.readings().next().is_none());
    }

    #[test]
    fn denied_mic_leaves_manual_path_and_allows_retry() {
        let mut c: Candles<FakeMic> = Candles::new(BlowRules::default());
        c.begin_mic_request();
        c.mic_failed("permission denied");
        assert!(matches!(c.mic_status(), MicStatus::Unavailable(_)));
        assert!(c.can_request_mic());
        assert!(c.blow_out());
        assert!(!c.can_request_mic());
    }

    #[test]
    fn low_band_level_averages_the_bottom_bins() {
        let mut bins = vec![0u8; 128];
        for b in bins.iter_mut().take(32) {
            *b = 255;
        }
        assert!((low_band_level(&bins, 0.25) - 1.0).abs() < 1e-6);
        assert!((low_band_level(&bins, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(low_band_level(&[], 0.25), 0.0);
    }
}
