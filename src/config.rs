//! Tuning constants for every scene. Engines take their rules by value.

/// localStorage key for the only persisted value.
pub const LADDER_STORAGE_KEY: &str = "ladderProgress";

/// Music track, served next to the app.
pub const MUSIC_SRC: &str = "audio/birthday-song.mp3";

/// Link shown when the browser refuses to autoplay the music track; opening
/// the file directly lets the visitor start it by hand.
pub const MUSIC_FALLBACK_URL: &str = MUSIC_SRC;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LadderRules {
    /// Shortest accepted gap between climbs (inclusive).
    pub min_interval_ms: f64,
    /// Longest accepted gap between climbs (exclusive).
    pub max_interval_ms: f64,
    pub goal: u8,
    /// Window after a climb during which further input is swallowed.
    pub resolve_delay_ms: f64,
}

impl Default for LadderRules {
    fn default() -> Self {
        Self {
            min_interval_ms: 400.0,
            max_interval_ms: 1200.0,
            goal: 20,
            resolve_delay_ms: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceRules {
    /// Minimum travel (percent of surface) between two samples to count as a cut.
    pub min_distance: f64,
    pub cooldown_ms: f64,
    pub max_slices: u8,
    /// Central rectangle (min, max) in percent, same on both axes.
    pub split_zone: (f64, f64),
}

impl Default for SliceRules {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            cooldown_ms: 300.0,
            max_slices: 8,
            split_zone: (35.0, 65.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlowRules {
    /// Weight of the newest sample in the exponential moving average.
    pub smoothing: f32,
    /// Smoothed strength (0..1) above which the candles go out.
    pub threshold: f32,
    /// Fraction of analyser bins counted as the low band.
    pub low_band_fraction: f32,
    pub settle_ms: f64,
    pub flames: u8,
}

impl Default for BlowRules {
    fn default() -> Self {
        Self {
            smoothing: 0.25,
            threshold: 0.55,
            low_band_fraction: 0.25,
            settle_ms: 2500.0,
            flames: 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTiming {
    pub fade_out_ms: u32,
    pub fade_in_ms: u32,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            fade_out_ms: 350,
            fade_in_ms: 500,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountdownRules {
    pub start: u8,
    pub tick_ms: u32,
}

impl Default for CountdownRules {
    fn default() -> Self {
        Self {
            start: 10,
            tick_ms: 800,
        }
    }
}
