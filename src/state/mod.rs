pub mod candle;
pub mod countdown;
pub mod gallery;
pub mod ladder;
pub mod slicer;
pub mod transition;

pub use candle::{Candles, FlameState, MicStatus};
pub use countdown::{Countdown, CountdownStep};
pub use gallery::{GiftClick, GiftGallery};
pub use ladder::{ClimbOutcome, Ladder};
pub use slicer::{CakeSlicer, Point};
pub use transition::SceneFade;
