// Cake slicing gesture state: pointer samples in percent-of-surface coordinates.
use crate::config::SliceRules;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// One accepted cut, drawn from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
    pub from: Point,
    pub to: Point,
}

impl Slice {
    pub fn anchor(&self) -> Point {
        self.from.midpoint(self.to)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceEvent {
    pub count: u8,
    pub first: bool,
    /// The cake visibly splits on the first cut through the middle, once.
    pub split: bool,
    pub complete: bool,
}

#[derive(Debug, Clone)]
pub struct CakeSlicer {
    rules: SliceRules,
    slices: Vec<Slice>,
    dragging: bool,
    last_sample: Option<Point>,
    last_slice_at: Option<f64>,
    split: bool,
}

impl CakeSlicer {
    pub fn new(rules: SliceRules) -> Self {
        Self {
            rules,
            slices: Vec::with_capacity(rules.max_slices as usize),
            dragging: false,
            last_sample: None,
            last_slice_at: None,
            split: false,
        }
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn count(&self) -> u8 {
        self.slices.len() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.count() >= self.rules.max_slices
    }

    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn remaining(&self) -> u8 {
        self.rules.max_slices.saturating_sub(self.count())
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.dragging = true;
        self.last_sample = Some(at);
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.last_sample = None;
    }

    /// Feeds one movement sample. Returns an event only when a slice is accepted.
    pub fn pointer_move(&mut self, at: Point, now_ms: f64) -> Option<SliceEvent> {
        if !self.dragging || self.is_complete() {
            return None;
        }
        let prev = self.last_sample.replace(at)?;
        if prev.distance(at) <= self.rules.min_distance {
            return None;
        }
        if let Some(last) = self.last_slice_at {
            if now_ms - last < self.rules.cooldown_ms {
                return None;
            }
        }

        let slice = Slice { from: prev, to: at };
        self.slices.push(slice);
        self.last_slice_at = Some(now_ms);

        let split = !self.split && self.in_split_zone(slice.anchor());
        if split {
            self.split = true;
        }
        Some(SliceEvent {
            count: self.count(),
            first: self.slices.len() == 1,
            split,
            complete: self.is_complete(),
        })
    }

    fn in_split_zone(&self, p: Point) -> bool {
        let (lo, hi) = self.rules.split_zone;
        (lo..=hi).contains(&p.x) && (lo..=hi).contains(&p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slicer() -> CakeSlicer {
        CakeSlicer::new(SliceRules::default())
    }

    #[test]
    fn hover_without_drag_never_slices() {
        let mut s = slicer();
        assert_eq!(s.pointer_move(Point::new(0.0, 0.0), 0.0), None);
        assert_eq!(s.pointer_move(Point::new(90.0, 90.0), 1000.0), None);
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn small_moves_are_ignored() {
        let mut s = slicer();
        s.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(s.pointer_move(Point::new(12.0, 12.0), 0.0), None);
        assert_eq!(s.pointer_move(Point::new(14.0, 13.0), 400.0), None);
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn cooldown_blocks_rapid_cuts() {
        let mut s = slicer();
        s.pointer_down(Point::new(0.0, 10.0));
        let first = s.pointer_move(Point::new(20.0, 10.0), 1000.0).unwrap();
        assert!(first.first);
        assert_eq!(first.count, 1);
        assert_eq!(s.pointer_move(Point::new(40.0, 10.0), 1299.0), None);
        let second = s.pointer_move(Point::new(60.0, 10.0), 1300.0).unwrap();
        assert!(!second.first);
        assert_eq!(second.count, 2);
    }

    #[test]
    fn caps_at_eight_and_completes() {
        let mut s = slicer();
        s.pointer_down(Point::new(0.0, 0.0));
        let mut t = 0.0;
        let mut events = Vec::new();
        for i in 0..20 {
            let x = if i % 2 == 0 { 90.0 } else { 0.0 };
            t += 350.0;
            if let Some(e) = s.pointer_move(Point::new(x, 5.0), t) {
                events.push(e);
            }
        }
        assert_eq!(events.len(), 8);
        assert!(events.last().unwrap().complete);
        assert!(events[..7].iter().all(|e| !e.complete));
        assert_eq!(s.count(), 8);
        assert_eq!(s.remaining(), 0);
    }

    #[test]
    fn split_happens_at_most_once() {
        let mut s = slicer();
        s.pointer_down(Point::new(40.0, 50.0));
        let e = s.pointer_move(Point::new(60.0, 50.0), 0.0).unwrap();
        assert!(e.split);
        assert!(s.is_split());
        let e = s.pointer_move(Point::new(40.0, 50.0), 500.0).unwrap();
        assert!(!e.split);
    }

    #[test]
    fn releasing_forgets_last_sample() {
        let mut s = slicer();
        s.pointer_down(Point::new(0.0, 0.0));
        s.pointer_up();
        s.pointer_down(Point::new(80.0, 80.0));
        // distance measured from the new press point, not the old one
        assert_eq!(s.pointer_move(Point::new(82.0, 80.0), 0.0), None);
    }
}
