// Gift gallery selection: choose one box to unlock the table, then open boxes.
use crate::catalog::{self, GIFTS};
use crate::model::GiftSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GiftClick {
    /// First pick; the table is now unlocked.
    Chosen(u8),
    Opened { id: u8, opened: GiftSet, finale: bool },
    AlreadyOpen(u8),
    Unknown(u8),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftGallery {
    chosen: Option<u8>,
}

impl GiftGallery {
    pub fn chosen(&self) -> Option<u8> {
        self.chosen
    }

    pub fn is_unlocked(&self) -> bool {
        self.chosen.is_some()
    }

    pub fn click(&mut self, id: u8, opened: &GiftSet) -> GiftClick {
        if catalog::gift(id).is_none() {
            return GiftClick::Unknown(id);
        }
        if self.chosen.is_none() {
            self.chosen = Some(id);
            return GiftClick::Chosen(id);
        }
        self.open(id, opened)
    }

    /// Opening is an idempotent insert into the opened set.
    pub fn open(&mut self, id: u8, opened: &GiftSet) -> GiftClick {
        if catalog::gift(id).is_none() {
            return GiftClick::Unknown(id);
        }
        if self.chosen.is_none() {
            self.chosen = Some(id);
        }
        let mut next = opened.clone();
        if !next.insert(id) {
            return GiftClick::AlreadyOpen(id);
        }
        let finale = is_finale(&next);
        GiftClick::Opened { id, opened: next, finale }
    }
}

pub fn is_finale(opened: &GiftSet) -> bool {
    GIFTS.iter().all(|g| opened.contains(g.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_click_only_chooses() {
        let mut g = GiftGallery::default();
        let opened = GiftSet::default();
        assert_eq!(g.click(2, &opened), GiftClick::Chosen(2));
        assert!(g.is_unlocked());
        assert!(matches!(g.click(2, &opened), GiftClick::Opened { id: 2, finale: false, .. }));
    }

    #[test]
    fn opening_all_without_duplicates_reaches_finale() {
        let mut g = GiftGallery::default();
        let mut opened = GiftSet::default();
        let mut finale = false;
        for id in [1, 1, 2, 3, 4, 5] {
            match g.open(id, &opened) {
                GiftClick::Opened { opened: next, finale: f, .. } => {
                    opened = next;
                    finale = f;
                }
                GiftClick::AlreadyOpen(dup) => assert_eq!(dup, 1),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(opened.as_slice(), &[1, 2, 3, 4, 5]);
        assert!(finale);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut g = GiftGallery::default();
        assert_eq!(g.click(42, &GiftSet::default()), GiftClick::Unknown(42));
        assert!(!g.is_unlocked());
    }
}
