//! Static gift and letter catalogs. Read-only; only the "opened" membership
//! of a gift lives in `Progress`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GiftKind {
    Photo,
    Song,
    Voucher,
    Keepsake,
    Surprise,
}

impl GiftKind {
    pub fn icon(self) -> &'static str {
        match self {
            GiftKind::Photo => "📷",
            GiftKind::Song => "🎵",
            GiftKind::Voucher => "🎟",
            GiftKind::Keepsake => "💌",
            GiftKind::Surprise => "✨",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gift {
    pub id: u8,
    pub title: &'static str,
    pub reveal: &'static str,
    pub kind: GiftKind,
}

pub static GIFTS: &[Gift] = &[
    Gift {
        id: 1,
        title: "The Blue Box",
        reveal: "A little album of every photo we took this year.",
        kind: GiftKind::Photo,
    },
    Gift {
        id: 2,
        title: "The Striped Box",
        reveal: "A playlist of the songs that sound like you.",
        kind: GiftKind::Song,
    },
    Gift {
        id: 3,
        title: "The Tiny Box",
        reveal: "One dinner, anywhere you like. No arguments.",
        kind: GiftKind::Voucher,
    },
    Gift {
        id: 4,
        title: "The Heavy Box",
        reveal: "A jar of notes, one for every week of the year.",
        kind: GiftKind::Keepsake,
    },
    Gift {
        id: 5,
        title: "The Gold Box",
        reveal: "Look behind you.",
        kind: GiftKind::Surprise,
    },
];

pub fn gift(id: u8) -> Option<&'static Gift> {
    GIFTS.iter().find(|g| g.id == id)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterKind {
    Letter,
    Poem,
    Note,
}

impl LetterKind {
    pub fn label(self) -> &'static str {
        match self {
            LetterKind::Letter => "Letter",
            LetterKind::Poem => "Poem",
            LetterKind::Note => "Note",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Letter {
    pub id: u8,
    pub author: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub kind: LetterKind,
}

pub static LETTERS: &[Letter] = &[
    Letter {
        id: 1,
        author: "Mum",
        title: "To my favourite",
        body: "Another year of you being wonderful. Come home soon, the cake tin is waiting.",
        kind: LetterKind::Letter,
    },
    Letter {
        id: 2,
        author: "Sam",
        title: "Roses are late",
        body: "Roses are late, the candles are lit,\nyou are another year older\nand still not wise one bit.",
        kind: LetterKind::Poem,
    },
    Letter {
        id: 3,
        author: "The flatmates",
        title: "Fridge door",
        body: "We ate the leftover pizza. Happy birthday though!",
        kind: LetterKind::Note,
    },
    Letter {
        id: 4,
        author: "Alex",
        title: "Twelve months",
        body: "Twelve months of late-night calls, bad films and good company. Here's to twelve more.",
        kind: LetterKind::Letter,
    },
];

pub fn letter(id: u8) -> Option<&'static Letter> {
    LETTERS.iter().find(|l| l.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (i, g) in GIFTS.iter().enumerate() {
            assert!(GIFTS[i + 1..].iter().all(|o| o.id != g.id));
        }
        for (i, l) in LETTERS.iter().enumerate() {
            assert!(LETTERS[i + 1..].iter().all(|o| o.id != l.id));
        }
        assert_eq!(gift(3).map(|g| g.kind), Some(GiftKind::Voucher));
        assert!(gift(9).is_none());
    }
}
