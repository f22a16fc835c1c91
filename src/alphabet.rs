// Copyright (C) 2020-2024 Andy Kurnia.

// tile numbering: 0 is the blank, 1 is a, 26 is z.
// on the board, a blank designated as a is 0x81.

pub const BLANK: u8 = 0;
pub const BLANK_FLAG: u8 = 0x80;

pub struct Tile<'a> {
    label: &'a str,
    blank_label: &'a str,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet<'a> {
    tiles: &'a [Tile<'a>],
    num_tiles: u16,
}

pub enum Alphabet<'a> {
    Static(StaticAlphabet<'a>),
}

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.tiles.len() as u8,
        }
    }

    #[inline(always)]
    fn get(&self, idx: u8) -> &'a Tile<'a> {
        match self {
            Alphabet::Static(x) => &x.tiles[idx as usize],
        }
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        match self {
            Alphabet::Static(x) => x.num_tiles,
        }
    }

    // lowercase for a real tile, uppercase for a designated blank.
    #[inline(always)]
    pub fn from_board(&self, idx: u8) -> Option<&'a str> {
        let c = idx & !BLANK_FLAG;
        if c == 0 || c >= self.len() {
            None
        } else if idx & BLANK_FLAG == 0 {
            Some(self.get(c).label)
        } else {
            Some(self.get(c).blank_label)
        }
    }

    #[inline(always)]
    pub fn from_rack(&self, idx: u8) -> Option<&'a str> {
        if idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    // board tiles with the blank flag score nothing.
    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        if idx & BLANK_FLAG != 0 || idx >= self.len() {
            0
        } else {
            self.get(idx).score
        }
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    // command letter: "c" is a rack c, "C" is a blank played as c.
    pub fn parse_command_letter(&self, s: &str) -> Option<u8> {
        (1..self.len()).find_map(|t| {
            let tile = self.get(t);
            if tile.label == s {
                Some(t)
            } else if tile.blank_label == s {
                Some(t | BLANK_FLAG)
            } else {
                None
            }
        })
    }

    // rack letter: "*" is the blank. uppercase is accepted as lowercase.
    pub fn parse_rack_letter(&self, s: &str) -> Option<u8> {
        (0..self.len()).find(|&t| {
            let tile = self.get(t);
            tile.label == s || (t != BLANK && tile.blank_label == s)
        })
    }

    // for dictionary words: plain letters only, never the blank.
    #[inline(always)]
    pub fn letter_of_char(&self, c: char) -> Option<u8> {
        let mut buf = [0u8; 4];
        let s = c.to_ascii_lowercase().encode_utf8(&mut buf);
        self.parse_rack_letter(s).filter(|&t| t != BLANK)
    }

    pub fn parse_rack(&self, s: &str) -> Option<Vec<u8>> {
        let mut buf = [0u8; 4];
        s.chars()
            .map(|c| self.parse_rack_letter(c.encode_utf8(&mut buf)))
            .collect()
    }

    pub fn fmt_rack(&self, rack: &[u8]) -> String {
        rack.iter()
            .filter_map(|&tile| self.from_rack(tile))
            .collect()
    }

    // the plain letters of a word on the board, as looked up in the dictionary.
    pub fn fmt_word(&self, tiles: &[u8]) -> String {
        tiles
            .iter()
            .filter_map(|&tile| self.from_rack(tile & !BLANK_FLAG))
            .collect()
    }
}

// the rack tile that a board tile came from.
#[inline(always)]
pub fn rack_tile_of(board_tile: u8) -> u8 {
    if board_tile & BLANK_FLAG != 0 {
        BLANK
    } else {
        board_tile
    }
}

macro_rules! tile {
    ($label: expr, $blank_label: expr, $freq: expr, $score: expr) => {
        Tile {
            label: $label,
            blank_label: $blank_label,
            freq: $freq,
            score: $score,
        }
    };
}

pub static CLASSIC_ALPHABET: Alphabet = Alphabet::Static(StaticAlphabet {
    tiles: &[
        tile!("*", "*", 2, 0),
        tile!("a", "A", 9, 1),
        tile!("b", "B", 2, 3),
        tile!("c", "C", 2, 3),
        tile!("d", "D", 3, 2),
        tile!("e", "E", 15, 1),
        tile!("f", "F", 2, 4),
        tile!("g", "G", 2, 2),
        tile!("h", "H", 2, 4),
        tile!("i", "I", 8, 1),
        tile!("j", "J", 1, 8),
        tile!("k", "K", 1, 10),
        tile!("l", "L", 5, 1),
        tile!("m", "M", 3, 2),
        tile!("n", "N", 6, 1),
        tile!("o", "O", 6, 1),
        tile!("p", "P", 2, 3),
        tile!("q", "Q", 1, 8),
        tile!("r", "R", 6, 1),
        tile!("s", "S", 6, 1),
        tile!("t", "T", 6, 1),
        tile!("u", "U", 6, 1),
        tile!("v", "V", 2, 4),
        tile!("w", "W", 1, 10),
        tile!("x", "X", 1, 10),
        tile!("y", "Y", 1, 10),
        tile!("z", "Z", 1, 10),
    ],
    num_tiles: 102,
});
