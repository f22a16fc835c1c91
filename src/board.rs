// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, board_layout, game_config};

// 1-based. x is the column, y is the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

pub const DIM: i8 = 15;

pub const CENTER: Coord = Coord { x: 8, y: 8 };

impl Coord {
    #[inline(always)]
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn in_bounds(self) -> bool {
        (1..=DIM).contains(&self.x) && (1..=DIM).contains(&self.y)
    }

    // only meaningful when in bounds.
    #[inline(always)]
    pub fn index(self) -> usize {
        (self.y - 1) as usize * DIM as usize + (self.x - 1) as usize
    }

    #[inline(always)]
    pub fn from_index(idx: usize) -> Self {
        Self {
            x: (idx % DIM as usize) as i8 + 1,
            y: (idx / DIM as usize) as i8 + 1,
        }
    }

    // may step off the board, check in_bounds.
    #[inline(always)]
    pub fn offset(self, horizontal: bool, delta: i8) -> Self {
        if horizontal {
            Self {
                x: self.x + delta,
                y: self.y,
            }
        } else {
            Self {
                x: self.x,
                y: self.y + delta,
            }
        }
    }

    #[inline(always)]
    pub fn neighbors(self) -> [Coord; 4] {
        [
            self.offset(true, -1),
            self.offset(true, 1),
            self.offset(false, -1),
            self.offset(false, 1),
        ]
    }

    // row-major, used for deterministic ordering of moves.
    #[inline(always)]
    pub fn sort_key(self) -> (i8, i8) {
        (self.y, self.x)
    }

    // "h8": row letter then column number. rows off the alphabet print as a pair.
    pub fn fmt_position(self) -> String {
        match u8::try_from(self.y) {
            Ok(y @ 1..=26) => format!("{}{}", (b'a' + y - 1) as char, self.x),
            _ => format!("({},{})", self.x, self.y),
        }
    }
}

// a read-only view of one square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub coordinate: Coord,
    pub is_occupied: bool,
    pub letter_value: Option<u8>,
    pub letter_points: i8,
    pub letter_multiplier: i8,
    pub word_multiplier: i8,
}

#[derive(Clone)]
pub struct Board {
    tiles: Box<[u8]>,
    alphabet: &'static alphabet::Alphabet<'static>,
    board_layout: &'static board_layout::BoardLayout<'static>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.tiles.chunks(DIM as usize) {
            for &t in row {
                write!(f, "{}", self.alphabet.from_board(t).unwrap_or("."))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Board {
    pub fn new(game_config: &game_config::GameConfig) -> Self {
        Self {
            tiles: vec![0u8; (DIM as usize) * (DIM as usize)].into_boxed_slice(),
            alphabet: game_config.alphabet(),
            board_layout: game_config.board_layout(),
        }
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    #[inline(always)]
    pub fn alphabet(&self) -> &'static alphabet::Alphabet<'static> {
        self.alphabet
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &'static board_layout::BoardLayout<'static> {
        self.board_layout
    }

    // 0 when empty or off the board.
    #[inline(always)]
    pub fn at(&self, coord: Coord) -> u8 {
        if coord.in_bounds() {
            self.tiles[coord.index()]
        } else {
            0
        }
    }

    #[inline(always)]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.at(coord) != 0
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tiles.iter().all(|&t| t == 0)
    }

    pub fn num_occupied(&self) -> usize {
        self.tiles.iter().filter(|&&t| t != 0).count()
    }

    pub fn has_occupied_neighbor(&self, coord: Coord) -> bool {
        coord.neighbors().iter().any(|&c| self.is_occupied(c))
    }

    pub fn tile(&self, coord: Coord) -> Tile {
        let premium = self.board_layout.premium_at(coord.index());
        let t = self.tiles[coord.index()];
        Tile {
            coordinate: coord,
            is_occupied: t != 0,
            letter_value: if t != 0 { Some(t) } else { None },
            letter_points: self.alphabet.score(t),
            letter_multiplier: premium.letter_multiplier,
            word_multiplier: premium.word_multiplier,
        }
    }

    // false if off the board or already occupied.
    pub fn place_letter(&mut self, coord: Coord, tile: u8) -> bool {
        if !coord.in_bounds() || tile & !alphabet::BLANK_FLAG == 0 {
            return false;
        }
        let idx = coord.index();
        if self.tiles[idx] != 0 {
            return false;
        }
        self.tiles[idx] = tile;
        true
    }

    pub fn remove_letter(&mut self, coord: Coord) -> Option<u8> {
        if !coord.in_bounds() {
            return None;
        }
        let idx = coord.index();
        match std::mem::take(&mut self.tiles[idx]) {
            0 => None,
            t => Some(t),
        }
    }

    // the maximal occupied run along the direction through coord.
    pub fn run_through(&self, coord: Coord, horizontal: bool) -> Vec<Coord> {
        let mut start = coord;
        while self.is_occupied(start.offset(horizontal, -1)) {
            start = start.offset(horizontal, -1);
        }
        let mut run = Vec::new();
        let mut c = start;
        while self.is_occupied(c) {
            run.push(c);
            c = c.offset(horizontal, 1);
        }
        run
    }
}

// letters placed through this guard are removed when it drops, unless committed.
pub struct ScopedPlacement<'a> {
    board: &'a mut Board,
    placed: Vec<Coord>,
    committed: bool,
}

impl<'a> ScopedPlacement<'a> {
    pub fn new(board: &'a mut Board) -> Self {
        Self {
            board,
            placed: Vec::new(),
            committed: false,
        }
    }

    pub fn place(&mut self, coord: Coord, tile: u8) -> bool {
        let ok = self.board.place_letter(coord, tile);
        if ok {
            self.placed.push(coord);
        }
        ok
    }

    pub fn placed(&self) -> &[Coord] {
        &self.placed
    }

    pub fn commit(mut self) -> Vec<Coord> {
        self.committed = true;
        std::mem::take(&mut self.placed)
    }
}

impl std::ops::Deref for ScopedPlacement<'_> {
    type Target = Board;

    #[inline(always)]
    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl Drop for ScopedPlacement<'_> {
    fn drop(&mut self) {
        if !self.committed {
            for &coord in self.placed.iter().rev() {
                self.board.remove_letter(coord);
            }
        }
    }
}
