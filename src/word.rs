// Copyright (C) 2020-2024 Andy Kurnia.

use super::board;

// a placement as materialized against one board state.
// only valid while that board is unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    // the whole run, including tiles already on the board.
    pub coordinates: Vec<board::Coord>,
    // the new tiles, in board form.
    pub placements: Vec<(board::Coord, u8)>,
    pub is_horizontal: bool,
    pub string_form: String,
    pub is_valid: bool,
    pub points: i32,
}

impl Word {
    #[inline(always)]
    pub fn num_played(&self) -> usize {
        self.placements.len()
    }

    #[inline(always)]
    pub fn is_new(&self, coord: board::Coord) -> bool {
        self.placements.iter().any(|&(c, _)| c == coord)
    }

    // the tiles a rack gives up for this word: blanks come back as 0.
    pub fn rack_tiles(&self) -> impl Iterator<Item = u8> + '_ {
        self.placements
            .iter()
            .map(|&(_, t)| super::alphabet::rack_tile_of(t))
    }
}

// plain letters along coords, reading new tiles from placements when the board lacks them.
pub fn string_form(board: &board::Board, coords: &[board::Coord], placements: &[(board::Coord, u8)]) -> String {
    let tiles = coords
        .iter()
        .map(|&c| {
            placements
                .iter()
                .find(|&&(p, _)| p == c)
                .map_or_else(|| board.at(c), |&(_, t)| t)
        })
        .collect::<Vec<_>>();
    board.alphabet().fmt_word(&tiles)
}
