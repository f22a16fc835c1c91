// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, command, word};

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementError {
    CommandCoordinateOutOfBounds,
    InvalidWordBuild,
    InvalidFirstWordPlacement,
    // some formed word is not in the dictionary.
    InvalidWords,
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PlacementError::CommandCoordinateOutOfBounds => "first coordinate is off the board or taken",
            PlacementError::InvalidWordBuild => "letters do not build a word there",
            PlacementError::InvalidFirstWordPlacement => {
                "word must cover the center or touch existing tiles"
            }
            PlacementError::InvalidWords => "not every word formed is valid",
        })
    }
}

// a lone letter goes along whichever line already has a neighbour, preferring across.
fn resolve_direction(
    command: &command::PlaceWordCommand,
    num_letters: usize,
    board: &board::Board,
) -> Option<bool> {
    if num_letters == 1 {
        let c = command.first_coordinate;
        Some(board.is_occupied(c.offset(true, -1)) || board.is_occupied(c.offset(true, 1)))
    } else {
        command.is_horizontal
    }
}

// structural rules only, in order. the dictionary is the scorer's concern.
pub fn validate(
    command: &command::PlaceWordCommand,
    board: &board::Board,
) -> Result<word::Word, PlacementError> {
    let first = command.first_coordinate;
    if !first.in_bounds() || board.is_occupied(first) {
        return Err(PlacementError::CommandCoordinateOutOfBounds);
    }
    let tiles = match command.tiles(board.alphabet()) {
        Some(tiles) if !tiles.is_empty() => tiles,
        _ => return Err(PlacementError::InvalidWordBuild),
    };
    let horizontal =
        resolve_direction(command, tiles.len(), board).ok_or(PlacementError::InvalidWordBuild)?;

    let mut start = first;
    while board.is_occupied(start.offset(horizontal, -1)) {
        start = start.offset(horizontal, -1);
    }
    let mut coordinates = Vec::new();
    let mut placements = Vec::with_capacity(tiles.len());
    let mut pending = tiles.iter().copied();
    let mut c = start;
    loop {
        if board.is_occupied(c) {
            coordinates.push(c);
        } else if let Some(tile) = pending.next() {
            if !c.in_bounds() {
                return Err(PlacementError::InvalidWordBuild);
            }
            coordinates.push(c);
            placements.push((c, tile));
        } else {
            break;
        }
        c = c.offset(horizontal, 1);
    }
    if coordinates.len() < 2 {
        return Err(PlacementError::InvalidWordBuild);
    }

    if board.is_empty() {
        let layout = board.board_layout();
        let star = board::Coord::new(layout.star_x(), layout.star_y());
        if !coordinates.contains(&star) {
            return Err(PlacementError::InvalidFirstWordPlacement);
        }
    } else if !placements
        .iter()
        .any(|&(c, _)| board.has_occupied_neighbor(c))
    {
        return Err(PlacementError::InvalidFirstWordPlacement);
    }

    let string_form = word::string_form(board, &coordinates, &placements);
    Ok(word::Word {
        coordinates,
        placements,
        is_horizontal: horizontal,
        string_form,
        is_valid: true,
        points: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_config;
    use board::Coord;

    fn place(x: i8, y: i8, is_horizontal: Option<bool>, letters: &str) -> command::PlaceWordCommand {
        command::PlaceWordCommand {
            first_coordinate: Coord::new(x, y),
            is_horizontal,
            letters: letters.chars().map(String::from).collect(),
        }
    }

    fn board_with_cat() -> board::Board {
        let mut board = board::Board::new(&game_config::make_classic_game_config());
        for (x, t) in [(8, 3), (9, 1), (10, 20)] {
            board.place_letter(Coord::new(x, 8), t);
        }
        board
    }

    #[test]
    fn first_coordinate_must_be_free_and_on_board() {
        let board = board_with_cat();
        for cmd in [place(0, 8, Some(true), "ab"), place(8, 16, Some(true), "ab"), place(9, 8, Some(true), "ab")] {
            assert_eq!(validate(&cmd, &board), Err(PlacementError::CommandCoordinateOutOfBounds));
        }
    }

    #[test]
    fn word_must_build() {
        let empty = board::Board::new(&game_config::make_classic_game_config());
        assert_eq!(validate(&place(8, 8, Some(true), ""), &empty), Err(PlacementError::InvalidWordBuild));
        assert_eq!(validate(&place(8, 8, Some(true), "c1"), &empty), Err(PlacementError::InvalidWordBuild));
        assert_eq!(validate(&place(8, 8, None, "cat"), &empty), Err(PlacementError::InvalidWordBuild));
        assert_eq!(validate(&place(8, 8, None, "c"), &empty), Err(PlacementError::InvalidWordBuild));
        assert_eq!(validate(&place(14, 8, Some(true), "cat"), &empty), Err(PlacementError::InvalidWordBuild));
    }

    #[test]
    fn first_word_covers_center() {
        let empty = board::Board::new(&game_config::make_classic_game_config());
        assert_eq!(
            validate(&place(1, 1, Some(true), "cat"), &empty),
            Err(PlacementError::InvalidFirstWordPlacement)
        );
        let word = validate(&place(6, 8, Some(true), "caT"), &empty).unwrap();
        assert_eq!(word.string_form, "cat");
        assert_eq!(word.placements, vec![(Coord::new(6, 8), 3), (Coord::new(7, 8), 1), (Coord::new(8, 8), 0x94)]);
        assert!(word.is_valid);
    }

    #[test]
    fn later_words_touch_the_board() {
        let board = board_with_cat();
        assert_eq!(
            validate(&place(1, 1, Some(true), "at"), &board),
            Err(PlacementError::InvalidFirstWordPlacement)
        );
        let cats = validate(&place(11, 8, Some(false), "s"), &board).unwrap();
        assert!(cats.is_horizontal);
        assert_eq!(cats.string_form, "cats");
        assert_eq!(cats.coordinates.len(), 4);
        let bat = validate(&place(9, 7, Some(false), "bt"), &board).unwrap();
        assert_eq!(bat.string_form, "bat");
        assert_eq!(bat.coordinates, vec![Coord::new(9, 7), Coord::new(9, 8), Coord::new(9, 9)]);
        assert_eq!(bat.num_played(), 2);
        let scat = validate(&place(7, 8, Some(true), "s"), &board).unwrap();
        assert_eq!(scat.string_form, "scat");
        let below = validate(&place(8, 9, None, "a"), &board).unwrap();
        assert!(!below.is_horizontal);
        assert_eq!(below.string_form, "ca");
    }
}
