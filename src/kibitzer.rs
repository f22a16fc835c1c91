// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, board, command, dictionary, error, game_config, movegen};

// board rows are strings: "." for empty, lowercase for a tile,
// uppercase for a blank standing for that letter.

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JsonPlay {
    // "h8h cat" form.
    pub play: String,
    pub score: i32,
    #[serde(flatten)]
    pub command: command::PlaceWordCommand,
}

impl From<&movegen::ValuedMove> for JsonPlay {
    #[inline(always)]
    fn from(valued_move: &movegen::ValuedMove) -> Self {
        Self {
            play: valued_move.command.fmt(),
            score: valued_move.score,
            command: valued_move.command.clone(),
        }
    }
}

pub struct Kibitzer {
    pub available_tally: Vec<u8>,
    pub rack: Vec<u8>,
    pub board: board::Board,
}

impl Kibitzer {
    pub fn new(game_config: &game_config::GameConfig) -> Self {
        Self {
            available_tally: Vec::new(),
            rack: Vec::new(),
            board: board::Board::new(game_config),
        }
    }

    fn take(&mut self, alphabet: &alphabet::Alphabet, tile: u8) -> error::Returns<()> {
        if self.available_tally[tile as usize] > 0 {
            self.available_tally[tile as usize] -= 1;
            Ok(())
        } else {
            return_error!(format!(
                "too many {} (bag contains only {})",
                alphabet.from_rack(tile).unwrap_or("?"),
                alphabet.freq(tile),
            ));
        }
    }

    pub fn prepare(
        &mut self,
        game_config: &game_config::GameConfig,
        rack: &str,
        rows: &[String],
    ) -> error::Returns<()> {
        let alphabet = game_config.alphabet();
        self.available_tally.clear();
        self.available_tally
            .extend((0..alphabet.len()).map(|tile| alphabet.freq(tile)));

        self.rack = match alphabet.parse_rack(rack) {
            Some(tiles) => tiles,
            None => {
                return_error!(format!("rack {:?} has an invalid letter", rack));
            }
        };
        if self.rack.len() > game_config.rack_size() as usize {
            return_error!(format!(
                "rack has {} tiles, at most {} allowed",
                self.rack.len(),
                game_config.rack_size()
            ));
        }
        for tile in self.rack.clone() {
            self.take(alphabet, tile)?;
        }

        let dim = game_config.board_layout().dim();
        if rows.len() != dim as usize {
            return_error!(format!("board: need {} rows, found {} rows", dim, rows.len()));
        }
        for (row_num, row) in rows.iter().enumerate() {
            if row.chars().count() != dim as usize {
                return_error!(format!(
                    "board row {} (0-based): need {} cols, found {} cols",
                    row_num,
                    dim,
                    row.chars().count()
                ));
            }
        }

        self.board = board::Board::new(game_config);
        let mut buf = [0u8; 4];
        for (y, row) in (1..).zip(rows.iter()) {
            for (x, c) in (1..).zip(row.chars()) {
                if c == '.' || c == ' ' {
                    continue;
                }
                let tile = match alphabet.parse_command_letter(c.encode_utf8(&mut buf)) {
                    Some(tile) => tile,
                    None => {
                        return_error!(format!(
                            "board row {} col {} (1-based): invalid letter {:?}",
                            y, x, c
                        ));
                    }
                };
                self.take(alphabet, alphabet::rack_tile_of(tile))?;
                self.board.place_letter(board::Coord::new(x, y), tile);
            }
        }
        Ok(())
    }

    pub fn top_moves(
        &self,
        game_config: &game_config::GameConfig,
        dictionary: &dictionary::Dictionary,
        max_gen: usize,
    ) -> Vec<JsonPlay> {
        let mut plays = movegen::generate_moves(
            &movegen::BoardSnapshot {
                board: &self.board,
                game_config,
                dictionary,
            },
            &self.rack,
        );
        plays.truncate(max_gen);
        plays.iter().map(JsonPlay::from).collect()
    }
}
