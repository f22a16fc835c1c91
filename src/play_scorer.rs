// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, dictionary, game_config, word};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub accepted: bool,
    pub points: i32,
    pub invalid_words: Vec<String>,
}

pub struct PlayScorer<'a> {
    pub game_config: &'a game_config::GameConfig,
    pub dictionary: &'a dictionary::Dictionary,
}

// premiums only count under the new tiles.
fn word_score(board: &board::Board, coords: &[board::Coord], word: &word::Word) -> i32 {
    let alphabet = board.alphabet();
    let board_layout = board.board_layout();
    let mut word_multiplier = 1;
    let mut word_score = 0i32;
    for &c in coords {
        let tile = board.at(c);
        let tile_multiplier = if word.is_new(c) {
            let premium = board_layout.premium_at(c.index());
            word_multiplier *= premium.word_multiplier as i32;
            premium.letter_multiplier as i32
        } else {
            1
        };
        word_score += alphabet.score(tile) as i32 * tile_multiplier;
    }
    word_score * word_multiplier
}

impl PlayScorer<'_> {
    // the main run plus every perpendicular run of at least two through a new tile.
    fn formed_words(board: &board::Board, word: &word::Word) -> Vec<Vec<board::Coord>> {
        let mut formed = Vec::with_capacity(word.num_played() + 1);
        let main = board.run_through(word.placements[0].0, word.is_horizontal);
        if main.len() >= 2 {
            formed.push(main);
        }
        for &(c, _) in &word.placements {
            let cross = board.run_through(c, !word.is_horizontal);
            if cross.len() >= 2 {
                formed.push(cross);
            }
        }
        formed
    }

    fn evaluate(&self, board: &board::Board, word: &word::Word) -> ScoreOutcome {
        let formed = Self::formed_words(board, word);
        let mut invalid_words = Vec::new();
        let mut buf = Vec::new();
        for coords in &formed {
            buf.clear();
            buf.extend(
                coords
                    .iter()
                    .map(|&c| board.at(c) & !super::alphabet::BLANK_FLAG),
            );
            if !self.dictionary.contains(&buf) {
                invalid_words.push(board.alphabet().fmt_word(&buf));
            }
        }
        if formed.is_empty() || !invalid_words.is_empty() {
            return ScoreOutcome {
                accepted: false,
                points: 0,
                invalid_words,
            };
        }
        let points = formed
            .iter()
            .map(|coords| word_score(board, coords, word))
            .sum::<i32>()
            + self.game_config.num_played_bonus(word.num_played());
        ScoreOutcome {
            accepted: true,
            points,
            invalid_words,
        }
    }

    // all or nothing: on rejection the board is left exactly as it was.
    pub fn place_and_score(&self, word: &mut word::Word, board: &mut board::Board) -> ScoreOutcome {
        let mut scoped = board::ScopedPlacement::new(board);
        for &(c, tile) in &word.placements {
            if !scoped.place(c, tile) {
                word.is_valid = false;
                return ScoreOutcome::default();
            }
        }
        let outcome = self.evaluate(&scoped, word);
        word.is_valid = outcome.accepted;
        word.points = outcome.points;
        if outcome.accepted {
            scoped.commit();
        }
        outcome
    }

    // same verdict, but the board always comes back unchanged.
    pub fn score_tentatively(&self, word: &word::Word, board: &mut board::Board) -> ScoreOutcome {
        let mut scoped = board::ScopedPlacement::new(board);
        for &(c, tile) in &word.placements {
            if !scoped.place(c, tile) {
                return ScoreOutcome::default();
            }
        }
        self.evaluate(&scoped, word)
    }
}
