// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, board, command, dictionary, game_config, play_scorer, validator};

pub struct BoardSnapshot<'a> {
    pub board: &'a board::Board,
    pub game_config: &'a game_config::GameConfig,
    pub dictionary: &'a dictionary::Dictionary,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValuedMove {
    pub command: command::PlaceWordCommand,
    pub score: i32,
}

#[inline(always)]
fn direction_rank(is_horizontal: Option<bool>) -> u8 {
    match is_horizontal {
        Some(true) => 0,
        None => 1,
        Some(false) => 2,
    }
}

impl ValuedMove {
    // best first: score, then row-major first coordinate, across before down, then letters.
    pub fn ranking(a: &ValuedMove, b: &ValuedMove) -> std::cmp::Ordering {
        b.score
            .cmp(&a.score)
            .then_with(|| {
                a.command
                    .first_coordinate
                    .sort_key()
                    .cmp(&b.command.first_coordinate.sort_key())
            })
            .then_with(|| {
                direction_rank(a.command.is_horizontal).cmp(&direction_rank(b.command.is_horizontal))
            })
            .then_with(|| a.command.letters.cmp(&b.command.letters))
    }
}

// raw finding before scoring: first new square, direction, new tiles in board form.
struct Found {
    first_coordinate: board::Coord,
    is_horizontal: Option<bool>,
    tiles: Vec<u8>,
}

// bit t set if tile t may go on an empty square without breaking the perpendicular word.
fn gen_cross_checks(
    board_snapshot: &BoardSnapshot,
    horizontal: bool,
    cross_checks: &mut [u32],
) {
    let board = board_snapshot.board;
    let alphabet = board.alphabet();
    let all_letters = ((1u32 << alphabet.len()) - 1) & !1;
    let perpendicular = !horizontal;
    let mut buf = Vec::new();
    for (idx, cross_check) in cross_checks.iter_mut().enumerate() {
        let c = board::Coord::from_index(idx);
        if board.is_occupied(c) {
            *cross_check = 0;
            continue;
        }
        if !board.is_occupied(c.offset(perpendicular, -1))
            && !board.is_occupied(c.offset(perpendicular, 1))
        {
            *cross_check = all_letters;
            continue;
        }
        let mut start = c;
        while board.is_occupied(start.offset(perpendicular, -1)) {
            start = start.offset(perpendicular, -1);
        }
        buf.clear();
        let mut gap = 0;
        let mut q = start;
        loop {
            if q == c {
                gap = buf.len();
                buf.push(0);
            } else if board.is_occupied(q) {
                buf.push(board.at(q) & !alphabet::BLANK_FLAG);
            } else {
                break;
            }
            q = q.offset(perpendicular, 1);
        }
        let mut bits = 0u32;
        for tile in 1..alphabet.len() {
            buf[gap] = tile;
            if board_snapshot.dictionary.contains(&buf) {
                bits |= 1 << tile;
            }
        }
        *cross_check = bits;
    }
}

fn gen_place_moves(
    board_snapshot: &BoardSnapshot,
    rack_tally: &mut [u8],
    anchors: &[board::Coord],
    is_anchor: &[bool],
    cross_checks: &[u32],
    horizontal: bool,
    max_prefix: usize,
    found: &mut Vec<Found>,
) {
    struct Env<'a> {
        board: &'a board::Board,
        trie: &'a dictionary::Trie,
        cross_checks: &'a [u32],
        rack_tally: &'a mut [u8],
        horizontal: bool,
        word: Vec<u8>,
        found: &'a mut Vec<Found>,
    }

    // env.word ends just before end.
    fn record(env: &mut Env, end: board::Coord) {
        let start = end.offset(env.horizontal, -(env.word.len() as i8));
        let mut first_coordinate = None;
        let mut tiles = Vec::new();
        for (i, &tile) in env.word.iter().enumerate() {
            let c = start.offset(env.horizontal, i as i8);
            if !env.board.is_occupied(c) {
                first_coordinate.get_or_insert(c);
                tiles.push(tile);
            }
        }
        if let Some(first_coordinate) = first_coordinate {
            env.found.push(Found {
                first_coordinate,
                is_horizontal: if tiles.len() == 1 {
                    None
                } else {
                    Some(env.horizontal)
                },
                tiles,
            });
        }
    }

    fn play_tile(env: &mut Env, tile: u8, rack_index: usize, p: u32, next: board::Coord) {
        env.rack_tally[rack_index] -= 1;
        env.word.push(tile);
        extend_right(env, p, next, true);
        env.word.pop();
        env.rack_tally[rack_index] += 1;
    }

    fn extend_right(env: &mut Env, p: u32, pos: board::Coord, anchor_filled: bool) {
        let trie = env.trie;
        if anchor_filled
            && env.word.len() >= 2
            && trie[p].accepts()
            && !env.board.is_occupied(pos)
        {
            record(env, pos);
        }
        if !pos.in_bounds() {
            return;
        }
        let next = pos.offset(env.horizontal, 1);
        let b = env.board.at(pos);
        if b != 0 {
            if let Some(child) = trie.seek(p, b & !alphabet::BLANK_FLAG) {
                env.word.push(b);
                extend_right(env, child, next, anchor_filled);
                env.word.pop();
            }
            return;
        }
        let allowed = env.cross_checks[pos.index()];
        for (tile, child) in trie.children(p) {
            if allowed & (1 << tile) == 0 {
                continue;
            }
            if env.rack_tally[tile as usize] > 0 {
                play_tile(env, tile, tile as usize, child, next);
            }
            if env.rack_tally[alphabet::BLANK as usize] > 0 {
                play_tile(env, tile | alphabet::BLANK_FLAG, alphabet::BLANK as usize, child, next);
            }
        }
    }

    // the prefix goes on empty non-anchor squares, which have no neighbours to check.
    fn left_part(env: &mut Env, p: u32, anchor: board::Coord, limit: usize) {
        extend_right(env, p, anchor, false);
        if limit == 0 {
            return;
        }
        let trie = env.trie;
        for (tile, child) in trie.children(p) {
            for (placed, rack_index) in [
                (tile, tile as usize),
                (tile | alphabet::BLANK_FLAG, alphabet::BLANK as usize),
            ] {
                if env.rack_tally[rack_index] > 0 {
                    env.rack_tally[rack_index] -= 1;
                    env.word.push(placed);
                    left_part(env, child, anchor, limit - 1);
                    env.word.pop();
                    env.rack_tally[rack_index] += 1;
                }
            }
        }
    }

    let board = board_snapshot.board;
    let trie = board_snapshot.dictionary.trie();
    let mut env = Env {
        board,
        trie,
        cross_checks,
        rack_tally,
        horizontal,
        word: Vec::new(),
        found,
    };

    for &anchor in anchors {
        let before = anchor.offset(horizontal, -1);
        env.word.clear();
        if board.is_occupied(before) {
            let mut start = before;
            while board.is_occupied(start.offset(horizontal, -1)) {
                start = start.offset(horizontal, -1);
            }
            let mut p = Some(trie.root());
            let mut c = start;
            while c != anchor {
                let b = board.at(c);
                env.word.push(b);
                p = p.and_then(|p| trie.seek(p, b & !alphabet::BLANK_FLAG));
                c = c.offset(horizontal, 1);
            }
            if let Some(p) = p {
                extend_right(&mut env, p, anchor, false);
            }
        } else {
            let mut limit = 0;
            let mut c = before;
            while limit < max_prefix
                && c.in_bounds()
                && !board.is_occupied(c)
                && !is_anchor[c.index()]
            {
                limit += 1;
                c = c.offset(horizontal, -1);
            }
            left_part(&mut env, trie.root(), anchor, limit);
        }
    }
}

pub struct MoveGenerator {
    pub plays: Vec<ValuedMove>,
    rack_tally: Box<[u8]>,
    cross_checks: Box<[u32]>,
    is_anchor: Box<[bool]>,
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGenerator {
    pub fn new() -> Self {
        let num_squares = (board::DIM as usize) * (board::DIM as usize);
        Self {
            plays: Vec::new(),
            rack_tally: Box::new([]),
            cross_checks: vec![0u32; num_squares].into_boxed_slice(),
            is_anchor: vec![false; num_squares].into_boxed_slice(),
        }
    }

    // every legal placement for the rack, best first.
    pub fn gen_moves(&mut self, board_snapshot: &BoardSnapshot, rack: &[u8]) {
        self.plays.clear();
        let board = board_snapshot.board;
        let alphabet = board.alphabet();
        let game_config = board_snapshot.game_config;

        self.rack_tally = vec![0u8; alphabet.len() as usize].into_boxed_slice();
        for &tile in rack {
            if let Some(n) = self.rack_tally.get_mut(tile as usize) {
                *n += 1;
            }
        }

        let anchors = if board.is_empty() {
            let layout = board.board_layout();
            let star = board::Coord::new(layout.star_x(), layout.star_y());
            self.is_anchor.iter_mut().for_each(|m| *m = false);
            self.is_anchor[star.index()] = true;
            vec![star]
        } else {
            let mut anchors = Vec::new();
            for (idx, is_anchor) in self.is_anchor.iter_mut().enumerate() {
                let c = board::Coord::from_index(idx);
                *is_anchor = !board.is_occupied(c) && board.has_occupied_neighbor(c);
                if *is_anchor {
                    anchors.push(c);
                }
            }
            anchors
        };
        // one square is kept for the anchor itself.
        let max_prefix = std::cmp::min(rack.len().saturating_sub(1), game_config.rack_size() as usize);

        let mut found = Vec::new();
        for horizontal in [true, false] {
            gen_cross_checks(board_snapshot, horizontal, &mut self.cross_checks);
            gen_place_moves(
                board_snapshot,
                &mut self.rack_tally,
                &anchors,
                &self.is_anchor,
                &self.cross_checks,
                horizontal,
                max_prefix,
                &mut found,
            );
        }

        // score on a scratch board through the same path as a submitted move.
        let scorer = play_scorer::PlayScorer {
            game_config,
            dictionary: board_snapshot.dictionary,
        };
        let mut scratch = board.clone();
        let mut seen = std::collections::HashSet::new();
        for f in found {
            let command =
                command::PlaceWordCommand::from_tiles(alphabet, f.first_coordinate, f.is_horizontal, &f.tiles);
            if !seen.insert(command.clone()) {
                continue;
            }
            if let Ok(word) = validator::validate(&command, &scratch) {
                let outcome = scorer.score_tentatively(&word, &mut scratch);
                if outcome.accepted {
                    self.plays.push(ValuedMove {
                        command,
                        score: outcome.points,
                    });
                }
            }
        }
        self.plays.sort_unstable_by(ValuedMove::ranking);
    }
}

pub fn generate_moves(board_snapshot: &BoardSnapshot, rack: &[u8]) -> Vec<ValuedMove> {
    let mut move_generator = MoveGenerator::new();
    move_generator.gen_moves(board_snapshot, rack);
    move_generator.plays
}
