// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, board_layout, game_state};
use std::fmt::Write;

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, coord: board::Coord) -> &'static str {
    if coord.x == board_layout.star_x() && coord.y == board_layout.star_y() {
        return "*";
    }
    let premium = board_layout.premium_at(coord.index());
    match (premium.word_multiplier, premium.letter_multiplier) {
        (3, _) => "=",
        (2, _) => "-",
        (_, 3) => "\"",
        (_, 2) => "'",
        _ => " ",
    }
}

#[inline(always)]
pub fn board_label(board: &board::Board, coord: board::Coord) -> &str {
    board
        .alphabet()
        .from_board(board.at(coord))
        .unwrap_or_else(|| empty_label(board.board_layout(), coord))
}

fn fmt_rule(s: &mut String, dim: i8) {
    s.push_str("  +");
    for _ in 1..dim {
        s.push_str("---");
    }
    s.push_str("--+\n");
}

fn fmt_columns(s: &mut String, dim: i8) {
    s.push_str("  ");
    for x in 1..=dim {
        let _ = write!(s, "{:>3}", x);
    }
    s.push('\n');
}

// rows are lettered and columns numbered, matching "h8" positions.
pub fn fmt_board(board: &board::Board) -> String {
    let dim = board.board_layout().dim();
    let mut s = String::new();
    fmt_columns(&mut s, dim);
    fmt_rule(&mut s, dim);
    for y in 1..=dim {
        let row = (b'a' + (y - 1) as u8) as char;
        let _ = write!(s, "{} |", row);
        for x in 1..=dim {
            if x > 1 {
                s.push_str("  ");
            }
            s.push_str(board_label(board, board::Coord::new(x, y)));
        }
        let _ = writeln!(s, "| {}", row);
    }
    fmt_rule(&mut s, dim);
    fmt_columns(&mut s, dim);
    s
}

pub fn print_board(board: &board::Board) {
    print!("{}", fmt_board(board));
}

// racks of humans are only shown when asked.
pub fn print_game(game: &game_state::Game, reveal_racks: bool) {
    print_board(&game.board);
    let alphabet = game.game_config.alphabet();
    for player in &game.players {
        let marker = if game.turn.validate_actor(&player.id) {
            "->"
        } else {
            "  "
        };
        if reveal_racks || player.is_bot() {
            println!(
                "{} {:<10} {:>4}  {}",
                marker,
                player.id,
                player.score,
                alphabet.fmt_rack(&player.rack)
            );
        } else {
            println!("{} {:<10} {:>4}", marker, player.id, player.score);
        }
    }
    println!("bag: {} tiles", game.bag.len());
}
