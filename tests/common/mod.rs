// Copyright (C) 2020-2024 Andy Kurnia.

#![allow(dead_code)]

use rand::prelude::*;
use std::sync::Arc;
use wordplay::{alphabet, board, command, dictionary, game_config, game_state, player};

pub const WORDS: &[&str] = &[
    "aa", "ab", "ad", "ae", "ag", "ah", "ai", "al", "am", "an", "ar", "as", "at", "aw", "ax", "ay",
    "ba", "be", "bi", "bo", "by", "da", "de", "do", "ed", "ef", "eh", "el", "em", "en", "er", "es",
    "ex", "fa", "fe", "go", "ha", "he", "hi", "hm", "ho", "id", "if", "in", "is", "it", "jo", "ka",
    "la", "li", "lo", "ma", "me", "mi", "mo", "mu", "my", "na", "ne", "no", "nu", "od", "oe", "of",
    "oh", "oi", "om", "on", "op", "or", "os", "ow", "ox", "oy", "pa", "pe", "pi", "qi", "re", "sh",
    "si", "so", "ta", "ti", "to", "uh", "um", "un", "up", "us", "ut", "we", "wo", "xi", "xu", "ya",
    "ye", "yo", "za", "cat", "cats", "act", "bat", "tab", "rat", "tar", "art", "eat", "tea", "ate",
    "tee", "ten", "net", "tin", "nit", "ant", "tan", "sat", "set", "sit", "dog", "god", "ode",
    "rod", "red", "den", "end", "nod", "don", "toe", "tie", "rain", "rein", "tone", "note", "line",
    "lion", "loin", "near", "earn", "tear", "rate", "stare", "tears", "rates", "notes", "stone",
    "onset", "train", "quiz", "zoo", "jet", "jab", "wax", "fox", "vex", "yak", "gym", "hex",
];

pub fn classic_dictionary() -> Arc<dictionary::Dictionary> {
    Arc::new(dictionary::Dictionary::from_words(&alphabet::CLASSIC_ALPHABET, WORDS).unwrap())
}

pub fn new_game(players: Vec<player::GamePlayer>, seed: u64) -> game_state::Game {
    game_state::Game::new(
        Arc::new(game_config::make_classic_game_config()),
        classic_dictionary(),
        players,
        rand_chacha::ChaCha20Rng::seed_from_u64(seed),
    )
}

pub fn two_humans(seed: u64) -> game_state::Game {
    let mut game = new_game(
        vec![player::GamePlayer::human("ann"), player::GamePlayer::human("bob")],
        seed,
    );
    game.start();
    game
}

pub fn active(game: &game_state::Game) -> String {
    game.turn.active_player_id().unwrap().to_string()
}

pub fn waiting(game: &game_state::Game) -> String {
    game.players
        .iter()
        .find(|p| Some(p.id.as_str()) != game.turn.active_player_id())
        .unwrap()
        .id
        .clone()
}

pub fn place(x: i8, y: i8, is_horizontal: Option<bool>, letters: &str) -> command::PlaceWordCommand {
    command::PlaceWordCommand {
        first_coordinate: board::Coord::new(x, y),
        is_horizontal,
        letters: letters.chars().map(String::from).collect(),
    }
}

// give the player exactly this rack, pulling tiles from the bag or from
// whoever holds them. the total stays the same.
pub fn set_rack(game: &mut game_state::Game, id: &str, rack: &str) {
    let idx = game.player_index(id).unwrap();
    let old = std::mem::take(&mut game.players[idx].rack);
    game.bag.put_back(&old);
    for t in alphabet::CLASSIC_ALPHABET.parse_rack(rack).unwrap() {
        if game.bag.tally()[t as usize] == 0 {
            let holder = game
                .players
                .iter()
                .position(|p| p.rack.contains(&t))
                .unwrap();
            player::use_tiles(&mut game.players[holder].rack, [t]).unwrap();
            game.bag.put_back(&[t]);
        }
        let mut rest = game.bag.draw_many(&mut game.rng, game.bag.len() as usize);
        rest.swap_remove(rest.iter().position(|&x| x == t).unwrap());
        game.bag.put_back(&rest);
        game.players[idx].rack.push(t);
    }
}

// leave only `keep` tiles in the bag. what is taken out is gone for good.
pub fn drain_bag(game: &mut game_state::Game, keep: u16) -> Vec<u8> {
    let amount = game.bag.len().saturating_sub(keep) as usize;
    game.bag.draw_many(&mut game.rng, amount)
}
