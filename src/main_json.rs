// Copyright (C) 2020-2024 Andy Kurnia.

use std::io::Read;
use wordplay::{dictionary, error, game_config, kibitzer};

// lexicon: path to the word list.
// rack: letters, "*" for a blank.
// board: one string per row, "." for empty, uppercase for a blank.
// count: maximum number of moves returned, best first.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Question {
    lexicon: String,
    rack: String,
    board: Vec<String>,
    #[serde(rename = "count")]
    max_gen: usize,
}

pub fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    let data = match args.get(1).map(String::as_str) {
        Some("-") | None => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
        Some(path) => std::fs::read_to_string(path)?,
    };
    let question = serde_json::from_str::<Question>(&data)?;

    let game_config = game_config::make_classic_game_config();
    // of course this should be cached
    let dictionary = dictionary::Dictionary::from_file(game_config.alphabet(), &question.lexicon)?;

    let mut kibitzer = kibitzer::Kibitzer::new(&game_config);
    kibitzer.prepare(&game_config, &question.rack, &question.board)?;
    let plays = kibitzer.top_moves(&game_config, &dictionary, question.max_gen);
    println!("{}", serde_json::to_string_pretty(&plays)?);
    Ok(())
}
