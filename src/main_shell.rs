// Copyright (C) 2020-2024 Andy Kurnia.

use game_event::GameEvent;
use rand::prelude::*;
use std::sync::{Arc, Mutex};
use wordplay::{
    board, command, dictionary, display, error, game_config, game_event, game_state, move_picker,
    player, rlhelper, runtime,
};

const HUMAN_ID: &str = "you";
const BOT_ID: &str = "bot";

const HELP: &str = "\
place h8h cat    put c, a, t from h8 going across (v for down, uppercase for a blank)
exchange ab*     swap these tiles with the bag
skip             pass the turn
hint             a few moves that would be accepted
reserve          what is still in the bag
board            show the board and scores
abandon          end the match now
source FILE      run commands from a file
exit";

// what the shell has seen, rebuilt only from events.
struct Mirror {
    board: board::Board,
    scores: Vec<(String, i32)>,
    active_player_id: Option<String>,
}

impl Mirror {
    fn new(game_config: &game_config::GameConfig) -> Self {
        Self {
            board: board::Board::new(game_config),
            scores: vec![(HUMAN_ID.to_string(), 0), (BOT_ID.to_string(), 0)],
            active_player_id: None,
        }
    }

    fn print(&self) {
        display::print_board(&self.board);
        for (id, score) in &self.scores {
            let marker = if self.active_player_id.as_deref() == Some(id.as_str()) {
                "->"
            } else {
                "  "
            };
            println!("{} {:<10} {:>4}", marker, id, score);
        }
    }

    // false if the event is not worth showing.
    fn apply(&mut self, event: &GameEvent) -> bool {
        match event {
            GameEvent::PlacementAccepted {
                player_id,
                points,
                board_delta,
            } => {
                let alphabet = self.board.alphabet();
                for delta in board_delta {
                    if let Some(tile) = alphabet.parse_command_letter(&delta.letter) {
                        self.board.place_letter(delta.coordinate, tile);
                    }
                }
                if let Some((_, score)) = self.scores.iter_mut().find(|(id, _)| id == player_id) {
                    *score += points;
                }
                true
            }
            GameEvent::TurnChanged {
                active_player_id, ..
            } => {
                self.active_player_id = Some(active_player_id.clone());
                true
            }
            GameEvent::MatchEnded { final_scores, .. } => {
                self.active_player_id = None;
                for s in final_scores {
                    if let Some((_, score)) = self.scores.iter_mut().find(|(id, _)| *id == s.player_id)
                    {
                        *score = s.score;
                    }
                }
                true
            }
            GameEvent::Countdown { seconds_remaining } => {
                self.active_player_id.as_deref() == Some(HUMAN_ID)
                    && (*seconds_remaining % 15 == 0 || *seconds_remaining <= 5)
            }
            // the bot's tiles stay hidden.
            GameEvent::RackChanged { player_id, .. }
            | GameEvent::Hint { player_id, .. }
            | GameEvent::Reserve { player_id, .. } => player_id == HUMAN_ID,
            _ => true,
        }
    }
}

fn parse_move_picker(s: &str) -> error::Returns<move_picker::MovePicker> {
    match s {
        "greedy" => Ok(move_picker::MovePicker::Greedy),
        "tiered" => Ok(move_picker::MovePicker::Tiered),
        "opponent-relative" => Ok(move_picker::MovePicker::OpponentRelative),
        _ => Err(format!("unknown bot {:?}", s).into()),
    }
}

pub fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err(
            "usage: shell WORDS.csv [greedy|tiered|opponent-relative] [SETTINGS.json]".into(),
        );
    }
    let move_picker = match args.get(2) {
        Some(s) => parse_move_picker(s)?,
        None => move_picker::MovePicker::Greedy,
    };
    let settings = match args.get(3) {
        Some(path) => game_config::MatchSettings::from_file(path)?,
        None => game_config::MatchSettings::default(),
    };
    let game_config = Arc::new(game_config::make_game_config(&settings)?);
    let dictionary = Arc::new(dictionary::Dictionary::from_file(
        game_config.alphabet(),
        &args[1],
    )?);
    let rng = match settings.seed {
        Some(seed) => rand_chacha::ChaCha20Rng::seed_from_u64(seed),
        None => rand_chacha::ChaCha20Rng::from_os_rng(),
    };
    let game = game_state::Game::new(
        Arc::clone(&game_config),
        dictionary,
        vec![
            player::GamePlayer::human(HUMAN_ID),
            player::GamePlayer::bot(BOT_ID, move_picker),
        ],
        rng,
    );
    println!("{}\n", HELP);

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();
    let (commands, mut events, task) = runtime::spawn_match(game).into_parts();
    let mirror = Arc::new(Mutex::new(Mirror::new(&game_config)));
    let printer = {
        let mirror = Arc::clone(&mirror);
        rt.spawn(async move {
            while let Some(event) = events.recv().await {
                let Ok(mut mirror) = mirror.lock() else {
                    break;
                };
                if mirror.apply(&event) {
                    println!("{}", event);
                }
                if matches!(event, GameEvent::PlacementAccepted { .. }) || event.is_match_end() {
                    mirror.print();
                }
                if event.is_match_end() {
                    println!("exit to leave");
                }
            }
        })
    };

    let mut rl = rlhelper::new_rl_editor()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if !strings.is_empty() {
                        let match_command = match strings[0].as_str() {
                            "help" => {
                                println!("{}", HELP);
                                None
                            }
                            "exit" => {
                                break;
                            }
                            "source" => {
                                if strings.len() > 1 {
                                    match std::fs::read_to_string(&strings[1]) {
                                        Ok(whole_file) => {
                                            let v = cmd_stack.len();
                                            for (line_num, line) in whole_file.lines().enumerate() {
                                                cmd_stack.push((
                                                    line.to_string(),
                                                    Some((strings[1].clone(), line_num + 1)),
                                                ));
                                            }
                                            cmd_stack[v..].reverse();
                                        }
                                        Err(err) => {
                                            println!("cannot open file: {:?}", err);
                                        }
                                    }
                                } else {
                                    println!("need another arg");
                                }
                                None
                            }
                            "board" => {
                                if let Ok(mirror) = mirror.lock() {
                                    mirror.print();
                                }
                                None
                            }
                            "abandon" => Some(runtime::MatchCommand::Abandon {
                                player_id: HUMAN_ID.to_string(),
                            }),
                            _ => match command::PlayerCommand::parse_words(&strings) {
                                Ok(player_command) => Some(
                                    runtime::MatchCommand::from_player_command(
                                        HUMAN_ID,
                                        player_command,
                                    ),
                                ),
                                Err(err) => {
                                    println!("{}, help for help", err);
                                    None
                                }
                            },
                        };
                        if let Some(match_command) = match_command {
                            if commands.send(match_command).is_err() {
                                println!("the match is over");
                                break;
                            }
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    // leaving early abandons the match.
    drop(commands);
    let game = rt.block_on(task)?;
    rt.block_on(printer)?;
    println!();
    display::print_game(&game, true);
    Ok(())
}
