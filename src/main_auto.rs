// Copyright (C) 2020-2024 Andy Kurnia.

use rand::prelude::*;
use std::sync::Arc;
use wordplay::{
    dictionary, display, error, event_log, game_config, game_event, game_state, move_picker,
    player, return_error,
};

const MOVE_PICKERS: [move_picker::MovePicker; 3] = [
    move_picker::MovePicker::Greedy,
    move_picker::MovePicker::Tiered,
    move_picker::MovePicker::OpponentRelative,
];

// bots that keep exchanging never run out of turns.
const MAX_MOVES_PER_MATCH: usize = 1000;

struct MatchReport {
    match_num: usize,
    board_text: String,
    final_scores: Vec<game_event::FinalScore>,
    end_reason: Option<game_event::EndReason>,
    num_moves: usize,
    cut_off: bool,
    conserved: bool,
}

// every pairing of pickers comes around once per nine matches.
fn players_for(match_num: usize) -> Vec<player::GamePlayer> {
    let p0 = MOVE_PICKERS[match_num % MOVE_PICKERS.len()];
    let p1 = MOVE_PICKERS[(match_num / MOVE_PICKERS.len()) % MOVE_PICKERS.len()];
    vec![
        player::GamePlayer::bot(format!("{:?}#1", p0).to_lowercase(), p0),
        player::GamePlayer::bot(format!("{:?}#2", p1).to_lowercase(), p1),
    ]
}

fn play_match(
    game_config: &Arc<game_config::GameConfig>,
    dictionary: &Arc<dictionary::Dictionary>,
    match_num: usize,
    rng: rand_chacha::ChaCha20Rng,
    log_dir: Option<&str>,
) -> error::Returns<MatchReport> {
    let mut game = game_state::Game::new(
        Arc::clone(game_config),
        Arc::clone(dictionary),
        players_for(match_num),
        rng,
    );
    let mut log = match log_dir {
        Some(log_dir) => Some(event_log::EventLog::open_append(
            format!("{}/match-{}.ndjson", log_dir, match_num),
            &format!("match-{}", match_num),
        )?),
        None => None,
    };
    let num_tiles = game_config.alphabet().num_tiles() as usize;
    let mut conserved = true;
    let num_moves = game.play_bots(MAX_MOVES_PER_MATCH, |game, events| {
        if let Some(log) = log.as_mut() {
            log.write_events(events)?;
        }
        conserved &= game.num_tiles_in_play() == num_tiles;
        Ok(())
    })?;
    if let Some(log) = log.as_mut() {
        log.flush()?;
    }
    Ok(MatchReport {
        match_num,
        board_text: display::fmt_board(&game.board),
        final_scores: game
            .players
            .iter()
            .map(|p| game_event::FinalScore {
                player_id: p.id.clone(),
                score: p.score,
            })
            .collect(),
        end_reason: game.end_reason(),
        num_moves,
        cut_off: game.end_reason() == Some(game_event::EndReason::Abandoned),
        conserved,
    })
}

pub fn main() -> error::Returns<()> {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return Err("usage: auto WORDS.csv [NUM_MATCHES] [SETTINGS.json] [LOG_DIR]".into());
    }
    let num_matches = match args.get(2) {
        Some(s) => s.parse::<usize>()?,
        None => 1,
    };
    let settings = match args.get(3) {
        Some(path) => game_config::MatchSettings::from_file(path)?,
        None => game_config::MatchSettings::default(),
    };
    let log_dir = args.get(4).cloned().map(Arc::new);
    if let Some(log_dir) = &log_dir {
        std::fs::create_dir_all(log_dir.as_str())?;
    }

    let game_config = Arc::new(game_config::make_game_config(&settings)?);
    let t0 = std::time::Instant::now();
    let dictionary = Arc::new(dictionary::Dictionary::from_file(
        game_config.alphabet(),
        &args[1],
    )?);
    println!(
        "loaded {} words in {:?}",
        dictionary.num_words(),
        t0.elapsed()
    );

    let num_threads = num_cpus::get().min(num_matches.max(1));
    let num_started_matches = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut threads = vec![];
    let (tx, rx) = std::sync::mpsc::channel();
    for _ in 0..num_threads {
        let tx = tx.clone();
        let game_config = Arc::clone(&game_config);
        let dictionary = Arc::clone(&dictionary);
        let num_started_matches = Arc::clone(&num_started_matches);
        let log_dir = log_dir.clone();
        let seed = settings.seed;
        threads.push(std::thread::spawn(move || {
            loop {
                let match_num =
                    num_started_matches.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                if match_num >= num_matches {
                    break;
                }
                let rng = match seed {
                    Some(seed) => {
                        rand_chacha::ChaCha20Rng::seed_from_u64(seed.wrapping_add(match_num as u64))
                    }
                    None => rand_chacha::ChaCha20Rng::from_os_rng(),
                };
                let report = play_match(
                    &game_config,
                    &dictionary,
                    match_num,
                    rng,
                    log_dir.as_deref().map(String::as_str),
                )
                .map_err(|e| format!("match {}: {}", match_num, e));
                if tx.send(report).is_err() {
                    break;
                }
            }
        }));
    }
    drop(tx);

    let mut num_reports = 0;
    let mut num_broken = 0;
    let mut num_cut_off = 0;
    let mut wins_by_picker = std::collections::BTreeMap::<String, usize>::new();
    for report in rx.iter() {
        let report = match report {
            Ok(report) => report,
            Err(e) => {
                println!("{}", e);
                num_broken += 1;
                continue;
            }
        };
        num_reports += 1;
        println!(
            "\nmatch {}: {} moves, ended by {:?}",
            report.match_num, report.num_moves, report.end_reason
        );
        if report.cut_off {
            println!("  cut off after {} moves", MAX_MOVES_PER_MATCH);
            num_cut_off += 1;
        }
        print!("{}", report.board_text);
        for s in &report.final_scores {
            println!("  {:<20} {:>4}", s.player_id, s.score);
        }
        if !report.conserved {
            println!("  tile count drifted!");
            num_broken += 1;
        }
        let best = report.final_scores.iter().map(|s| s.score).max();
        let winners = report
            .final_scores
            .iter()
            .filter(|s| Some(s.score) == best)
            .collect::<Vec<_>>();
        // ties count for nobody.
        if let [winner] = &winners[..] {
            let picker = winner
                .player_id
                .split('#')
                .next()
                .unwrap_or(&winner.player_id);
            *wins_by_picker.entry(picker.to_string()).or_default() += 1;
        }
    }

    for thread in threads {
        if let Err(e) = thread.join() {
            println!("{:?}", e);
        }
    }

    println!(
        "\nplayed {} matches in {:?}, {} cut off, {} with problems",
        num_reports,
        t0.elapsed(),
        num_cut_off,
        num_broken
    );
    for (picker, wins) in &wins_by_picker {
        println!("  {:<20} {} wins", picker, wins);
    }
    if num_broken > 0 {
        return_error!(format!("{} matches had problems", num_broken));
    }
    Ok(())
}
