// Copyright (C) 2020-2024 Andy Kurnia.

use super::{command, game_config, movegen};
use rand::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Place(command::PlaceWordCommand),
    // rack tiles, blank as 0.
    Exchange(Vec<u8>),
    Skip,
}

// what a bot sees when asked to move.
pub struct Situation<'a> {
    // best first, as the move generator leaves them.
    pub plays: &'a [movegen::ValuedMove],
    pub rack: &'a [u8],
    pub bag_len: u16,
    pub opponent_score: i32,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovePicker {
    Greedy,
    Tiered,
    OpponentRelative,
}

fn can_exchange(situation: &Situation, game_config: &game_config::GameConfig) -> bool {
    !situation.rack.is_empty() && situation.bag_len >= game_config.exchange_bag_minimum()
}

fn exchange_all(situation: &Situation, game_config: &game_config::GameConfig) -> Decision {
    if can_exchange(situation, game_config) {
        Decision::Exchange(situation.rack.to_vec())
    } else {
        Decision::Skip
    }
}

// a random nonempty subset of the rack.
fn exchange_some(
    situation: &Situation,
    game_config: &game_config::GameConfig,
    rng: &mut dyn RngCore,
) -> Decision {
    if !can_exchange(situation, game_config) {
        return Decision::Skip;
    }
    let mut tiles = situation.rack.to_vec();
    tiles.shuffle(rng);
    tiles.truncate(rng.random_range(1..=tiles.len()));
    Decision::Exchange(tiles)
}

// idx counts from the lowest score.
#[inline(always)]
fn nth_lowest(plays: &[movegen::ValuedMove], idx: usize) -> Decision {
    Decision::Place(plays[plays.len() - 1 - idx].command.clone())
}

fn pick_tiered(plays: &[movegen::ValuedMove], rng: &mut dyn RngCore) -> Decision {
    let len = plays.len();
    if len == 0 {
        return Decision::Skip;
    }
    let low_end = len * 40 / 100;
    let moderate_end = len * 75 / 100;
    let roll = rng.random_range(0..100u8);
    let (lo, hi) = if roll < 30 {
        (0, low_end)
    } else if roll < 80 {
        (low_end, moderate_end)
    } else {
        (moderate_end, len)
    };
    let idx = if lo < hi {
        rng.random_range(lo..hi)
    } else {
        rng.random_range(0..len)
    };
    nth_lowest(plays, idx)
}

// (place, exchange) probabilities, skip takes the rest.
fn opponent_relative_odds(opponent_score: f64) -> (f64, f64) {
    if opponent_score <= 430.0 {
        (0.34, 0.33)
    } else {
        let place = 1.0 / (1.0 + (-(opponent_score - 500.0) / 100.0).exp());
        (place, 0.5 * (1.0 - place))
    }
}

// the stronger the opponent, the higher up the list.
fn pick_opponent_relative(
    plays: &[movegen::ValuedMove],
    opponent_score: f64,
    rng: &mut dyn RngCore,
) -> Decision {
    let len = plays.len();
    if len == 0 {
        return Decision::Skip;
    }
    let idx = if opponent_score >= 1000.0 {
        len - 1
    } else {
        ((opponent_score / 1000.0 * len as f64) as usize).min(len - 1)
    };
    let jitter = 0.05 * len as f64;
    let jittered = (idx as f64 - jitter + rng.random::<f64>() * 2.0 * jitter).floor();
    let idx = if jittered > 0.0 && jittered < len as f64 {
        jittered as usize
    } else {
        idx
    };
    nth_lowest(plays, idx)
}

impl MovePicker {
    pub fn pick_a_move(
        &self,
        situation: &Situation,
        game_config: &game_config::GameConfig,
        rng: &mut dyn RngCore,
    ) -> Decision {
        match self {
            MovePicker::Greedy => match situation.plays.first() {
                Some(best) => Decision::Place(best.command.clone()),
                None => exchange_all(situation, game_config),
            },
            MovePicker::Tiered => match rng.random_range(1..=10u8) {
                1 => Decision::Skip,
                2 => exchange_some(situation, game_config, rng),
                _ => pick_tiered(situation.plays, rng),
            },
            MovePicker::OpponentRelative => {
                let s = situation.opponent_score.clamp(0, 1000) as f64;
                let (place, exchange) = opponent_relative_odds(s);
                let roll = rng.random::<f64>();
                if roll < place {
                    pick_opponent_relative(situation.plays, s, rng)
                } else if roll < place + exchange {
                    exchange_some(situation, game_config, rng)
                } else {
                    Decision::Skip
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;

    fn plays(n: usize) -> Vec<movegen::ValuedMove> {
        // scores n..1, best first. one square each, so commands are distinct.
        (0..n)
            .map(|i| movegen::ValuedMove {
                command: command::PlaceWordCommand {
                    first_coordinate: board::Coord::new(1 + (i % 15) as i8, 1 + (i / 15) as i8),
                    is_horizontal: Some(true),
                    letters: vec!["a".into(), "t".into()],
                },
                score: (n - i) as i32,
            })
            .collect()
    }

    fn rng(seed: u64) -> rand_chacha::ChaCha20Rng {
        rand_chacha::ChaCha20Rng::seed_from_u64(seed)
    }

    #[test]
    fn greedy_takes_the_best() {
        let game_config = game_config::make_classic_game_config();
        let plays = plays(5);
        let situation = Situation {
            plays: &plays,
            rack: &[1, 20],
            bag_len: 80,
            opponent_score: 0,
        };
        assert_eq!(
            MovePicker::Greedy.pick_a_move(&situation, &game_config, &mut rng(1)),
            Decision::Place(plays[0].command.clone())
        );
    }

    #[test]
    fn greedy_without_plays_exchanges_or_skips() {
        let game_config = game_config::make_classic_game_config();
        let mut situation = Situation {
            plays: &[],
            rack: &[17, 17, 0],
            bag_len: 7,
            opponent_score: 0,
        };
        assert_eq!(
            MovePicker::Greedy.pick_a_move(&situation, &game_config, &mut rng(1)),
            Decision::Exchange(vec![17, 17, 0])
        );
        situation.bag_len = 6;
        assert_eq!(
            MovePicker::Greedy.pick_a_move(&situation, &game_config, &mut rng(1)),
            Decision::Skip
        );
    }

    #[test]
    fn tiered_mixes_all_three() {
        let game_config = game_config::make_classic_game_config();
        let plays = plays(20);
        let rack = [1, 2, 3, 4, 5, 6, 7];
        let situation = Situation {
            plays: &plays,
            rack: &rack,
            bag_len: 50,
            opponent_score: 0,
        };
        let mut rng = rng(42);
        let (mut places, mut exchanges, mut skips) = (0, 0, 0);
        for _ in 0..1000 {
            match MovePicker::Tiered.pick_a_move(&situation, &game_config, &mut rng) {
                Decision::Place(cmd) => {
                    assert!(plays.iter().any(|p| p.command == cmd));
                    places += 1;
                }
                Decision::Exchange(tiles) => {
                    assert!(!tiles.is_empty() && tiles.len() <= rack.len());
                    assert!(crate::bag::rack_contains(&rack, &tiles));
                    exchanges += 1;
                }
                Decision::Skip => skips += 1,
            }
        }
        assert!(places > 700, "{} {} {}", places, exchanges, skips);
        assert!(exchanges > 50);
        assert!(skips > 50);
    }

    #[test]
    fn tiered_favours_moderate_scores() {
        let plays = plays(100);
        let mut rng = rng(9);
        let mut moderate = 0;
        for _ in 0..1000 {
            if let Decision::Place(cmd) = pick_tiered(&plays, &mut rng) {
                let score = plays.iter().find(|p| p.command == cmd).map_or(0, |p| p.score);
                // ascending ranks 40..75 are scores 41..=75.
                if (41..=75).contains(&score) {
                    moderate += 1;
                }
            }
        }
        assert!((400..600).contains(&moderate), "{}", moderate);
    }

    #[test]
    fn odds_follow_opponent_score() {
        assert_eq!(opponent_relative_odds(0.0), (0.34, 0.33));
        assert_eq!(opponent_relative_odds(430.0), (0.34, 0.33));
        let (place, exchange) = opponent_relative_odds(500.0);
        assert!((place - 0.5).abs() < 1e-9);
        assert!((exchange - 0.25).abs() < 1e-9);
        let (place, _) = opponent_relative_odds(1000.0);
        assert!(place > 0.99);
    }

    #[test]
    fn opponent_relative_climbs_with_opponent() {
        let plays = plays(10);
        let mut rng = rng(3);
        for _ in 0..100 {
            let top = pick_opponent_relative(&plays, 1000.0, &mut rng);
            assert!(top == nth_lowest(&plays, 9) || top == nth_lowest(&plays, 8));
            assert_eq!(pick_opponent_relative(&plays, 0.0, &mut rng), nth_lowest(&plays, 0));
        }
        assert_eq!(pick_opponent_relative(&[], 500.0, &mut rng), Decision::Skip);
    }

    #[test]
    fn opponent_relative_places_when_behind_a_strong_opponent() {
        let game_config = game_config::make_classic_game_config();
        let plays = plays(10);
        let situation = Situation {
            plays: &plays,
            rack: &[1, 20],
            bag_len: 50,
            opponent_score: 2000,
        };
        let mut rng = rng(5);
        let places = (0..200)
            .filter(|_| {
                matches!(
                    MovePicker::OpponentRelative.pick_a_move(&situation, &game_config, &mut rng),
                    Decision::Place(_)
                )
            })
            .count();
        assert!(places > 190);
    }
}
