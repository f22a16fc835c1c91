// Copyright (C) 2020-2024 Andy Kurnia.

use super::{
    bag, board, command, dictionary, error, game_config, game_event, move_picker, movegen,
    play_scorer, player, turn, validator,
};
use game_event::GameEvent;
use rand::prelude::*;
use std::sync::Arc;

// one match. every operation runs to completion and reports what happened.
pub struct Game {
    pub game_config: Arc<game_config::GameConfig>,
    pub dictionary: Arc<dictionary::Dictionary>,
    pub board: board::Board,
    pub bag: bag::Bag,
    pub turn: turn::Turn,
    pub players: Vec<player::GamePlayer>,
    pub rng: rand_chacha::ChaCha20Rng,
    move_generator: movegen::MoveGenerator,
    end_reason: Option<game_event::EndReason>,
}

impl Game {
    // deals every rack and picks who starts. call start() to begin the clock.
    pub fn new(
        game_config: Arc<game_config::GameConfig>,
        dictionary: Arc<dictionary::Dictionary>,
        mut players: Vec<player::GamePlayer>,
        mut rng: rand_chacha::ChaCha20Rng,
    ) -> Self {
        let mut bag = bag::Bag::new(game_config.alphabet());
        let rack_size = game_config.rack_size() as usize;
        for player in players.iter_mut() {
            player.rack.clear();
            bag.replenish(&mut rng, &mut player.rack, rack_size);
        }
        let first = if players.is_empty() {
            0
        } else {
            rng.random_range(0..players.len())
        };
        let turn = turn::Turn::new(
            players[first..]
                .iter()
                .chain(players[..first].iter())
                .map(|p| p.id.clone()),
            game_config.turn_seconds(),
            game_config.num_zeros_to_end(),
        );
        Self {
            board: board::Board::new(&game_config),
            game_config,
            dictionary,
            bag,
            turn,
            players,
            rng,
            move_generator: movegen::MoveGenerator::new(),
            end_reason: None,
        }
    }

    pub fn start(&mut self) -> Vec<GameEvent> {
        let mut events = (0..self.players.len())
            .map(|idx| self.rack_changed(idx))
            .collect::<Vec<_>>();
        let outcome = self.turn.start();
        self.after_turn(outcome, &mut events);
        events
    }

    fn rack_changed(&self, idx: usize) -> GameEvent {
        let player = &self.players[idx];
        GameEvent::RackChanged {
            player_id: player.id.clone(),
            rack: self.game_config.alphabet().fmt_rack(&player.rack),
        }
    }

    #[inline(always)]
    pub fn is_over(&self) -> bool {
        self.end_reason.is_some()
    }

    #[inline(always)]
    pub fn end_reason(&self) -> Option<game_event::EndReason> {
        self.end_reason
    }

    pub fn player_index(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn player(&self, id: &str) -> Option<&player::GamePlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    // bag, racks and board together. constant for the whole match.
    pub fn num_tiles_in_play(&self) -> usize {
        self.bag.len() as usize
            + self.players.iter().map(|p| p.rack.len()).sum::<usize>()
            + self.board.num_occupied()
    }

    // the active player, if it is a bot that still owes a move this turn.
    pub fn bot_to_move(&self) -> Option<&str> {
        let id = self.turn.active_player_id()?;
        match &self.player(id)?.kind {
            player::PlayerKind::Bot(bot) if !bot.has_acted() => Some(id),
            _ => None,
        }
    }

    fn final_scores(&self) -> Vec<game_event::FinalScore> {
        self.players
            .iter()
            .map(|p| game_event::FinalScore {
                player_id: p.id.clone(),
                score: p.score,
            })
            .collect()
    }

    fn finish(&mut self, reason: game_event::EndReason, events: &mut Vec<GameEvent>) {
        self.end_reason = Some(reason);
        events.push(GameEvent::MatchEnded {
            final_scores: self.final_scores(),
            reason,
        });
    }

    // Ended here can only come from the skip threshold.
    fn after_turn(&mut self, outcome: turn::TurnOutcome, events: &mut Vec<GameEvent>) {
        match outcome {
            turn::TurnOutcome::Changed {
                active_player_id,
                seconds_remaining,
            } => {
                if let Some(idx) = self.player_index(&active_player_id) {
                    self.players[idx].begin_turn();
                }
                events.push(GameEvent::TurnChanged {
                    active_player_id,
                    seconds_remaining,
                });
            }
            turn::TurnOutcome::Ended => {
                if !self.is_over() {
                    self.finish(game_event::EndReason::Stalemate, events);
                }
            }
        }
    }

    fn skip_turn(&mut self, player_id: &str, forced: bool, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::TurnSkipped {
            player_id: player_id.to_string(),
            forced,
        });
        let outcome = self.turn.skip();
        self.after_turn(outcome, events);
    }

    // the finisher takes what the others still hold. nobody drops below zero.
    fn settle_racks(&mut self, finisher: usize) {
        let alphabet = self.game_config.alphabet();
        let mut gained = 0;
        for (i, player) in self.players.iter_mut().enumerate() {
            if i != finisher {
                let points = player.rack_points(alphabet);
                player.deduct(points);
                gained += points;
            }
        }
        self.players[finisher].score += gained;
    }

    fn wrong_turn(player_id: &str) -> Vec<GameEvent> {
        vec![GameEvent::WrongTurn {
            player_id: player_id.to_string(),
        }]
    }

    fn reject_placement(
        player_id: &str,
        reason: validator::PlacementError,
        invalid_words: Vec<String>,
    ) -> Vec<GameEvent> {
        vec![GameEvent::PlacementRejected {
            player_id: player_id.to_string(),
            reason,
            invalid_words,
        }]
    }

    pub fn submit_placement(
        &mut self,
        player_id: &str,
        place: &command::PlaceWordCommand,
    ) -> Vec<GameEvent> {
        if !self.turn.validate_actor(player_id) {
            return Self::wrong_turn(player_id);
        }
        let Some(idx) = self.player_index(player_id) else {
            return Self::wrong_turn(player_id);
        };
        let mut word = match validator::validate(place, &self.board) {
            Ok(word) => word,
            Err(reason) => return Self::reject_placement(player_id, reason, Vec::new()),
        };
        let mut rack = self.players[idx].rack.clone();
        if player::use_tiles(&mut rack, word.rack_tiles()).is_err() {
            return Self::reject_placement(
                player_id,
                validator::PlacementError::InvalidWordBuild,
                Vec::new(),
            );
        }
        let outcome = play_scorer::PlayScorer {
            game_config: &self.game_config,
            dictionary: &self.dictionary,
        }
        .place_and_score(&mut word, &mut self.board);
        if !outcome.accepted {
            return Self::reject_placement(
                player_id,
                validator::PlacementError::InvalidWords,
                outcome.invalid_words,
            );
        }

        let alphabet = self.game_config.alphabet();
        let rack_size = self.game_config.rack_size() as usize;
        self.bag.replenish(&mut self.rng, &mut rack, rack_size);
        let player = &mut self.players[idx];
        player.rack = rack;
        player.score += outcome.points;
        let went_out = player.rack.is_empty() && self.bag.is_empty();
        self.turn.reset_skip_counter();

        let mut events = vec![GameEvent::PlacementAccepted {
            player_id: player_id.to_string(),
            points: outcome.points,
            board_delta: word
                .placements
                .iter()
                .map(|&(coordinate, tile)| game_event::TileDelta {
                    coordinate,
                    letter: alphabet.from_board(tile).unwrap_or("?").to_string(),
                })
                .collect(),
        }];
        events.push(self.rack_changed(idx));
        if went_out {
            self.turn.end(true);
            self.settle_racks(idx);
            self.finish(game_event::EndReason::RackEmptied, &mut events);
        } else {
            let outcome = self.turn.end(false);
            self.after_turn(outcome, &mut events);
        }
        events
    }

    // tiles in rack form, blank as 0.
    pub fn submit_exchange(&mut self, player_id: &str, tiles: &[u8]) -> Vec<GameEvent> {
        if !self.turn.validate_actor(player_id) {
            return Self::wrong_turn(player_id);
        }
        let Some(idx) = self.player_index(player_id) else {
            return Self::wrong_turn(player_id);
        };
        if tiles.is_empty() || !bag::rack_contains(&self.players[idx].rack, tiles) {
            return vec![GameEvent::ExchangeRejected {
                player_id: player_id.to_string(),
                reason: game_event::ExchangeError::LettersNotInRack,
            }];
        }
        let mut events = Vec::new();
        if !self.bag.exchange(
            &mut self.rng,
            &mut self.players[idx].rack,
            tiles,
            self.game_config.exchange_bag_minimum(),
        ) {
            events.push(GameEvent::ExchangeRejected {
                player_id: player_id.to_string(),
                reason: game_event::ExchangeError::BagTooSmall,
            });
            self.skip_turn(player_id, false, &mut events);
            return events;
        }
        self.turn.reset_skip_counter();
        events.push(GameEvent::ExchangeAccepted {
            player_id: player_id.to_string(),
            new_rack: self
                .game_config
                .alphabet()
                .fmt_rack(&self.players[idx].rack),
        });
        let outcome = self.turn.end(false);
        self.after_turn(outcome, &mut events);
        events
    }

    pub fn submit_exchange_command(
        &mut self,
        player_id: &str,
        exchange: &command::ExchangeCommand,
    ) -> Vec<GameEvent> {
        match exchange.tiles(self.game_config.alphabet()) {
            Some(tiles) => self.submit_exchange(player_id, &tiles),
            None if !self.turn.validate_actor(player_id) => Self::wrong_turn(player_id),
            None => vec![GameEvent::ExchangeRejected {
                player_id: player_id.to_string(),
                reason: game_event::ExchangeError::LettersNotInRack,
            }],
        }
    }

    pub fn submit_skip(&mut self, player_id: &str) -> Vec<GameEvent> {
        if !self.turn.validate_actor(player_id) {
            return Self::wrong_turn(player_id);
        }
        let mut events = Vec::new();
        self.skip_turn(player_id, false, &mut events);
        events
    }

    pub fn abandon(&mut self, player_id: &str) -> Vec<GameEvent> {
        if !self.turn.validate_actor(player_id) {
            return Self::wrong_turn(player_id);
        }
        self.turn.stop();
        let mut events = Vec::new();
        self.finish(game_event::EndReason::Abandoned, &mut events);
        events
    }

    // nobody is left to play. ends the match without an actor.
    pub fn shut_down(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.is_over() {
            self.turn.stop();
            self.finish(game_event::EndReason::Abandoned, &mut events);
        }
        events
    }

    // once a second while the match runs.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let Some(active) = self.turn.active_player_id().map(String::from) else {
            return Vec::new();
        };
        let mut events = Vec::new();
        match self.turn.tick() {
            Some(outcome) => {
                events.push(GameEvent::Countdown {
                    seconds_remaining: 0,
                });
                events.push(GameEvent::TurnSkipped {
                    player_id: active,
                    forced: true,
                });
                self.after_turn(outcome, &mut events);
            }
            None => {
                events.push(GameEvent::Countdown {
                    seconds_remaining: self.turn.seconds_remaining(),
                });
                // a bot that has not moved by now gives up its turn.
                if self.turn.seconds_elapsed() >= self.game_config.bot_give_up_seconds() {
                    let gave_up = self
                        .player_index(&active)
                        .and_then(|idx| self.players[idx].bot_mut())
                        .is_some_and(|bot| bot.claim_action());
                    if gave_up {
                        self.skip_turn(&active, true, &mut events);
                    }
                }
            }
        }
        events
    }

    // a stale call, after the turn moved on or the bot already acted, does nothing.
    pub fn bot_act(&mut self, player_id: &str) -> Vec<GameEvent> {
        if !self.turn.validate_actor(player_id) {
            return Vec::new();
        }
        let Some(idx) = self.player_index(player_id) else {
            return Vec::new();
        };
        let move_picker = match self.players[idx].bot_mut() {
            Some(bot) => {
                if !bot.claim_action() {
                    return Vec::new();
                }
                bot.move_picker
            }
            None => return Vec::new(),
        };
        self.move_generator.gen_moves(
            &movegen::BoardSnapshot {
                board: &self.board,
                game_config: &self.game_config,
                dictionary: &self.dictionary,
            },
            &self.players[idx].rack,
        );
        let opponent_score = self
            .players
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != idx)
            .map(|(_, p)| p.score)
            .max()
            .unwrap_or(0);
        let decision = move_picker.pick_a_move(
            &move_picker::Situation {
                plays: &self.move_generator.plays,
                rack: &self.players[idx].rack,
                bag_len: self.bag.len(),
                opponent_score,
            },
            &self.game_config,
            &mut self.rng,
        );
        let mut events = match decision {
            move_picker::Decision::Place(place) => self.submit_placement(player_id, &place),
            move_picker::Decision::Exchange(tiles) => self.submit_exchange(player_id, &tiles),
            move_picker::Decision::Skip => self.submit_skip(player_id),
        };
        if matches!(
            events.first(),
            Some(GameEvent::PlacementRejected { .. } | GameEvent::ExchangeRejected { .. })
        ) && self.turn.validate_actor(player_id)
        {
            self.skip_turn(player_id, false, &mut events);
        }
        events
    }

    // starts an all-bot match and plays it without a clock. bots that only
    // exchange can keep a match alive forever, so after max_moves the match
    // is shut down. every batch of events goes to on_events, the first being
    // the deal. returns the number of moves made.
    pub fn play_bots(
        &mut self,
        max_moves: usize,
        mut on_events: impl FnMut(&Self, &[GameEvent]) -> error::Returns<()>,
    ) -> error::Returns<usize> {
        let mut num_moves = 0;
        let mut events = self.start();
        loop {
            on_events(self, &events)?;
            if self.is_over() {
                return Ok(num_moves);
            }
            if num_moves >= max_moves {
                events = self.shut_down();
                continue;
            }
            let Some(player_id) = self.bot_to_move().map(str::to_string) else {
                return_error!("nobody to move".to_string());
            };
            events = self.bot_act(&player_id);
            num_moves += 1;
        }
    }

    // a few random legal moves for the active player. changes nothing else.
    pub fn clue(&mut self, player_id: &str) -> Vec<GameEvent> {
        if !self.turn.validate_actor(player_id) {
            return Self::wrong_turn(player_id);
        }
        let Some(idx) = self.player_index(player_id) else {
            return Self::wrong_turn(player_id);
        };
        self.move_generator.gen_moves(
            &movegen::BoardSnapshot {
                board: &self.board,
                game_config: &self.game_config,
                dictionary: &self.dictionary,
            },
            &self.players[idx].rack,
        );
        let moves = self
            .move_generator
            .plays
            .choose_multiple(&mut self.rng, self.game_config.num_hints())
            .map(|m| format!("{} ({})", m.command.fmt(), m.score))
            .collect();
        vec![GameEvent::Hint {
            player_id: player_id.to_string(),
            moves,
        }]
    }

    pub fn reserve(&self, player_id: &str) -> Vec<GameEvent> {
        let alphabet = self.game_config.alphabet();
        vec![GameEvent::Reserve {
            player_id: player_id.to_string(),
            letters: (0..alphabet.len())
                .filter(|&tile| self.bag.tally()[tile as usize] > 0)
                .filter_map(|tile| {
                    alphabet
                        .from_rack(tile)
                        .map(|label| (label.to_string(), self.bag.tally()[tile as usize]))
                })
                .collect(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;

    fn fixture(words: &[&str], players: Vec<player::GamePlayer>, seed: u64) -> Game {
        Game::new(
            Arc::new(game_config::make_classic_game_config()),
            Arc::new(dictionary::Dictionary::from_words(&alphabet::CLASSIC_ALPHABET, words).unwrap()),
            players,
            rand_chacha::ChaCha20Rng::seed_from_u64(seed),
        )
    }

    fn two_humans(words: &[&str]) -> Game {
        let mut game = fixture(
            words,
            vec![player::GamePlayer::human("ann"), player::GamePlayer::human("bob")],
            1,
        );
        game.start();
        game
    }

    fn active(game: &Game) -> String {
        game.turn.active_player_id().unwrap().to_string()
    }

    fn other(game: &Game) -> String {
        game.players
            .iter()
            .find(|p| Some(p.id.as_str()) != game.turn.active_player_id())
            .unwrap()
            .id
            .clone()
    }

    fn place(x: i8, y: i8, is_horizontal: Option<bool>, letters: &str) -> command::PlaceWordCommand {
        command::PlaceWordCommand {
            first_coordinate: board::Coord::new(x, y),
            is_horizontal,
            letters: letters.chars().map(String::from).collect(),
        }
    }

    // give the player exactly this rack. tiles stay conserved.
    fn set_rack(game: &mut Game, id: &str, rack: &str) {
        let idx = game.player_index(id).unwrap();
        let old = std::mem::take(&mut game.players[idx].rack);
        game.bag.put_back(&old);
        for t in alphabet::CLASSIC_ALPHABET.parse_rack(rack).unwrap() {
            if game.bag.tally()[t as usize] == 0 {
                let holder = game.players.iter().position(|p| p.rack.contains(&t)).unwrap();
                player::use_tiles(&mut game.players[holder].rack, [t]).unwrap();
                game.bag.put_back(&[t]);
            }
            let mut rest = game.bag.draw_many(&mut game.rng, game.bag.len() as usize);
            rest.swap_remove(rest.iter().position(|&x| x == t).unwrap());
            game.bag.put_back(&rest);
            game.players[idx].rack.push(t);
        }
    }

    #[test]
    fn deals_racks_and_starts_someone() {
        let mut game = fixture(
            &["cat"],
            vec![player::GamePlayer::human("ann"), player::GamePlayer::human("bob")],
            3,
        );
        assert!(game.players.iter().all(|p| p.rack.len() == 7));
        assert_eq!(game.bag.len(), 102 - 14);
        let events = game.start();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], GameEvent::RackChanged { rack, .. } if rack.len() == 7));
        assert!(matches!(&events[2], GameEvent::TurnChanged { seconds_remaining: 60, .. }));
        assert_eq!(game.num_tiles_in_play(), 102);
    }

    #[test]
    fn accepted_placement_refills_and_rotates() {
        let mut game = two_humans(&["cat", "at"]);
        let me = active(&game);
        set_rack(&mut game, &me, "cateeio");
        let events = game.submit_placement(&me, &place(8, 8, Some(true), "cat"));
        assert_eq!(
            events[0],
            GameEvent::PlacementAccepted {
                player_id: me.clone(),
                points: 10,
                board_delta: vec![
                    game_event::TileDelta {
                        coordinate: board::Coord::new(8, 8),
                        letter: "c".into()
                    },
                    game_event::TileDelta {
                        coordinate: board::Coord::new(9, 8),
                        letter: "a".into()
                    },
                    game_event::TileDelta {
                        coordinate: board::Coord::new(10, 8),
                        letter: "t".into()
                    },
                ],
            }
        );
        assert!(matches!(&events[1], GameEvent::RackChanged { player_id, rack } if *player_id == me && rack.len() == 7));
        assert!(matches!(&events[2], GameEvent::TurnChanged { active_player_id, .. } if *active_player_id != me));
        let player = game.player(&me).unwrap();
        assert_eq!(player.score, 10);
        assert_eq!(player.rack.len(), 7);
        assert_eq!(game.num_tiles_in_play(), 102);
    }

    #[test]
    fn wrong_turn_changes_nothing() {
        let mut game = two_humans(&["cat"]);
        let them = other(&game);
        let before = game.board.clone();
        let events = game.submit_placement(&them, &place(8, 8, Some(true), "cat"));
        assert_eq!(events, vec![GameEvent::WrongTurn { player_id: them.clone() }]);
        assert_eq!(game.submit_skip(&them), vec![GameEvent::WrongTurn { player_id: them.clone() }]);
        assert_eq!(game.submit_skip("nobody"), vec![GameEvent::WrongTurn { player_id: "nobody".into() }]);
        assert_eq!(game.board, before);
        assert_eq!(game.turn.skip_counter(), 0);
        assert_eq!(game.turn.seconds_remaining(), 60);
    }

    #[test]
    fn rejected_placement_keeps_the_turn() {
        let mut game = two_humans(&["cat"]);
        let me = active(&game);
        set_rack(&mut game, &me, "eeeaaii");
        let events = game.submit_placement(&me, &place(8, 8, Some(true), "eee"));
        assert_eq!(
            events,
            vec![GameEvent::PlacementRejected {
                player_id: me.clone(),
                reason: validator::PlacementError::InvalidWords,
                invalid_words: vec!["eee".into()],
            }]
        );
        assert!(game.board.is_empty());
        assert!(game.turn.validate_actor(&me));
        // not in the rack.
        let events = game.submit_placement(&me, &place(8, 8, Some(true), "cat"));
        assert!(matches!(
            &events[..],
            [GameEvent::PlacementRejected {
                reason: validator::PlacementError::InvalidWordBuild,
                ..
            }]
        ));
        assert_eq!(game.player(&me).unwrap().rack.len(), 7);
    }

    #[test]
    fn exchange_needs_seven_in_the_bag() {
        let mut game = two_humans(&["cat"]);
        let me = active(&game);
        let keep = game.bag.draw_many(&mut game.rng, game.bag.len() as usize - 6);
        let rack = game.player(&me).unwrap().rack.clone();
        let events = game.submit_exchange(&me, &rack[..2]);
        assert_eq!(
            events[..2],
            [
                GameEvent::ExchangeRejected {
                    player_id: me.clone(),
                    reason: game_event::ExchangeError::BagTooSmall,
                },
                GameEvent::TurnSkipped {
                    player_id: me.clone(),
                    forced: false,
                },
            ]
        );
        assert_eq!(game.player(&me).unwrap().rack, rack);
        assert_eq!(game.bag.len(), 6);
        assert_eq!(game.turn.skip_counter(), 1);
        assert!(!game.turn.validate_actor(&me));
        game.bag.put_back(&keep);
    }

    #[test]
    fn exchange_swaps_and_resets_skips() {
        let mut game = two_humans(&["cat"]);
        let me = active(&game);
        game.submit_skip(&me);
        let me = active(&game);
        let rack = game.player(&me).unwrap().rack.clone();
        let events = game.submit_exchange(&me, &rack[..3]);
        assert!(matches!(&events[0], GameEvent::ExchangeAccepted { new_rack, .. } if new_rack.len() == 7));
        assert_eq!(game.turn.skip_counter(), 0);
        assert_eq!(game.num_tiles_in_play(), 102);
        let them = active(&game);
        let events = game.submit_exchange(&them, &[]);
        assert!(matches!(
            &events[..],
            [GameEvent::ExchangeRejected {
                reason: game_event::ExchangeError::LettersNotInRack,
                ..
            }]
        ));
        assert!(game.turn.validate_actor(&them));
    }

    #[test]
    fn six_skips_are_a_stalemate() {
        let mut game = two_humans(&["cat"]);
        let mut last = Vec::new();
        for _ in 0..6 {
            let me = active(&game);
            last = game.submit_skip(&me);
        }
        assert!(matches!(
            last.last(),
            Some(GameEvent::MatchEnded {
                reason: game_event::EndReason::Stalemate,
                ..
            })
        ));
        assert!(game.is_over());
        assert!(game.turn.active_player_id().is_none());
        assert!(matches!(&game.submit_skip("ann")[..], [GameEvent::WrongTurn { .. }]));
    }

    #[test]
    fn going_out_settles_racks() {
        let mut game = two_humans(&["cat"]);
        let me = active(&game);
        let them = other(&game);
        set_rack(&mut game, &me, "cat");
        set_rack(&mut game, &them, "qz");
        game.bag.draw_many(&mut game.rng, game.bag.len() as usize);
        let idx = game.player_index(&them).unwrap();
        game.players[idx].score = 5;
        let events = game.submit_placement(&me, &place(8, 8, Some(true), "cat"));
        assert_eq!(
            events.last(),
            Some(&GameEvent::MatchEnded {
                final_scores: game
                    .players
                    .iter()
                    .map(|p| game_event::FinalScore {
                        player_id: p.id.clone(),
                        score: if p.id == me { 10 + 18 } else { 0 },
                    })
                    .collect(),
                reason: game_event::EndReason::RackEmptied,
            })
        );
        assert!(game.turn.active_player_id().is_none());
    }

    #[test]
    fn abandon_is_terminal() {
        let mut game = two_humans(&["cat"]);
        let them = other(&game);
        assert!(matches!(&game.abandon(&them)[..], [GameEvent::WrongTurn { .. }]));
        let me = active(&game);
        let events = game.abandon(&me);
        assert!(matches!(
            &events[..],
            [GameEvent::MatchEnded {
                reason: game_event::EndReason::Abandoned,
                ..
            }]
        ));
        assert!(game.tick().is_empty());
        assert_eq!(game.end_reason(), Some(game_event::EndReason::Abandoned));
    }

    #[test]
    fn countdown_forces_a_skip() {
        let mut game = two_humans(&["cat"]);
        let me = active(&game);
        for _ in 0..59 {
            assert!(matches!(&game.tick()[..], [GameEvent::Countdown { .. }]));
        }
        let events = game.tick();
        assert_eq!(
            events[1],
            GameEvent::TurnSkipped {
                player_id: me.clone(),
                forced: true
            }
        );
        assert!(matches!(&events[2], GameEvent::TurnChanged { active_player_id, .. } if *active_player_id != me));
    }

    #[test]
    fn bots_act_once_and_give_up_late() {
        let mut game = fixture(
            &["cat"],
            vec![
                player::GamePlayer::bot("b1", move_picker::MovePicker::Greedy),
                player::GamePlayer::bot("b2", move_picker::MovePicker::Greedy),
            ],
            11,
        );
        game.start();
        let me = active(&game);
        assert_eq!(game.bot_to_move(), Some(me.as_str()));
        let them = other(&game);
        assert!(game.bot_act(&them).is_empty());
        let events = game.bot_act(&me);
        assert!(!events.is_empty());
        assert!(!game.turn.validate_actor(&me));
        assert!(game.bot_act(&me).is_empty());

        // the next bot never gets to move and gives up at the deadline.
        let me = active(&game);
        let mut skipped_at = None;
        for second in 1..=60 {
            if game
                .tick()
                .iter()
                .any(|e| matches!(e, GameEvent::TurnSkipped { player_id, .. } if *player_id == me))
            {
                skipped_at = Some(second);
                break;
            }
        }
        assert_eq!(skipped_at, Some(20));
    }

    #[test]
    fn bots_that_only_exchange_are_cut_off() {
        let mut game = fixture(
            &["cat"],
            vec![
                player::GamePlayer::bot("b1", move_picker::MovePicker::Greedy),
                player::GamePlayer::bot("b2", move_picker::MovePicker::Greedy),
            ],
            0,
        );
        let mut batches = Vec::new();
        let num_moves = game
            .play_bots(50, |game, events| {
                assert_eq!(game.num_tiles_in_play(), 102);
                batches.push(events.to_vec());
                Ok(())
            })
            .unwrap();
        // nobody can go out and every exchange clears the skip count.
        assert_eq!(num_moves, 50);
        assert_eq!(batches.len(), 52);
        assert!(matches!(batches[0].first(), Some(GameEvent::RackChanged { .. })));
        assert!(matches!(
            &batches[51][..],
            [GameEvent::MatchEnded {
                reason: game_event::EndReason::Abandoned,
                ..
            }]
        ));
        assert_eq!(game.end_reason(), Some(game_event::EndReason::Abandoned));
        assert!(game.turn.active_player_id().is_none());
    }

    #[test]
    fn play_bots_stops_on_a_failing_callback() {
        let mut game = fixture(
            &["cat"],
            vec![
                player::GamePlayer::bot("b1", move_picker::MovePicker::Greedy),
                player::GamePlayer::bot("b2", move_picker::MovePicker::Tiered),
            ],
            3,
        );
        let mut num_calls = 0;
        let result = game.play_bots(50, |_, _| {
            num_calls += 1;
            if num_calls == 3 {
                return_error!("log full".to_string());
            }
            Ok(())
        });
        assert_eq!(result.unwrap_err().to_string(), "log full");
        assert_eq!(num_calls, 3);
        assert!(!game.is_over());
    }

    #[test]
    fn clue_and_reserve_are_read_only() {
        let mut game = two_humans(&["cat", "at", "ta"]);
        let me = active(&game);
        set_rack(&mut game, &me, "cat");
        let events = game.clue(&me);
        match &events[..] {
            [GameEvent::Hint { moves, .. }] => assert_eq!(moves.len(), 3),
            other => panic!("{:?}", other),
        }
        assert!(game.board.is_empty());
        assert!(game.turn.validate_actor(&me));
        let them = other(&game);
        assert!(matches!(&game.clue(&them)[..], [GameEvent::WrongTurn { .. }]));
        match &game.reserve(&them)[..] {
            [GameEvent::Reserve { letters, .. }] => {
                let total = letters.iter().map(|(_, n)| *n as usize).sum::<usize>();
                assert_eq!(total, game.bag.len() as usize);
            }
            other => panic!("{:?}", other),
        }
    }
}
