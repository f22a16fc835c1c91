// Copyright (C) 2020-2024 Andy Kurnia.

use super::{command, error, game_event, game_state};
use game_event::GameEvent;
use tokio::sync::mpsc;
use tokio::time::{Duration, MissedTickBehavior};

#[derive(Clone, Debug)]
pub enum MatchCommand {
    Place {
        player_id: String,
        place: command::PlaceWordCommand,
    },
    Exchange {
        player_id: String,
        exchange: command::ExchangeCommand,
    },
    Skip {
        player_id: String,
    },
    Abandon {
        player_id: String,
    },
    Hint {
        player_id: String,
    },
    Reserve {
        player_id: String,
    },
    BotAct {
        player_id: String,
    },
}

impl MatchCommand {
    pub fn from_player_command(player_id: &str, player_command: command::PlayerCommand) -> Self {
        let player_id = player_id.to_string();
        match player_command {
            command::PlayerCommand::Place(place) => MatchCommand::Place { player_id, place },
            command::PlayerCommand::Exchange(exchange) => {
                MatchCommand::Exchange { player_id, exchange }
            }
            command::PlayerCommand::Skip(_) => MatchCommand::Skip { player_id },
            command::PlayerCommand::Reserve => MatchCommand::Reserve { player_id },
            command::PlayerCommand::Hint => MatchCommand::Hint { player_id },
        }
    }
}

pub struct MatchHandle {
    commands: mpsc::UnboundedSender<MatchCommand>,
    events: mpsc::UnboundedReceiver<GameEvent>,
    task: tokio::task::JoinHandle<game_state::Game>,
}

impl MatchHandle {
    pub fn send(&self, match_command: MatchCommand) -> error::Returns<()> {
        self.commands.send(match_command)?;
        Ok(())
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<MatchCommand> {
        self.commands.clone()
    }

    // None once the match task is gone and everything was read.
    pub async fn next_event(&mut self) -> Option<GameEvent> {
        self.events.recv().await
    }

    // for callers that read events on one task and send commands from another.
    pub fn into_parts(
        self,
    ) -> (
        mpsc::UnboundedSender<MatchCommand>,
        mpsc::UnboundedReceiver<GameEvent>,
        tokio::task::JoinHandle<game_state::Game>,
    ) {
        (self.commands, self.events, self.task)
    }

    // drops the command side, which abandons a match still in progress.
    pub async fn finish(self) -> error::Returns<game_state::Game> {
        let MatchHandle { commands, task, .. } = self;
        drop(commands);
        Ok(task.await?)
    }
}

fn apply(game: &mut game_state::Game, match_command: MatchCommand) -> Vec<GameEvent> {
    match match_command {
        MatchCommand::Place { player_id, place } => game.submit_placement(&player_id, &place),
        MatchCommand::Exchange {
            player_id,
            exchange,
        } => game.submit_exchange_command(&player_id, &exchange),
        MatchCommand::Skip { player_id } => game.submit_skip(&player_id),
        MatchCommand::Abandon { player_id } => game.abandon(&player_id),
        MatchCommand::Hint { player_id } => game.clue(&player_id),
        MatchCommand::Reserve { player_id } => game.reserve(&player_id),
        MatchCommand::BotAct { player_id } => game.bot_act(&player_id),
    }
}

// a bot whose turn just began gets poked after the think delay.
fn schedule_bot(game: &game_state::Game, bot_tx: &mpsc::UnboundedSender<String>, think: Duration) {
    if let Some(player_id) = game.bot_to_move() {
        let player_id = player_id.to_string();
        let bot_tx = bot_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(think).await;
            // the match may be gone by now.
            let _ = bot_tx.send(player_id);
        });
    }
}

// runs the match on its own task. commands are handled one at a time, in order.
pub fn spawn_match(mut game: game_state::Game) -> MatchHandle {
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move {
        let (bot_tx, mut bot_rx) = mpsc::unbounded_channel::<String>();
        let think = Duration::from_secs(game.game_config.bot_think_seconds() as u64);
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes at once.
        interval.tick().await;

        let mut events = game.start();
        loop {
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::TurnChanged { .. }))
            {
                interval.reset();
                schedule_bot(&game, &bot_tx, think);
            }
            for event in events.drain(..) {
                let _ = event_tx.send(event);
            }
            if game.is_over() {
                break;
            }
            events = tokio::select! {
                _ = interval.tick() => game.tick(),
                Some(player_id) = bot_rx.recv() => game.bot_act(&player_id),
                match_command = command_rx.recv() => match match_command {
                    Some(match_command) => apply(&mut game, match_command),
                    None => game.shut_down(),
                },
            };
        }
        game
    });
    MatchHandle {
        commands: command_tx,
        events: event_rx,
        task,
    }
}
