// Copyright (C) 2020-2024 Andy Kurnia.

use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Changed {
        active_player_id: String,
        seconds_remaining: u32,
    },
    Ended,
}

// Running while someone is active, Ended once nobody is.
pub struct Turn {
    active_player_id: Option<String>,
    waiting_player_ids: VecDeque<String>,
    skip_counter: u8,
    seconds_remaining: u32,
    turn_seconds: u32,
    num_zeros_to_end: u8,
    started: bool,
}

impl Turn {
    // the first id moves first.
    pub fn new<I: IntoIterator<Item = String>>(
        player_ids: I,
        turn_seconds: u32,
        num_zeros_to_end: u8,
    ) -> Self {
        Self {
            active_player_id: None,
            waiting_player_ids: player_ids.into_iter().collect(),
            skip_counter: 0,
            seconds_remaining: 0,
            turn_seconds,
            num_zeros_to_end,
            started: false,
        }
    }

    pub fn start(&mut self) -> TurnOutcome {
        if self.started {
            return self.current();
        }
        self.started = true;
        match self.waiting_player_ids.pop_front() {
            Some(id) => {
                self.active_player_id = Some(id);
                self.seconds_remaining = self.turn_seconds;
                self.current()
            }
            None => TurnOutcome::Ended,
        }
    }

    fn current(&self) -> TurnOutcome {
        match &self.active_player_id {
            Some(id) => TurnOutcome::Changed {
                active_player_id: id.clone(),
                seconds_remaining: self.seconds_remaining,
            },
            None => TurnOutcome::Ended,
        }
    }

    // once a second. a timeout skips the active player.
    pub fn tick(&mut self) -> Option<TurnOutcome> {
        self.active_player_id.as_ref()?;
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            Some(self.skip())
        } else {
            None
        }
    }

    pub fn end(&mut self, terminal: bool) -> TurnOutcome {
        let Some(previous) = self.active_player_id.take() else {
            return TurnOutcome::Ended;
        };
        self.waiting_player_ids.push_back(previous);
        if terminal {
            self.seconds_remaining = 0;
            return TurnOutcome::Ended;
        }
        self.active_player_id = self.waiting_player_ids.pop_front();
        self.seconds_remaining = self.turn_seconds;
        self.current()
    }

    pub fn skip(&mut self) -> TurnOutcome {
        if self.active_player_id.is_none() {
            return TurnOutcome::Ended;
        }
        self.skip_counter += 1;
        let terminal = self.skip_counter >= self.num_zeros_to_end;
        self.end(terminal)
    }

    pub fn reset_skip_counter(&mut self) {
        self.skip_counter = 0;
    }

    pub fn validate_actor(&self, id: &str) -> bool {
        self.active_player_id.as_deref() == Some(id)
    }

    #[inline(always)]
    pub fn active_player_id(&self) -> Option<&str> {
        self.active_player_id.as_deref()
    }

    #[inline(always)]
    pub fn is_running(&self) -> bool {
        self.active_player_id.is_some()
    }

    #[inline(always)]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    #[inline(always)]
    pub fn seconds_elapsed(&self) -> u32 {
        self.turn_seconds - self.seconds_remaining.min(self.turn_seconds)
    }

    #[inline(always)]
    pub fn skip_counter(&self) -> u8 {
        self.skip_counter
    }

    // abandonment, which ends without the skip threshold.
    pub fn stop(&mut self) {
        if let Some(previous) = self.active_player_id.take() {
            self.waiting_player_ids.push_back(previous);
        }
        self.seconds_remaining = 0;
    }
}
