// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, error, move_picker};

pub struct Bot {
    pub move_picker: move_picker::MovePicker,
    has_acted: bool,
}

impl Bot {
    pub fn new(move_picker: move_picker::MovePicker) -> Self {
        Self {
            move_picker,
            has_acted: false,
        }
    }

    // true the first time only, until the next turn begins.
    #[inline(always)]
    pub fn claim_action(&mut self) -> bool {
        !std::mem::replace(&mut self.has_acted, true)
    }

    #[inline(always)]
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }
}

pub enum PlayerKind {
    Human,
    Bot(Bot),
}

pub struct GamePlayer {
    pub id: String,
    pub rack: Vec<u8>,
    pub score: i32,
    pub kind: PlayerKind,
}

// remove the tiles one at a time, duplicates included.
pub fn use_tiles<II: IntoIterator<Item = u8>>(
    rack: &mut Vec<u8>,
    tiles_iter: II,
) -> error::Returns<()> {
    for tile in tiles_iter {
        let pos = rack.iter().rposition(|&t| t == tile).ok_or("bad tile")?;
        rack.swap_remove(pos);
    }
    Ok(())
}

impl GamePlayer {
    pub fn new(id: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id: id.into(),
            rack: Vec::new(),
            score: 0,
            kind,
        }
    }

    pub fn human(id: impl Into<String>) -> Self {
        Self::new(id, PlayerKind::Human)
    }

    pub fn bot(id: impl Into<String>, move_picker: move_picker::MovePicker) -> Self {
        Self::new(id, PlayerKind::Bot(Bot::new(move_picker)))
    }

    #[inline(always)]
    pub fn is_bot(&self) -> bool {
        matches!(self.kind, PlayerKind::Bot(_))
    }

    pub fn bot_mut(&mut self) -> Option<&mut Bot> {
        match &mut self.kind {
            PlayerKind::Bot(bot) => Some(bot),
            PlayerKind::Human => None,
        }
    }

    // called whenever this player's turn starts.
    pub fn begin_turn(&mut self) {
        if let PlayerKind::Bot(bot) = &mut self.kind {
            bot.has_acted = false;
        }
    }

    pub fn rack_points(&self, alphabet: &alphabet::Alphabet) -> i32 {
        self.rack.iter().map(|&t| alphabet.score(t) as i32).sum()
    }

    // never below zero.
    pub fn deduct(&mut self, points: i32) {
        self.score = (self.score - points).max(0);
    }
}
