// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, validator};

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExchangeError {
    // counts as a skip.
    BagTooSmall,
    // the same player is asked again.
    LettersNotInRack,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    RackEmptied,
    Stalemate,
    Abandoned,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TileDelta {
    pub coordinate: board::Coord,
    pub letter: String,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FinalScore {
    pub player_id: String,
    pub score: i32,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "event", rename_all_fields = "camelCase")]
pub enum GameEvent {
    PlacementAccepted {
        player_id: String,
        points: i32,
        board_delta: Vec<TileDelta>,
    },
    PlacementRejected {
        player_id: String,
        reason: validator::PlacementError,
        invalid_words: Vec<String>,
    },
    // only meant for the owner's eyes.
    RackChanged {
        player_id: String,
        rack: String,
    },
    ExchangeAccepted {
        player_id: String,
        new_rack: String,
    },
    ExchangeRejected {
        player_id: String,
        reason: ExchangeError,
    },
    TurnSkipped {
        player_id: String,
        forced: bool,
    },
    WrongTurn {
        player_id: String,
    },
    TurnChanged {
        active_player_id: String,
        seconds_remaining: u32,
    },
    Countdown {
        seconds_remaining: u32,
    },
    Hint {
        player_id: String,
        moves: Vec<String>,
    },
    Reserve {
        player_id: String,
        letters: Vec<(String, u8)>,
    },
    MatchEnded {
        final_scores: Vec<FinalScore>,
        reason: EndReason,
    },
}

impl GameEvent {
    #[inline(always)]
    pub fn is_match_end(&self) -> bool {
        matches!(self, GameEvent::MatchEnded { .. })
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::PlacementAccepted {
                player_id,
                points,
                board_delta,
            } => {
                let word = board_delta
                    .iter()
                    .map(|d| d.letter.as_str())
                    .collect::<String>();
                write!(f, "{} played {} for {}", player_id, word, points)
            }
            GameEvent::PlacementRejected {
                player_id,
                reason,
                invalid_words,
            } => {
                if invalid_words.is_empty() {
                    write!(f, "{}: {}", player_id, reason)
                } else {
                    write!(f, "{}: {}: {}", player_id, reason, invalid_words.join(", "))
                }
            }
            GameEvent::RackChanged { player_id, rack } => write!(f, "{} holds {}", player_id, rack),
            GameEvent::ExchangeAccepted { player_id, .. } => write!(f, "{} exchanged", player_id),
            GameEvent::ExchangeRejected { player_id, reason } => {
                write!(f, "{} cannot exchange: {:?}", player_id, reason)
            }
            GameEvent::TurnSkipped { player_id, forced } => {
                if *forced {
                    write!(f, "{} ran out of time", player_id)
                } else {
                    write!(f, "{} skipped", player_id)
                }
            }
            GameEvent::WrongTurn { player_id } => write!(f, "not {}'s turn", player_id),
            GameEvent::TurnChanged {
                active_player_id,
                seconds_remaining,
            } => write!(f, "{} to play, {}s", active_player_id, seconds_remaining),
            GameEvent::Countdown { seconds_remaining } => write!(f, "{}s left", seconds_remaining),
            GameEvent::Hint { moves, .. } => {
                if moves.is_empty() {
                    f.write_str("no moves found")
                } else {
                    write!(f, "try {}", moves.join(" or "))
                }
            }
            GameEvent::Reserve { letters, .. } => {
                let mut first = true;
                for (letter, n) in letters {
                    if !first {
                        f.write_str(" ")?;
                    }
                    first = false;
                    write!(f, "{}:{}", letter, n)?;
                }
                Ok(())
            }
            GameEvent::MatchEnded {
                final_scores,
                reason,
            } => {
                write!(f, "match over ({:?}):", reason)?;
                for s in final_scores {
                    write!(f, " {} {}", s.player_id, s.score)?;
                }
                Ok(())
            }
        }
    }
}
