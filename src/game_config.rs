// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, board_layout, error};

pub struct StaticGameConfig {
    alphabet: &'static alphabet::Alphabet<'static>,
    board_layout: &'static board_layout::BoardLayout<'static>,
    rack_size: i8,
    num_zeros_to_end: u8,
    exchange_bag_minimum: u16,
    num_played_bonus: i32,
    num_hints: usize,
    turn_seconds: u32,
    bot_think_seconds: u32,
    bot_give_up_seconds: u32,
}

pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn alphabet(&self) -> &'static alphabet::Alphabet<'static> {
        match self {
            GameConfig::Static(x) => x.alphabet,
        }
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &'static board_layout::BoardLayout<'static> {
        match self {
            GameConfig::Static(x) => x.board_layout,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    // consecutive unproductive turns that end the match.
    #[inline(always)]
    pub fn num_zeros_to_end(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_zeros_to_end,
        }
    }

    #[inline(always)]
    pub fn exchange_bag_minimum(&self) -> u16 {
        match self {
            GameConfig::Static(x) => x.exchange_bag_minimum,
        }
    }

    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: usize) -> i32 {
        match self {
            GameConfig::Static(x) => {
                if num_played >= x.rack_size as usize {
                    x.num_played_bonus
                } else {
                    0
                }
            }
        }
    }

    #[inline(always)]
    pub fn num_hints(&self) -> usize {
        match self {
            GameConfig::Static(x) => x.num_hints,
        }
    }

    #[inline(always)]
    pub fn turn_seconds(&self) -> u32 {
        match self {
            GameConfig::Static(x) => x.turn_seconds,
        }
    }

    #[inline(always)]
    pub fn bot_think_seconds(&self) -> u32 {
        match self {
            GameConfig::Static(x) => x.bot_think_seconds,
        }
    }

    #[inline(always)]
    pub fn bot_give_up_seconds(&self) -> u32 {
        match self {
            GameConfig::Static(x) => x.bot_give_up_seconds,
        }
    }
}

pub fn make_classic_game_config() -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        alphabet: &alphabet::CLASSIC_ALPHABET,
        board_layout: &board_layout::CLASSIC_BOARD_LAYOUT,
        rack_size: 7,
        num_zeros_to_end: 6,
        exchange_bag_minimum: 7,
        num_played_bonus: 50,
        num_hints: 3,
        turn_seconds: 60,
        bot_think_seconds: 3,
        bot_give_up_seconds: 20,
    })
}

// what a binary may override from a json file.
#[derive(serde::Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MatchSettings {
    pub turn_seconds: Option<u32>,
    pub bot_think_seconds: Option<u32>,
    pub bot_give_up_seconds: Option<u32>,
    pub seed: Option<u64>,
}

impl MatchSettings {
    pub fn from_json(s: &str) -> error::Returns<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: &str) -> error::Returns<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

pub fn make_game_config(settings: &MatchSettings) -> error::Returns<GameConfig> {
    let GameConfig::Static(mut x) = make_classic_game_config();
    if let Some(v) = settings.turn_seconds {
        x.turn_seconds = v;
    }
    if let Some(v) = settings.bot_think_seconds {
        x.bot_think_seconds = v;
    }
    if let Some(v) = settings.bot_give_up_seconds {
        x.bot_give_up_seconds = v;
    }
    if x.turn_seconds == 0 {
        return_error!("turnSeconds must be positive".to_string());
    }
    if x.bot_think_seconds >= x.bot_give_up_seconds {
        return_error!(format!(
            "botThinkSeconds {} must be below botGiveUpSeconds {}",
            x.bot_think_seconds, x.bot_give_up_seconds
        ));
    }
    if x.bot_give_up_seconds > x.turn_seconds {
        return_error!(format!(
            "botGiveUpSeconds {} exceeds turnSeconds {}",
            x.bot_give_up_seconds, x.turn_seconds
        ));
    }
    Ok(GameConfig::Static(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rack_earns_bonus() {
        let game_config = make_classic_game_config();
        assert_eq!(game_config.num_played_bonus(6), 0);
        assert_eq!(game_config.num_played_bonus(7), 50);
    }

    #[test]
    fn settings_override_defaults() {
        let settings =
            MatchSettings::from_json(r#"{"turnSeconds": 30, "botGiveUpSeconds": 10}"#).unwrap();
        let game_config = make_game_config(&settings).unwrap();
        assert_eq!(game_config.turn_seconds(), 30);
        assert_eq!(game_config.bot_give_up_seconds(), 10);
        assert_eq!(game_config.bot_think_seconds(), 3);
    }

    #[test]
    fn inconsistent_settings_are_refused() {
        let settings = MatchSettings::from_json(r#"{"turnSeconds": 10}"#).unwrap();
        assert!(make_game_config(&settings).is_err());
        let settings = MatchSettings::from_json(r#"{"botThinkSeconds": 20}"#).unwrap();
        assert!(make_game_config(&settings).is_err());
        assert!(MatchSettings::from_json(r#"{"turnSecs": 10}"#).is_err());
    }
}
