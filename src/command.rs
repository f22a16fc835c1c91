// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, board, error};

// letters: lowercase is a rack letter, uppercase is a blank standing for it.
// is_horizontal is left out when a single letter is placed.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PlaceWordCommand {
    pub first_coordinate: board::Coord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_horizontal: Option<bool>,
    pub letters: Vec<String>,
}

impl PlaceWordCommand {
    // board form, with the blank flag on uppercase letters.
    pub fn tiles(&self, alphabet: &alphabet::Alphabet) -> Option<Vec<u8>> {
        self.letters
            .iter()
            .map(|s| alphabet.parse_command_letter(s))
            .collect()
    }

    pub fn from_tiles(
        alphabet: &alphabet::Alphabet,
        first_coordinate: board::Coord,
        is_horizontal: Option<bool>,
        tiles: &[u8],
    ) -> Self {
        Self {
            first_coordinate,
            is_horizontal,
            letters: tiles
                .iter()
                .filter_map(|&t| alphabet.from_board(t).map(String::from))
                .collect(),
        }
    }

    // "h8h cat": row letter, column, direction, then the letters.
    pub fn fmt(&self) -> String {
        format!(
            "{}{} {}",
            self.first_coordinate.fmt_position(),
            match self.is_horizontal {
                Some(true) => "h",
                Some(false) => "v",
                None => "",
            },
            self.letters.concat()
        )
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExchangeCommand {
    pub letters: Vec<String>,
}

impl ExchangeCommand {
    // rack form, "*" is the blank.
    pub fn tiles(&self, alphabet: &alphabet::Alphabet) -> Option<Vec<u8>> {
        self.letters
            .iter()
            .map(|s| alphabet.parse_rack_letter(s))
            .collect()
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SkipCommand {}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "command")]
pub enum PlayerCommand {
    #[serde(rename = "place")]
    Place(PlaceWordCommand),
    #[serde(rename = "exchange")]
    Exchange(ExchangeCommand),
    #[serde(rename = "skip")]
    Skip(SkipCommand),
    #[serde(rename = "reserve")]
    Reserve,
    #[serde(rename = "hint")]
    Hint,
}

fn split_letters(s: &str) -> Vec<String> {
    s.chars().map(String::from).collect()
}

// "h8h" or "h8" or "o15v".
fn parse_position(s: &str) -> error::Returns<(board::Coord, Option<bool>)> {
    let mut chars = s.chars();
    let row = match chars.next() {
        Some(c @ 'a'..='o') => (c as u8 - b'a' + 1) as i8,
        _ => {
            return_error!(format!("bad row in {:?}, want a to o", s));
        }
    };
    let rest = chars.as_str();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let col = match rest[..digits_end].parse::<i8>() {
        Ok(v) if (1..=board::DIM).contains(&v) => v,
        _ => {
            return_error!(format!("bad column in {:?}, want 1 to {}", s, board::DIM));
        }
    };
    let direction = match &rest[digits_end..] {
        "" => None,
        "h" => Some(true),
        "v" => Some(false),
        d => {
            return_error!(format!("bad direction {:?}, want h or v", d));
        }
    };
    Ok((board::Coord::new(col, row), direction))
}

impl PlayerCommand {
    // words as split by shell_words.
    pub fn parse_words(words: &[String]) -> error::Returns<PlayerCommand> {
        let Some(verb) = words.first() else {
            return_error!("empty command".to_string());
        };
        match (verb.as_str(), words.len()) {
            ("place", 3) => {
                let (first_coordinate, is_horizontal) = parse_position(&words[1])?;
                let letters = split_letters(&words[2]);
                Ok(PlayerCommand::Place(PlaceWordCommand {
                    first_coordinate,
                    is_horizontal: if letters.len() == 1 {
                        None
                    } else {
                        is_horizontal
                    },
                    letters,
                }))
            }
            ("exchange", 2) => Ok(PlayerCommand::Exchange(ExchangeCommand {
                letters: split_letters(&words[1]),
            })),
            ("skip", 1) => Ok(PlayerCommand::Skip(SkipCommand {})),
            ("reserve", 1) => Ok(PlayerCommand::Reserve),
            ("hint", 1) => Ok(PlayerCommand::Hint),
            _ => {
                return_error!(format!("cannot understand {:?}", words.join(" ")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        shell_words::split(s).unwrap()
    }

    #[test]
    fn parses_text_commands() {
        assert_eq!(
            PlayerCommand::parse_words(&words("place h8h caT")).unwrap(),
            PlayerCommand::Place(PlaceWordCommand {
                first_coordinate: board::Coord::new(8, 8),
                is_horizontal: Some(true),
                letters: vec!["c".into(), "a".into(), "T".into()],
            })
        );
        assert_eq!(
            PlayerCommand::parse_words(&words("place o15v s")).unwrap(),
            PlayerCommand::Place(PlaceWordCommand {
                first_coordinate: board::Coord::new(15, 15),
                is_horizontal: None,
                letters: vec!["s".into()],
            })
        );
        assert_eq!(
            PlayerCommand::parse_words(&words("exchange ab*")).unwrap(),
            PlayerCommand::Exchange(ExchangeCommand {
                letters: vec!["a".into(), "b".into(), "*".into()],
            })
        );
        assert_eq!(
            PlayerCommand::parse_words(&words("skip")).unwrap(),
            PlayerCommand::Skip(SkipCommand {})
        );
        for bad in ["place p8h cat", "place h16h cat", "place h8x cat", "skip now", "dance"] {
            assert!(PlayerCommand::parse_words(&words(bad)).is_err(), "{}", bad);
        }
    }

    #[test]
    fn json_wire_format() {
        let cmd = serde_json::from_str::<PlayerCommand>(
            r#"{"command":"place","firstCoordinate":{"x":8,"y":8},"isHorizontal":true,"letters":["c","a","t"]}"#,
        )
        .unwrap();
        let PlayerCommand::Place(place) = &cmd else {
            panic!("{:?}", cmd);
        };
        assert_eq!(place.fmt(), "h8h cat");
        let single = PlaceWordCommand {
            first_coordinate: board::Coord::new(3, 4),
            is_horizontal: None,
            letters: vec!["a".into()],
        };
        let json = serde_json::to_string(&single).unwrap();
        assert!(!json.contains("isHorizontal"));
        assert_eq!(serde_json::from_str::<PlaceWordCommand>(&json).unwrap(), single);
    }

    #[test]
    fn letters_map_to_tiles() {
        let alphabet = &alphabet::CLASSIC_ALPHABET;
        let place = PlaceWordCommand::from_tiles(
            alphabet,
            board::CENTER,
            Some(true),
            &[3, 1 | alphabet::BLANK_FLAG, 20],
        );
        assert_eq!(place.letters, vec!["c", "A", "t"]);
        assert_eq!(place.tiles(alphabet), Some(vec![3, 0x81, 20]));
        let exchange = ExchangeCommand {
            letters: vec!["*".into(), "q".into()],
        };
        assert_eq!(exchange.tiles(alphabet), Some(vec![0, 17]));
    }
}
