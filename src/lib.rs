// Copyright (C) 2020-2024 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board;
pub mod board_layout;
pub mod command;
pub mod dictionary;
pub mod display;
pub mod event_log;
pub mod game_config;
pub mod game_event;
pub mod game_state;
pub mod kibitzer;
pub mod move_picker;
pub mod movegen;
pub mod play_scorer;
pub mod player;
pub mod rlhelper;
pub mod runtime;
pub mod turn;
pub mod validator;
pub mod word;
