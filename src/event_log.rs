// Copyright (C) 2020-2024 Andy Kurnia.

use super::{error, game_event};
use std::io::Write;

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct LoggedEvent<'a> {
    match_id: &'a str,
    seq: u64,
    #[serde(flatten)]
    event: &'a game_event::GameEvent,
}

// one json object per line, tagged by "event".
pub struct EventLog<W: Write> {
    w: W,
    match_id: String,
    seq: u64,
}

impl EventLog<std::io::BufWriter<std::fs::File>> {
    pub fn open_append(path: impl AsRef<std::path::Path>, match_id: &str) -> error::Returns<Self> {
        let f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self::new(std::io::BufWriter::new(f), match_id))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(w: W, match_id: &str) -> Self {
        Self {
            w,
            match_id: match_id.to_string(),
            seq: 0,
        }
    }

    pub fn write_event(&mut self, event: &game_event::GameEvent) -> error::Returns<()> {
        let mut buf = serde_json::to_vec(&LoggedEvent {
            match_id: &self.match_id,
            seq: self.seq,
            event,
        })?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.seq += 1;
        Ok(())
    }

    pub fn write_events(&mut self, events: &[game_event::GameEvent]) -> error::Returns<()> {
        for event in events {
            self.write_event(event)?;
        }
        if events.iter().any(|e| e.is_match_end()) {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> error::Returns<()> {
        self.w.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}
