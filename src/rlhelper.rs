// Copyright (C) 2020-2024 Andy Kurnia.

// https://github.com/kkawakam/rustyline/blob/master/examples/example.rs

use rustyline::completion::Pair;
use rustyline_derive::{Completer, Helper, Highlighter, Hinter, Validator};

pub const SHELL_COMMANDS: &[&str] = &[
    "place", "exchange", "skip", "hint", "reserve", "board", "abandon", "source", "help", "exit",
];

// only the first word is completed.
pub struct CommandCompleter {
    commands: &'static [&'static str],
}

impl rustyline::completion::Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        if head.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        Ok((
            0,
            self.commands
                .iter()
                .filter(|c| c.starts_with(head))
                .map(|c| Pair {
                    display: c.to_string(),
                    replacement: format!("{} ", c),
                })
                .collect(),
        ))
    }
}

#[derive(Helper, Completer, Hinter, Validator, Highlighter)]
pub struct ShellHelper {
    #[rustyline(Completer)]
    completer: CommandCompleter,
    #[rustyline(Hinter)]
    hinter: rustyline::hint::HistoryHinter,
}

pub fn new_rl_editor()
-> rustyline::Result<rustyline::Editor<ShellHelper, rustyline::history::DefaultHistory>> {
    let mut rl = rustyline::Editor::new()?;
    rl.set_helper(Some(ShellHelper {
        completer: CommandCompleter {
            commands: SHELL_COMMANDS,
        },
        hinter: rustyline::hint::HistoryHinter::new(),
    }));
    Ok(rl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::completion::Completer;

    #[test]
    fn completes_command_names() {
        let history = rustyline::history::DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);
        let completer = CommandCompleter {
            commands: SHELL_COMMANDS,
        };
        let (start, found) = completer.complete("ex", 2, &ctx).unwrap();
        assert_eq!(start, 0);
        let found = found.into_iter().map(|p| p.display).collect::<Vec<_>>();
        assert_eq!(found, vec!["exchange", "exit"]);
        let (_, found) = completer.complete("place h8", 8, &ctx).unwrap();
        assert!(found.is_empty());
    }
}
