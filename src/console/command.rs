//! Parsing of terminal commands into engine intents

use std::str::FromStr;

use crate::state::TaskId;

/// One line of user input, already validated for shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle,
    Skip,
    ResetTask,
    ResetCycle,
    Add { name: String, minutes: u64 },
    Delete(TaskId),
    Select(usize),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  t, toggle             start or pause the active task
  s, skip               move to the next task
  r, reset              rewind the active task
  rc, reset-cycle       clear completions and go back to the first task
  add <min> <name...>   append a task
  del, delete <id>      remove a task by id
  sel, select <index>   make the task at <index> active
  status                show the cycle
  help                  show this text
  q, quit               exit";

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let no_args = |command: Command| {
            if rest.is_empty() {
                Ok(command)
            } else {
                Err(format!("'{}' takes no arguments", verb))
            }
        };

        match verb.to_lowercase().as_str() {
            "t" | "toggle" => no_args(Command::Toggle),
            "s" | "skip" => no_args(Command::Skip),
            "r" | "reset" => no_args(Command::ResetTask),
            "rc" | "reset-cycle" => no_args(Command::ResetCycle),
            "status" => no_args(Command::Status),
            "help" | "?" => no_args(Command::Help),
            "q" | "quit" | "exit" => no_args(Command::Quit),
            "add" => {
                let (minutes, name) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: add <minutes> <name>".to_string())?;
                let minutes = minutes
                    .parse()
                    .map_err(|_| format!("'{}' is not a whole number of minutes", minutes))?;
                Ok(Command::Add {
                    name: name.to_string(),
                    minutes,
                })
            }
            "del" | "delete" => rest
                .parse()
                .map(|id| Command::Delete(TaskId(id)))
                .map_err(|_| "usage: delete <id>".to_string()),
            "sel" | "select" => rest
                .parse()
                .map(Command::Select)
                .map_err(|_| "usage: select <index>".to_string()),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!("t".parse::<Command>(), Ok(Command::Toggle));
        assert_eq!(" Skip ".parse::<Command>(), Ok(Command::Skip));
        assert_eq!("reset".parse::<Command>(), Ok(Command::ResetTask));
        assert_eq!("rc".parse::<Command>(), Ok(Command::ResetCycle));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_add_keeps_spaces_in_name() {
        assert_eq!(
            "add 25 Deep work 2".parse::<Command>(),
            Ok(Command::Add {
                name: "Deep work 2".to_string(),
                minutes: 25
            })
        );
    }

    #[test]
    fn test_add_requires_a_name() {
        assert_eq!(
            "add 5    ".parse::<Command>().unwrap_err(),
            "usage: add <minutes> <name>"
        );
    }

    #[test]
    fn test_add_zero_minutes_reaches_the_engine() {
        assert!(matches!(
            "add 0 Nap".parse::<Command>(),
            Ok(Command::Add { minutes: 0, .. })
        ));
    }

    #[test]
    fn test_bad_arguments() {
        assert!("add five Nap".parse::<Command>().is_err());
        assert!("add -5 Nap".parse::<Command>().is_err());
        assert!("delete x".parse::<Command>().is_err());
        assert!("select".parse::<Command>().is_err());
        assert!("skip now".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_delete_and_select() {
        assert_eq!("delete 3".parse::<Command>(), Ok(Command::Delete(TaskId(3))));
        assert_eq!("sel 0".parse::<Command>(), Ok(Command::Select(0)));
    }
}
