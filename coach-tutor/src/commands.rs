//! Interactive command parsing for the terminal front end

use std::fmt;
use std::str::FromStr;

/// One line of learner input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TutorCommand {
    Next,
    Previous,
    /// 0-based step index (typed 1-based)
    GoTo(usize),
    Restart,
    Select(String),
    List,
    Insight,
    Mute,
    /// Piece guide, optionally for one piece
    Pieces(Option<String>),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError(String);

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for TutorCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(TutorCommand::Show);
        };
        let argument = words.next();

        let command = match verb.to_ascii_lowercase().as_str() {
            "next" | "n" => TutorCommand::Next,
            "prev" | "p" | "back" | "b" => TutorCommand::Previous,
            "restart" | "r" => TutorCommand::Restart,
            "list" | "l" => TutorCommand::List,
            "insight" | "i" => TutorCommand::Insight,
            "mute" | "m" => TutorCommand::Mute,
            "pieces" | "pc" => TutorCommand::Pieces(argument.map(str::to_string)),
            "show" => TutorCommand::Show,
            "help" | "h" | "?" => TutorCommand::Help,
            "quit" | "q" | "exit" => TutorCommand::Quit,
            "goto" | "g" => {
                let step = argument
                    .ok_or_else(|| ParseCommandError("usage: goto <step number>".to_string()))?;
                match step.parse::<usize>() {
                    Ok(n) if n >= 1 => TutorCommand::GoTo(n - 1),
                    _ => {
                        return Err(ParseCommandError(format!(
                            "'{}' is not a step number",
                            step
                        )))
                    }
                }
            }
            "select" | "s" => {
                let id = argument
                    .ok_or_else(|| ParseCommandError("usage: select <tutorial id>".to_string()))?;
                TutorCommand::Select(id.to_string())
            }
            other => {
                return Err(ParseCommandError(format!(
                    "unknown command '{}', type 'help' for a list",
                    other
                )))
            }
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
Commands:
  n, next            play the next step
  p, prev            go back one step
  g, goto <N>        jump to step N
  r, restart         start the tutorial over
  s, select <ID>     switch tutorial
  l, list            list tutorials
  i, insight         ask the coach about this position
  m, mute            toggle sound cues
  pc, pieces [NAME]  how the pieces move and what they are worth
  h, help            show this help
  q, quit            leave
  (empty line)       redraw the current step";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!("n".parse(), Ok(TutorCommand::Next));
        assert_eq!("  PREV ".parse(), Ok(TutorCommand::Previous));
        assert_eq!("r".parse(), Ok(TutorCommand::Restart));
        assert_eq!("".parse(), Ok(TutorCommand::Show));
        assert_eq!("q".parse(), Ok(TutorCommand::Quit));
    }

    #[test]
    fn test_goto_is_one_based() {
        assert_eq!("goto 1".parse(), Ok(TutorCommand::GoTo(0)));
        assert_eq!("g 12".parse(), Ok(TutorCommand::GoTo(11)));
        assert!("g 0".parse::<TutorCommand>().is_err());
        assert!("g".parse::<TutorCommand>().is_err());
        assert!("g x".parse::<TutorCommand>().is_err());
    }

    #[test]
    fn test_select_takes_id() {
        assert_eq!(
            "s scholars-mate".parse(),
            Ok(TutorCommand::Select("scholars-mate".to_string()))
        );
        assert!("select".parse::<TutorCommand>().is_err());
    }

    #[test]
    fn test_pieces_takes_optional_name() {
        assert_eq!("pieces".parse(), Ok(TutorCommand::Pieces(None)));
        assert_eq!(
            "pc Knight".parse(),
            Ok(TutorCommand::Pieces(Some("Knight".to_string())))
        );
        assert!(HELP.contains("pieces"));
    }

    #[test]
    fn test_unknown_command() {
        let err = "castle".parse::<TutorCommand>().unwrap_err();
        assert!(err.to_string().contains("castle"));
    }
}
