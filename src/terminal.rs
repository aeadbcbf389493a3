//! Terminal front end: maps stdin lines to page events.

use crate::event_loop::Event;
use crate::page::{SEND_BUTTON, X_INPUT, Y_INPUT};

pub const USAGE: &str = "commands: x <value> | y <value> | send | quit";

/// Parse one line of user input.
///
/// `Ok(None)` means the line was blank. The text after `x ` / `y ` is kept
/// verbatim so that whitespace reaches the parser the same way a text field
/// would pass it on.
pub fn parse_command(line: &str) -> Result<Option<Event>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.trim_start().split_once(' ') {
        Some((command, rest)) => (command, rest),
        None => (line.trim(), ""),
    };

    let event = match command {
        "x" => Event::Input {
            target: X_INPUT.to_string(),
            value: rest.to_string(),
        },
        "y" => Event::Input {
            target: Y_INPUT.to_string(),
            value: rest.to_string(),
        },
        "send" | "click" => Event::Click {
            target: SEND_BUTTON.to_string(),
        },
        "quit" | "exit" => Event::Shutdown,
        other => return Err(format!("unknown command '{}'; {}", other, USAGE)),
    };

    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(target: &str, value: &str) -> Event {
        Event::Input {
            target: target.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_inputs() {
        assert_eq!(parse_command("x 3"), Ok(Some(input(X_INPUT, "3"))));
        assert_eq!(parse_command("y abc\n"), Ok(Some(input(Y_INPUT, "abc"))));
        assert_eq!(parse_command("x  12 "), Ok(Some(input(X_INPUT, " 12 "))));
        assert_eq!(parse_command("x"), Ok(Some(input(X_INPUT, ""))));
    }

    #[test]
    fn test_click_and_quit() {
        let click = Event::Click {
            target: SEND_BUTTON.to_string(),
        };
        assert_eq!(parse_command("send"), Ok(Some(click.clone())));
        assert_eq!(parse_command("  click"), Ok(Some(click)));
        assert_eq!(parse_command("quit"), Ok(Some(Event::Shutdown)));
        assert_eq!(parse_command("exit\r\n"), Ok(Some(Event::Shutdown)));
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   "), Ok(None));
        assert!(parse_command("jump 3").unwrap_err().contains("unknown command 'jump'"));
    }
}
