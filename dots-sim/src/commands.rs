// Text commands read from stdin
//
// One command per line. Coordinates are display pixels, pages are 0-based.

use crate::events::AppEvent;
use embedded_graphics::prelude::Point;
use page_dots::TouchEvent;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  tap <page>              tap a page's dot
  drag <page> <pages>     drag from a dot by whole pages (negative = left)
  press|move|release <x> <y>
                          raw touch sample
  goto <page>             change the selection from the host side
  show | hide             visibility events
  redraw | help | quit";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("Missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a number")]
    BadNumber(String),
}

fn arg<'a, T: std::str::FromStr>(
    args: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<T, CommandError> {
    let raw = args.next().ok_or(CommandError::MissingArgument(name))?;
    raw.parse()
        .map_err(|_| CommandError::BadNumber(raw.to_string()))
}

fn point<'a>(args: &mut impl Iterator<Item = &'a str>) -> Result<Point, CommandError> {
    Ok(Point::new(arg(args, "x")?, arg(args, "y")?))
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Option<Result<AppEvent, CommandError>> {
    let mut words = line.split_whitespace();
    let command = words.next()?;

    let event = match command.to_ascii_lowercase().as_str() {
        "tap" => arg(&mut words, "page").map(AppEvent::TapPage),
        "drag" => arg(&mut words, "page").and_then(|from| {
            arg(&mut words, "pages").map(|pages| AppEvent::DragPages { from, pages })
        }),
        "press" => point(&mut words).map(|p| AppEvent::Touch(TouchEvent::Press(p))),
        "move" => point(&mut words).map(|p| AppEvent::Touch(TouchEvent::Move(p))),
        "release" => point(&mut words).map(|p| AppEvent::Touch(TouchEvent::Release(p))),
        "goto" => arg(&mut words, "page").map(AppEvent::Goto),
        "show" => Ok(AppEvent::Show),
        "hide" => Ok(AppEvent::Hide),
        "redraw" => Ok(AppEvent::Redraw),
        "help" | "?" => Ok(AppEvent::Help),
        "quit" | "exit" | "q" => Ok(AppEvent::Shutdown),
        other => Err(CommandError::Unknown(other.to_string())),
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_page_commands() {
        assert_eq!(parse("tap 3"), Some(Ok(AppEvent::TapPage(3))));
        assert_eq!(
            parse("drag 1 -2"),
            Some(Ok(AppEvent::DragPages { from: 1, pages: -2 }))
        );
        assert_eq!(parse("  GOTO 4 "), Some(Ok(AppEvent::Goto(4))));
    }

    #[test]
    fn parses_raw_touches() {
        assert_eq!(
            parse("press 10 20"),
            Some(Ok(AppEvent::Touch(TouchEvent::Press(Point::new(10, 20)))))
        );
        assert_eq!(
            parse("release -5 3"),
            Some(Ok(AppEvent::Touch(TouchEvent::Release(Point::new(-5, 3)))))
        );
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            parse("tap"),
            Some(Err(CommandError::MissingArgument("page")))
        );
        assert_eq!(
            parse("tap two"),
            Some(Err(CommandError::BadNumber("two".to_string())))
        );
        assert_eq!(
            parse("swipe"),
            Some(Err(CommandError::Unknown("swipe".to_string())))
        );
        assert_eq!(
            parse("move 1"),
            Some(Err(CommandError::MissingArgument("y")))
        );
    }
}
