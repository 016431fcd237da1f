use crossbeam_channel::{bounded, Receiver};
use std::io::BufRead;
use std::str::FromStr;
use thiserror::Error;

/// A line typed into the demo while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pause,
    Play,
    Reverse,
    Speed(f32),
    Faster,
    Slower,
    Width(f32),
    Scroll(f32),
    Drag(f32),
    Hover(bool),
    Hide,
    Show,
    Items(Vec<String>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a number")]
    BadNumber(&'static str),
    #[error("`hover` takes on or off")]
    BadToggle,
}

pub const HELP: &str = "pause | play | reverse | speed N | faster | slower | width N | \
scroll Y | drag DX | hover on|off | hide | show | items a,b,c | quit";

fn number(name: &'static str, arg: &str) -> Result<f32, CommandError> {
    arg.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(CommandError::BadNumber(name))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((w, rest)) => (w, rest.trim()),
            None => (line, ""),
        };
        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "pause" | "p" => Ok(Command::Pause),
            "play" => Ok(Command::Play),
            "reverse" | "r" => Ok(Command::Reverse),
            "speed" => number("speed", arg).map(Command::Speed),
            "faster" | "+" => Ok(Command::Faster),
            "slower" | "-" => Ok(Command::Slower),
            "width" => number("width", arg).map(Command::Width),
            "scroll" => number("scroll", arg).map(Command::Scroll),
            "drag" => number("drag", arg).map(Command::Drag),
            "hover" => match arg {
                "on" => Ok(Command::Hover(true)),
                "off" => Ok(Command::Hover(false)),
                _ => Err(CommandError::BadToggle),
            },
            "hide" => Ok(Command::Hide),
            "show" => Ok(Command::Show),
            "items" => Ok(Command::Items(
                arg.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect(),
            )),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Read lines on a background thread. The channel disconnects at EOF.
pub fn spawn_reader<R: BufRead + Send + 'static>(reader: R) -> Receiver<String> {
    let (sender, receiver) = bounded::<String>(64);
    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if sender.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::warn!("stdin read failed: {e}");
                    break;
                }
            }
        }
    });
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_plain_words() {
        assert_eq!("pause".parse::<Command>(), Ok(Command::Pause));
        assert_eq!("  PLAY ".parse::<Command>(), Ok(Command::Play));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn parses_numeric_arguments() {
        assert_eq!("speed 120".parse::<Command>(), Ok(Command::Speed(120.0)));
        assert_eq!("drag -40".parse::<Command>(), Ok(Command::Drag(-40.0)));
        assert_eq!("speed fast".parse::<Command>(), Err(CommandError::BadNumber("speed")));
        assert_eq!("width inf".parse::<Command>(), Err(CommandError::BadNumber("width")));
    }

    #[test]
    fn parses_item_lists() {
        assert_eq!(
            "items one, two ,,three".parse::<Command>(),
            Ok(Command::Items(vec!["one".into(), "two".into(), "three".into()]))
        );
        assert_eq!("items".parse::<Command>(), Ok(Command::Items(Vec::new())));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("hover maybe".parse::<Command>(), Err(CommandError::BadToggle));
        assert_eq!("jump".parse::<Command>(), Err(CommandError::Unknown("jump".into())));
    }

    #[test]
    fn reader_forwards_lines_until_eof() {
        let rx = spawn_reader(Cursor::new("pause\nspeed 3\n"));
        let lines: Vec<String> = rx.iter().collect();
        assert_eq!(lines, vec!["pause", "speed 3"]);
    }
}
