use crate::city::CityName;
use crate::error::ScheduleError;
use crate::time::Time;
use thiserror::Error;

pub const HELP: &str = "Here are the possible commands:
A <city name>     - Add an active empty flight schedule for
                    <city name>
L                 - List cities which have an active schedule
l <city name>     - List the flights for <city name>
a <city name>
<time> <capacity> - Add a flight for <city name> @ <time> time
                    with <capacity> seats
r <city name>
<time>            - Remove a flight from <city name> whose time is
                    <time>
s <city name>
<time>            - Attempt to schedule seat on flight to
                    <city name> at <time> or next closest time on
                    which there is an available seat
u <city name>
<time>            - Unschedule a seat from flight to <city name>
                    at <time>
R <city name>     - Remove schedule for <city name>
h                 - Print this help message
q                 - Quit

Times are minutes after midnight (0-1439). Arguments after the city may
follow on the same line: a Toronto 360 100";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddCity(CityName),
    ListCities,
    ListFlights(CityName),
    AddFlight {
        city: CityName,
        time: Time,
        capacity: u32,
    },
    RemoveFlight {
        city: CityName,
        time: Time,
    },
    ScheduleSeat {
        city: CityName,
        time: Time,
    },
    UnscheduleSeat {
        city: CityName,
        time: Time,
    },
    RemoveCity(CityName),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Bad command. Use h to see help.")]
    UnknownCommand,

    #[error("Usage: {0} <city name>")]
    MissingCity(char),

    #[error(transparent)]
    Invalid(#[from] ScheduleError),
}

/// Outcome of feeding input to the parser: either a finished command or one still waiting for
/// numeric arguments on a following line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Complete(Command),
    Pending(Pending),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    letter: char,
    city: CityName,
    args: Vec<String>,
}

impl Pending {
    pub fn city(&self) -> &CityName {
        &self.city
    }

    /// Consumes the tokens of a continuation line. Extra tokens are ignored.
    pub fn feed(mut self, line: &str) -> Result<Parsed, CommandError> {
        let needed = arity(self.letter);
        self.args.extend(
            line.split_whitespace()
                .take(needed - self.args.len())
                .map(str::to_string),
        );
        if self.args.len() < needed {
            return Ok(Parsed::Pending(self));
        }
        build(self.letter, self.city, &self.args).map(Parsed::Complete)
    }
}

/// Parses one input line. The first character selects the command; the rest of the line holds
/// the city name, optionally followed by its numeric arguments.
pub fn parse(line: &str) -> Result<Parsed, CommandError> {
    let line = line.trim();
    let mut chars = line.chars();
    let Some(letter) = chars.next() else {
        return Err(CommandError::UnknownCommand);
    };
    let rest = chars.as_str();

    match letter {
        'L' => return Ok(Parsed::Complete(Command::ListCities)),
        'h' | '?' => return Ok(Parsed::Complete(Command::Help)),
        'q' => return Ok(Parsed::Complete(Command::Quit)),
        'A' | 'l' | 'R' | 'a' | 'r' | 's' | 'u' => {}
        _ => return Err(CommandError::UnknownCommand),
    }

    let needed = arity(letter);
    let tokens = rest.split_whitespace().collect::<Vec<&str>>();
    let trailing = tokens
        .iter()
        .rev()
        .take_while(|t| looks_numeric(t))
        .count()
        .min(needed)
        .min(tokens.len().saturating_sub(1));
    let split = tokens.len() - trailing;
    let name = if trailing == 0 {
        rest.to_string()
    } else {
        tokens[..split].join(" ")
    };

    let pending = Pending {
        letter,
        city: CityName::new(&name).ok_or(CommandError::MissingCity(letter))?,
        args: tokens[split..].iter().map(|t| t.to_string()).collect(),
    };
    if pending.args.len() < needed {
        return Ok(Parsed::Pending(pending));
    }
    build(pending.letter, pending.city, &pending.args).map(Parsed::Complete)
}

fn arity(letter: char) -> usize {
    match letter {
        'a' => 2,
        'r' | 's' | 'u' => 1,
        _ => 0,
    }
}

fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

fn parse_capacity(token: &str) -> Result<u32, ScheduleError> {
    token
        .parse::<u32>()
        .ok()
        .filter(|c| *c > 0)
        .ok_or(ScheduleError::InvalidCapacity)
}

fn build(letter: char, city: CityName, args: &[String]) -> Result<Command, CommandError> {
    let command = match letter {
        'A' => Command::AddCity(city),
        'l' => Command::ListFlights(city),
        'R' => Command::RemoveCity(city),
        'a' => Command::AddFlight {
            city,
            time: args[0].parse()?,
            capacity: parse_capacity(&args[1])?,
        },
        'r' => Command::RemoveFlight {
            city,
            time: args[0].parse()?,
        },
        's' => Command::ScheduleSeat {
            city,
            time: args[0].parse()?,
        },
        'u' => Command::UnscheduleSeat {
            city,
            time: args[0].parse()?,
        },
        _ => return Err(CommandError::UnknownCommand),
    };
    Ok(command)
}
