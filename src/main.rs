use crate::command::{Command, HELP, Parsed, Pending};
use crate::error::ScheduleError;
use crate::schedule::{DEFAULT_POOL_CAPACITY, MAX_FLIGHTS_PER_CITY, SchedulePool};
use crate::scenario::Scenario;
use crate::time::Time;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::{self, Stdio};
use tabled::Tabled;
use tabled::settings::Style;

mod city;
mod command;
mod error;
mod flight;
mod scenario;
mod schedule;
mod time;

const PAGE_ROWS: usize = 20;

#[derive(Parser)]
#[command(about = "Interactive flight schedule manager")]
struct Args {
    /// Maximum number of city schedules held at once
    #[arg(value_name = "SCHEDULES", default_value_t = DEFAULT_POOL_CAPACITY, value_parser = parse_pool_capacity)]
    schedules: usize,

    /// JSON file with schedules to create before the prompt opens
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,
}

fn parse_pool_capacity(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err("Bad number of default max schedules specified.".to_string()),
        Ok(n) => Ok(n),
    }
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub cities: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let mut chars = head.chars();
        let takes_city = chars.next().is_some_and(|c| "AlarsuR".contains(c));
        if !takes_city {
            return Ok((pos, vec![]));
        }

        let rest = chars.as_str().trim_start();
        let start = pos - rest.len();
        let candidates = self
            .cities
            .iter()
            .filter(|city| city.starts_with(rest))
            .map(|city| Pair {
                display: city.clone(),
                replacement: city.clone(),
            })
            .collect();

        Ok((start, candidates))
    }
}

#[derive(Tabled)]
struct CityRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Flights")]
    flights: String,
    #[tabled(rename = "Open seats")]
    open_seats: u64,
}

#[derive(Tabled)]
struct FlightRow {
    #[tabled(rename = "Time")]
    time: u16,
    #[tabled(rename = "Departs")]
    departs: String,
    #[tabled(rename = "Available")]
    available: u32,
    #[tabled(rename = "Capacity")]
    capacity: u32,
    #[tabled(rename = "Booked")]
    booked: u32,
}

fn render<T: Tabled>(rows: &[T]) -> String {
    let mut table = tabled::Table::new(rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    table.to_string()
}

fn describe(time: Time) -> String {
    format!("{} ({})", time.minutes(), time)
}

/// Runs one parsed command against the pool and renders the success message.
fn dispatch(pool: &mut SchedulePool, command: &Command) -> Result<String, ScheduleError> {
    match command {
        Command::AddCity(city) => {
            pool.add_city(city.clone())?;
            Ok(format!("Added schedule for {}.", city))
        }
        Command::ListCities => {
            let rows = pool
                .iter()
                .filter_map(|(_, s)| s.destination().map(|d| (d, s)))
                .enumerate()
                .map(|(i, (city, s))| CityRow {
                    position: i + 1,
                    city: city.to_string(),
                    flights: if s.flights.is_full() {
                        format!("{}/{} (full)", s.flights.len(), MAX_FLIGHTS_PER_CITY)
                    } else {
                        format!("{}/{}", s.flights.len(), MAX_FLIGHTS_PER_CITY)
                    },
                    open_seats: s.flights.iter().map(|f| u64::from(f.available)).sum(),
                })
                .collect::<Vec<CityRow>>();
            if rows.is_empty() {
                Ok("No active schedules.".to_string())
            } else {
                Ok(format!(
                    "{}\n{} of {} schedules in use, {} free.",
                    render(&rows),
                    pool.active_len(),
                    pool.capacity(),
                    pool.free_len()
                ))
            }
        }
        Command::ListFlights(city) => {
            let flights = &pool.schedule(city.as_str())?.flights;
            if flights.is_empty() {
                return Ok(format!("The flights for {} are: none", city));
            }
            let rows = flights
                .iter()
                .map(|f| FlightRow {
                    time: f.time.minutes(),
                    departs: f.time.to_string(),
                    available: f.available,
                    capacity: f.capacity,
                    booked: f.booked(),
                })
                .collect::<Vec<FlightRow>>();
            Ok(format!("The flights for {} are:\n{}", city, render(&rows)))
        }
        Command::AddFlight {
            city,
            time,
            capacity,
        } => {
            pool.schedule_mut(city.as_str())?
                .flights
                .add(*time, *capacity)?;
            Ok(format!(
                "Added flight to {} at {} with {} seats.",
                city,
                describe(*time),
                capacity
            ))
        }
        Command::RemoveFlight { city, time } => {
            pool.schedule_mut(city.as_str())?.flights.remove(*time)?;
            Ok(format!("Removed flight to {} at {}.", city, describe(*time)))
        }
        Command::ScheduleSeat { city, time } => {
            let booked = pool.schedule_seat(city.as_str(), *time)?;
            let left = pool
                .schedule(city.as_str())?
                .flights
                .get(booked)
                .map_or(0, |f| f.available);
            Ok(format!(
                "Seat scheduled on the flight to {} at {}, {} left.",
                city,
                describe(booked),
                left
            ))
        }
        Command::UnscheduleSeat { city, time } => {
            pool.unschedule_seat(city.as_str(), *time)?;
            Ok(format!(
                "Seat released on the flight to {} at {}.",
                city,
                describe(*time)
            ))
        }
        Command::RemoveCity(city) => {
            pool.remove_city(city.as_str())?;
            Ok(format!("Removed schedule for {}.", city))
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
    }
}

fn paginate(content: String) {
    let spawned = process::Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| process::Command::new("more").stdin(Stdio::piped()).spawn());

    let Ok(mut pager) = spawned else {
        println!("{}", content);
        return;
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                log::warn!("error writing to pager: {}", e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn show(output: String) {
    if output.lines().count() > PAGE_ROWS + 4 && std::io::stdout().is_terminal() {
        paginate(output);
    } else {
        println!("{}", output.green());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    let mut pool = SchedulePool::new(args.schedules);
    log::info!("schedule pool ready with {} slots", pool.capacity());

    if let Some(path) = &args.scenario {
        let created = Scenario::load_from_file(path)?.apply(&mut pool)?;
        log::info!("seeded {} schedules from {}", created, path.display());
        println!("Loaded {} schedules from {}", created, path.display());
    }

    println!("{}", HELP);

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        cities: pool.list_all().map(|c| c.to_string()).collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    let mut pending: Option<Pending> = None;
    loop {
        let prompt = match &pending {
            Some(p) => format!("{} .. ", p.city()),
            None => ">> ".to_string(),
        };
        let readline = rl.readline(&prompt);
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parsed = match pending.take() {
                    Some(p) => p.feed(trimmed),
                    None => command::parse(trimmed),
                };
                match parsed {
                    Ok(Parsed::Pending(p)) => pending = Some(p),
                    Ok(Parsed::Complete(Command::Quit)) => break,
                    Ok(Parsed::Complete(Command::Help)) => println!("{}", HELP),
                    Ok(Parsed::Complete(cmd)) => {
                        log::debug!("dispatching {:?}", cmd);
                        match dispatch(&mut pool, &cmd) {
                            Ok(output) => show(output),
                            Err(e) => {
                                log::info!("{:?} failed: {:?}", cmd, e);
                                println!("{}", e.to_string().red());
                            }
                        }
                        if let Some(helper) = rl.helper_mut() {
                            helper.cities = pool.list_all().map(|c| c.to_string()).collect();
                        }
                    }
                    Err(e) => println!("{}", e.to_string().red()),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::CityName;

    fn city(name: &str) -> CityName {
        CityName::new(name).unwrap()
    }

    fn t(minutes: u16) -> Time {
        Time::new(minutes).unwrap()
    }

    #[test]
    fn test_pool_capacity_argument() {
        assert_eq!(Ok(2), parse_pool_capacity("2"));
        assert!(parse_pool_capacity("0").is_err());
        assert!(parse_pool_capacity("many").is_err());
        assert!(parse_pool_capacity("-3").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["flightpool"]).unwrap();
        assert_eq!(DEFAULT_POOL_CAPACITY, args.schedules);
        assert_eq!(None, args.scenario);

        let args = Args::try_parse_from(["flightpool", "7", "--scenario", "seed.json"]).unwrap();
        assert_eq!(7, args.schedules);
        assert_eq!(Some(PathBuf::from("seed.json")), args.scenario);

        assert!(Args::try_parse_from(["flightpool", "0"]).is_err());
    }

    #[test]
    fn test_dispatch_session() {
        let mut pool = SchedulePool::new(2);

        dispatch(&mut pool, &Command::AddCity(city("Toronto"))).unwrap();
        assert_eq!(
            Err(ScheduleError::DuplicateCity(city("Toronto"))),
            dispatch(&mut pool, &Command::AddCity(city("Toronto")))
        );

        dispatch(
            &mut pool,
            &Command::AddFlight { city: city("Toronto"), time: t(360), capacity: 100 },
        )
        .unwrap();
        let seat = dispatch(&mut pool, &Command::ScheduleSeat { city: city("Toronto"), time: t(300) })
            .unwrap();
        assert!(seat.contains("360 (06:00), 99 left"), "{}", seat);

        let listing = dispatch(&mut pool, &Command::ListFlights(city("Toronto"))).unwrap();
        assert!(listing.starts_with("The flights for Toronto are:"));
        assert!(listing.contains("99"));

        let cities = dispatch(&mut pool, &Command::ListCities).unwrap();
        assert!(cities.contains("Toronto"));

        dispatch(&mut pool, &Command::RemoveCity(city("Toronto"))).unwrap();
        assert_eq!(
            Err(ScheduleError::UnknownCity("Toronto".to_string())),
            dispatch(&mut pool, &Command::ListFlights(city("Toronto")))
        );
        assert_eq!(
            "No active schedules.",
            dispatch(&mut pool, &Command::ListCities).unwrap()
        );
    }

    #[test]
    fn test_list_cities_with_large_capacities() {
        let mut pool = SchedulePool::new(1);
        for line in ["A Toronto", "a Toronto 360 4294967295", "a Toronto 361 4294967295"] {
            let Ok(Parsed::Complete(cmd)) = command::parse(line) else {
                panic!("expected a complete command for {:?}", line);
            };
            dispatch(&mut pool, &cmd).unwrap();
        }

        let listing = dispatch(&mut pool, &Command::ListCities).unwrap();
        assert!(listing.contains("8589934590"), "{}", listing);
        assert!(listing.contains("2/5"), "{}", listing);
    }

    #[test]
    fn test_full_city_is_marked() {
        let mut pool = SchedulePool::new(1);
        dispatch(&mut pool, &Command::AddCity(city("Ottawa"))).unwrap();
        for m in [100, 200, 300, 400, 500] {
            dispatch(
                &mut pool,
                &Command::AddFlight { city: city("Ottawa"), time: t(m), capacity: 1 },
            )
            .unwrap();
        }

        let listing = dispatch(&mut pool, &Command::ListCities).unwrap();
        assert!(listing.contains("5/5 (full)"), "{}", listing);
    }

    #[test]
    fn test_completion_of_city_names() {
        let helper = CompleteHelper {
            cities: vec!["Toronto".to_string(), "Tokyo".to_string(), "Ottawa".to_string()],
        };
        let history = rustyline::history::DefaultHistory::new();
        let ctx = Context::new(&history);

        let (start, pairs) = helper.complete("s Tor", 5, &ctx).unwrap();
        assert_eq!(2, start);
        assert_eq!(vec!["Toronto"], pairs.iter().map(|p| p.replacement.as_str()).collect::<Vec<_>>());

        let (_, pairs) = helper.complete("L", 1, &ctx).unwrap();
        assert!(pairs.is_empty());
    }
}
