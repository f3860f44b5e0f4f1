use crate::city::CityName;
use crate::time::Time;
use thiserror::Error;

/// Every recoverable failure of the schedule core. The `Display` text is what the console shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Sorry no more free schedules.")]
    PoolExhausted,

    #[error("There is a schedule of {0} already.")]
    DuplicateCity(CityName),

    #[error("No schedule for {0}")]
    UnknownCity(String),

    #[error("Sorry we cannot add more flights on this city.")]
    CityFull,

    #[error("There is a flight at {0} already.")]
    DuplicateFlightTime(Time),

    #[error("Sorry there's no flight scheduled on this time.")]
    NoSuchFlight,

    #[error("Sorry there's no more seats available!")]
    NoSeatsAvailable,

    #[error("All the seats on this flights are empty!")]
    AllSeatsEmpty,

    #[error("Invalid time value")]
    InvalidTime,

    #[error("Invalid capacity value")]
    InvalidCapacity,

    #[error("stale or foreign schedule handle")]
    InvalidHandle,
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
