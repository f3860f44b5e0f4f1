use crate::city::CityName;
use crate::error::ScheduleError;
use crate::schedule::SchedulePool;
use crate::time::Time;
use serde::Deserialize;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("could not read scenario: {0}")]
    Io(#[from] io::Error),

    #[error("could not parse scenario: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario entry {0:?} has no usable city name")]
    BadCity(String),

    #[error("scenario entry {city}: {source}")]
    Schedule {
        city: String,
        #[source]
        source: ScheduleError,
    },
}

#[derive(Debug, Deserialize)]
struct RawFlight {
    time: u16,
    capacity: u32,
}

#[derive(Debug, Deserialize)]
struct RawSchedule {
    destination: String,
    #[serde(default)]
    flights: Vec<RawFlight>,
}

/// Startup seed: cities and flights to create before the prompt opens.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    schedules: Vec<RawSchedule>,
}

impl Scenario {
    pub fn load_from_file(path: &Path) -> Result<Self, ScenarioError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Replays the seed through the regular pool operations, stopping at the first failure.
    /// Returns the number of schedules created.
    pub fn apply(&self, pool: &mut SchedulePool) -> Result<usize, ScenarioError> {
        for raw in &self.schedules {
            let wrap = |source: ScheduleError| ScenarioError::Schedule {
                city: raw.destination.clone(),
                source,
            };
            let city = CityName::new(&raw.destination)
                .ok_or_else(|| ScenarioError::BadCity(raw.destination.clone()))?;
            let handle = pool.add_city(city).map_err(wrap)?;
            let schedule = pool.get_mut(handle).map_err(wrap)?;
            for flight in &raw.flights {
                let time = Time::new(flight.time).map_err(wrap)?;
                schedule.flights.add(time, flight.capacity).map_err(wrap)?;
            }
        }
        Ok(self.schedules.len())
    }
}
