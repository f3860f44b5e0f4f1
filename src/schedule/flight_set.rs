use crate::error::{Result, ScheduleError};
use crate::flight::{Flight, FlightInfo};
use crate::time::Time;

pub const MAX_FLIGHTS_PER_CITY: usize = 5;

/// Fixed table of flights for one destination.
///
/// Occupied slots always form a prefix sorted strictly ascending by time; empty slots trail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightSet {
    flights: [Flight; MAX_FLIGHTS_PER_CITY],
}

impl FlightSet {
    #[cfg(test)]
    pub fn new() -> FlightSet {
        FlightSet::default()
    }

    pub fn len(&self) -> usize {
        self.flights.iter().take_while(|f| !f.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.flights[0].is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() == MAX_FLIGHTS_PER_CITY
    }

    pub fn add(&mut self, time: Time, capacity: u32) -> Result<()> {
        if capacity == 0 {
            return Err(ScheduleError::InvalidCapacity);
        }
        let len = self.len();
        if len == MAX_FLIGHTS_PER_CITY {
            return Err(ScheduleError::CityFull);
        }
        if self.position(time).is_some() {
            return Err(ScheduleError::DuplicateFlightTime(time));
        }

        self.flights[len] = Flight::new(time, capacity);
        self.sort();
        Ok(())
    }

    pub fn remove(&mut self, time: Time) -> Result<()> {
        let idx = self.position(time).ok_or(ScheduleError::NoSuchFlight)?;
        self.flights[idx] = Flight::EMPTY;
        self.sort();
        Ok(())
    }

    pub fn get(&self, time: Time) -> Option<FlightInfo> {
        self.iter().find(|f| f.time == time)
    }

    /// Occupied flights in ascending time order. Each call starts a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = FlightInfo> + Clone + '_ {
        self.flights.iter().filter_map(|f| {
            f.time.map(|time| FlightInfo {
                time,
                available: f.available,
                capacity: f.capacity,
            })
        })
    }

    /// Index of the earliest flight departing at or after `time`. Never wraps past midnight.
    pub fn find_at_or_after(&self, time: Time) -> Option<usize> {
        self.iter().position(|f| f.time >= time)
    }

    pub(super) fn occupied_mut(&mut self) -> &mut [Flight] {
        let len = self.len();
        &mut self.flights[..len]
    }

    pub(super) fn clear(&mut self) {
        self.flights = [Flight::EMPTY; MAX_FLIGHTS_PER_CITY];
    }

    fn position(&self, time: Time) -> Option<usize> {
        self.flights.iter().position(|f| f.time == Some(time))
    }

    fn sort(&mut self) {
        self.flights.sort_by_key(|f| (f.is_empty(), f.time));
        self.assert_invariants();
    }

    pub(crate) fn assert_invariants(&self) {
        let len = self.len();
        debug_assert!(
            self.flights[len..]
                .iter()
                .all(|f| *f == Flight::EMPTY),
            "Empty slots must trail and carry no seats"
        );
        debug_assert!(
            self.flights[..len].windows(2).all(|fs| fs[0].time < fs[1].time),
            "Flight times must be strictly ascending"
        );
        debug_assert!(
            self.flights.iter().all(|f| f.available <= f.capacity),
            "Available seats exceed capacity"
        );
    }
}
