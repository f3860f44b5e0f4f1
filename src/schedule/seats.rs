use crate::error::{Result, ScheduleError};
use crate::schedule::flight_set::FlightSet;
use crate::schedule::pool::SchedulePool;
use crate::time::Time;

impl FlightSet {
    /// Books one seat on the earliest flight at or after `requested` that still has room and
    /// returns that flight's departure time. Earlier flights are never considered.
    pub fn schedule_seat(&mut self, requested: Time) -> Result<Time> {
        let start = self
            .find_at_or_after(requested)
            .ok_or(ScheduleError::NoSeatsAvailable)?;

        let (idx, open) = self
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, f)| f.available > 0)
            .ok_or(ScheduleError::NoSeatsAvailable)?;
        self.occupied_mut()[idx].available -= 1;
        self.assert_invariants();
        Ok(open.time)
    }

    /// Gives back one seat on the flight departing exactly at `time`.
    pub fn unschedule_seat(&mut self, time: Time) -> Result<()> {
        let flight = self
            .occupied_mut()
            .iter_mut()
            .find(|f| f.time == Some(time))
            .ok_or(ScheduleError::NoSuchFlight)?;
        if flight.available >= flight.capacity {
            return Err(ScheduleError::AllSeatsEmpty);
        }
        flight.available += 1;
        self.assert_invariants();
        Ok(())
    }
}

impl SchedulePool {
    pub fn schedule_seat(&mut self, city: &str, requested: Time) -> Result<Time> {
        self.schedule_mut(city)?.flights.schedule_seat(requested)
    }

    pub fn unschedule_seat(&mut self, city: &str, time: Time) -> Result<()> {
        self.schedule_mut(city)?.flights.unschedule_seat(time)
    }
}
