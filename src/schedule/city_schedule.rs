use crate::city::CityName;
use crate::schedule::flight_set::FlightSet;

/// A pool slot's payload. Free slots have no destination and no flights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitySchedule {
    pub(super) destination: Option<CityName>,
    pub flights: FlightSet,
}

impl CitySchedule {
    pub fn destination(&self) -> Option<&CityName> {
        self.destination.as_ref()
    }

    pub(super) fn reset(&mut self) {
        self.destination = None;
        self.flights.clear();
    }
}
