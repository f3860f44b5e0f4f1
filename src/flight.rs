use crate::time::Time;

/// One slot of a schedule's flight table. An empty slot has no time and zero seats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flight {
    pub time: Option<Time>,
    pub capacity: u32,
    pub available: u32,
}

impl Flight {
    pub const EMPTY: Flight = Flight {
        time: None,
        capacity: 0,
        available: 0,
    };

    pub fn new(time: Time, capacity: u32) -> Flight {
        Flight {
            time: Some(time),
            capacity,
            available: capacity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_none()
    }
}

/// Read-only view of an occupied slot, as produced by `FlightSet::iter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightInfo {
    pub time: Time,
    pub available: u32,
    pub capacity: u32,
}

impl FlightInfo {
    pub fn booked(&self) -> u32 {
        self.capacity - self.available
    }
}
