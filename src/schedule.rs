//! In-memory schedule core: the slot pool, per-city flight tables, name lookup and seat booking.
//!
//! Nothing here prints or logs; every operation reports through `crate::error::Result`.

mod city_schedule;
mod flight_set;
mod index;
mod pool;
mod seats;

pub use flight_set::MAX_FLIGHTS_PER_CITY;
pub use pool::{DEFAULT_POOL_CAPACITY, SchedulePool};

#[cfg(test)]
pub use city_schedule::CitySchedule;
#[cfg(test)]
pub use pool::SlotState;
