use crate::city::CityName;
use crate::flight::FlightInfo;
use crate::schedule::{SchedulePool, SlotState};
use crate::time::Time;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::collections::HashSet;

pub fn city(name: &str) -> CityName {
    CityName::new(name).unwrap()
}

pub fn t(minutes: u16) -> Time {
    Time::new(minutes).unwrap()
}

pub fn add_city(pool: &mut SchedulePool, name: &str, flights: &[(u16, u32)]) {
    pool.add_city(city(name)).unwrap();
    let schedule = pool.schedule_mut(name).unwrap();
    for (time, capacity) in flights {
        schedule.flights.add(t(*time), *capacity).unwrap();
    }
}

pub fn flights(pool: &SchedulePool, name: &str) -> Vec<(u16, u32, u32)> {
    pool.schedule(name)
        .unwrap()
        .flights
        .iter()
        .map(|FlightInfo { time, available, capacity }| (time.minutes(), available, capacity))
        .collect()
}

pub fn names(pool: &SchedulePool) -> Vec<String> {
    pool.list_all().map(|c| c.to_string()).collect()
}

/// Checks the pool's structural invariants from the outside, through its public surface only.
pub fn check_pool(pool: &SchedulePool) -> Result<(), String> {
    let free = pool.walk(SlotState::Free).collect::<Vec<usize>>();
    let active = pool.walk(SlotState::Active).collect::<Vec<usize>>();

    if free.len() + active.len() != pool.capacity() {
        return Err(format!(
            "free {} + active {} != capacity {}",
            free.len(),
            active.len(),
            pool.capacity()
        ));
    }
    if free.len() != pool.free_len() || active.len() != pool.active_len() {
        return Err("list counters out of sync".to_string());
    }

    let members = free.iter().chain(active.iter()).collect::<HashSet<_>>();
    if members.len() != pool.capacity() {
        return Err("slot linked twice".to_string());
    }
    if free.iter().any(|i| pool.state(*i) != Some(SlotState::Free))
        || active.iter().any(|i| pool.state(*i) != Some(SlotState::Active))
    {
        return Err("slot state disagrees with list".to_string());
    }

    let mut seen = HashSet::new();
    for (_, schedule) in pool.iter() {
        if let Some(name) = schedule.destination() {
            if !seen.insert(name.clone()) {
                return Err(format!("duplicate destination {}", name));
            }
        }
        let listed = schedule.flights.iter().collect::<Vec<_>>();
        if listed.len() != schedule.flights.len() {
            return Err("occupied flights do not form a prefix".to_string());
        }
        if !listed.windows(2).all(|w| w[0].time < w[1].time) {
            return Err(format!("flights not ascending: {:?}", listed));
        }
        if listed.iter().any(|f| f.available > f.capacity) {
            return Err(format!("available above capacity: {:?}", listed));
        }
    }
    Ok(())
}

pub fn arb_city() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Toronto"),
        Just("Ottawa"),
        Just("Halifax"),
        Just("Calgary"),
    ]
}

pub fn arb_time() -> impl Strategy<Value = Time> {
    prop_oneof![
        Just(t(0)),
        Just(t(360)),
        Just(t(720)),
        Just(t(1000)),
        Just(t(1439)),
        (0..=1439u16).prop_map(t),
    ]
}
