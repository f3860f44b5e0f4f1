use crate::city::CityName;
use crate::error::{Result, ScheduleError};
use crate::schedule::city_schedule::CitySchedule;
use crate::schedule::pool::{Handle, SchedulePool};

/// Name lookup over the active list. Nothing is stored besides the pool itself.
impl SchedulePool {
    pub fn find(&self, name: &str) -> Option<Handle> {
        self.iter()
            .find(|(_, s)| s.destination().is_some_and(|d| *d == *name))
            .map(|(h, _)| h)
    }

    pub fn add_city(&mut self, name: CityName) -> Result<Handle> {
        if self.find(name.as_str()).is_some() {
            return Err(ScheduleError::DuplicateCity(name));
        }
        let handle = self.acquire()?;
        self.get_mut(handle)?.destination = Some(name);
        self.assert_invariants();
        Ok(handle)
    }

    pub fn remove_city(&mut self, name: &str) -> Result<()> {
        let handle = self.locate(name)?;
        self.release(handle)
    }

    /// Destination names in the order they were added.
    pub fn list_all(&self) -> impl Iterator<Item = &CityName> + Clone + '_ {
        self.iter().filter_map(|(_, s)| s.destination())
    }

    pub fn schedule(&self, name: &str) -> Result<&CitySchedule> {
        let handle = self.locate(name)?;
        self.get(handle)
    }

    pub fn schedule_mut(&mut self, name: &str) -> Result<&mut CitySchedule> {
        let handle = self.locate(name)?;
        self.get_mut(handle)
    }

    fn locate(&self, name: &str) -> Result<Handle> {
        self.find(name)
            .ok_or_else(|| ScheduleError::UnknownCity(name.to_string()))
    }
}
