use crate::error::{Result, ScheduleError};
use std::str::FromStr;

/// Minute of the day, always within `Time::MIN..=Time::MAX`.
///
/// An empty flight slot has no time at all and is modelled as `Option<Time>::None`.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash)]
pub struct Time(u16);

impl Time {
    #[cfg(test)]
    pub const MIN: Time = Time(0);
    pub const MAX: Time = Time(24 * 60 - 1);

    pub fn new(minutes: u16) -> Result<Time> {
        if minutes > Self::MAX.0 {
            return Err(ScheduleError::InvalidTime);
        }
        Ok(Time(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for Time {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        // wider than u16 so "-1" and overflow both land on InvalidTime
        let raw = s.trim().parse::<i64>().map_err(|_| ScheduleError::InvalidTime)?;
        u16::try_from(raw)
            .map_err(|_| ScheduleError::InvalidTime)
            .and_then(Time::new)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.0 / 60;
        let mins = self.0 % 60;
        write!(f, "{:02}:{:02}", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(Time::MIN, Time::new(0).unwrap());
        assert_eq!(Time::MAX, Time::new(1439).unwrap());
        assert_eq!(Err(ScheduleError::InvalidTime), Time::new(1440));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Ok(Time(360)), " 360 ".parse::<Time>());
        assert_eq!(Err(ScheduleError::InvalidTime), "-1".parse::<Time>());
        assert_eq!(Err(ScheduleError::InvalidTime), "1440".parse::<Time>());
        assert_eq!(Err(ScheduleError::InvalidTime), "noon".parse::<Time>());
        assert_eq!(Err(ScheduleError::InvalidTime), "99999999999".parse::<Time>());
    }

    #[test]
    fn test_display() {
        assert_eq!("06:00", Time(360).to_string());
        assert_eq!("23:59", Time::MAX.to_string());
    }
}
