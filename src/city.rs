use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

pub const MAX_CITY_NAME_LEN: usize = 20;

/// Destination name of a schedule, at most `MAX_CITY_NAME_LEN` characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityName(Arc<str>);

impl CityName {
    /// Normalizes raw input the way the console reads a city: leading non-letters are skipped,
    /// the name is cut at `MAX_CITY_NAME_LEN` characters and trailing whitespace is dropped.
    /// Returns `None` when no letter is present.
    pub fn new(raw: &str) -> Option<CityName> {
        let start = raw.find(|c: char| c.is_ascii_alphabetic())?;
        let bounded: String = raw[start..].chars().take(MAX_CITY_NAME_LEN).collect();
        Some(CityName(Arc::from(bounded.trim_end())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CityName {
    fn eq(&self, other: &str) -> bool {
        *self.0 == *other
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
