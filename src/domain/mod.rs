//! Domain primitives shared by the store, the services and the HTTP layer.
//!
//! Location ids travel through every resource request, so they get a newtype
//! to keep them apart from row ids and vote counts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identifier of a geocoded [`Location`](crate::models::location::Location).
///
/// # Examples
///
/// ```rust
/// use geoscout::domain::LocationId;
///
/// let id = LocationId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LocationId(i32);

impl LocationId {
    /// # Panics
    ///
    /// Panics in debug mode if `id` is negative. Request handlers validate
    /// before construction.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "LocationId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LocationId> for i32 {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

impl From<i32> for LocationId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for LocationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// A point on the map, as handed back by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The cached resource types. Each maps to one table and one upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Weather,
    Events,
    Yelps,
    Movies,
}

impl ResourceKind {
    /// Table name, which is also the route and the metrics label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Events => "events",
            Self::Yelps => "yelps",
            Self::Movies => "movies",
        }
    }

    /// Human-readable name of the upstream service, used in error messages.
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::Weather => "Dark Sky",
            Self::Events => "Eventbrite",
            Self::Yelps => "Yelp",
            Self::Movies => "TMDB",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Weather, Self::Events, Self::Yelps, Self::Movies]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-to-live for a resource's cached batch.
///
/// A batch whose age equals the TTL is still fresh; strictly older is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ttl(Duration);

impl Ttl {
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    #[must_use]
    pub fn as_millis(&self) -> i64 {
        i64::try_from(self.0.as_millis()).unwrap_or(i64::MAX)
    }

    /// Whether a batch stamped at `created_at` has outlived this TTL at `now`.
    /// Both timestamps are unix milliseconds.
    #[must_use]
    pub fn is_expired(&self, created_at: i64, now: i64) -> bool {
        now.saturating_sub(created_at) > self.as_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_id_conversions() {
        let id = LocationId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i32::from(id), 42);
        assert_eq!(LocationId::from(42), id);
    }

    #[test]
    fn location_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&LocationId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: LocationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LocationId::new(7));
    }

    #[test]
    fn resource_kind_names_match_tables() {
        let names: Vec<&str> = ResourceKind::all().iter().map(ResourceKind::as_str).collect();
        assert_eq!(names, vec!["weather", "events", "yelps", "movies"]);
        assert_eq!(ResourceKind::Yelps.to_string(), "yelps");
    }

    #[test]
    fn ttl_boundary_is_inclusive() {
        let ttl = Ttl::from_millis(15_000);
        let now = 1_000_000;
        assert!(!ttl.is_expired(now - 15_000, now));
        assert!(ttl.is_expired(now - 15_001, now));
        assert!(ttl.is_expired(now - 20_000, now));
        assert!(!ttl.is_expired(now, now));
    }

    #[test]
    fn ttl_tolerates_future_timestamps() {
        let ttl = Ttl::from_secs(15);
        assert!(!ttl.is_expired(2_000_000, 1_000_000));
    }
}
