pub mod event;
pub mod location;
pub mod movie;
pub mod weather;
pub mod yelp;

use chrono::{DateTime, NaiveDateTime};

/// Records stamped with the time their batch was fetched.
pub trait Timestamped {
    /// Unix milliseconds.
    fn created_at(&self) -> i64;
}

/// Renders a unix-seconds timestamp as a short day label, e.g. `Wed Oct 14 2026`.
#[must_use]
pub fn day_label_from_unix(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0).map_or_else(String::new, |dt| {
        dt.format(DAY_LABEL_FORMAT).to_string()
    })
}

/// Same label for a venue-local ISO wall clock. Unparseable input passes through.
#[must_use]
pub fn day_label_from_local(local: &str) -> String {
    NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S").map_or_else(
        |_| local.to_string(),
        |dt| dt.format(DAY_LABEL_FORMAT).to_string(),
    )
}

const DAY_LABEL_FORMAT: &str = "%a %b %d %Y";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_label_from_unix_uses_utc_day() {
        // 2026-10-14T12:00:00Z
        assert_eq!(day_label_from_unix(1_791_979_200), "Wed Oct 14 2026");
        assert_eq!(day_label_from_unix(0), "Thu Jan 01 1970");
    }

    #[test]
    fn day_label_from_local_parses_wall_clock() {
        assert_eq!(day_label_from_local("2026-10-17T10:00:00"), "Sat Oct 17 2026");
    }

    #[test]
    fn day_label_from_local_passes_through_garbage() {
        assert_eq!(day_label_from_local("sometime soon"), "sometime soon");
    }
}
