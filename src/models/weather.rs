use serde::{Deserialize, Serialize};

use super::{Timestamped, day_label_from_unix};
use crate::clients::darksky::DarkSkyHour;
use crate::domain::LocationId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    pub forecast: String,
    pub time: String,
    pub created_at: i64,
    pub location_id: LocationId,
}

impl Weather {
    #[must_use]
    pub fn from_forecast(hour: DarkSkyHour, location_id: LocationId, created_at: i64) -> Self {
        Self {
            forecast: hour.summary,
            time: day_label_from_unix(hour.time),
            created_at,
            location_id,
        }
    }
}

impl Timestamped for Weather {
    fn created_at(&self) -> i64 {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_forecast_hour() {
        let hour = DarkSkyHour {
            time: 1_791_979_200,
            summary: "Overcast".to_string(),
        };
        let weather = Weather::from_forecast(hour, LocationId::new(3), 99);
        assert_eq!(weather.forecast, "Overcast");
        assert_eq!(weather.time, "Wed Oct 14 2026");
        assert_eq!(weather.created_at, 99);
        assert_eq!(weather.location_id, LocationId::new(3));
    }
}
