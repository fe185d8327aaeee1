use serde::{Deserialize, Serialize};

use super::{Timestamped, day_label_from_local};
use crate::clients::eventbrite::EventbriteEvent;
use crate::domain::LocationId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub link: String,
    pub name: String,
    pub date: String,
    pub summary: String,
    pub created_at: i64,
    pub location_id: LocationId,
}

impl Event {
    #[must_use]
    pub fn from_eventbrite(
        event: EventbriteEvent,
        location_id: LocationId,
        created_at: i64,
    ) -> Self {
        Self {
            link: event.url,
            name: event.name.text.unwrap_or_default(),
            date: day_label_from_local(&event.start.local),
            summary: event.description.text.unwrap_or_default(),
            created_at,
            location_id,
        }
    }
}

impl Timestamped for Event {
    fn created_at(&self) -> i64 {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::eventbrite::{EventTime, MultipartText};

    #[test]
    fn normalizes_eventbrite_event() {
        let raw = EventbriteEvent {
            url: "https://www.eventbrite.com/e/1".to_string(),
            name: MultipartText {
                text: Some("Harvest Fair".to_string()),
            },
            start: EventTime {
                local: "2026-10-17T10:00:00".to_string(),
            },
            description: MultipartText { text: None },
        };

        let event = Event::from_eventbrite(raw, LocationId::new(1), 5);
        assert_eq!(event.link, "https://www.eventbrite.com/e/1");
        assert_eq!(event.name, "Harvest Fair");
        assert_eq!(event.date, "Sat Oct 17 2026");
        assert_eq!(event.summary, "");
    }
}
