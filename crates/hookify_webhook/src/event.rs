// --- File: crates/hookify_webhook/src/event.rs ---

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Long locale date-time form used for the organizer-facing adjusted times,
/// e.g. "Mar 4, 2026 2:30 PM".
pub(crate) const LONG_DATETIME_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// Phrase tables for trigger-event localization, keyed by language.
static TRIGGER_PHRASES: Lazy<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        HashMap::from([
            (
                "en",
                HashMap::from([
                    ("booking_created", "New booking"),
                    ("booking_requested", "Booking requested"),
                    ("booking_rescheduled", "Booking rescheduled"),
                    ("booking_cancelled", "Booking cancelled"),
                    ("meeting_began", "Meeting started"),
                    ("meeting_ended", "Meeting ended"),
                ]),
            ),
            (
                "de",
                HashMap::from([
                    ("booking_created", "Neue Buchung"),
                    ("booking_requested", "Buchung angefragt"),
                    ("booking_rescheduled", "Buchung verschoben"),
                    ("booking_cancelled", "Buchung storniert"),
                    ("meeting_began", "Meeting gestartet"),
                    ("meeting_ended", "Meeting beendet"),
                ]),
            ),
            (
                "fr",
                HashMap::from([
                    ("booking_created", "Nouvelle réservation"),
                    ("booking_requested", "Réservation demandée"),
                    ("booking_rescheduled", "Réservation reportée"),
                    ("booking_cancelled", "Réservation annulée"),
                    ("meeting_began", "Réunion commencée"),
                    ("meeting_ended", "Réunion terminée"),
                ]),
            ),
        ])
    });

fn default_locale() -> String {
    "en".to_string()
}

/// The person whose calendar the event lives on. Carries the timezone and
/// locale the adjusted/translated payload fields are derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Organizer {
    pub name: String,
    pub email: String,
    pub time_zone: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Organizer {
    /// Translate a phrase key into the organizer's locale.
    ///
    /// A regional tag like `de-CH` falls back to its language part; unknown
    /// languages fall back to English, and unknown keys render as themselves.
    pub fn translate(&self, key: &str) -> String {
        let lang = self.locale.split(['-', '_']).next().unwrap_or("en");
        TRIGGER_PHRASES
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| TRIGGER_PHRASES.get("en").and_then(|table| table.get(key)))
            .map(|phrase| phrase.to_string())
            .unwrap_or_else(|| key.to_string())
    }

    /// Parse the organizer timezone. Bad ids must not lose the delivery, so
    /// they fall back to UTC.
    pub fn timezone(&self) -> Tz {
        self.time_zone.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "unknown organizer timezone '{}', falling back to UTC",
                self.time_zone
            );
            Tz::UTC
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Attendee {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// A calendar event as handed to the dispatcher by the booking pipeline.
///
/// The trailing optional fields are computed and injected by the dispatcher
/// itself right before template rendering or serialization; callers may leave
/// them unset (any caller-provided values are overwritten).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EventPayload {
    /// Event-type slug of the booked meeting.
    #[serde(rename = "type")]
    pub event_type: String,
    pub title: String,
    pub uid: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub start_time: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub end_time: DateTime<Utc>,
    pub organizer: Organizer,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reschedule_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<i64>,

    // Derived fields, filled in by the dispatcher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_end_time: Option<String>,
}
