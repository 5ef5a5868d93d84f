#[cfg(test)]
mod tests {
    use crate::event::{EventPayload, Organizer};
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;
    use std::collections::HashMap;

    fn organizer(time_zone: &str, locale: &str) -> Organizer {
        Organizer {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            time_zone: time_zone.to_string(),
            locale: locale.to_string(),
        }
    }

    #[test]
    fn translates_known_trigger_keys() {
        assert_eq!(
            organizer("UTC", "en").translate("booking_created"),
            "New booking"
        );
        assert_eq!(
            organizer("UTC", "de").translate("booking_created"),
            "Neue Buchung"
        );
        assert_eq!(
            organizer("UTC", "fr").translate("booking_cancelled"),
            "Réservation annulée"
        );
    }

    #[test]
    fn regional_locale_tags_use_their_language_part() {
        assert_eq!(
            organizer("UTC", "de-CH").translate("booking_rescheduled"),
            "Buchung verschoben"
        );
    }

    #[test]
    fn unknown_locales_fall_back_to_english() {
        assert_eq!(
            organizer("UTC", "xx").translate("meeting_ended"),
            "Meeting ended"
        );
    }

    #[test]
    fn unknown_keys_render_as_themselves() {
        assert_eq!(
            organizer("UTC", "en").translate("recording_ready"),
            "recording_ready"
        );
    }

    #[test]
    fn timezone_parses_valid_ids() {
        assert_eq!(
            organizer("Europe/Zurich", "en").timezone(),
            Tz::Europe__Zurich
        );
    }

    #[test]
    fn invalid_timezone_falls_back_to_utc() {
        assert_eq!(organizer("Not/AZone", "en").timezone(), Tz::UTC);
    }

    #[test]
    fn payload_serializes_with_camel_case_keys_and_skips_unset_fields() {
        let event = EventPayload {
            event_type: "intro-call".to_string(),
            title: "Intro call".to_string(),
            uid: "evt_123".to_string(),
            start_time: Utc.with_ymd_and_hms(2026, 3, 4, 19, 30, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 3, 4, 20, 0, 0).unwrap(),
            organizer: organizer("UTC", "en"),
            attendees: Vec::new(),
            location: None,
            description: None,
            additional_notes: None,
            metadata: HashMap::new(),
            reschedule_uid: None,
            booking_id: None,
            trigger_event: None,
            adjusted_start_time: None,
            adjusted_end_time: None,
        };

        let value = serde_json::to_value(&event).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["type"], "intro-call");
        assert!(object.contains_key("startTime"));
        assert!(object.contains_key("endTime"));
        assert_eq!(object["organizer"]["timeZone"], "UTC");
        assert!(!object.contains_key("rescheduleUid"));
        assert!(!object.contains_key("bookingId"));
        assert!(!object.contains_key("adjustedStartTime"));
        assert!(!object.contains_key("metadata"));
    }
}
