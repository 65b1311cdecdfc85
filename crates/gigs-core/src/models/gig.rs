use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gig {
    /// Server-assigned identifier, absent until the gig has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    #[serde(rename = "dueDate", with = "iso8601")]
    pub due_date: DateTime<Utc>,
}

impl Gig {
    pub fn new(title: impl Into<String>, description: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            due_date,
        }
    }

    pub fn formatted_due_date(&self) -> String {
        self.due_date.format("%b %d, %Y").to_string()
    }

    pub fn is_overdue(&self) -> bool {
        self.due_date < Utc::now()
    }
}

/// ISO-8601 timestamps as the service writes them: whole seconds, `Z` suffix.
/// Decoding accepts any RFC 3339 value and normalizes it to UTC.
pub(crate) mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid ISO-8601 date {:?}: {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_gig_serializes_camel_case_without_id() {
        let due = Utc.with_ymd_and_hms(2019, 6, 19, 15, 30, 0).unwrap();
        let gig = Gig::new("Logo", "Design a logo", due);

        let json = serde_json::to_value(&gig).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Logo",
                "description": "Design a logo",
                "dueDate": "2019-06-19T15:30:00Z"
            })
        );
    }

    #[test]
    fn test_gig_deserializes_offsets_and_fractional_seconds() {
        let json = r#"{"id": 7, "title": "Site", "description": "Build it", "dueDate": "2019-06-19T17:30:00.250+02:00"}"#;
        let gig: Gig = serde_json::from_str(json).unwrap();

        assert_eq!(gig.id, Some(7));
        assert_eq!(gig.title, "Site");
        assert_eq!(gig.due_date, Utc.with_ymd_and_hms(2019, 6, 19, 15, 30, 0).unwrap() + Duration::milliseconds(250));
    }

    #[test]
    fn test_gig_rejects_malformed_date() {
        let json = r#"{"title": "Site", "description": "Build it", "dueDate": "next tuesday"}"#;
        let err = serde_json::from_str::<Gig>(json).unwrap_err();
        assert!(err.to_string().contains("invalid ISO-8601 date"));
    }

    #[test]
    fn test_formatted_due_date() {
        let gig = Gig::new("a", "b", Utc.with_ymd_and_hms(2019, 6, 9, 0, 0, 0).unwrap());
        assert_eq!(gig.formatted_due_date(), "Jun 09, 2019");
    }

    #[test]
    fn test_is_overdue() {
        let past = Gig::new("a", "b", Utc::now() - Duration::days(1));
        let future = Gig::new("a", "b", Utc::now() + Duration::days(1));
        assert!(past.is_overdue());
        assert!(!future.is_overdue());
    }
}
