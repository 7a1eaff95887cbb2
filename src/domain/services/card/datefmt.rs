use chrono::{DateTime, Locale, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const DATE_TBD: &str = "Date à confirmer";
pub const TIME_TBD: &str = "Heure à confirmer";
pub const DATE_TIME_TBD: &str = "Date/heure à confirmer";

/// Start of the event as handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum StartsAt {
    Missing,
    At(DateTime<Utc>),
    /// Unvalidated input, e.g. a preview query parameter.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDate {
    pub date: String,
    pub time: String,
}

impl DisplayDate {
    pub fn format(starts_at: &StartsAt, tz: Tz) -> Self {
        match starts_at {
            StartsAt::Missing => Self::to_be_confirmed(),
            StartsAt::At(dt) => Self::from_datetime(*dt, tz),
            StartsAt::Raw(raw) if raw.trim().is_empty() => Self::to_be_confirmed(),
            StartsAt::Raw(raw) => match parse_timestamp(raw.trim(), tz) {
                Some(dt) => Self::from_datetime(dt, tz),
                None => Self {
                    date: DATE_TIME_TBD.to_string(),
                    time: DATE_TIME_TBD.to_string(),
                },
            },
        }
    }

    fn from_datetime(dt: DateTime<Utc>, tz: Tz) -> Self {
        let local = dt.with_timezone(&tz);
        Self {
            date: local.format_localized("%A %-d %B %Y", Locale::fr_FR).to_string(),
            time: local.format("%H:%M").to_string(),
        }
    }

    fn to_be_confirmed() -> Self {
        Self {
            date: DATE_TBD.to_string(),
            time: TIME_TBD.to_string(),
        }
    }
}

/// RFC 3339, or a local wall-clock time in the display timezone.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_french_date() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 14, 14, 30, 0).unwrap();
        let out = DisplayDate::format(&StartsAt::At(dt), chrono_tz::Africa::Kinshasa);
        assert_eq!(out.date, "samedi 14 juin 2025");
        assert_eq!(out.time, "15:30");
    }

    #[test]
    fn test_missing_date_uses_placeholders() {
        let out = DisplayDate::format(&StartsAt::Missing, chrono_tz::UTC);
        assert_eq!(out.date, DATE_TBD);
        assert_eq!(out.time, TIME_TBD);

        let blank = DisplayDate::format(&StartsAt::Raw("  ".into()), chrono_tz::UTC);
        assert_eq!(blank.date, DATE_TBD);
    }

    #[test]
    fn test_unparseable_date() {
        let out = DisplayDate::format(&StartsAt::Raw("next saturday".into()), chrono_tz::UTC);
        assert_eq!(out.date, DATE_TIME_TBD);
        assert_eq!(out.time, DATE_TIME_TBD);
    }

    #[test]
    fn test_raw_rfc3339_and_local() {
        let rfc = DisplayDate::format(&StartsAt::Raw("2025-06-14T15:30:00+01:00".into()), chrono_tz::Africa::Kinshasa);
        assert_eq!(rfc.time, "15:30");
        let local = DisplayDate::format(&StartsAt::Raw("2025-06-14T18:00".into()), chrono_tz::Africa::Kinshasa);
        assert_eq!(local.time, "18:00");
        assert_eq!(local.date, "samedi 14 juin 2025");
    }
}
