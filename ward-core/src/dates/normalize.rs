use chrono::{NaiveDate, NaiveDateTime, NaiveTime, ParseError};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Templates tried in order once the meridiem pre-check has not produced a value.
pub const DEFAULT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %-H:%M",
    "%Y-%m-%d %-I:%M %p",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%dT%-I:%M %p",
    "%Y-%m-%dT%I:%M %p",
];

/// Last resort, tried after the generic ISO parse.
const WITH_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static ISO_DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]{1,9})?$").unwrap()
});

static MERIDIEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4}-[0-9]{2}-[0-9]{2})[ T]+([0-9]{1,2}):([0-9]{2})\s*([AaPp][Mm])").unwrap()
});

/// Raised when none of the parse strategies accept the input.
#[derive(Debug, Error)]
#[error("unrecognised date-time '{input}'")]
pub struct MalformedDateTimeError {
    /// The value exactly as it was received.
    pub input: String,
    /// Diagnostic from the last strategy that got as far as `chrono`. `None` when
    /// every candidate parsed but had the wrong shape.
    #[source]
    pub source: Option<ParseError>,
}

/// Configuration options for [`normalize_date_time`].
#[derive(Copy, Clone, Debug, Default)]
pub struct NormalizeOptions<'a> {
    /// `chrono` templates replacing [`DEFAULT_FORMATS`].
    pub formats: Option<&'a [&'a str]>,
}

/// Turns a loosely formatted date-time, as submitted by a browser picker, into a
/// `NaiveDateTime`.
///
/// Strategies, first success wins:
/// 1.  **Clean-up**: trim, strip one pair of surrounding single quotes, collapse
///     whitespace runs into one space.
/// 2.  **Meridiem pre-check**: when the value mentions `AM`/`PM` (any case), look for
///     `YYYY-MM-DD[ T]H:MM AM|PM` anywhere in it and convert to 24-hour time.
///     A miss here falls through rather than failing.
/// 3.  **Templates**: each entry of `formats` (default [`DEFAULT_FORMATS`]).
/// 4.  **ISO**: `chrono`'s own parser, for values shaped `YYYY-MM-DDTHH:MM:SS[.f]`.
/// 5.  **Seconds**: `YYYY-MM-DDTHH:MM:SS`.
///
/// Templates match field widths exactly: `2024-3-5 10:00`, `2024-03-15 10:5` and
/// `2024-03-1510:00` are all rejected.
///
/// # Arguments
///
/// * `raw` - The user-entered value (e.g. `"'2024-03-15 2:30 PM'"`).
/// * `options` - An optional [`NormalizeOptions`]. If `None`, defaults are used.
///
/// # Errors
///
/// [`MalformedDateTimeError`] carrying `raw` and the last parse diagnostic.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use ward_core::dates::normalize_date_time;
/// let afternoon = normalize_date_time("2024-03-15 2:30 PM", None).unwrap();
/// assert_eq!(
///     afternoon,
///     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(14, 30, 0).unwrap()
/// );
///
/// let midnight = normalize_date_time("'2024-03-15T12:00 AM'", None).unwrap();
/// assert_eq!(
///     midnight,
///     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(0, 0, 0).unwrap()
/// );
///
/// assert!(normalize_date_time("not-a-date", None).is_err());
/// ```
pub fn normalize_date_time(
    raw: &str,
    options: Option<NormalizeOptions>,
) -> Result<NaiveDateTime, MalformedDateTimeError> {
    let options = options.unwrap_or_default();
    let formats = options.formats.unwrap_or(DEFAULT_FORMATS);
    let value = clean_up(raw);

    if mentions_meridiem(&value) {
        if let Some(dt) = parse_meridiem(&value) {
            debug!(input = raw, "date-time matched meridiem pre-check");
            return Ok(dt);
        }
    }

    let mut last_error = None;
    for fmt in formats {
        match parse_exact(&value, fmt) {
            Ok(dt) => {
                debug!(input = raw, format = *fmt, "date-time matched template");
                return Ok(dt);
            }
            Err(error) => last_error = error.or(last_error),
        }
    }

    if ISO_DATE_TIME.is_match(&value) {
        match value.parse::<NaiveDateTime>() {
            Ok(dt) => {
                debug!(input = raw, "date-time matched ISO parse");
                return Ok(dt);
            }
            Err(error) => last_error = Some(error),
        }
    }

    parse_exact(&value, WITH_SECONDS_FORMAT).map_err(|error| MalformedDateTimeError {
        input: raw.to_string(),
        source: error.or(last_error),
    })
}

/// Owns a configured template list so services can normalize repeatedly.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    formats: Option<Vec<String>>,
}

impl Normalizer {
    /// `None` keeps [`DEFAULT_FORMATS`].
    pub fn new(formats: Option<Vec<String>>) -> Self {
        Self { formats }
    }

    pub fn normalize(&self, raw: &str) -> Result<NaiveDateTime, MalformedDateTimeError> {
        let format_strs: Option<Vec<&str>> = self
            .formats
            .as_ref()
            .map(|formats| formats.iter().map(AsRef::as_ref).collect());
        let opts = NormalizeOptions {
            formats: format_strs.as_deref(),
        };
        normalize_date_time(raw, Some(opts))
    }
}

/// `parse_from_str` tolerates short numeric fields, missing spaces and a signed
/// year. Only values that render back to the same text are accepted.
fn parse_exact(value: &str, fmt: &str) -> Result<NaiveDateTime, Option<ParseError>> {
    let dt = NaiveDateTime::parse_from_str(value, fmt).map_err(Some)?;
    if dt.format(fmt).to_string().eq_ignore_ascii_case(value) {
        Ok(dt)
    } else {
        Err(None)
    }
}

fn clean_up(raw: &str) -> String {
    let mut value = raw.trim();
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        value = value[1..value.len() - 1].trim();
    }
    WHITESPACE.replace_all(value, " ").into_owned()
}

fn mentions_meridiem(value: &str) -> bool {
    let upper = value.to_ascii_uppercase();
    upper.contains("AM") || upper.contains("PM")
}

fn parse_meridiem(value: &str) -> Option<NaiveDateTime> {
    let spaced = value.replace('T', " ");
    let caps = MERIDIEM.captures(spaced.trim())?;

    let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()?;
    let mut hour: u32 = caps[2].parse().ok()?;
    let minute: u32 = caps[3].parse().ok()?;
    let meridiem = caps[4].to_ascii_uppercase();

    if meridiem == "PM" && hour < 12 {
        hour += 12;
    }
    if meridiem == "AM" && hour == 12 {
        hour = 0;
    }
    // Out-of-range clock values fall through to the templates.
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(NaiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn twenty_four_hour_with_t_or_space() {
        assert_eq!(
            normalize_date_time("2024-03-15T14:45", None).unwrap(),
            dt(2024, 3, 15, 14, 45)
        );
        assert_eq!(
            normalize_date_time("2024-03-15 07:05", None).unwrap(),
            dt(2024, 3, 15, 7, 5)
        );
        assert_eq!(
            normalize_date_time("2024-03-15 7:05", None).unwrap(),
            dt(2024, 3, 15, 7, 5)
        );
    }

    #[test]
    fn twelve_hour_variants() {
        let expected = dt(2024, 3, 15, 14, 30);
        for raw in [
            "2024-03-15 2:30 PM",
            "2024-03-15 02:30 PM",
            "2024-03-15T2:30 PM",
            "2024-03-15T02:30PM",
            "2024-03-15 2:30 pm",
            "'2024-03-15 2:30 PM'",
            "  2024-03-15    2:30 \t PM  ",
            "  ' 2024-03-15\n2:30   PM '  ",
        ] {
            assert_eq!(normalize_date_time(raw, None).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn noon_and_midnight() {
        assert_eq!(
            normalize_date_time("'2024-03-15T12:00 AM'", None).unwrap(),
            dt(2024, 3, 15, 0, 0)
        );
        assert_eq!(
            normalize_date_time("2024-03-15 12:15 PM", None).unwrap(),
            dt(2024, 3, 15, 12, 15)
        );
        assert_eq!(
            normalize_date_time("2024-03-15 9:05 am", None).unwrap(),
            dt(2024, 3, 15, 9, 5)
        );
    }

    #[test]
    fn pm_on_an_afternoon_hour_is_kept_as_is() {
        assert_eq!(
            normalize_date_time("2024-03-15 13:30 PM", None).unwrap(),
            dt(2024, 3, 15, 13, 30)
        );
    }

    #[test]
    fn seconds_are_accepted() {
        let parsed = normalize_date_time("2024-03-15T14:45:30", None).unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(14, 45, 30)
                .unwrap()
        );
    }

    #[test]
    fn garbage_is_rejected_with_original_input() {
        let err = normalize_date_time("not-a-date", None).unwrap_err();
        assert_eq!(err.input, "not-a-date");
        assert!(err.source.is_some());

        let err = normalize_date_time("  'tomorrow at 5pm' ", None).unwrap_err();
        assert_eq!(err.input, "  'tomorrow at 5pm' ");
    }

    #[test]
    fn near_miss_shapes_are_rejected() {
        for raw in [
            "2024-3-5 10:00",
            "2024-03-5 10:00",
            "2024-03-15 10:5",
            "2024-03-1510:00",
            "2024-03-15T 10:00",
            "2024-03-15 1:5 PM",
            "+2024-03-15 10:00",
            "24-03-15 10:00",
            "2024-03-15T10:00:5",
            "2024-03-15 10:00:00",
            "2024/03/15 10:00",
        ] {
            let err = normalize_date_time(raw, None).unwrap_err();
            assert_eq!(err.input, raw);
        }
    }

    #[test]
    fn custom_formats_are_held_to_their_shape() {
        let fmts = &["%d/%m/%Y %H:%M"];
        let opts = Some(NormalizeOptions {
            formats: Some(fmts),
        });
        assert!(normalize_date_time("15/03/2024 09:30", opts).is_ok());
        assert!(normalize_date_time("15/3/2024 09:30", opts).is_err());
        assert!(normalize_date_time("15/03/2024 9:30", opts).is_err());
    }

    #[test]
    fn impossible_calendar_values_are_rejected() {
        assert!(normalize_date_time("2024-02-30 10:00", None).is_err());
        assert!(normalize_date_time("2024-03-15 25:00", None).is_err());
        assert!(normalize_date_time("2024-03-15 10:75 AM", None).is_err());
        assert!(normalize_date_time("", None).is_err());
        assert!(normalize_date_time("'", None).is_err());
    }

    #[test]
    fn canonical_output_round_trips() {
        for value in [
            dt(2024, 1, 1, 0, 0),
            dt(2024, 2, 29, 12, 0),
            dt(2024, 12, 31, 23, 59),
            dt(1999, 7, 4, 9, 5),
        ] {
            let text = value.format("%Y-%m-%dT%H:%M").to_string();
            assert_eq!(normalize_date_time(&text, None).unwrap(), value);
        }
    }

    #[test]
    fn custom_formats_replace_templates() {
        let fmts = &["%d/%m/%Y %H:%M"];
        let opts = Some(NormalizeOptions {
            formats: Some(fmts),
        });
        assert_eq!(
            normalize_date_time("15/03/2024 09:30", opts).unwrap(),
            dt(2024, 3, 15, 9, 30)
        );
        // Meridiem pre-check still runs ahead of custom templates.
        assert_eq!(
            normalize_date_time("2024-03-15 9:30 PM", opts).unwrap(),
            dt(2024, 3, 15, 21, 30)
        );
        // Default templates are no longer consulted.
        assert!(normalize_date_time("2024-03-15 09:30", opts).is_err());
    }

    #[test]
    fn normalizer_holds_configured_formats() {
        let default = Normalizer::default();
        assert_eq!(
            default.normalize("2024-03-15 09:30").unwrap(),
            dt(2024, 3, 15, 9, 30)
        );

        let custom = Normalizer::new(Some(vec!["%d.%m.%Y %H:%M".to_string()]));
        assert_eq!(
            custom.normalize("15.03.2024 09:30").unwrap(),
            dt(2024, 3, 15, 9, 30)
        );
        assert!(custom.normalize("2024-03-15 09:30").is_err());
    }
}
