use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

/// Anything carrying an optional moment a [`DateRange`] can be checked against.
pub trait Timestamped {
    fn timestamp(&self) -> Option<NaiveDateTime>;
}

/// An inclusive calendar-date window. Either side may be open.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Builds a range from raw boundary strings.
    ///
    /// A side that is absent, blank, or does not render back exactly through `format`
    /// is left open.
    /// Malformed input never blocks a listing; it only loses that side of the filter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::NaiveDate;
    /// # use ward_core::dates::DateRange;
    /// let range = DateRange::parse_lenient(Some("2024-01-10"), Some("31/01/2024"), "%Y-%m-%d");
    /// assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 1, 10));
    /// assert_eq!(range.to, None);
    /// ```
    pub fn parse_lenient(from: Option<&str>, to: Option<&str>, format: &str) -> Self {
        Self {
            from: parse_boundary("from", from, format),
            to: parse_boundary("to", to, format),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether a record stamped `timestamp` falls inside the window.
    ///
    /// Only the date part is compared. With either side present, an absent
    /// timestamp never matches; a fully open range matches everything.
    pub fn contains(&self, timestamp: Option<NaiveDateTime>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = timestamp.map(|t| t.date()) else {
            return false;
        };
        let after_from = self.from.map(|from| date >= from).unwrap_or(true);
        let before_to = self.to.map(|to| date <= to).unwrap_or(true);
        after_from && before_to
    }
}

/// Keeps the records whose timestamp lies inside `range`, preserving their order.
///
/// # Examples
///
/// ```
/// # use chrono::{NaiveDate, NaiveDateTime};
/// # use ward_core::dates::{DateRange, Timestamped, filter_by_range};
/// struct Visit(Option<NaiveDateTime>);
/// impl Timestamped for Visit {
///     fn timestamp(&self) -> Option<NaiveDateTime> {
///         self.0
///     }
/// }
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(9, 0, 0);
/// let visits = vec![Visit(day(1)), Visit(day(15)), Visit(None)];
/// let range = DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 10), None);
///
/// let kept = filter_by_range(visits, &range);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].0, day(15));
/// ```
pub fn filter_by_range<T: Timestamped>(records: Vec<T>, range: &DateRange) -> Vec<T> {
    if range.is_unbounded() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| range.contains(r.timestamp()))
        .collect()
}

fn parse_boundary(side: &str, raw: Option<&str>, format: &str) -> Option<NaiveDate> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match NaiveDate::parse_from_str(raw, format) {
        // chrono also accepts short fields here. Keep exact renderings only.
        Ok(date) if date.format(format).to_string() == raw => Some(date),
        Ok(date) => {
            warn!(side, input = raw, parsed = %date, "ignoring boundary date in the wrong shape");
            None
        }
        Err(error) => {
            warn!(side, input = raw, %error, "ignoring malformed boundary date");
            None
        }
    }
}
