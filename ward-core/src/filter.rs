//! Listing filters. Every constraint is optional and they combine with AND.

use crate::dates::{DateRange, Timestamped};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::warn;

/// A record that list filters can inspect.
pub trait Filterable: Timestamped {
    /// Status as stored (e.g. `SCHEDULED`). `None` for entities without a status.
    fn status_label(&self) -> Option<&str> {
        None
    }
    fn patient_id(&self) -> Option<u64> {
        None
    }
    fn doctor_id(&self) -> Option<u64> {
        None
    }
}

/// Raw listing parameters, as typed by the user.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub patient_id: Option<u64>,
    pub doctor_id: Option<u64>,
}

impl ListQuery {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.patient_id.is_none()
            && self.doctor_id.is_none()
    }
}

/// Parsed listing constraints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListFilter {
    /// Upper-cased, trimmed status to match.
    pub status: Option<String>,
    pub range: DateRange,
    pub patient_id: Option<u64>,
    pub doctor_id: Option<u64>,
}

impl ListFilter {
    /// Parses `query`. Blank statuses and malformed boundary dates are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ward_core::filter::{ListFilter, ListQuery};
    /// let query = ListQuery {
    ///     status: Some(" paid ".to_string()),
    ///     from: Some("not a date".to_string()),
    ///     ..Default::default()
    /// };
    /// let filter = ListFilter::from_query(&query, "%Y-%m-%d");
    /// assert_eq!(filter.status.as_deref(), Some("PAID"));
    /// assert!(filter.range.is_unbounded());
    /// ```
    pub fn from_query(query: &ListQuery, boundary_format: &str) -> Self {
        let status = query
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_uppercase);
        Self {
            status,
            range: DateRange::parse_lenient(
                query.from.as_deref(),
                query.to.as_deref(),
                boundary_format,
            ),
            patient_id: query.patient_id,
            doctor_id: query.doctor_id,
        }
    }

    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        if let Some(status) = &self.status {
            let same = record
                .status_label()
                .map(|s| s.eq_ignore_ascii_case(status))
                .unwrap_or(false);
            if !same {
                return false;
            }
        }
        if !self.range.contains(record.timestamp()) {
            return false;
        }
        if let Some(patient_id) = self.patient_id {
            if record.patient_id() != Some(patient_id) {
                return false;
            }
        }
        if let Some(doctor_id) = self.doctor_id {
            if record.doctor_id() != Some(doctor_id) {
                return false;
            }
        }
        true
    }

    /// Keeps matching records in their original order.
    pub fn apply<T: Filterable>(&self, records: Vec<T>) -> Vec<T> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Canonical labels of a status enum, in declaration order.
pub fn status_labels<S: IntoEnumIterator + AsRef<str>>() -> Vec<String> {
    S::iter().map(|s| s.as_ref().to_string()).collect()
}

/// Logs a filter status that no variant of `S` answers to. Such a filter still
/// applies and simply matches nothing.
pub(crate) fn warn_unknown_status<S>(filter: &ListFilter)
where
    S: FromStr + IntoEnumIterator + AsRef<str>,
{
    if let Some(status) = &filter.status {
        if S::from_str(status).is_err() {
            warn!(
                status = %status,
                known = ?status_labels::<S>(),
                "unknown status filter"
            );
        }
    }
}
