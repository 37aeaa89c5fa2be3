//! Date handling shared by every resource: turning form input into timestamps
//! and narrowing listings to a calendar window.

mod normalize;
mod range;

pub use normalize::{
    DEFAULT_FORMATS, MalformedDateTimeError, NormalizeOptions, Normalizer, normalize_date_time,
};
pub use range::{DateRange, Timestamped, filter_by_range};
