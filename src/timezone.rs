//! Local dates from a canonical timezone name.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `canonical_timezone`, e.g. "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// known timezone.
pub fn local_today(canonical_timezone: &str) -> Result<Date, Error> {
    let Some(offset) = get_local_offset(canonical_timezone) else {
        tracing::error!("Invalid timezone {canonical_timezone}");
        return Err(Error::InvalidTimezoneError(canonical_timezone.to_owned()));
    };

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}
