//! Guide timestamps and TGD display times.
//!
//! Guide timestamps are always UTC, written as `YYYYMMDDHHMMSS +0000`. TGD
//! files want local wall clock times, computed here by adding a fixed offset
//! ([`DisplayOffset::GUIDE`]) rather than consulting a timezone database.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::GuideError;

/// Suffix every guide timestamp carries. Other offsets are not accepted.
pub const GUIDE_TIMESTAMP_SUFFIX: &str = " +0000";

/// `strftime` pattern for the start column of a TGD line.
pub const DISPLAY_DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// `strftime` pattern for TGD file names.
pub const FILENAME_FORMAT: &str = "%Y%m%d.tgd";

/// Fixed offset from UTC used to compute local display times.
///
/// This is not a real timezone: the same offset applies all year round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayOffset {
    seconds: i64,
}

impl DisplayOffset {
    /// +11:00, the offset TGD times have always been written in.
    pub const GUIDE: DisplayOffset = DisplayOffset {
        seconds: 36000 + 3600,
    };

    /// Create an offset of `seconds` east of UTC.
    pub const fn from_seconds(seconds: i64) -> DisplayOffset {
        DisplayOffset { seconds }
    }

    /// Offset in seconds east of UTC.
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    /// Wall clock time at this offset for a UTC instant.
    pub fn apply(self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.naive_utc() + Duration::seconds(self.seconds)
    }
}

impl Default for DisplayOffset {
    fn default() -> Self {
        DisplayOffset::GUIDE
    }
}

fn all_digits(text: &str, len: usize) -> bool {
    text.len() == len && text.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a guide timestamp: 14 digits, a space and `+0000`.
///
/// ```
/// use icetgd::time::parse_guide_timestamp;
///
/// let start = parse_guide_timestamp("20091030110000 +0000")?;
/// assert_eq!("2009-10-30 11:00:00 UTC", start.to_string());
/// assert!(parse_guide_timestamp("20091030110000 +1100").is_err());
/// # Ok::<(), icetgd::GuideError>(())
/// ```
pub fn parse_guide_timestamp(text: &str) -> Result<DateTime<Utc>, GuideError> {
    let malformed = || GuideError::MalformedTimestamp {
        text: text.to_string(),
    };
    let digits = text
        .strip_suffix(GUIDE_TIMESTAMP_SUFFIX)
        .filter(|digits| all_digits(digits, 14))
        .ok_or_else(malformed)?;
    let naive = NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M%S").map_err(|_| malformed())?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Parse the 8 digit `YYYYMMDD` date of a `previously-shown` element.
pub fn parse_previously_shown_date(text: &str) -> Result<NaiveDate, GuideError> {
    let malformed = || GuideError::MalformedTimestamp {
        text: text.to_string(),
    };
    if !all_digits(text, 8) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(text, "%Y%m%d").map_err(|_| malformed())
}

/// Local display time for a UTC instant, using [`DisplayOffset::GUIDE`].
pub fn to_local_display(instant: DateTime<Utc>) -> NaiveDateTime {
    DisplayOffset::GUIDE.apply(instant)
}

/// `YYYY/MM/DD HH:MM` local display time of a UTC instant.
pub fn format_display_datetime(instant: DateTime<Utc>) -> String {
    to_local_display(instant)
        .format(DISPLAY_DATETIME_FORMAT)
        .to_string()
}

/// Whole minutes from `start` to `stop`, truncated, as a decimal string.
///
/// Fails with [`GuideError::InvalidInterval`] when `stop` is before `start`.
pub fn format_duration_minutes(
    start: DateTime<Utc>,
    stop: DateTime<Utc>,
) -> Result<String, GuideError> {
    if stop < start {
        return Err(GuideError::InvalidInterval { start, stop });
    }
    Ok(stop.signed_duration_since(start).num_minutes().to_string())
}

/// `YYYYMMDD.tgd`, named for the local display date of a UTC instant.
pub fn filename_for_date(instant: DateTime<Utc>) -> String {
    to_local_display(instant).format(FILENAME_FORMAT).to_string()
}

/// Short date form used in repeat annotations, ex: `09/17/09`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%x").to_string()
}
