//! UTC timestamp helpers
use hifitime::{Epoch, TimeScale};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("expecting \"yyyy-mm-ddThh:mm:ss[.sss]Z\" format, got \"{0}\"")]
    FormatMismatch(String),
    #[error("failed to parse date fields from \"{0}\"")]
    DateFields(String),
    #[error("failed to parse time fields from \"{0}\"")]
    TimeFields(String),
    #[error("timestamp out of range: \"{0}\"")]
    OutOfRange(String),
}

/*
 * Infaillible `Epoch::now()` call.
 */
pub(crate) fn now() -> Epoch {
    Epoch::now().unwrap_or(Epoch::from_gregorian_utc_at_midnight(2000, 1, 1))
}

/// Conventional expiry of a notice whose effective end is `"PERM"`.
pub(crate) fn permanent() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2999, 1, 1)
}

/// Parses one feed timestamp, `"2024-01-25T14:00:00.000Z"` style,
/// or the literal `"PERM"`.
pub(crate) fn parse_timestamp(content: &str) -> Result<Epoch, ParsingError> {
    let trimmed = content.trim();
    if trimmed.eq("PERM") {
        return Ok(permanent());
    }

    let stripped = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    let (date, time) = stripped
        .split_once('T')
        .ok_or_else(|| ParsingError::FormatMismatch(content.to_string()))?;

    let mut ymd = date.split('-');
    let (y, m, d) = match (ymd.next(), ymd.next(), ymd.next(), ymd.next()) {
        (Some(y), Some(m), Some(d), None) => (
            y.parse::<i32>()
                .map_err(|_| ParsingError::DateFields(content.to_string()))?,
            m.parse::<u8>()
                .map_err(|_| ParsingError::DateFields(content.to_string()))?,
            d.parse::<u8>()
                .map_err(|_| ParsingError::DateFields(content.to_string()))?,
        ),
        _ => return Err(ParsingError::FormatMismatch(content.to_string())),
    };

    let mut hms = time.split(':');
    let (hh, mm, sec) = match (hms.next(), hms.next(), hms.next(), hms.next()) {
        (Some(hh), Some(mm), Some(sec), None) => (
            hh.parse::<u8>()
                .map_err(|_| ParsingError::TimeFields(content.to_string()))?,
            mm.parse::<u8>()
                .map_err(|_| ParsingError::TimeFields(content.to_string()))?,
            sec,
        ),
        _ => return Err(ParsingError::FormatMismatch(content.to_string())),
    };

    let (ss, ns) = match sec.split_once('.') {
        Some((ss, frac)) => {
            let ss = ss
                .parse::<u8>()
                .map_err(|_| ParsingError::TimeFields(content.to_string()))?;
            // fractional digits beyond nanosecond resolution are dropped
            let frac = if frac.len() > 9 { &frac[..9] } else { frac };
            let ns = frac
                .parse::<u32>()
                .map_err(|_| ParsingError::TimeFields(content.to_string()))?
                * 10_u32.pow(9 - frac.len() as u32);
            (ss, ns)
        },
        None => (
            sec.parse::<u8>()
                .map_err(|_| ParsingError::TimeFields(content.to_string()))?,
            0,
        ),
    };

    Epoch::maybe_from_gregorian(y, m, d, hh, mm, ss, ns, TimeScale::UTC)
        .map_err(|_| ParsingError::OutOfRange(content.to_string()))
}
