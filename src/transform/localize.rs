//! Timestamp localization.
//!
//! The PGN tag pairs carry dates as `%Y.%m.%d` and times as `%H:%M:%S`,
//! both anchored in UTC. This module combines one such pair into an
//! instant and re-expresses it in a target IANA timezone. Start and end
//! pairs are localized independently; a game crossing midnight may land
//! on different local calendar dates.

use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::domain::LocalPair;
use crate::error::{PipelineError, Result};

/// Date format of the PGN dialect (`2021.05.01`).
const PGN_DATE_FORMAT: &str = "%Y.%m.%d";
/// Time format, shared by input and output (`22:30:00`).
const TIME_FORMAT: &str = "%H:%M:%S";
/// Output date format (`2021-05-01`).
const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves a timezone identifier against the IANA database.
///
/// # Errors
///
/// Returns [`PipelineError::Timezone`] if the identifier is not a known
/// zone.
pub fn resolve_tz(tz: &str) -> Result<Tz> {
    tz.parse::<Tz>()
        .map_err(|_| PipelineError::Timezone(tz.to_string()))
}

/// Localizes one UTC date/time pair into the target timezone.
///
/// Deterministic: the same input pair and zone always yield the same
/// local pair, and localizing to `UTC` reproduces the input instant.
///
/// # Errors
///
/// Returns [`PipelineError::Format`] if the date or time string does not
/// match the fixed PGN formats.
pub fn localize(utc_date: &str, utc_time: &str, tz: Tz) -> Result<LocalPair> {
    let date = NaiveDate::parse_from_str(utc_date, PGN_DATE_FORMAT).map_err(|_| {
        PipelineError::Format(format!("date {utc_date:?} does not match {PGN_DATE_FORMAT:?}"))
    })?;
    let time = NaiveTime::parse_from_str(utc_time, TIME_FORMAT).map_err(|_| {
        PipelineError::Format(format!("time {utc_time:?} does not match {TIME_FORMAT:?}"))
    })?;

    let local = chrono::Utc
        .from_utc_datetime(&date.and_time(time))
        .with_timezone(&tz);

    Ok(LocalPair {
        date: local.format(LOCAL_DATE_FORMAT).to_string(),
        time: local.format(TIME_FORMAT).to_string(),
    })
}
