///! Session visit counter
///!
///! A small state machine over two session keys. The first request of a
///! session records a timestamp and starts the counter at 1; later
///! requests bump the counter once more than zero full days have passed.
///! The recorded timestamp is never refreshed, so the counter always
///! measures days elapsed since the session's very first visit.

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;

use crate::session::SessionData;

pub const LAST_VISIT_KEY: &str = "last_visit";
pub const VISITS_KEY: &str = "visits";

/// Stored layout: seconds plus a fractional suffix that is discarded on
/// the way back in.
const LAST_VISIT_WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const LAST_VISIT_READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Apply one visit-tracker transition and return the current count.
///
/// A malformed stored timestamp is surfaced to the caller rather than
/// silently resetting the counter.
pub fn record_visit(session: &mut SessionData, now: NaiveDateTime) -> Result<u32> {
    let last_visit = match session.get(LAST_VISIT_KEY) {
        None => {
            session.insert(
                LAST_VISIT_KEY.to_string(),
                now.format(LAST_VISIT_WRITE_FORMAT).to_string(),
            );
            session.insert(VISITS_KEY.to_string(), "1".to_string());
            return Ok(1);
        }
        Some(raw) => parse_last_visit(raw)?,
    };

    let mut visits = visit_count(session);
    if (now - last_visit).num_days() > 0 {
        visits += 1;
        session.insert(VISITS_KEY.to_string(), visits.to_string());
    }

    Ok(visits)
}

/// Current counter value, 0 for a session that was never tracked.
pub fn visit_count(session: &SessionData) -> u32 {
    session
        .get(VISITS_KEY)
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn parse_last_visit(raw: &str) -> Result<NaiveDateTime> {
    let seconds = raw.split('.').next().unwrap_or(raw);
    NaiveDateTime::parse_from_str(seconds, LAST_VISIT_READ_FORMAT)
        .map_err(|e| anyhow!("unparsable last_visit value '{}': {}", raw, e))
}
