//! # clock
//!
//! why: stamp menus in one fixed timezone regardless of where the planner runs
//! relations: used by builder.rs for at_date, printable.rs for generation time
//! what: default zone, timestamp formats, now_in

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// the kitchen's zone
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Jerusalem;

/// format of `at_date` and the printable generation line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// current wall-clock time in `tz`
pub fn now_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

pub fn format_timestamp(at: &DateTime<Tz>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
