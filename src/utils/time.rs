//! Time utilities: elapsed time since check-in, formatting minutes.

use chrono::{DateTime, Utc};

/// Minutes elapsed between `start` and `now` (never negative).
pub fn minutes_since(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - start).num_minutes().max(0)
}

/// e.g. 145 → "02h 25m"
pub fn mins2readable(mins: i64) -> String {
    let m = mins.abs();
    format!("{:02}h {:02}m", m / 60, m % 60)
}
