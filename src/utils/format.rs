//! Display formatting for listing columns.

use chrono::{DateTime, Local};
use std::time::SystemTime;

const SIZE_UNITS: [&str; 4] = [" KB", " MB", " GB", " TB"];

/// Renders a byte count the way the details view shows it.
///
/// Starts at KB and rounds any remainder up, so a 1-byte file shows as `1 KB`.
/// A unit is used while the value stays below 10240 of it; anything past the
/// TB range is shown as `> 10 TB`.
pub fn format_size(bytes: u64) -> String {
    let mut denom: u64 = 1024;
    for unit in SIZE_UNITS {
        if bytes < denom * 10240 {
            let quot = bytes / denom;
            let rem = bytes % denom;
            return format!("{}{}", quot + u64::from(rem > 0), unit);
        }
        denom *= 1024;
    }
    "> 10 TB".to_string()
}

/// Renders a modification time in local time, e.g. `2024-03-01 14:05`.
pub fn format_modified(modified: SystemTime) -> String {
    let local: DateTime<Local> = modified.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
