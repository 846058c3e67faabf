//! Time parsing and formatting utilities

use crate::error::{ReelcutError, ReelcutResult};
use crate::ranges::TimeRange;

/// Parse a time string to seconds. Accepts plain seconds, MM:SS[.ms], and
/// HH:MM:SS[.ms].
pub fn parse_time(time_str: &str) -> ReelcutResult<f64> {
    let time_str = time_str.trim();

    if let Ok(seconds) = time_str.parse::<f64>() {
        if seconds < 0.0 {
            return Err(ReelcutError::InvalidTimeFormat {
                time: time_str.to_string(),
            });
        }
        return Ok(seconds);
    }

    let parts: Vec<&str> = time_str.split(':').collect();
    let parsed: Option<Vec<f64>> = parts.iter().map(|p| p.parse::<f64>().ok()).collect();
    let parsed = parsed.ok_or_else(|| ReelcutError::InvalidTimeFormat {
        time: time_str.to_string(),
    })?;

    match parsed.as_slice() {
        [minutes, seconds] if *seconds < 60.0 => Ok(minutes * 60.0 + seconds),
        [hours, minutes, seconds] if *minutes < 60.0 && *seconds < 60.0 => {
            Ok(hours * 3600.0 + minutes * 60.0 + seconds)
        }
        _ => Err(ReelcutError::InvalidTimeFormat {
            time: time_str.to_string(),
        }),
    }
}

/// Parse a comma-separated list of `start-end` ranges, e.g. `0-2,5.5-7`.
pub fn parse_ranges(input: &str) -> ReelcutResult<Vec<TimeRange>> {
    let mut ranges = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (start_str, end_str) =
            part.split_once('-')
                .ok_or_else(|| ReelcutError::InvalidTimeFormat {
                    time: part.to_string(),
                })?;
        let start = parse_time(start_str)?;
        let end = parse_time(end_str)?;
        if start >= end {
            return Err(ReelcutError::InvalidTimeRange { start, end });
        }
        ranges.push(TimeRange::new(start, end));
    }
    Ok(ranges)
}

/// Format seconds as HH:MM:SS.ms (hours omitted when zero).
pub fn format_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u32;
    let minutes = ((seconds % 3600.0) / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    let milliseconds = ((seconds % 1.0) * 1000.0).round() as u32;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, milliseconds)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, secs, milliseconds)
    }
}
