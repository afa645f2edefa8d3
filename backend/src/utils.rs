use chrono::{DateTime, Utc};
use serde_json::Value;

/// Parse an ISO8601 timestamp as returned by the YouTube API
pub fn parse_iso8601(date_str: &str) -> Option<DateTime<Utc>> {
    if date_str.is_empty() {
        return None;
    }
    date_str.parse::<DateTime<Utc>>().ok()
}

/// Parse ISO8601 duration string (PT1H2M3S, P1DT2H) to total seconds
pub fn parse_iso8601_duration_to_seconds(duration_str: &str) -> i64 {
    let Some(duration_part) = duration_str.strip_prefix('P') else {
        return 0;
    };

    let mut total_seconds = 0.0;
    let mut current_number = String::new();
    let mut in_time = false;

    for ch in duration_part.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            current_number.push(ch);
            continue;
        }
        if ch == 'T' {
            in_time = true;
        } else if let Ok(num) = current_number.parse::<f64>() {
            match (ch, in_time) {
                ('D', false) => total_seconds += num * 86400.0,
                ('H', true) => total_seconds += num * 3600.0,
                ('M', true) => total_seconds += num * 60.0,
                ('S', true) => total_seconds += num,
                _ => {}
            }
        }
        current_number.clear();
    }

    total_seconds as i64
}

/// Statistics arrive as decimal strings; hidden or absent counters read as 0.
pub fn parse_count(value: &Value) -> u64 {
    match value {
        Value::String(s) => s.parse().unwrap_or(0),
        Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

pub fn str_field(value: &Value) -> String {
    value.as_str().unwrap_or("").to_string()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
