use chrono::{DateTime, NaiveDate, Utc};

/// Maximum stored length for track names; other names are capped at 200.
pub const MAX_TRACK_NAME_LEN: usize = 300;
pub const MAX_NAME_LEN: usize = 200;

/// Cleans a free-text field for storage: trims whitespace, drops control
/// characters, and truncates to `max_len` characters. Returns `None` when
/// nothing printable remains.
pub fn clean_text(raw: &str, max_len: usize) -> Option<String> {
    let cleaned: String = raw.trim().chars().filter(|c| !c.is_control()).collect();
    if cleaned.is_empty() {
        return None;
    }
    Some(cleaned.chars().take(max_len).collect())
}

/// Parses a Spotify release date according to its declared precision.
///
/// Spotify reports `year` (e.g. "1982"), `month` ("1982-06") or `day`
/// ("1982-06-25"). Coarser precisions are pinned to the first day of the
/// period. Unparseable input yields `None` and the column stays NULL.
pub fn parse_release_date(raw: &str, precision: &str) -> Option<NaiveDate> {
    match precision {
        "year" => raw
            .parse::<i32>()
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)),
        "month" => {
            let mut parts = raw.splitn(2, '-');
            let year = parts.next()?.parse::<i32>().ok()?;
            let month = parts.next()?.parse::<u32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1)
        }
        _ => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
    }
}

/// Parses a `played_at` timestamp as reported by the recently-played
/// endpoint (RFC 3339, UTC).
pub fn parse_played_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Clamps a 0-1 audio descriptor into range and rounds to 3 decimal places.
pub fn clamp_unit(value: f64) -> f64 {
    round_to(value.clamp(0.0, 1.0), 3)
}

/// Clamps tempo into the plausible 0-300 BPM range, rounded to 2 decimals.
pub fn clamp_tempo(value: f64) -> f64 {
    round_to(value.clamp(0.0, 300.0), 2)
}

/// Clamps loudness into the typical -60..0 dB range, rounded to 2 decimals.
pub fn clamp_loudness(value: f64) -> f64 {
    round_to(value.clamp(-60.0, 0.0), 2)
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Converts a watermark timestamp into the exclusive `after` cursor the
/// recently-played endpoint expects (Unix epoch milliseconds).
pub fn watermark_to_after(watermark: DateTime<Utc>) -> i64 {
    watermark.timestamp_millis()
}

/// Backoff applied when a 429 response carries no usable `Retry-After`
/// header; retrying immediately would hammer an API that just rate-limited
/// us.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

/// Parses a `Retry-After` header value into seconds, falling back to
/// [`DEFAULT_RETRY_AFTER_SECS`] when the header is missing or unparseable.
pub fn parse_retry_after(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Extracts the human-readable message from a Spotify error body.
///
/// The Web API wraps errors as `{"error": {"status": ..., "message": ...}}`;
/// the accounts service uses `{"error": ..., "error_description": ...}`.
/// Returns `None` for anything else, including non-JSON bodies.
pub fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(message) = value.pointer("/error/message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    value
        .get("error_description")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
