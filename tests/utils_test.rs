use chrono::{Datelike, NaiveDate, Timelike};
use spotetl::utils::*;

#[test]
fn test_clean_text_trims_and_keeps_content() {
    assert_eq!(
        clean_text("  Bohemian Rhapsody  ", MAX_TRACK_NAME_LEN),
        Some("Bohemian Rhapsody".to_string())
    );
}

#[test]
fn test_clean_text_strips_control_characters() {
    assert_eq!(
        clean_text("Track\u{0000}\u{0007} Name\n", MAX_TRACK_NAME_LEN),
        Some("Track Name".to_string())
    );
}

#[test]
fn test_clean_text_empty_and_whitespace_only() {
    assert_eq!(clean_text("", MAX_NAME_LEN), None);
    assert_eq!(clean_text("   \t\n  ", MAX_NAME_LEN), None);
}

#[test]
fn test_clean_text_truncates_to_max_len() {
    let long = "x".repeat(500);

    let track_name = clean_text(&long, MAX_TRACK_NAME_LEN).unwrap();
    assert_eq!(track_name.chars().count(), 300);

    let other_name = clean_text(&long, MAX_NAME_LEN).unwrap();
    assert_eq!(other_name.chars().count(), 200);
}

#[test]
fn test_parse_release_date_day_precision() {
    let date = parse_release_date("1982-06-25", "day").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(1982, 6, 25).unwrap());
}

#[test]
fn test_parse_release_date_month_precision_pins_first_day() {
    let date = parse_release_date("1982-06", "month").unwrap();
    assert_eq!(date, NaiveDate::from_ymd_opt(1982, 6, 1).unwrap());
}

#[test]
fn test_parse_release_date_year_precision_pins_january_first() {
    let date = parse_release_date("1982", "year").unwrap();
    assert_eq!(date.year(), 1982);
    assert_eq!(date.month(), 1);
    assert_eq!(date.day(), 1);
}

#[test]
fn test_parse_release_date_invalid_input() {
    assert_eq!(parse_release_date("not-a-date", "day"), None);
    assert_eq!(parse_release_date("0000", "month"), None);
    assert_eq!(parse_release_date("", "year"), None);
}

#[test]
fn test_parse_played_at_rfc3339() {
    let ts = parse_played_at("2024-03-01T12:34:56.789Z").unwrap();
    assert_eq!(ts.year(), 2024);
    assert_eq!(ts.month(), 3);
    assert_eq!(ts.hour(), 12);
    assert_eq!(ts.second(), 56);
}

#[test]
fn test_parse_played_at_normalizes_to_utc() {
    let ts = parse_played_at("2024-03-01T12:00:00+02:00").unwrap();
    assert_eq!(ts.hour(), 10);
}

#[test]
fn test_parse_played_at_invalid() {
    assert_eq!(parse_played_at("yesterday"), None);
    assert_eq!(parse_played_at(""), None);
}

#[test]
fn test_clamp_unit_range_and_rounding() {
    assert_eq!(clamp_unit(0.5), 0.5);
    assert_eq!(clamp_unit(-0.2), 0.0);
    assert_eq!(clamp_unit(1.7), 1.0);
    assert_eq!(clamp_unit(0.12345), 0.123);
    assert_eq!(clamp_unit(0.9996), 1.0);
}

#[test]
fn test_clamp_tempo_range_and_rounding() {
    assert_eq!(clamp_tempo(120.456), 120.46);
    assert_eq!(clamp_tempo(-10.0), 0.0);
    assert_eq!(clamp_tempo(500.0), 300.0);
}

#[test]
fn test_clamp_loudness_range_and_rounding() {
    assert_eq!(clamp_loudness(-7.123), -7.12);
    assert_eq!(clamp_loudness(-80.0), -60.0);
    assert_eq!(clamp_loudness(3.0), 0.0);
}

#[test]
fn test_parse_retry_after_header_values() {
    assert_eq!(parse_retry_after(Some("30")), 30);
    assert_eq!(parse_retry_after(Some("0")), 0);

    // missing or garbage headers back off instead of retrying immediately
    assert_eq!(parse_retry_after(None), DEFAULT_RETRY_AFTER_SECS);
    assert_eq!(parse_retry_after(Some("soon")), DEFAULT_RETRY_AFTER_SECS);
    assert_eq!(parse_retry_after(Some("")), DEFAULT_RETRY_AFTER_SECS);
    assert!(DEFAULT_RETRY_AFTER_SECS > 0);
}

#[test]
fn test_api_error_message_web_api_body() {
    let body = r#"{"error": {"status": 401, "message": "The access token expired"}}"#;
    assert_eq!(
        api_error_message(body),
        Some("The access token expired".to_string())
    );
}

#[test]
fn test_api_error_message_accounts_body() {
    let body = r#"{"error": "invalid_grant", "error_description": "Refresh token revoked"}"#;
    assert_eq!(
        api_error_message(body),
        Some("Refresh token revoked".to_string())
    );
}

#[test]
fn test_api_error_message_unrecognized_bodies() {
    assert_eq!(api_error_message("<html>502 Bad Gateway</html>"), None);
    assert_eq!(api_error_message(""), None);
    assert_eq!(api_error_message(r#"{"error": "invalid_grant"}"#), None);
}

#[test]
fn test_watermark_to_after_epoch_millis() {
    let ts = parse_played_at("1970-01-01T00:00:01Z").unwrap();
    assert_eq!(watermark_to_after(ts), 1_000);

    let ts = parse_played_at("2024-03-01T00:00:00Z").unwrap();
    assert_eq!(watermark_to_after(ts), 1_709_251_200_000);
}
