//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 宽松日期时间解析测试

use chrono::{NaiveDate, Timelike};
use oxcoder::serialization::lenient::{parse, parse_date, Temporal};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn offset_secs(input: &str) -> i32 {
    match parse(input).unwrap() {
        Temporal::Aware(dt) => dt.offset().local_minus_utc(),
        other => panic!("`{}` should carry an offset, got {:?}", input, other),
    }
}

/// 测试编码器自身输出的两种格式
#[test]
fn test_emitted_formats() {
    assert_eq!(offset_secs("2024-01-02 03:04:05+0000"), 0);
    assert_eq!(offset_secs("2024-01-02 03:04:05-0800"), -8 * 3600);

    match parse("2024-01-02 03:04:05").unwrap() {
        Temporal::Naive(dt) => assert_eq!(dt, day().and_hms_opt(3, 4, 5).unwrap()),
        other => panic!("expected naive datetime, got {:?}", other),
    }
}

/// 测试带偏移的替代格式
#[test]
fn test_alternative_aware_formats() {
    assert_eq!(offset_secs("2024-01-02T03:04:05+05:30"), 19800);
    assert_eq!(offset_secs("2024-01-02T03:04:05Z"), 0);
    assert_eq!(offset_secs("2024-01-02 03:04:05Z"), 0);
    assert_eq!(offset_secs("Tue, 2 Jan 2024 03:04:05 +0000"), 0);
    assert_eq!(offset_secs("  2024-01-02 03:04:05+0100  "), 3600);
}

/// 测试不带偏移的替代格式
#[test]
fn test_alternative_naive_formats() {
    match parse("2024-01-02T03:04:05.123456").unwrap() {
        Temporal::Naive(dt) => {
            assert_eq!(dt.date(), day());
            assert_eq!(dt.nanosecond(), 123_456_000);
        }
        other => panic!("expected naive datetime, got {:?}", other),
    }

    match parse("2024-01-02 03:04").unwrap() {
        Temporal::Naive(dt) => assert_eq!(dt, day().and_hms_opt(3, 4, 0).unwrap()),
        other => panic!("expected naive datetime, got {:?}", other),
    }
}

/// 测试纯日期格式
#[test]
fn test_date_formats() {
    for input in ["2024-01-02", "2024/01/02", "January 2, 2024", "2 January 2024"] {
        assert_eq!(parse(input).unwrap(), Temporal::Date(day()), "{}", input);
    }
}

/// 测试日期解析丢弃时间部分
#[test]
fn test_parse_date_drops_time() {
    assert_eq!(parse_date("2024-01-02 03:04:05").unwrap(), day());
    assert_eq!(parse_date("2024-01-02 03:04:05+0900").unwrap(), day());
}

#[test]
fn test_rejects_unparseable() {
    for input in ["", "tomorrow", "2024-13-45", "03:04:05"] {
        assert!(parse(input).is_err(), "`{}` should not parse", input);
    }
}
