//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 往返与确定性属性测试

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use oxcoder::serialization::{BincodeCoder, Coder, JsonCoder};
use oxcoder::{CoderConfig, CoderType, Value};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn naive_datetime() -> impl Strategy<Value = NaiveDateTime> {
    (1970i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, mo, d, h, mi, s)| {
            NaiveDate::from_ymd_opt(y, mo, d)
                .unwrap()
                .and_hms_opt(h, mi, s)
                .unwrap()
        },
    )
}

fn aware_datetime() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (naive_datetime(), -720i32..=840).prop_map(|(dt, minutes)| {
        FixedOffset::east_opt(minutes * 60)
            .unwrap()
            .from_local_datetime(&dt)
            .single()
            .unwrap()
    })
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        "\\PC{0,12}".prop_map(Value::String),
        naive_datetime().prop_map(Value::NaiveDateTime),
        aware_datetime().prop_map(Value::DateTime),
        naive_datetime().prop_map(|dt| Value::Date(dt.date())),
        (any::<i64>(), 0u32..=10).prop_map(|(m, scale)| Value::Decimal(Decimal::new(m, scale))),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(Value::Map),
        ]
    })
}

proptest! {
    #[test]
    fn json_round_trip(v in value()) {
        let coder = JsonCoder::new();
        let bytes = coder.encode(&v).unwrap();
        prop_assert_eq!(coder.decode(&bytes).unwrap(), v);
    }

    #[test]
    fn compressed_json_round_trip(v in value()) {
        let coder = JsonCoder::with_compression();
        let bytes = coder.encode(&v).unwrap();
        prop_assert_eq!(coder.decode(&bytes).unwrap(), v);
    }

    #[test]
    fn bincode_round_trip(v in value()) {
        let coder = BincodeCoder::new();
        let bytes = coder.encode(&v).unwrap();
        prop_assert_eq!(coder.decode(&bytes).unwrap(), v);
    }

    #[test]
    fn encoding_is_deterministic(v in value()) {
        let json = JsonCoder::new();
        prop_assert_eq!(json.encode(&v).unwrap(), json.encode(&v.clone()).unwrap());

        let bincode = BincodeCoder::new();
        prop_assert_eq!(bincode.encode(&v).unwrap(), bincode.encode(&v.clone()).unwrap());
    }
}

/// 测试由配置构建的编解码器可互相转换
#[test]
fn test_configured_coders_agree() {
    let when = FixedOffset::west_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .unwrap();
    let value: Value = [
        ("when", Value::from(when)),
        ("amount", Value::Decimal(Decimal::new(10005, 3))),
        ("items", Value::List(vec![Value::from("a"), Value::Integer(2)])),
    ]
    .into_iter()
    .collect();

    let json = CoderConfig::default().build().unwrap();
    let bincode = CoderConfig {
        coder: CoderType::Bincode,
        ..Default::default()
    }
    .build()
    .unwrap();

    let via_json = json.decode(&json.encode(&value).unwrap()).unwrap();
    let via_bincode = bincode.decode(&bincode.encode(&via_json).unwrap()).unwrap();
    assert_eq!(via_bincode, value);
}
