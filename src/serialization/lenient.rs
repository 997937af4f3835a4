//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 宽松的日期时间解析器。
//!
//! 除了 JSON 编码器自身输出的两种格式外，还接受常见的替代写法：
//! ISO 8601（`T` 分隔）、小数秒、`+HH:MM` 偏移、`Z` 后缀、RFC 2822、
//! `YYYY/MM/DD`、紧凑的 `YYYYMMDD` 以及英文月份名称。

use crate::error::{CoderError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// 带时区偏移的格式，按顺序尝试
const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y/%m/%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y%m%dT%H%M%S",
    "%d %B %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// 解析结果：保留输入中是否携带时区、是否携带时间的信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temporal {
    Aware(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
    Date(NaiveDate),
}

impl Temporal {
    /// 丢弃时间部分，带时区的值取其本地日期
    pub fn date(self) -> NaiveDate {
        match self {
            Temporal::Aware(dt) => dt.date_naive(),
            Temporal::Naive(dt) => dt.date(),
            Temporal::Date(d) => d,
        }
    }
}

/// 解析日期/时间字符串
///
/// 依次尝试 RFC 3339、RFC 2822、带偏移格式、无偏移格式和纯日期格式，
/// 第一个完整匹配的格式胜出。
pub fn parse(input: &str) -> Result<Temporal> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Temporal::Aware(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(Temporal::Aware(dt));
    }

    let zulu = normalize_zulu(s);
    let with_offset = zulu.as_deref().unwrap_or(s);
    if let Some(dt) = AWARE_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(with_offset, fmt).ok())
    {
        return Ok(Temporal::Aware(dt));
    }

    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(Temporal::Naive(dt));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(Temporal::Date)
        .ok_or_else(|| CoderError::Decode(format!("unrecognized date/time `{}`", input)))
}

/// 解析为日期，日期时间输入只保留日期部分
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    parse(input).map(Temporal::date)
}

/// `...Z` 改写为 `...+0000`，供 `%z` 格式匹配
fn normalize_zulu(s: &str) -> Option<String> {
    s.strip_suffix(['Z', 'z'])
        .filter(|rest| rest.ends_with(|c: char| c.is_ascii_digit()))
        .map(|rest| format!("{}+0000", rest))
}
