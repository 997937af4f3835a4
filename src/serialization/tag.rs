//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了类型标签信封和转换器注册表。
//!
//! JSON 无法原生表示的类型在编码时被包装为
//! `{"val": <string>, "_spec_type": <type-name>}`，解码时通过注册表还原。

use super::lenient::{self, Temporal};
use crate::error::{CoderError, Result};
use crate::value::Value;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde_json::{Map, Value as Json};
use std::str::FromStr;
use tracing::warn;

/// 类型标签键
pub const TAG_KEY: &str = "_spec_type";
/// 序列化值键
pub const VAL_KEY: &str = "val";

/// 不带时区的日期时间输出格式
pub const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// 带时区的日期时间输出格式
pub const AWARE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";
/// 日期输出格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 可识别的类型标签（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    DateTime,
    Date,
    Decimal,
}

impl TagType {
    pub const ALL: [TagType; 3] = [TagType::DateTime, TagType::Date, TagType::Decimal];

    /// 写入信封的标签名称
    pub fn name(self) -> &'static str {
        match self {
            TagType::DateTime => "datetime",
            TagType::Date => "date",
            TagType::Decimal => "decimal",
        }
    }
}

/// 转换器：标签值字符串 -> 还原后的值
pub type Converter = fn(&str) -> Result<Value>;

/// 转换器注册表
///
/// 编码器写出的每个标签都必须在此注册
static CONVERTERS: [(TagType, Converter); 3] = [
    (TagType::Date, convert_date),
    (TagType::DateTime, convert_datetime),
    (TagType::Decimal, convert_decimal),
];

/// 按名称查找转换器
pub fn converter(name: &str) -> Option<Converter> {
    CONVERTERS
        .iter()
        .find(|(tag, _)| tag.name() == name)
        .map(|(_, convert)| *convert)
}

fn convert_date(val: &str) -> Result<Value> {
    lenient::parse_date(val).map(Value::Date)
}

fn convert_datetime(val: &str) -> Result<Value> {
    Ok(match lenient::parse(val)? {
        Temporal::Aware(dt) => Value::DateTime(dt),
        Temporal::Naive(dt) => Value::NaiveDateTime(dt),
        // 纯日期视为当天零点
        Temporal::Date(d) => Value::NaiveDateTime(d.and_time(NaiveTime::MIN)),
    })
}

fn convert_decimal(val: &str) -> Result<Value> {
    let s = val.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map(Value::Decimal)
        .map_err(|e| CoderError::Decode(format!("invalid decimal `{}`: {}", val, e)))
}

/// 构造标签信封
pub fn envelope(tag: TagType, val: String) -> Json {
    let mut map = Map::new();
    map.insert(VAL_KEY.to_string(), Json::String(val));
    map.insert(TAG_KEY.to_string(), Json::String(tag.name().to_string()));
    Json::Object(map)
}

/// 解码时检查 JSON 对象
///
/// 没有标签或标签为假值（`null`、`false`、`0`、空字符串、空数组、空对象）时返回 `None`，
/// 由调用方按普通对象处理；标签可识别时返回还原后的值；否则返回 [`CoderError::UnknownTag`]。
pub fn restore(obj: &Map<String, Json>) -> Result<Option<Value>> {
    let name = match obj.get(TAG_KEY) {
        None => return Ok(None),
        Some(tag) if is_falsy(tag) => return Ok(None),
        Some(Json::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    let convert = match converter(&name) {
        Some(convert) => convert,
        None => {
            warn!(tag = %name, "unknown type tag in cached payload");
            return Err(CoderError::UnknownTag(name));
        }
    };

    match obj.get(VAL_KEY) {
        Some(Json::String(val)) => convert(val).map(Some),
        Some(other) => Err(CoderError::Decode(format!(
            "`{}` tag expects a string `{}`, got {}",
            name, VAL_KEY, other
        ))),
        None => Err(CoderError::Decode(format!(
            "`{}` tag envelope is missing `{}`",
            name, VAL_KEY
        ))),
    }
}

fn is_falsy(json: &Json) -> bool {
    match json {
        Json::Null => true,
        Json::Bool(b) => !b,
        Json::Number(n) => n.as_f64() == Some(0.0),
        Json::String(s) => s.is_empty(),
        Json::Array(items) => items.is_empty(),
        Json::Object(map) => map.is_empty(),
    }
}
