//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存值的动态数据模型。
//!
//! [`Value`] 是所有编解码器共用的输入输出类型。除 JSON 原生类型外，
//! 它还能表示带/不带时区的日期时间、日期和精确十进制数。

use crate::error::{CoderError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;

/// 动态缓存值
///
/// 映射使用 `BTreeMap`，保证相同的值总是产生相同的编码结果。
/// 派生的 serde 实现即二进制编码器使用的原生格式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// 不带时区的日期时间
    NaiveDateTime(NaiveDateTime),
    /// 带固定时区偏移的日期时间（包括 UTC）
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
    Decimal(#[serde(with = "decimal_bytes")] Decimal),
}

impl Value {
    /// 将任意可序列化对象转换为 [`Value`]
    ///
    /// 通用的结构化转换：结构体和映射转为 `Map`，序列和元组转为 `List`，
    /// 单元枚举变体转为字符串，逐层递归。
    ///
    /// 注意：嵌套在结构体中的 chrono/decimal 字段通过 serde 以字符串形式输出，
    /// 因此会以普通字符串的形式进入 `Value`。需要保留类型时请直接构造对应变体。
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Value::from)
            .map_err(|e| CoderError::Encode(e.to_string()))
    }

    /// 将值反序列化为具体类型
    ///
    /// 先转换为普通 JSON（见 [`Value::to_plain_json`]），再交给 serde 处理。
    pub fn deserialize_into<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.to_plain_json()).map_err(|e| CoderError::Decode(e.to_string()))
    }

    /// 转换为不带类型标签的普通 JSON
    ///
    /// 带时区的日期时间输出为 RFC 3339，不带时区的输出为 ISO 8601，
    /// 十进制数输出为字符串。这些形式都能被 chrono 和 rust_decimal 的 serde 实现直接读取。
    /// 非有限浮点数输出为 `null`。
    pub fn to_plain_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Integer(i) => Json::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_plain_json).collect()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_plain_json()))
                    .collect(),
            ),
            Value::NaiveDateTime(dt) => Json::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            Value::DateTime(dt) => Json::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            Value::Date(d) => Json::String(d.format("%Y-%m-%d").to_string()),
            Value::Decimal(d) => Json::String(d.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// 值的类型名称，用于日志
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::NaiveDateTime(_) | Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Decimal(_) => "decimal",
        }
    }
}

/// 纯结构化转换，不解释类型标签
///
/// 超出 `i64` 范围的整数按浮点数处理。
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Integer,
    i16 => Integer,
    i32 => Integer,
    i64 => Integer,
    u8 => Integer,
    u16 => Integer,
    u32 => Integer,
    f32 => Float,
    f64 => Float,
    String => String,
    &str => String,
    Vec<Value> => List,
    BTreeMap<String, Value> => Map,
    NaiveDateTime => NaiveDateTime,
    DateTime<FixedOffset> => DateTime,
    NaiveDate => Date,
    Decimal => Decimal,
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt.fixed_offset())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// 十进制数的原生二进制表示：rust_decimal 的 16 字节定长格式
mod decimal_bytes {
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const MAX_SCALE: u8 = 28;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        Decimal::serialize(value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let bytes = <[u8; 16]>::deserialize(deserializer)?;
        // 标志位第三个字节为小数位数
        if bytes[2] > MAX_SCALE {
            return Err(D::Error::custom(format!(
                "decimal scale {} exceeds {}",
                bytes[2], MAX_SCALE
            )));
        }
        Ok(Decimal::deserialize(bytes))
    }
}
