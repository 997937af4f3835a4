//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了带类型标签的JSON编解码器的实现。

use super::tag::{self, TagType, TAG_KEY};
use super::Coder;
use crate::error::{CoderError, Result};
use crate::value::Value;
use serde_json::{Map, Number, Value as Json};
use tracing::{debug, instrument};

/// 输出中允许的最大容器嵌套层数（数组、对象和标签信封）
///
/// 与 serde_json 解析器的递归上限一致，超过该深度的值无法被读回，编码时即拒绝。
pub const MAX_DEPTH: usize = 127;

/// JSON编解码器
///
/// 输出可移植的 JSON 文本。日期时间、日期和十进制数被包装为类型标签信封，
/// 解码时还原为原来的类型。包含 `_spec_type` 键且取值为
/// `date`/`datetime`/`decimal` 的普通对象会被当作信封解释。
#[derive(Clone, Debug, Default)]
pub struct JsonCoder {
    /// 是否启用压缩
    compress: bool,
}

impl JsonCoder {
    /// 创建新的JSON编解码器
    pub fn new() -> Self {
        Self { compress: false }
    }

    /// 创建启用压缩的JSON编解码器
    pub fn with_compression() -> Self {
        Self { compress: true }
    }

    pub fn is_compressed(&self) -> bool {
        self.compress
    }

    /// 编码为 JSON 文本（不压缩）
    pub fn encode_to_string(&self, value: &Value) -> Result<String> {
        let json = to_tagged_json(value, 1)?;
        serde_json::to_string(&json).map_err(|e| CoderError::Encode(e.to_string()))
    }

    /// 从 JSON 文本解码（不解压）
    pub fn decode_str(&self, text: &str) -> Result<Value> {
        let json: Json =
            serde_json::from_str(text).map_err(|e| CoderError::Decode(e.to_string()))?;
        from_tagged_json(json)
    }
}

impl Coder for JsonCoder {
    /// 编码为JSON字节数组
    ///
    /// # 参数
    ///
    /// * `value` - 要编码的值
    ///
    /// # 返回值
    ///
    /// 返回 UTF-8 JSON 字节（启用压缩时为 gzip 数据）或错误
    #[instrument(skip(self, value), level = "debug", fields(kind = value.kind()))]
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let json_bytes = self.encode_to_string(value)?.into_bytes();
        debug!(len = json_bytes.len(), compress = self.compress, "encoded json");

        if self.compress {
            #[cfg(feature = "flate2")]
            {
                use flate2::write::GzEncoder;
                use flate2::Compression;
                use std::io::Write;

                let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
                encoder
                    .write_all(&json_bytes)
                    .map_err(|e| CoderError::Encode(e.to_string()))?;
                encoder
                    .finish()
                    .map_err(|e| CoderError::Encode(e.to_string()))
            }

            #[cfg(not(feature = "flate2"))]
            {
                Ok(json_bytes)
            }
        } else {
            Ok(json_bytes)
        }
    }

    /// 从JSON字节数组解码
    ///
    /// # 参数
    ///
    /// * `data` - 要解码的字节数组
    ///
    /// # 返回值
    ///
    /// 返回还原后的值；输入格式错误或包含未知标签时返回解码错误
    #[instrument(skip(self, data), level = "debug", fields(len = data.len()))]
    fn decode(&self, data: &[u8]) -> Result<Value> {
        let json_bytes = if self.compress {
            #[cfg(feature = "flate2")]
            {
                use flate2::read::GzDecoder;
                use std::io::Read;

                let mut decoder = GzDecoder::new(data);
                let mut decoded = Vec::new();
                decoder
                    .read_to_end(&mut decoded)
                    .map_err(|e| CoderError::Decode(e.to_string()))?;
                decoded
            }

            #[cfg(not(feature = "flate2"))]
            {
                data.to_vec()
            }
        } else {
            data.to_vec()
        };

        let json: Json =
            serde_json::from_slice(&json_bytes).map_err(|e| CoderError::Decode(e.to_string()))?;
        from_tagged_json(json)
    }
}

/// 将值转换为带标签的 JSON 树
///
/// `depth` 为当前值若是容器时所处的嵌套层数，从 1 开始。
fn to_tagged_json(value: &Value, depth: usize) -> Result<Json> {
    if depth > MAX_DEPTH && is_container(value) {
        return Err(CoderError::Encode(format!(
            "value nesting exceeds {} levels",
            MAX_DEPTH
        )));
    }

    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Integer(i) => Json::from(*i),
        Value::Float(f) => Number::from_f64(*f)
            .map(Json::Number)
            .ok_or_else(|| CoderError::Encode(format!("{} is not representable in JSON", f)))?,
        Value::String(s) => Json::String(s.clone()),
        Value::List(items) => Json::Array(
            items
                .iter()
                .map(|item| to_tagged_json(item, depth + 1))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Map(map) => Json::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), to_tagged_json(v, depth + 1)?)))
                .collect::<Result<Map<_, _>>>()?,
        ),
        // 只看类型是否带时区，UTC 同样输出偏移后缀
        Value::NaiveDateTime(dt) => tag::envelope(
            TagType::DateTime,
            dt.format(tag::NAIVE_DATETIME_FORMAT).to_string(),
        ),
        Value::DateTime(dt) => tag::envelope(
            TagType::DateTime,
            dt.format(tag::AWARE_DATETIME_FORMAT).to_string(),
        ),
        Value::Date(d) => tag::envelope(TagType::Date, d.format(tag::DATE_FORMAT).to_string()),
        Value::Decimal(d) => tag::envelope(TagType::Decimal, d.to_string()),
    })
}

/// 输出为 JSON 数组或对象的值，标签信封也算一层
fn is_container(value: &Value) -> bool {
    !matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Integer(_) | Value::Float(_) | Value::String(_)
    )
}

/// 将 JSON 树还原为值，逐个对象检查类型标签
fn from_tagged_json(json: Json) -> Result<Value> {
    Ok(match json {
        Json::Array(items) => Value::List(
            items
                .into_iter()
                .map(from_tagged_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Json::Object(obj) => {
            if obj.contains_key(TAG_KEY) {
                if let Some(restored) = tag::restore(&obj)? {
                    return Ok(restored);
                }
            }
            Value::Map(
                obj.into_iter()
                    .map(|(k, v)| Ok((k, from_tagged_json(v)?)))
                    .collect::<Result<_>>()?,
            )
        }
        other => Value::from(other),
    })
}
