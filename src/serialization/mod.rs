//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了缓存值的编解码机制，支持多种编码格式。

pub mod bincode;
pub mod json;
pub mod lenient;
pub mod tag;

use crate::error::Result;
use crate::value::Value;
use serde::{de::DeserializeOwned, Serialize};

pub use self::bincode::BincodeCoder;
pub use json::JsonCoder;

/// 编解码器特征
///
/// 实现必须是确定性的：相同的值总是产生相同的字节，
/// 并且对所支持的值满足 `decode(encode(v)) == v`。
pub trait Coder: Send + Sync {
    /// 编码值为字节数组
    fn encode(&self, value: &Value) -> Result<Vec<u8>>;

    /// 从字节数组解码值
    fn decode(&self, data: &[u8]) -> Result<Value>;
}

/// 编解码器扩展特征
///
/// 为任意 `Serialize`/`DeserializeOwned` 类型提供便捷方法
pub trait CoderExt: Coder {
    /// 经由通用结构化转换编码任意可序列化对象
    fn encode_serializable<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        self.encode(&Value::from_serializable(value)?)
    }

    /// 解码并反序列化为具体类型
    fn decode_into<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        self.decode(data)?.deserialize_into()
    }
}

impl<C: Coder + ?Sized> CoderExt for C {}

/// 编解码器枚举
///
/// 在配置阶段选定具体策略
#[derive(Clone, Debug)]
pub enum CoderEnum {
    Json(JsonCoder),
    Bincode(BincodeCoder),
}

impl Default for CoderEnum {
    fn default() -> Self {
        CoderEnum::Json(JsonCoder::new())
    }
}

impl Coder for CoderEnum {
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        match self {
            CoderEnum::Json(c) => c.encode(value),
            CoderEnum::Bincode(c) => c.encode(value),
        }
    }

    fn decode(&self, data: &[u8]) -> Result<Value> {
        match self {
            CoderEnum::Json(c) => c.decode(data),
            CoderEnum::Bincode(c) => c.decode(data),
        }
    }
}
