//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了Bincode编解码器的实现。
//!
//! # 安全
//!
//! 二进制格式只能解码由同一信任域内的编码调用产生的数据，
//! 绝不能用于解码来自外部或不可信来源的字节。
//! 解码不会执行任意代码，但恶意输入可以声明极大的长度字段，
//! 因此解码受 `max_decode_bytes` 限制。

use super::Coder;
use crate::error::{CoderError, Result};
use crate::value::Value;
use ::bincode::Options;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

/// 默认解码上限：64 MiB
pub const DEFAULT_MAX_DECODE_BYTES: u64 = 64 * 1024 * 1024;

/// Bincode编解码器
///
/// 原生的全保真二进制格式：日期时间（含时区偏移和小数秒）、日期和十进制数
/// 无需任何特殊处理即可完整保留。
#[derive(Clone, Debug)]
pub struct BincodeCoder {
    max_decode_bytes: u64,
}

impl BincodeCoder {
    pub fn new() -> Self {
        Self {
            max_decode_bytes: DEFAULT_MAX_DECODE_BYTES,
        }
    }

    /// 创建指定解码上限的编解码器
    pub fn with_limit(max_decode_bytes: u64) -> Self {
        Self { max_decode_bytes }
    }

    pub fn max_decode_bytes(&self) -> u64 {
        self.max_decode_bytes
    }

    /// 直接编码任意可序列化对象，不经过 [`Value`]
    pub fn encode_object<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        ::bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .serialize(value)
            .map_err(|e| CoderError::Encode(e.to_string()))
    }

    /// 直接解码为具体类型，与 [`BincodeCoder::encode_object`] 配对使用
    pub fn decode_object<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        ::bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_limit(self.max_decode_bytes)
            .deserialize(data)
            .map_err(|e| CoderError::Decode(e.to_string()))
    }
}

impl Default for BincodeCoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Coder for BincodeCoder {
    #[instrument(skip(self, value), level = "debug", fields(kind = value.kind()))]
    fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let bytes = self.encode_object(value)?;
        debug!(len = bytes.len(), "encoded bincode");
        Ok(bytes)
    }

    #[instrument(skip(self, data), level = "debug", fields(len = data.len()))]
    fn decode(&self, data: &[u8]) -> Result<Value> {
        self.decode_object(data)
    }
}
