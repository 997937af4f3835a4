//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了编解码器的配置结构和解析逻辑。

use crate::error::{CoderError, Result};
use crate::serialization::bincode::DEFAULT_MAX_DECODE_BYTES;
use crate::serialization::{BincodeCoder, CoderEnum, JsonCoder};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

pub const CONFIG_VERSION: u32 = 1;
pub const CONFIG_VERSION_FIELD: &str = "config_version";

/// 编解码器类型枚举
///
/// 支持JSON和Bincode两种编码方式
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CoderType {
    /// 带类型标签的JSON编码
    #[default]
    Json,
    /// Bincode二进制编码，只用于可信数据
    Bincode,
}

impl FromStr for CoderType {
    type Err = CoderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(CoderType::Json),
            "bincode" => Ok(CoderType::Bincode),
            other => Err(CoderError::Config(format!(
                "unknown coder `{}`, expected `json` or `bincode`",
                other
            ))),
        }
    }
}

/// 编解码器配置
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CoderConfig {
    #[serde(default)]
    pub config_version: Option<u32>,
    /// 编解码器类型
    #[serde(default)]
    pub coder: CoderType,
    /// 是否压缩（仅JSON编解码器支持）
    #[serde(default)]
    pub compress: bool,
    /// Bincode解码的最大字节数
    #[serde(default = "default_max_decode_bytes")]
    pub max_decode_bytes: u64,
}

fn default_max_decode_bytes() -> u64 {
    DEFAULT_MAX_DECODE_BYTES
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self {
            config_version: None,
            coder: CoderType::Json,
            compress: false,
            max_decode_bytes: DEFAULT_MAX_DECODE_BYTES,
        }
    }
}

impl CoderConfig {
    /// 从TOML字符串解析并验证配置
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: CoderConfig =
            toml::from_str(s).map_err(|e| CoderError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从TOML文件加载配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        if let Some(version) = self.config_version {
            if version > CONFIG_VERSION {
                return Err(CoderError::Config(format!(
                    "Configuration version {} is not supported. Current version is {}.",
                    version, CONFIG_VERSION
                )));
            }
        }

        if self.max_decode_bytes == 0 {
            return Err(CoderError::Config(
                "max_decode_bytes cannot be zero".to_string(),
            ));
        }

        if self.compress && self.coder != CoderType::Json {
            return Err(CoderError::Config(
                "compression is only supported by the json coder".to_string(),
            ));
        }

        Ok(())
    }

    /// 按配置创建编解码器
    pub fn build(&self) -> Result<CoderEnum> {
        self.validate()?;

        Ok(match self.coder {
            CoderType::Json if self.compress => CoderEnum::Json(JsonCoder::with_compression()),
            CoderType::Json => CoderEnum::Json(JsonCoder::new()),
            CoderType::Bincode => CoderEnum::Bincode(BincodeCoder::with_limit(self.max_decode_bytes)),
        })
    }
}
