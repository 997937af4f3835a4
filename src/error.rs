//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了编解码器的错误类型和处理机制。

use thiserror::Error;

/// 编解码错误类型枚举
///
/// 所有错误都直接返回给调用方，不做重试，也不返回部分结果
#[derive(Error, Debug)]
pub enum CoderError {
    /// 编码错误：值无法在目标格式中表示
    #[error("Encode error: {0}")]
    Encode(String),

    /// 解码错误：输入格式不正确
    #[error("Decode error: {0}")]
    Decode(String),

    /// 无法识别的类型标签
    ///
    /// 通常意味着数据由更新版本写入，不做任何猜测性的恢复
    #[error("Decode error: unknown type tag `{0}`")]
    UnknownTag(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoderError {
    /// 是否属于解码阶段的错误（包括未知标签）
    pub fn is_decode(&self) -> bool {
        matches!(self, CoderError::Decode(_) | CoderError::UnknownTag(_))
    }

    /// 是否属于编码阶段的错误
    pub fn is_encode(&self) -> bool {
        matches!(self, CoderError::Encode(_))
    }
}

/// 编解码操作结果类型别名
pub type Result<T> = std::result::Result<T, CoderError>;
