//! oxcoder - 缓存值编解码库
//!
//! 提供两种可互换的编解码策略：保留日期时间、日期和十进制类型的
//! 带标签 JSON 编解码器，以及全保真的 Bincode 二进制编解码器。

#![doc(html_root_url = "https://docs.rs/oxcoder/0.1.0")]

pub use serde;
pub use serde::{Deserialize, Serialize};
pub use serde_json;

pub mod cli;
pub mod config;
pub mod error;
pub mod serialization;
pub mod utils;
pub mod value;

// Re-export commonly used items
pub use config::{CoderConfig, CoderType};
pub use error::{CoderError, Result};
pub use serialization::{BincodeCoder, Coder, CoderEnum, CoderExt, JsonCoder};
pub use value::Value;

/// oxcoder 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
