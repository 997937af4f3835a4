//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了CLI命令行接口。
//!
//! 所有命令从标准输入读取、向标准输出写入，便于检查缓存中存储的数据。
//! 人类可读的一侧始终是带类型标签的 JSON。

use crate::config::{CoderConfig, CoderType};
use crate::serialization::CoderEnum;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oxcoder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Path to a TOML coder configuration")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Coder to use (json or bincode), overrides the configuration")]
    pub coder: Option<CoderType>,

    #[arg(long, global = true, help = "Read and write encoded data as hex text")]
    pub hex: bool,

    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(name = "encode", about = "Encode tagged JSON from stdin with the selected coder")]
    Encode,

    #[command(name = "decode", about = "Decode stdin with the selected coder and print tagged JSON")]
    Decode,

    #[command(name = "transcode", about = "Convert encoded data from one coder to another")]
    Transcode(TranscodeArgs),
}

#[derive(Parser, Debug)]
pub struct TranscodeArgs {
    #[arg(long, help = "Target coder (json or bincode)")]
    pub to: CoderType,

    #[arg(long, help = "Compress the target representation (json only)")]
    pub compress: bool,
}

mod decode;
mod encode;
mod transcode;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        crate::utils::setup_logging("debug");
    } else {
        crate::utils::setup_logging("warn");
    }

    let coder = resolve_coder(&cli)?;
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Commands::Encode => encode::execute(&coder, cli.hex, &mut stdin, &mut stdout),
        Commands::Decode => decode::execute(&coder, cli.hex, &mut stdin, &mut stdout),
        Commands::Transcode(args) => {
            transcode::execute(&coder, args, cli.hex, &mut stdin, &mut stdout)
        }
    }
}

/// 合并配置文件与命令行参数，创建编解码器
pub fn resolve_coder(cli: &Cli) -> Result<CoderEnum> {
    let mut config = match &cli.config {
        Some(path) => CoderConfig::from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => CoderConfig::default(),
    };

    if let Some(coder) = cli.coder {
        config.coder = coder;
    }

    Ok(config.build()?)
}

/// 读取编码后的数据，`hex` 为真时按十六进制文本解析
pub(crate) fn read_encoded(input: &mut dyn Read, hex: bool) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    input.read_to_end(&mut data).context("Failed to read input")?;

    if hex {
        let text = std::str::from_utf8(&data).context("Hex input is not valid UTF-8")?;
        return hex::decode(text.trim()).context("Invalid hex input");
    }
    Ok(data)
}

/// 写出编码后的数据，`hex` 为真时输出十六进制文本并换行
pub(crate) fn write_encoded(output: &mut dyn Write, data: &[u8], hex: bool) -> Result<()> {
    if hex {
        writeln!(output, "{}", hex::encode(data))?;
    } else {
        output.write_all(data)?;
    }
    output.flush()?;
    Ok(())
}
