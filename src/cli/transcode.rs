use crate::cli::{read_encoded, write_encoded, TranscodeArgs};
use crate::config::CoderConfig;
use crate::serialization::{Coder, CoderEnum};
use anyhow::{Context, Result};
use std::io::{Read, Write};
use tracing::debug;

pub fn execute(
    source: &CoderEnum,
    args: &TranscodeArgs,
    hex: bool,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<()> {
    let target = CoderConfig {
        coder: args.to,
        compress: args.compress,
        ..Default::default()
    }
    .build()?;

    let data = read_encoded(input, hex)?;
    let value = source.decode(&data).context("Failed to decode input")?;
    let encoded = target.encode(&value).context("Failed to encode value")?;
    debug!(from = data.len(), to = encoded.len(), "transcoded");

    write_encoded(output, &encoded, hex)
}
