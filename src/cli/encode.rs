use crate::cli::write_encoded;
use crate::serialization::{Coder, CoderEnum, JsonCoder};
use anyhow::{Context, Result};
use std::io::{Read, Write};

pub fn execute(
    coder: &CoderEnum,
    hex: bool,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<()> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("Input is not valid UTF-8 JSON")?;

    let value = JsonCoder::new()
        .decode_str(&text)
        .context("Failed to parse tagged JSON input")?;
    let encoded = coder.encode(&value).context("Failed to encode value")?;

    write_encoded(output, &encoded, hex)
}
