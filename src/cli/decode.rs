use crate::cli::read_encoded;
use crate::serialization::{Coder, CoderEnum, JsonCoder};
use anyhow::{Context, Result};
use std::io::{Read, Write};

pub fn execute(
    coder: &CoderEnum,
    hex: bool,
    input: &mut dyn Read,
    output: &mut dyn Write,
) -> Result<()> {
    let data = read_encoded(input, hex)?;
    let value = coder.decode(&data).context("Failed to decode input")?;
    let text = JsonCoder::new()
        .encode_to_string(&value)
        .context("Decoded value cannot be shown as JSON")?;

    writeln!(output, "{}", text)?;
    Ok(())
}
