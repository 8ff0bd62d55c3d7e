// SPDX-License-Identifier: MPL-2.0

//! Run configuration, taken from the command line.
//!
//! ```text
//! disas <ROM> [START] [COUNT] [--opcodes <PATH>] [--bytes]
//! ```

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{anyhow, bail, Context as _};

use crate::{disas, Table};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The ROM image to disassemble.
    pub rom: PathBuf,
    /// The address of the first instruction.
    pub start: usize,
    /// The maximum number of instructions to list.
    pub count: usize,
    /// An opcode table to use instead of the bundled one.
    pub opcodes: Option<PathBuf>,
    /// Whether to list the encoded bytes of each instruction.
    pub bytes: bool,
}

impl Config {
    /// The first address past the cartridge header.
    pub const DEFAULT_START: usize = 0x150;
    pub const DEFAULT_COUNT: usize = 320;

    pub fn new(rom: impl Into<PathBuf>) -> Self {
        Self {
            rom: rom.into(),
            start: Self::DEFAULT_START,
            count: Self::DEFAULT_COUNT,
            opcodes: None,
            bytes: false,
        }
    }

    /// Parses command-line arguments, not including the program name.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut args = args.into_iter();
        let mut positional = Vec::new();
        let mut opcodes = None;
        let mut bytes = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--opcodes" => {
                    let path = args.next().context("expected a path after '--opcodes'")?;
                    opcodes = Some(PathBuf::from(path));
                }
                "--bytes" => {
                    bytes = true;
                }
                flag if flag.starts_with("--") => {
                    bail!("unknown option '{}'", flag);
                }
                _ => {
                    positional.push(arg);
                }
            }
        }

        let mut positional = positional.into_iter();
        let rom = positional.next().context("expected ROM filepath")?;
        let mut config = Self::new(rom);
        config.opcodes = opcodes;
        config.bytes = bytes;

        if let Some(start) = positional.next() {
            config.start = parse_addr(&start)?;
        }
        if let Some(count) = positional.next() {
            config.count = count
                .parse()
                .with_context(|| format!("'{}' is not an instruction count", count))?;
        }
        if let Some(extra) = positional.next() {
            bail!("unexpected argument '{}'", extra);
        }

        Ok(config)
    }

    /// Loads the opcode table this configuration names.
    pub fn table(&self) -> anyhow::Result<Table> {
        match self.opcodes.as_ref() {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open '{}'", path.display()))?;
                Table::from_reader(BufReader::new(file))
                    .with_context(|| format!("Failed to load '{}'", path.display()))
            }
            None => Table::bundled().context("Failed to load the bundled opcode table"),
        }
    }

    pub fn options(&self) -> disas::Options {
        disas::Options { bytes: self.bytes }
    }
}

/// Parses a hexadecimal address, with or without a `0x` or `$` prefix.
fn parse_addr(arg: &str) -> anyhow::Result<usize> {
    let digits = arg
        .strip_prefix("0x")
        .or_else(|| arg.strip_prefix("0X"))
        .or_else(|| arg.strip_prefix('$'))
        .unwrap_or(arg);

    usize::from_str_radix(digits, 16).map_err(|_| anyhow!("'{}' is not a hexadecimal address", arg))
}
