// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod config;
pub mod log;

use std::{io, path::Path};

use anyhow::Context as _;

pub use config::Config;
pub use gbdis_cart::{self as cart, Cartridge, Header};
pub use gbdis_cpu::{self as cpu, disas, Decoder, Table};

/// A ROM image loaded into memory.
pub struct Rom {
    data: Vec<u8>,
}

impl Rom {
    /// The address at which execution begins after the boot ROM.
    pub const ENTRY: usize = 0x100;

    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        gbdis_util::read_file(path).map(Self::new)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn cartridge(&self) -> Cartridge<'_> {
        Cartridge::new(&self.data)
    }

    pub fn header(&self) -> Result<Header, cart::Error> {
        self.cartridge().header()
    }

    pub fn decoder<'a>(&'a self, table: &'a Table) -> Decoder<'a> {
        Decoder::new(&self.data, table)
    }
}

/// Disassembles the ROM named by `config`, writing the listing to `w`.
pub fn run(config: &Config, w: &mut impl io::Write) -> anyhow::Result<disas::Summary> {
    let table = config.table()?;
    let rom = Rom::from_path(&config.rom)?;

    // The header is informational only; plenty of test ROMs are too small to have one.
    match rom.header() {
        Ok(header) => {
            tracing::info!(
                "{} (type {:#04x}, {:?} CGB support)",
                header.title_str().unwrap_or("<garbled title>"),
                header.cartridge_type,
                header.cgb_support(),
            );
        }
        Err(e) => {
            tracing::warn!("{}", e);
        }
    }

    rom.decoder(&table)
        .disassemble_with(config.options(), config.start, config.count, w)
        .with_context(|| format!("Failed to disassemble '{}'", config.rom.display()))
}
