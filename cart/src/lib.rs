// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Game Boy cartridge images.

pub mod de;
mod header;

use std::fmt;

use serde::de::Deserialize as _;

pub use header::{CgbSupport, Field, Header};

#[derive(Debug)]
pub enum Error {
    DecodeUtf8(std::str::Utf8Error),
    Deserialize(de::DeserializeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeUtf8(e) => write!(f, "header text is not valid UTF-8: {}", e),
            Self::Deserialize(e) => write!(f, "failed to read cartridge header: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DecodeUtf8(e) => Some(e),
            Self::Deserialize(e) => Some(e),
        }
    }
}

/// A cartridge ROM image.
#[derive(Clone, Copy, Debug)]
pub struct Cartridge<'a> {
    data: &'a [u8],
}

impl<'a> Cartridge<'a> {
    /// The offset of the header within a ROM.
    pub const HEADER_OFFSET: usize = 0x100;

    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Reads the header at its usual offset.
    pub fn header(&self) -> Result<Header, Error> {
        self.header_at(Self::HEADER_OFFSET)
    }

    /// Reads a header beginning `offset` bytes into the image.
    pub fn header_at(&self, offset: usize) -> Result<Header, Error> {
        let input = self.data.get(offset..).unwrap_or_default();
        let mut de = de::Deserializer::from_bytes(input);
        let header = Header::deserialize(&mut de).map_err(Error::Deserialize)?;
        tracing::debug!("Cartridge header at {:#06x}: {:?}", offset, header);

        Ok(header)
    }
}
