// SPDX-License-Identifier: MPL-2.0

use std::fmt;

use derivative::Derivative;
use serde::Deserialize;

use crate::Error;

/// The cartridge header, found at `0x100..0x150` of every ROM.
///
/// Multi-byte fields are read little-endian.
#[derive(Clone, Derivative, Deserialize, Eq, PartialEq)]
#[derivative(Debug)]
pub struct Header {
    /// `0x100..0x104`, normally a jump to the start of the program.
    #[derivative(Debug = "ignore")]
    _entry_point: [u8; 4],
    /// `0x104..0x134`, the boot logo.
    #[derivative(Debug = "ignore")]
    #[serde(with = "serde_arrays")]
    _logo: [u8; 48],
    /// `0x134..0x143`, the title in upper-case ASCII, padded with NULs.
    ///
    /// Later cartridges use the tail of this field for a manufacturer code.
    #[derivative(Debug(format_with = "fmt_title"))]
    pub title: [u8; 15],
    /// `0x143`, which doubles as the last byte of the title on older cartridges.
    pub cgb: u8,
    /// `0x144..0x146`.
    pub new_licensee_code: u16,
    /// `0x146`.
    pub sgb: u8,
    /// `0x147`, which selects the memory bank controller and other cartridge hardware.
    pub cartridge_type: u8,
    /// `0x148`.
    pub rom_size: u8,
    /// `0x149`.
    pub ram_size: u8,
    /// `0x14A`.
    pub destination_code: u8,
    /// `0x14B`. A value of `0x33` defers to [`Self::new_licensee_code`].
    pub old_licensee_code: u8,
    /// `0x14C`.
    pub mask_rom_version: u8,
    /// `0x14D`.
    pub header_checksum: u8,
    /// `0x14E..0x150`.
    pub global_checksum: u16,
}

fn fmt_title(title: &[u8; 15], f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "b\"{}\"", title.escape_ascii())
}

/// How a cartridge supports the Game Boy Color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CgbSupport {
    /// The cartridge predates the Game Boy Color.
    None,
    /// The cartridge runs on both the Game Boy and the Game Boy Color.
    Compatible,
    /// The cartridge runs on the Game Boy Color only.
    Only,
}

/// A header field value, as returned by [`Header::fields`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field<'a> {
    Bytes(&'a [u8]),
    Int(u32),
}

impl Header {
    /// The size of the header in bytes.
    pub const LEN: usize = 0x50;

    /// The title as text, up to the first NUL and without trailing spaces.
    pub fn title_str(&self) -> Result<&str, Error> {
        let len = self
            .title
            .iter()
            .position(|it| *it == 0)
            .unwrap_or(self.title.len());
        let string = std::str::from_utf8(&self.title[..len]).map_err(Error::DecodeUtf8)?;

        Ok(string.trim_end_matches(' '))
    }

    pub fn cgb_support(&self) -> CgbSupport {
        match self.cgb {
            0xc0 => CgbSupport::Only,
            it if it & 0x80 != 0 => CgbSupport::Compatible,
            _ => CgbSupport::None,
        }
    }

    /// The size of the ROM in bytes, if [`Self::rom_size`] is a known code.
    pub fn rom_size_bytes(&self) -> Option<usize> {
        match self.rom_size {
            code @ 0x00..=0x08 => Some((32 * 1024) << code),
            _ => None,
        }
    }

    /// The metadata fields by name, in header order.
    pub fn fields(&self) -> [(&'static str, Field<'_>); 12] {
        [
            ("title", Field::Bytes(&self.title)),
            ("cgb", Field::Int(self.cgb.into())),
            ("new_licensee_code", Field::Int(self.new_licensee_code.into())),
            ("sgb", Field::Int(self.sgb.into())),
            ("cartridge_type", Field::Int(self.cartridge_type.into())),
            ("rom_size", Field::Int(self.rom_size.into())),
            ("ram_size", Field::Int(self.ram_size.into())),
            ("destination_code", Field::Int(self.destination_code.into())),
            ("old_licensee_code", Field::Int(self.old_licensee_code.into())),
            ("mask_rom_version", Field::Int(self.mask_rom_version.into())),
            ("header_checksum", Field::Int(self.header_checksum.into())),
            ("global_checksum", Field::Int(self.global_checksum.into())),
        ]
    }

    /// The value of the metadata field named `name`.
    pub fn field(&self, name: &str) -> Option<Field<'_>> {
        self.fields()
            .into_iter()
            .find(|(it, _)| *it == name)
            .map(|(_, value)| value)
    }
}
