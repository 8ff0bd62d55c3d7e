// SPDX-License-Identifier: MPL-2.0

//! Opcode tables.
//!
//! A table is loaded from a JSON document with two collections, `unprefixed` and `cbprefixed`
//! (`prefixed` is accepted as well), each mapping a hexadecimal opcode string to an instruction
//! entry:
//!
//! ```json
//! {
//!   "unprefixed": {
//!     "0x22": {
//!       "mnemonic": "LD",
//!       "bytes": 1,
//!       "cycles": [8],
//!       "immediate": false,
//!       "operands": [
//!         { "name": "HL", "immediate": false, "adjust": "+" },
//!         { "name": "A", "immediate": true }
//!       ]
//!     }
//!   },
//!   "cbprefixed": {}
//! }
//! ```

use std::{collections::{BTreeMap, HashMap}, fmt, io};

use serde::Deserialize;

use super::Instr;

/// The complete SM83 opcode table.
static BUNDLED: &str = include_str!("opcodes.json");

/// The widest operand a [`Decoder`](super::Decoder) can read.
pub const MAX_WIDTH: usize = 4;

#[derive(Debug)]
pub enum Error {
    /// The document is not valid JSON, or an entry is missing a required field or has a field of
    /// the wrong type.
    Json(serde_json::Error),
    /// A key is not a hexadecimal byte.
    InvalidOpcode(String),
    /// Two keys in the same collection name the same opcode.
    DuplicateOpcode { opcode: u8, prefixed: bool },
    /// An operand's byte width is zero or wider than [`MAX_WIDTH`].
    InvalidWidth { opcode: u8, operand: String, width: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "malformed opcode table: {}", e),
            Self::InvalidOpcode(key) => {
                write!(f, "malformed opcode table: '{}' is not a hexadecimal opcode", key)
            }
            Self::DuplicateOpcode { opcode, prefixed } => {
                write!(
                    f,
                    "malformed opcode table: opcode {:#04x} is defined twice{}",
                    opcode,
                    if *prefixed { " in the prefixed space" } else { "" },
                )
            }
            Self::InvalidWidth { opcode, operand, width } => {
                write!(
                    f,
                    "malformed opcode table: operand '{}' of opcode {:#04x} is {} bytes wide",
                    operand,
                    opcode,
                    width,
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct Document {
    unprefixed: BTreeMap<String, Instr>,
    #[serde(alias = "prefixed")]
    cbprefixed: BTreeMap<String, Instr>,
}

/// The two opcode spaces of the SM83.
///
/// A table is immutable once loaded; decoders borrow it and share its templates.
#[derive(Clone, Debug, Default)]
pub struct Table {
    unprefixed: HashMap<u8, Instr>,
    prefixed: HashMap<u8, Instr>,
}

impl Table {
    /// Loads the opcode table bundled with this crate.
    pub fn bundled() -> Result<Self, Error> {
        Self::load(BUNDLED)
    }

    /// Loads an opcode table from a JSON document.
    pub fn load(json: &str) -> Result<Self, Error> {
        Self::from_document(serde_json::from_str(json).map_err(Error::Json)?)
    }

    /// Loads an opcode table from a reader yielding a JSON document.
    pub fn from_reader(reader: impl io::Read) -> Result<Self, Error> {
        Self::from_document(serde_json::from_reader(reader).map_err(Error::Json)?)
    }

    fn from_document(doc: Document) -> Result<Self, Error> {
        let table = Self {
            unprefixed: Self::parse_space(doc.unprefixed, false)?,
            prefixed: Self::parse_space(doc.cbprefixed, true)?,
        };
        tracing::info!(
            "Loaded opcode table ({} unprefixed, {} prefixed)",
            table.unprefixed.len(),
            table.prefixed.len(),
        );

        Ok(table)
    }

    fn parse_space(
        entries: BTreeMap<String, Instr>,
        prefixed: bool,
    ) -> Result<HashMap<u8, Instr>, Error> {
        let mut space = HashMap::with_capacity(entries.len());
        for (key, mut instr) in entries {
            let opcode = parse_opcode(&key)?;
            instr.opcode = opcode;
            instr.prefixed = prefixed;
            validate(&instr)?;

            if space.insert(opcode, instr).is_some() {
                return Err(Error::DuplicateOpcode { opcode, prefixed });
            }
        }

        Ok(space)
    }

    /// The instruction selected by `opcode` alone.
    pub fn unprefixed(&self, opcode: u8) -> Option<&Instr> {
        self.unprefixed.get(&opcode)
    }

    /// The instruction selected by `opcode` after the [`PREFIX`](super::PREFIX) escape.
    pub fn prefixed(&self, opcode: u8) -> Option<&Instr> {
        self.prefixed.get(&opcode)
    }

    /// The instruction selected by `opcode` in the given space.
    pub fn get(&self, opcode: u8, prefixed: bool) -> Option<&Instr> {
        if prefixed {
            self.prefixed(opcode)
        } else {
            self.unprefixed(opcode)
        }
    }

    /// All instructions of both spaces, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Instr> {
        self.unprefixed.values().chain(self.prefixed.values())
    }

    /// The number of instructions in the unprefixed and prefixed spaces, respectively.
    pub fn len(&self) -> (usize, usize) {
        (self.unprefixed.len(), self.prefixed.len())
    }

    pub fn is_empty(&self) -> bool {
        self.unprefixed.is_empty() && self.prefixed.is_empty()
    }
}

/// Parses a table key such as `"0x3E"` or `"3e"`.
fn parse_opcode(key: &str) -> Result<u8, Error> {
    let digits = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|it| it.is_ascii_hexdigit()) {
        return Err(Error::InvalidOpcode(key.to_string()));
    }

    u8::from_str_radix(digits, 16).map_err(|_| Error::InvalidOpcode(key.to_string()))
}

fn validate(instr: &Instr) -> Result<(), Error> {
    for operand in instr.operands.iter() {
        if let Some(width) = operand.width {
            if !(1..=MAX_WIDTH).contains(&width) {
                return Err(Error::InvalidWidth {
                    opcode: instr.opcode,
                    operand: operand.name.clone(),
                    width,
                });
            }
        }
    }

    // The escape byte is part of the declared size of a prefixed instruction.
    let opcode_len = if instr.prefixed { 2 } else { 1 };
    let encoded = opcode_len + instr.operands.iter().filter_map(|it| it.width).sum::<usize>();
    if encoded != instr.size {
        tracing::warn!(
            "{} ({:#04x}) declares {} bytes but its encoding takes {}",
            instr.mnemonic,
            instr.opcode,
            instr.size,
            encoded,
        );
    }

    Ok(())
}
