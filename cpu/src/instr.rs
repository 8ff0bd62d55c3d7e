// SPDX-License-Identifier: MPL-2.0

pub mod asm;
pub mod decode;
pub mod table;

use serde::Deserialize;

pub use asm::Asm;
pub use decode::{Decoder, Fetch};
pub use table::Table;

/// The opcode that escapes into the prefixed opcode space.
///
/// The byte following it selects an instruction from [`Table::prefixed`] instead of
/// [`Table::unprefixed`].
pub const PREFIX: u8 = 0xcb;

/// An instruction template, as described by an opcode table.
///
/// Templates are shared by every decode of the same opcode and are never modified after the table
/// is loaded. Operand values read from the byte stream live in [`Decoded`] instead.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Instr {
    /// The opcode selecting this instruction.
    ///
    /// This is recovered from the table key rather than the entry itself.
    #[serde(skip)]
    pub opcode: u8,
    /// Whether this instruction is reached through the [`PREFIX`] escape.
    #[serde(skip)]
    pub prefixed: bool,
    /// Whether the result of this instruction is used directly rather than as an address.
    pub immediate: bool,
    /// The operands, in assembly order.
    pub operands: Vec<Operand>,
    /// The number of clock cycles taken.
    ///
    /// Conditional instructions list one entry per outcome, the taken branch first.
    pub cycles: Vec<u32>,
    /// The total encoded size in bytes, including the opcode (and the escape, if any).
    #[serde(rename = "bytes")]
    pub size: usize,
    pub mnemonic: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A static description of one instruction operand.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Operand {
    /// Whether this operand is used directly. If not, it is an address to be dereferenced.
    pub immediate: bool,
    /// A register name or literal placeholder, such as `HL` or `n8`.
    pub name: String,
    /// The number of bytes encoding this operand's value.
    ///
    /// This is `None` for implicit operands (registers, conditions, fixed vectors) which have no
    /// bytes in the instruction stream.
    #[serde(rename = "bytes", default)]
    pub width: Option<usize>,
    /// A value fixed by the table entry itself.
    #[serde(default)]
    pub value: Option<u32>,
    /// The auto-increment or auto-decrement applied to this operand, if any.
    #[serde(default)]
    pub adjust: Option<Adjust>,
}

impl Operand {
    /// Whether this operand has bytes in the instruction stream.
    pub fn is_encoded(&self) -> bool {
        self.width.is_some()
    }
}

/// An auto-increment or auto-decrement marker, as in `(HL+)` and `(HL-)`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum Adjust {
    #[serde(rename = "+")]
    Increment,
    #[serde(rename = "-")]
    Decrement,
}

impl Adjust {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Increment => "+",
            Self::Decrement => "-",
        }
    }
}

/// An instruction template paired with the operand values read for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decoded<'t> {
    /// The template this instruction was decoded from.
    pub instr: &'t Instr,
    /// The resolved operands, one per template operand and in the same order.
    pub operands: Vec<Resolved<'t>>,
}

impl<'t> Decoded<'t> {
    pub fn mnemonic(&self) -> &'t str {
        &self.instr.mnemonic
    }

    pub fn comment(&self) -> Option<&'t str> {
        self.instr.comment.as_deref()
    }

    /// The encoded size of this instruction, as declared by its template.
    pub fn size(&self) -> usize {
        self.instr.size
    }
}

/// An operand template paired with its concrete value, if it has one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Resolved<'t> {
    pub operand: &'t Operand,
    /// The value read from the byte stream for encoded operands, or the value fixed by the table
    /// otherwise.
    pub value: Option<u32>,
}

impl<'t> Resolved<'t> {
    /// Resolves an operand without reading anything, carrying over any value fixed by the table.
    pub fn implicit(operand: &'t Operand) -> Self {
        Self {
            operand,
            value: operand.value,
        }
    }
}
