// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use super::{Adjust, Decoded, Instr, Resolved};

/// The width of the mnemonic column.
pub const MNEMONIC_WIDTH: usize = 8;

/// The assembly text of an instruction.
#[derive(Clone, Debug)]
pub struct Asm {
    pub op_name: String,
    pub operands: Vec<Operand>,
    pub comment: Option<String>,
}

impl fmt::Display for Asm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operands.is_empty() {
            f.write_str(&self.op_name)?;
        } else {
            write!(
                f,
                "{:<width$} {}",
                self.op_name,
                self
                    .operands
                    .iter()
                    .map(|operand| format!("{}", operand))
                    .collect::<Vec<String>>()
                    .join(", "),
                width = MNEMONIC_WIDTH,
            )?;
        }

        if let Some(comment) = self.comment.as_ref() {
            write!(f, " ; {}", comment)?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Operand {
    pub value: Value,
    pub adjust: Option<Adjust>,
    /// Whether the operand is a memory access, written in parentheses.
    pub deref: bool,
}

#[derive(Clone, Debug)]
pub enum Value {
    /// A value read from the instruction stream.
    Hex(u32),
    /// A value fixed by the opcode table.
    UInt(u32),
    /// A register, condition or placeholder name.
    Text(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let adjust = self.adjust.map_or("", Adjust::suffix);
        if self.deref {
            write!(f, "({}{})", self.value, adjust)
        } else {
            write!(f, "{}{}", self.value, adjust)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(it) => write!(f, "{:#x}", it),
            Self::UInt(it) => write!(f, "{}", it),
            Self::Text(it) => f.write_str(it),
        }
    }
}

impl Resolved<'_> {
    pub fn asm(&self) -> Operand {
        let value = match self.value {
            Some(it) if self.operand.is_encoded() => Value::Hex(it),
            Some(it) => Value::UInt(it),
            None => Value::Text(self.operand.name.clone()),
        };

        Operand {
            value,
            adjust: self.operand.adjust,
            deref: !self.operand.immediate,
        }
    }
}

impl Decoded<'_> {
    pub fn asm(&self) -> Asm {
        Asm {
            op_name: self.instr.mnemonic.clone(),
            operands: self.operands.iter().map(Resolved::asm).collect(),
            comment: self.instr.comment.clone(),
        }
    }
}

impl Instr {
    /// The assembly text of this template, with placeholders where values would be decoded.
    pub fn asm(&self) -> Asm {
        Asm {
            op_name: self.mnemonic.clone(),
            operands: self
                .operands
                .iter()
                .map(|operand| Resolved::implicit(operand).asm())
                .collect(),
            comment: self.comment.clone(),
        }
    }
}

impl fmt::Display for Decoded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.asm(), f)
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.asm(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{instr::Operand as Template, Decoder, Table};

    fn template(name: &str, immediate: bool, width: Option<usize>) -> Template {
        Template {
            immediate,
            name: name.to_string(),
            width,
            value: None,
            adjust: None,
        }
    }

    #[test]
    fn render_operands() {
        let reg = template("A", true, None);
        assert_eq!(Resolved::implicit(&reg).asm().to_string(), "A");

        let n8 = template("n8", true, Some(1));
        assert_eq!(Resolved::implicit(&n8).asm().to_string(), "n8");
        assert_eq!(Resolved { operand: &n8, value: Some(0x3f) }.asm().to_string(), "0x3f");

        let a16 = template("a16", false, Some(2));
        assert_eq!(Resolved { operand: &a16, value: Some(0xff40) }.asm().to_string(), "(0xff40)");

        let hl = Template {
            adjust: Some(Adjust::Decrement),
            ..template("HL", false, None)
        };
        assert_eq!(Resolved::implicit(&hl).asm().to_string(), "(HL-)");

        let sp = Template {
            adjust: Some(Adjust::Increment),
            ..template("SP", true, None)
        };
        assert_eq!(Resolved::implicit(&sp).asm().to_string(), "SP+");

        // Values fixed by the table are not encoded, so they are written in decimal.
        let rst = Template {
            value: Some(56),
            ..template("$38", true, None)
        };
        assert_eq!(Resolved::implicit(&rst).asm().to_string(), "56");
    }

    #[test]
    fn render_bundled() {
        let table = Table::bundled().unwrap();
        let render = |data: &[u8]| Decoder::new(data, &table).decode(0).unwrap().1.to_string();

        assert_eq!(render(&[0x00]), "NOP");
        assert_eq!(render(&[0x3e, 0x80]), "LD       A, 0x80");
        assert_eq!(render(&[0xc3, 0x50, 0x01]), "JP       0x150");
        assert_eq!(render(&[0xe0, 0x40]), "LDH      (0x40), A");
        assert_eq!(render(&[0x2a]), "LD       A, (HL+)");
        assert_eq!(render(&[0x32]), "LD       (HL-), A");
        assert_eq!(render(&[0xf8, 0x05]), "LD       HL, SP+, 0x5");
        assert_eq!(render(&[0x20, 0xfe]), "JR       NZ, 0xfe");
        assert_eq!(render(&[0xcb, 0x7c]), "BIT      7, H");
        assert_eq!(render(&[0xcb, 0x86]), "RES      0, (HL)");
        assert_eq!(render(&[0xd3]), "ILLEGAL_D3 ; hard-locks the CPU");
    }

    #[test]
    fn render_template() {
        let table = Table::bundled().unwrap();
        assert_eq!(table.unprefixed(0xea).unwrap().to_string(), "LD       (a16), A");
    }
}
