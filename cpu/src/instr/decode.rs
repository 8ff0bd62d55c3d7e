// SPDX-License-Identifier: MPL-2.0

use std::fmt;

use super::{table::MAX_WIDTH, Decoded, Instr, Resolved, Table, PREFIX};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A read of `count` bytes at `addr` would pass the end of a buffer of `len` bytes.
    OutOfRange { addr: usize, count: usize, len: usize },
    /// No table entry exists for `opcode`.
    UnknownOpcode { opcode: u8, prefixed: bool },
    /// A read of `count` bytes does not fit in a 32-bit value.
    UnsupportedWidth { count: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { addr, count, len } => {
                write!(
                    f,
                    "reading {} byte(s) at {:#06x} is out of range (buffer is {:#x} bytes)",
                    count,
                    addr,
                    len,
                )
            }
            Self::UnknownOpcode { opcode, prefixed: false } => {
                write!(f, "unknown opcode {:#04x}", opcode)
            }
            Self::UnknownOpcode { opcode, prefixed: true } => {
                write!(f, "unknown prefixed opcode {:#04x} {:#04x}", PREFIX, opcode)
            }
            Self::UnsupportedWidth { count } => {
                write!(f, "cannot read {} bytes into a {}-byte value", count, MAX_WIDTH)
            }
        }
    }
}

impl std::error::Error for Error {}

/// The result of decoding one instruction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fetch<'a> {
    /// The address at which the instruction is located.
    pub addr: usize,
    /// The address immediately following the instruction.
    pub next: usize,
    /// The instruction decoded.
    pub instr: Decoded<'a>,
}

/// Decodes instructions from a byte buffer.
///
/// A decoder holds no position of its own; every call names the address to decode at, so calls
/// at different addresses may be freely interleaved. Both the buffer and the opcode table are
/// borrowed, and decoded instructions borrow their templates from the table.
#[derive(Clone, Copy, Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    table: &'a Table,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8], table: &'a Table) -> Self {
        Self { data, table }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Reads `count` bytes at `addr` as an unsigned integer.
    ///
    /// The SM83 is little-endian, and so is this read, whatever the host.
    pub fn read(&self, addr: usize, count: usize) -> Result<u32, Error> {
        let bytes = addr
            .checked_add(count)
            .and_then(|end| self.data.get(addr..end))
            .ok_or(Error::OutOfRange {
                addr,
                count,
                len: self.data.len(),
            })?;
        if count > MAX_WIDTH {
            return Err(Error::UnsupportedWidth { count });
        }

        Ok(bytes
            .iter()
            .rev()
            .fold(0, |value, byte| (value << 8) | u32::from(*byte)))
    }

    fn read_8(&self, addr: usize) -> Result<u8, Error> {
        self.data.get(addr).copied().ok_or(Error::OutOfRange {
            addr,
            count: 1,
            len: self.data.len(),
        })
    }

    /// Decodes the instruction at `addr`.
    ///
    /// On success, this returns the address following the instruction along with the instruction
    /// itself.
    pub fn decode(&self, addr: usize) -> Result<(usize, Decoded<'a>), Error> {
        let mut cursor = addr;
        let instr = self.fetch_template(&mut cursor)?;

        let mut operands = Vec::with_capacity(instr.operands.len());
        for operand in instr.operands.iter() {
            let resolved = match operand.width {
                Some(width) => {
                    let value = self.read(cursor, width)?;
                    cursor += width;

                    Resolved {
                        operand,
                        value: Some(value),
                    }
                }
                None => Resolved::implicit(operand),
            };
            operands.push(resolved);
        }

        let decoded = Decoded { instr, operands };
        tracing::trace!("{:#06x}: {}", addr, decoded);

        Ok((cursor, decoded))
    }

    /// Reads the opcode at `cursor`, following the [`PREFIX`] escape if present, and looks it up.
    fn fetch_template(&self, cursor: &mut usize) -> Result<&'a Instr, Error> {
        let opcode = self.read_8(*cursor)?;
        *cursor += 1;

        if opcode == PREFIX {
            let opcode = self.read_8(*cursor)?;
            *cursor += 1;

            self.table
                .prefixed(opcode)
                .ok_or(Error::UnknownOpcode { opcode, prefixed: true })
        } else {
            self.table
                .unprefixed(opcode)
                .ok_or(Error::UnknownOpcode { opcode, prefixed: false })
        }
    }

    /// Decodes successive instructions beginning at `addr`.
    ///
    /// The iterator ends after the first error, or when the end of the buffer is reached exactly.
    pub fn instrs(&self, addr: usize) -> impl Iterator<Item = Result<Fetch<'a>, Error>> {
        let decoder = *self;
        let mut addr = Some(addr);

        std::iter::from_fn(move || {
            let current = addr.take()?;
            match decoder.decode(current) {
                Ok((next, instr)) => {
                    addr = Some(next);

                    Some(Ok(Fetch {
                        addr: current,
                        next,
                        instr,
                    }))
                }
                Err(e) => Some(Err(e)),
            }
        })
    }

    /// The encoded bytes of an instruction decoded at `addr` which ended before `next`.
    pub fn bytes_of(&self, addr: usize, next: usize) -> &'a [u8] {
        self.data.get(addr..next).unwrap_or_default()
    }
}
