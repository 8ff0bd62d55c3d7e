// SPDX-License-Identifier: MPL-2.0

//! Linear disassembly listings.

use std::{fmt, io};

use crate::instr::{decode, Decoder, Fetch};

#[derive(Debug)]
pub enum Error {
    /// Decoding failed for a reason other than reaching the end of the buffer.
    Decode(decode::Error),
    /// The listing could not be written.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "disassembly aborted: {}", e),
            Self::Io(e) => write!(f, "failed to write listing: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Whether each line includes the encoded bytes of its instruction.
    pub bytes: bool,
}

/// What a disassembly run did.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary {
    /// The number of instructions listed.
    pub decoded: usize,
    /// The address following the last instruction listed.
    pub end: usize,
    /// Whether the run stopped early at an instruction running past the end of the buffer.
    pub truncated: bool,
}

impl Summary {
    /// The number of lines written, including any truncation diagnostic.
    pub fn lines(&self) -> usize {
        self.decoded + usize::from(self.truncated)
    }
}

impl<'a> Decoder<'a> {
    /// Writes a listing of `count` instructions beginning at `start`, one line per instruction.
    ///
    /// An instruction running past the end of the buffer ends the listing with a diagnostic line.
    /// Any other decoding error aborts the listing and is returned.
    pub fn disassemble(
        &self,
        start: usize,
        count: usize,
        w: &mut impl io::Write,
    ) -> Result<Summary, Error> {
        self.disassemble_with(Options::default(), start, count, w)
    }

    pub fn disassemble_with(
        &self,
        options: Options,
        start: usize,
        count: usize,
        w: &mut impl io::Write,
    ) -> Result<Summary, Error> {
        tracing::debug!("Disassembling {} instructions from {:#06x}", count, start);

        let mut summary = Summary {
            decoded: 0,
            end: start,
            truncated: false,
        };
        for fetch in self.instrs(start).take(count) {
            match fetch {
                Ok(fetch) => {
                    self.write_line(options, &fetch, w)?;
                    summary.decoded += 1;
                    summary.end = fetch.next;
                }
                Err(e @ decode::Error::OutOfRange { .. }) => {
                    tracing::warn!("Stopping at {:#06x}: {}", summary.end, e);
                    writeln!(w, "ERROR - {}", e)?;
                    summary.truncated = true;
                    break;
                }
                Err(e) => {
                    return Err(Error::Decode(e));
                }
            }
        }
        tracing::debug!(
            "Disassembled {} instructions ({:#06x}..{:#06x})",
            summary.decoded,
            start,
            summary.end,
        );

        Ok(summary)
    }

    fn write_line(&self, options: Options, fetch: &Fetch, w: &mut impl io::Write) -> io::Result<()> {
        if options.bytes {
            gbdis_util::dump_hex(&mut *w, fetch.addr, self.bytes_of(fetch.addr, fetch.next))?;
            writeln!(w, "   {}", fetch.instr)
        } else {
            writeln!(w, "{:04X} {}", fetch.addr, fetch.instr)
        }
    }
}
