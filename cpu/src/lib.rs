// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Instruction decoding for the SM83, the CPU of the Game Boy.
//!
//! Nothing here executes anything. An opcode [`Table`] describes the shape of every instruction,
//! and a [`Decoder`] walks a byte buffer with it, producing one [`instr::Decoded`] instruction at a
//! time. The [`disas`] module strings decodes together into a textual listing.

pub mod disas;
pub mod instr;

pub use instr::{Decoder, Instr, Table};
