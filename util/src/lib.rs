// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{io, path::Path};

use anyhow::Context as _;

/// The width of the byte column written by [`dump_hex`], enough for three bytes.
pub const BYTES_WIDTH: usize = 8;

/// Writes `addr` followed by `bytes` in hexadecimal, padded to a fixed-width column.
pub fn dump_hex(w: &mut impl io::Write, addr: usize, bytes: &[u8]) -> io::Result<()> {
    write!(
        w,
        "{:04X}   {:<width$}",
        addr,
        bytes
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<Vec<String>>()
            .join(" "),
        width = BYTES_WIDTH,
    )
}

/// Reads the entire file at `path`.
pub fn read_file(path: impl AsRef<Path>) -> anyhow::Result<Vec<u8>> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    tracing::debug!("Read {} bytes from '{}'", data.len(), path.display());

    Ok(data)
}
