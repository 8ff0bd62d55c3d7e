// SPDX-License-Identifier: MPL-2.0

//! Lists instructions from a ROM image.
//!
//! ```text
//! cargo run --example disas -- <ROM> [START] [COUNT] [--opcodes <PATH>] [--bytes]
//! ```

fn main() -> anyhow::Result<()> {
    gbdis::log::init();

    let config = gbdis::Config::from_args(std::env::args().skip(1))?;
    let stdout = std::io::stdout();
    gbdis::run(&config, &mut stdout.lock())?;

    Ok(())
}
