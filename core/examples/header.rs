// SPDX-License-Identifier: MPL-2.0

//! Prints the cartridge header of a ROM image.

use gbdis::cart::Field;

fn main() -> anyhow::Result<()> {
    gbdis::log::init();

    let rom_filepath = std::env::args().nth(1).expect("expected ROM filepath");
    let rom = gbdis::Rom::from_path(rom_filepath)?;
    let header = rom.header()?;

    for (name, value) in header.fields() {
        match value {
            Field::Bytes(it) => println!("{:<18} {}", name, it.escape_ascii()),
            Field::Int(it) => println!("{:<18} {:#x}", name, it),
        }
    }
    println!("{:<18} {:?}", "cgb_support", header.cgb_support());
    if let Some(size) = header.rom_size_bytes() {
        println!("{:<18} {} KiB", "rom_size_bytes", size / 1024);
    }

    Ok(())
}
