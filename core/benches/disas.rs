// SPDX-License-Identifier: MPL-2.0

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A ROM-sized buffer cycling through every opcode, with the operands of each instruction filled
/// in by the opcodes that follow it.
fn synthetic_rom() -> Vec<u8> {
    (0..0x8000usize).map(|it| (it % 0x100) as u8).collect()
}

fn decode(c: &mut Criterion) {
    let table = gbdis::Table::bundled().unwrap();
    let rom = gbdis::Rom::new(synthetic_rom());
    let decoder = rom.decoder(&table);

    c.bench_function("cpu::Decoder::decode", |b| {
        b.iter(|| decoder.decode(black_box(0x150)))
    });
}

fn disassemble(c: &mut Criterion) {
    let table = gbdis::Table::bundled().unwrap();
    let rom = gbdis::Rom::new(synthetic_rom());
    let decoder = rom.decoder(&table);

    c.bench_function("cpu::Decoder::disassemble", |b| {
        b.iter(|| {
            let mut out: Vec<u8> = Vec::with_capacity(32 * 1024);
            decoder.disassemble(0x150, black_box(1024), &mut out)
        })
    });
}

criterion_group!(benches, decode, disassemble);
criterion_main!(benches);
