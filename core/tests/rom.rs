// SPDX-License-Identifier: MPL-2.0

use std::path::PathBuf;

use gbdis::{cart::CgbSupport, disas::Summary, Config, Rom, Table};

const PROGRAM: &[u8] = &[
    0xf3, // DI
    0x31, 0xfe, 0xff, // LD SP, 0xfffe
    0xaf, // XOR A, A
    0x21, 0x00, 0x80, // LD HL, 0x8000
    0x22, // LD (HL+), A
    0xcb, 0x7c, // BIT 7, H
    0x20, 0xfa, // JR NZ, 0xfa
    0xe0, 0x40, // LDH (0x40), A
    0x18, 0xfe, // JR 0xfe
];

const LISTING: &str = "\
0150 DI
0151 LD       SP, 0xfffe
0154 XOR      A, A
0155 LD       HL, 0x8000
0158 LD       (HL+), A
0159 BIT      7, H
015B JR       NZ, 0xfa
015D LDH      (0x40), A
015F JR       0xfe
";

fn image(len: usize) -> Vec<u8> {
    let mut data = vec![0; len];
    data[0x100..0x104].copy_from_slice(&[0x00, 0xc3, 0x50, 0x01]);
    data[0x134..0x13a].copy_from_slice(b"TETRIS");
    data[0x150..0x150 + PROGRAM.len()].copy_from_slice(PROGRAM);

    data
}

/// Writes `data` to a file unique to the calling test.
fn write_temp(name: &str, data: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gbdis-{}-{}", std::process::id(), name));
    std::fs::write(&path, data).unwrap();

    path
}

#[test]
fn header_and_entry() {
    let rom = Rom::new(image(0x8000));
    let table = Table::bundled().unwrap();

    let header = rom.header().unwrap();
    assert_eq!(header.title_str().unwrap(), "TETRIS");
    assert_eq!(header.cgb_support(), CgbSupport::None);

    let mut out = Vec::new();
    let summary = rom.decoder(&table).disassemble(Rom::ENTRY, 2, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0100 NOP\n0101 JP       0x150\n");
    assert_eq!(summary.end, 0x104);
}

#[test]
fn run_lists_program() {
    let path = write_temp("run.gb", &image(0x8000));
    let mut config = Config::new(&path);
    config.count = 9;

    let mut out = Vec::new();
    let summary = gbdis::run(&config, &mut out).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), LISTING);
    assert_eq!(summary, Summary { decoded: 9, end: 0x161, truncated: false });
}

#[test]
fn run_stops_at_end_of_rom() {
    // The final `JR` is cut off after its opcode.
    let mut data = image(0x8000);
    data.truncate(0x150 + PROGRAM.len() - 1);
    let path = write_temp("truncated.gb", &data);
    let config = Config::new(&path);

    let mut out = Vec::new();
    let summary = gbdis::run(&config, &mut out).unwrap();
    std::fs::remove_file(&path).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(&lines[..8], &LISTING.lines().take(8).collect::<Vec<_>>()[..]);
    assert!(lines[8].starts_with("ERROR - "));
    assert!(summary.truncated);
    assert_eq!(summary.lines(), 9);
}

#[test]
fn run_with_custom_table() {
    // A table that only knows `DI`.
    let json = r#"{
        "unprefixed": {
            "f3": { "mnemonic": "di", "bytes": 1, "cycles": [4], "immediate": true, "operands": [],
                    "comment": "interrupts off" }
        },
        "prefixed": {}
    }"#;
    let table_path = write_temp("table.json", json.as_bytes());
    let rom_path = write_temp("custom.gb", &image(0x8000));

    let mut config = Config::new(&rom_path);
    config.opcodes = Some(table_path.clone());

    let mut out = Vec::new();
    let result = gbdis::run(&config, &mut out);
    std::fs::remove_file(&table_path).unwrap();
    std::fs::remove_file(&rom_path).unwrap();

    // `LD SP, n16` is unknown to this table, which aborts the listing.
    assert!(result.is_err());
    assert_eq!(String::from_utf8(out).unwrap(), "0150 di ; interrupts off\n");
}

#[test]
fn run_with_bytes() {
    let path = write_temp("bytes.gb", &image(0x8000));
    let mut config = Config::new(&path);
    config.count = 2;
    config.bytes = true;

    let mut out = Vec::new();
    gbdis::run(&config, &mut out).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "0150   f3         DI\n0151   31 fe ff   LD       SP, 0xfffe\n",
    );
}

#[test]
fn run_missing_rom() {
    let config = Config::new("/nonexistent/rom.gb");
    assert!(gbdis::run(&config, &mut Vec::<u8>::new()).is_err());
}
