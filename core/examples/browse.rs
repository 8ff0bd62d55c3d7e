// SPDX-License-Identifier: MPL-2.0

//! An interactive prompt for decoding a ROM image at arbitrary addresses.
//!
//! Commands:
//!
//! - `d <ADDR> [COUNT]` lists `COUNT` (default 16) instructions from `ADDR`
//! - `n [COUNT]` lists the instructions following the last listing
//! - `i <ADDR>` describes the instruction at `ADDR`
//! - `h` prints the cartridge header
//! - `q` quits

use std::io::Write as _;

use gbdis::{cpu::instr::decode, Decoder, Rom, Table};

fn main() {
    gbdis::log::init();

    let rom_filepath = std::env::args()
        .nth(1)
        .expect("expected ROM filepath");
    let rom = Rom::from_path(rom_filepath).expect("failed to read ROM");
    let table = Table::bundled().expect("failed to load opcode table");

    Browser::new(&rom, &table).run();
}

impl<'a> Browser<'a> {
    fn new(rom: &'a Rom, table: &'a Table) -> Self {
        Self {
            rom,
            decoder: rom.decoder(table),
            next: Rom::ENTRY,
        }
    }
}

struct Browser<'a> {
    rom: &'a Rom,
    decoder: Decoder<'a>,
    /// Where `n` continues from.
    next: usize,
}

impl Browser<'_> {
    fn run(mut self) {
        loop {
            print!("> ");
            let _ = std::io::stdout().lock().flush();

            let mut input = String::new();
            match std::io::stdin().read_line(&mut input) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    println!("error: {}", e);
                    break;
                }
            }

            let mut args = input.split_ascii_whitespace();
            match args.next() {
                Some("q") => break,
                Some(cmd) => self.process_command(cmd, args),
                None => println!("expected command"),
            }
        }
    }

    fn process_command<'s>(&mut self, cmd: &str, mut args: impl Iterator<Item = &'s str>) {
        let result = match cmd {
            "d" => parse_addr(args.next())
                .and_then(|addr| Ok((addr, parse_count(args.next())?)))
                .map(|(addr, count)| self.do_list(addr, count)),
            "n" => parse_count(args.next()).map(|count| self.do_list(self.next, count)),
            "i" => parse_addr(args.next()).map(|addr| self.do_describe(addr)),
            "h" => {
                self.do_print_header();

                Ok(())
            }
            _ => Err("invalid command"),
        };

        if let Err(e) = result {
            println!("error: {}", e);
        }
    }

    fn do_list(&mut self, addr: usize, count: usize) {
        let stdout = std::io::stdout();
        match self.decoder.disassemble(addr, count, &mut stdout.lock()) {
            Ok(summary) => {
                self.next = summary.end;
            }
            Err(e) => {
                println!("error: {}", e);
            }
        }
    }

    fn do_describe(&self, addr: usize) {
        match self.decoder.decode(addr) {
            Ok((next, instr)) => {
                println!("{:04X} {}", addr, instr);
                println!(
                    "  opcode {}{:#04x}, {} bytes ({:02x?}), {:?} cycles",
                    if instr.instr.prefixed { "0xcb " } else { "" },
                    instr.instr.opcode,
                    next - addr,
                    self.decoder.bytes_of(addr, next),
                    instr.instr.cycles,
                );
            }
            Err(decode::Error::OutOfRange { .. }) => {
                println!("error: {:#06x} is past the end of the ROM", addr);
            }
            Err(e) => {
                println!("error: {}", e);
            }
        }
    }

    fn do_print_header(&self) {
        match self.rom.header() {
            Ok(header) => println!("{:#?}", header),
            Err(e) => println!("error: {}", e),
        }
    }
}

fn parse_addr(arg: Option<&str>) -> Result<usize, &'static str> {
    let arg = arg.ok_or("expected address")?;
    let digits = arg.strip_prefix("0x").unwrap_or(arg);

    usize::from_str_radix(digits, 16).map_err(|_| "failed to parse address")
}

fn parse_count(arg: Option<&str>) -> Result<usize, &'static str> {
    arg.map_or(Ok(16), |it| it.parse().map_err(|_| "failed to parse count"))
}
