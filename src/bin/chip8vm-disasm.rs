// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Prints a linear disassembly of a CHIP-8 ROM, one word per line

use chip8vm::{cpu::mem::PROGRAM_START, *};
use gumdrop::Options;
use log::{info, warn};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Clone, Debug, Options)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Skip this many bytes before disassembling", meta = "N")]
    pub offset: usize,
    #[options(help = "Disable colored output")]
    pub plain: bool,
    #[options(count, help = "Log more. Repeat for more detail.")]
    pub verbose: u32,
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    env_logger::Builder::new()
        .filter_level(match options.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .parse_default_env()
        .init();

    let contents = std::fs::read(&options.file)?;
    info!("Read {} bytes from {}", contents.len(), options.file.display());
    let dis = if options.plain { Dis::plain() } else { Dis::default() };
    let body = contents.get(options.offset..).unwrap_or_default();
    if body.len() % 2 != 0 {
        warn!("Ignoring trailing byte at offset {:x}", contents.len() - 1);
    }
    for (index, word) in body.chunks_exact(2).enumerate() {
        let word = u16::from_be_bytes([word[0], word[1]]);
        let addr = PROGRAM_START as usize + options.offset + 2 * index;
        if options.plain {
            println!("{addr:03x}: {} {word:04x}", dis.once(word));
        } else {
            println!("{addr:03x}: {} {:04x}", dis.once(word), word.bright_black());
        }
    }
    Ok(())
}
