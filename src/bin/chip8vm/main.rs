// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! chip8vm: a CHIP-8 interpreter in a minifb window

mod ui;

use chip8vm::*;
use gumdrop::Options;
use log::LevelFilter;
use minifb::Scale;
use owo_colors::OwoColorize;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use ui::*;

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    init_logger(options.verbose);
    let state = State::new(options)?;
    for result in state {
        if let Err(e) = result {
            eprintln!("{}", e.bold().red());
            break;
        }
    }
    Ok(())
}

/// `-v` once for info, twice for debug, three times for per-instruction traces.
/// `RUST_LOG` overrides this.
fn init_logger(verbosity: u32) {
    env_logger::Builder::new()
        .filter_level(match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();
}

fn parse_scale(value: &str) -> std::result::Result<Scale, String> {
    Ok(match value {
        "1" => Scale::X1,
        "2" => Scale::X2,
        "4" => Scale::X4,
        "8" => Scale::X8,
        "16" => Scale::X16,
        "32" => Scale::X32,
        _ => return Err(format!("{value} is not one of 1, 2, 4, 8, 16, 32")),
    })
}

#[derive(Debug, Options)]
struct Arguments {
    #[options(help = "Load a ROM to run.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(count, help = "Log more. Repeat for more detail.")]
    pub verbose: u32,
    #[options(help = "Start paused. P unpauses, N steps.")]
    pub pause: bool,
    #[options(help = "Set the instructions-per-frame rate.", meta = "N")]
    pub ipf: Option<usize>,
    #[options(help = "Set the target framerate.", default = "60", meta = "FR")]
    pub frame_rate: u64,
    #[options(
        help = "Window scale: 1, 2, 4, 8, 16 or 32.",
        default = "16",
        parse(try_from_str = "parse_scale")
    )]
    pub scale: Scale,

    #[options(short = "z", help = "Set vF to 0 after a bitwise operation.")]
    pub vfreset: bool,
    #[options(short = "y", help = "Shift vY into vX, instead of shifting vX.")]
    pub shift: bool,
    #[options(short = "m", help = "Advance I past the registers on DMA.")]
    pub memory: bool,
    #[options(short = "c", help = "Enable every COSMAC VIP quirk.")]
    pub cosmac: bool,
}

#[derive(Debug)]
struct State {
    pub rate: u64,
    pub cpu: CPU,
    pub ui: UI,
    pub ft: Instant,
}

impl State {
    fn new(options: Arguments) -> Result<Self> {
        let mut quirks = Quirks::from(options.cosmac);
        quirks.vf_reset |= options.vfreset;
        quirks.shift_vy |= options.shift;
        quirks.dma_inc |= options.memory;
        let mut cpu = CPU::new(Flags {
            pause: options.pause,
            ipf: options.ipf.unwrap_or(chip8vm::cpu::flags::DEFAULT_IPF),
            quirks,
            ..Default::default()
        });
        cpu.load_program(&options.file)?;
        Ok(State {
            rate: options.frame_rate.max(1),
            cpu,
            ui: UIBuilder::new(options.scale).build()?,
            ft: Instant::now(),
        })
    }
    fn wait_for_next_frame(&mut self) {
        let rate = Duration::from_nanos(1_000_000_000 / self.rate);
        std::thread::sleep(rate.saturating_sub(self.ft.elapsed()));
        self.ft += rate;
    }
}

impl Iterator for State {
    type Item = Result<()>;

    /// One host frame: input, then a CPU frame, then presentation
    fn next(&mut self) -> Option<Self::Item> {
        self.wait_for_next_frame();
        match self.ui.keys(&mut self.cpu) {
            Ok(Control::Quit) => return None,
            Err(e) => return Some(Err(e)),
            _ => (),
        }
        if let Err(e) = self.cpu.frame() {
            self.cpu.dump();
            return Some(Err(e));
        }
        match self.ui.frame(&self.cpu) {
            Ok(Control::Quit) => None,
            Err(e) => Some(Err(e)),
            _ => Some(Ok(())),
        }
    }
}
