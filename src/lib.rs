// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

#![warn(missing_docs)]
//! A CHIP-8 virtual machine.
//!
//! The [CPU] owns the whole machine: 4 KiB of [memory](Mem), sixteen 8-bit
//! registers, the index register, the call stack, both timers, the 64x32
//! [Screen], and the 16-key [Keypad]. The host drives it one instruction
//! ([CPU::tick]) or one 60 Hz frame ([CPU::frame]) at a time, feeds it key
//! edges with [CPU::set_key], and reads the [Screen] back out to draw it.
//!
//! ```rust
//! # use chip8vm::*;
//! # fn main() -> Result<()> {
//! let mut cpu = CPU::default();
//! cpu.load_program_bytes(&[
//!     0x60, 0x0a, // ld  v0, #0a
//!     0x61, 0x05, // ld  v1, #05
//!     0x80, 0x14, // add v0, v1
//! ])?;
//! for _ in 0..3 {
//!     cpu.tick()?;
//! }
//! assert_eq!(cpu.v()[0], 15);
//! # Ok(())
//! # }
//! ```

pub mod cpu;
pub mod error;

pub use cpu::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    keypad::Keypad,
    mem::Mem,
    quirks::Quirks,
    screen::Screen,
    CPU,
};
pub use error::{Error, Result};
