// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for chip8vm

use std::ops::Range;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chip8vm.
///
/// Everything but [Error::InvalidKey], [Error::InvalidRegister] and
/// [Error::Io] is raised while running a program, and halts the [CPU](crate::CPU)
/// until it is reset or reloaded.
#[derive(Debug, Error)]
pub enum Error {
    /// The word at `pc` is not a CHIP-8 instruction
    #[error("opcode {word:04x} at {pc:03x} not recognized")]
    Decode {
        /// Address of the offending word
        pc: u16,
        /// The offending word
        word: u16,
    },
    /// A `call` was made with all 16 stack entries in use
    #[error("stack overflow: call at {pc:03x} exceeds 16 nested subroutines")]
    StackOverflow {
        /// Address of the offending `call`
        pc: u16,
    },
    /// A `ret` was made with nothing on the stack
    #[error("stack underflow: ret at {pc:03x} with an empty stack")]
    StackUnderflow {
        /// Address of the offending `ret`
        pc: u16,
    },
    /// Tried to touch memory outside of the 4 KiB address space,
    /// or to write over the font
    #[error("range {range:03x?} is outside of memory")]
    AddressOutOfRange {
        /// The offending range
        range: Range<usize>,
    },
    /// The program image does not fit in program memory
    #[error("program is {size} bytes, but only {max} bytes are available")]
    Load {
        /// Size of the rejected program
        size: usize,
        /// Space available from 0x200 to the end of memory
        max: usize,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Error originated in [minifb]
    #[cfg(feature = "minifb")]
    #[error(transparent)]
    Window(#[from] minifb::Error),
}
