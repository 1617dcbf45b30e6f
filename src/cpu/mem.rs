// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The [Mem] represents the CPU's memory
//!
//! Every access is bounds-checked; nothing wraps around the end of memory.

use crate::error::{Error, Result};
use std::{fmt::Debug, ops::Range};

/// Size of the address space, in bytes
pub const MEM_SIZE: usize = 0x1000;
/// Where programs are loaded, and where execution starts
pub const PROGRAM_START: u16 = 0x200;
/// Where the hexadecimal font lives
pub const FONT_START: u16 = 0x000;
/// Bytes per font glyph
pub const GLYPH_SIZE: u16 = 5;

/// The 4x5 hexadecimal font, glyphs `0` through `F`
#[rustfmt::skip]
pub const FONT: [u8; 16 * GLYPH_SIZE as usize] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// One past the last byte of the font
const FONT_END: usize = FONT_START as usize + FONT.len();

/// 4 KiB of byte-addressable memory, with the font preloaded at [FONT_START]
#[derive(Clone, PartialEq, Eq)]
pub struct Mem {
    memory: Box<[u8; MEM_SIZE]>,
}

impl Mem {
    /// Creates zeroed memory with the font loaded
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mem = Mem::new();
    /// // The glyph for `0` starts at address 0
    /// assert_eq!(mem.get(0..5).unwrap(), &[0xf0, 0x90, 0x90, 0x90, 0xf0]);
    /// ```
    pub fn new() -> Self {
        let mut memory = Box::new([0; MEM_SIZE]);
        let font = FONT_START as usize;
        memory[font..font + FONT.len()].copy_from_slice(&FONT);
        Self { memory }
    }

    /// The largest program that fits between [PROGRAM_START] and the end of memory
    pub const fn max_program_size() -> usize {
        MEM_SIZE - PROGRAM_START as usize
    }

    /// Rebuilds memory from scratch, then copies a program verbatim to
    /// [PROGRAM_START]. Nothing the previous program left behind survives.
    ///
    /// Returns [Error::Load] if the program doesn't fit, leaving memory as it was.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut mem = Mem::new();
    /// mem.load_program(&[0x00, 0xe0]).unwrap();
    /// assert_eq!(mem.read_word(0x200).unwrap(), 0x00e0);
    /// // one byte too many
    /// assert!(mem.load_program(&[0; 0xe01]).is_err());
    /// ```
    pub fn load_program(&mut self, program: &[u8]) -> Result<&mut Self> {
        let max = Self::max_program_size();
        if program.len() > max {
            return Err(Error::Load {
                size: program.len(),
                max,
            });
        }
        *self = Self::new();
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(self)
    }

    /// Gets a slice of memory, or [Error::AddressOutOfRange]
    pub fn get(&self, range: Range<usize>) -> Result<&[u8]> {
        self.memory
            .get(range.clone())
            .ok_or(Error::AddressOutOfRange { range })
    }

    /// Gets a mutable slice of memory, or [Error::AddressOutOfRange]
    ///
    /// The font is read-only: any range that touches it is refused.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut mem = Mem::new();
    /// assert!(mem.get_mut(0x300..0x303).is_ok());
    /// // the last byte of the glyph for `F`
    /// assert!(mem.get_mut(0x04f..0x052).is_err());
    /// ```
    pub fn get_mut(&mut self, range: Range<usize>) -> Result<&mut [u8]> {
        if range.start < FONT_END && (FONT_START as usize) < range.end {
            return Err(Error::AddressOutOfRange { range });
        }
        self.memory
            .get_mut(range.clone())
            .ok_or(Error::AddressOutOfRange { range })
    }

    /// Reads a big-endian word at `addr`
    pub fn read_word(&self, addr: u16) -> Result<u16> {
        let addr = addr as usize;
        let bytes = self.get(addr..addr + 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Writes a big-endian word at `addr`
    #[cfg(test)]
    pub(crate) fn write_word(&mut self, addr: u16, word: u16) -> Result<()> {
        let addr = addr as usize;
        self.get_mut(addr..addr + 2)?
            .copy_from_slice(&word.to_be_bytes());
        Ok(())
    }

    /// The whole address space, for hosts and debuggers
    pub fn as_slice(&self) -> &[u8] {
        self.memory.as_slice()
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Mem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 4 KiB of hex is not useful in a Debug dump; show the loaded program extent
        let end = self
            .memory
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |end| end + 1);
        f.debug_struct("Mem")
            .field("size", &MEM_SIZE)
            .field("used", &end)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_glyphs_are_five_bytes_apart() {
        let mem = Mem::new();
        for digit in 0..16 {
            let start = FONT_START as usize + digit * GLYPH_SIZE as usize;
            assert_eq!(
                mem.get(start..start + 5).unwrap(),
                &FONT[digit * 5..digit * 5 + 5]
            );
        }
    }

    #[test]
    fn load_clears_previous_program() {
        let mut mem = Mem::new();
        mem.load_program(&[0xaa; 16]).unwrap();
        mem.load_program(&[0x12, 0x34]).unwrap();
        assert_eq!(mem.get(0x200..0x204).unwrap(), &[0x12, 0x34, 0, 0]);
        // font survives a reload
        assert_eq!(mem.get(0..80).unwrap(), &FONT);
    }

    #[test]
    fn load_restores_font() {
        let mut mem = Mem::new();
        mem.memory[..16].fill(0);
        mem.memory[0x1ff] = 0xc5;
        mem.load_program(&[0x12, 0x00]).unwrap();
        assert_eq!(mem.get(0..80).unwrap(), &FONT);
        assert_eq!(mem.get(0x1ff..0x200).unwrap(), &[0]);
    }

    #[test]
    fn font_is_read_only() {
        let mut mem = Mem::new();
        for range in [0..1, 0x4f..0x50, 0x4e..0x52, 0..0x1000] {
            assert!(matches!(
                mem.get_mut(range.clone()),
                Err(Error::AddressOutOfRange { range: r }) if r == range
            ));
        }
        // right after the font is fair game
        mem.get_mut(0x50..0x52).unwrap().fill(0xaa);
        assert_eq!(mem.get(0..80).unwrap(), &FONT);
    }

    #[test]
    fn load_exactly_full() {
        let mut mem = Mem::new();
        mem.load_program(&[0xff; Mem::max_program_size()]).unwrap();
        assert_eq!(mem.read_word(0xffe).unwrap(), 0xffff);
    }

    #[test]
    fn load_too_large() {
        let mut mem = Mem::new();
        let err = mem
            .load_program(&vec![0; Mem::max_program_size() + 1])
            .expect_err("program should not fit");
        assert!(matches!(err, Error::Load { size: 0xe01, max: 0xe00 }));
    }

    #[test]
    fn word_at_end_of_memory_is_out_of_range() {
        let mut mem = Mem::new();
        assert!(matches!(
            mem.read_word(0xfff),
            Err(Error::AddressOutOfRange { range }) if range == (0xfff..0x1001)
        ));
        assert!(mem.write_word(0xfff, 0).is_err());
        mem.write_word(0xffe, 0xbeef).unwrap();
        assert_eq!(mem.read_word(0xffe).unwrap(), 0xbeef);
    }
}
