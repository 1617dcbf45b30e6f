// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Contains the definition of a Chip-8 [Insn]
//!
//! Operand fields follow the opcode bit patterns: `x` is bits 8..12, `y` is
//! bits 4..8, `n` is bits 0..4, `A` is bits 0..12 and `B` is bits 0..8.

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

/// Every CHIP-8 instruction, decoded from its 16-bit word
#[allow(non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq, Hash)]
pub enum Insn {
    /// | 00e0 | Clear the screen
    #[opcode = "0x00e0"]
    Cls,
    /// | 00ee | Return from subroutine
    #[opcode = "0x00ee"]
    Ret,
    /// | 1aaa | Jump to an absolute address
    #[opcode = "0x1AAA"]
    Jp { A: u16 },
    /// | 2aaa | Push pc onto the stack, then jump to a
    #[opcode = "0x2AAA"]
    Call { A: u16 },
    /// | 3xbb | Skip next instruction if vX == b
    #[opcode = "0x3xBB"]
    SeByte { x: usize, B: u8 },
    /// | 4xbb | Skip next instruction if vX != b
    #[opcode = "0x4xBB"]
    SneByte { x: usize, B: u8 },
    /// | 5xy0 | Skip next instruction if vX == vY
    #[opcode = "0x5xy0"]
    Se { x: usize, y: usize },
    /// | 6xbb | Load immediate byte b into vX
    #[opcode = "0x6xBB"]
    LdByte { x: usize, B: u8 },
    /// | 7xbb | Add immediate byte b to vX, without carry
    #[opcode = "0x7xBB"]
    AddByte { x: usize, B: u8 },
    /// | 8xy0 | vX = vY
    #[opcode = "0x8xy0"]
    Ld { x: usize, y: usize },
    /// | 8xy1 | vX |= vY
    #[opcode = "0x8xy1"]
    Or { x: usize, y: usize },
    /// | 8xy2 | vX &= vY
    #[opcode = "0x8xy2"]
    And { x: usize, y: usize },
    /// | 8xy3 | vX ^= vY
    #[opcode = "0x8xy3"]
    Xor { x: usize, y: usize },
    /// | 8xy4 | vX += vY, vF = carry
    #[opcode = "0x8xy4"]
    Add { x: usize, y: usize },
    /// | 8xy5 | vX -= vY, vF = not borrow
    #[opcode = "0x8xy5"]
    Sub { x: usize, y: usize },
    /// | 8xy6 | vX >>= 1, vF = bit shifted out
    #[opcode = "0x8xy6"]
    Shr { x: usize, y: usize },
    /// | 8xy7 | vX = vY - vX, vF = not borrow
    #[opcode = "0x8xy7"]
    Subn { x: usize, y: usize },
    /// | 8xyE | vX <<= 1, vF = bit shifted out
    #[opcode = "0x8xye"]
    Shl { x: usize, y: usize },
    /// | 9xy0 | Skip next instruction if vX != vY
    #[opcode = "0x9xy0"]
    Sne { x: usize, y: usize },
    /// | Aaaa | Load address a into I
    #[opcode = "0xaAAA"]
    LdI { A: u16 },
    /// | Baaa | Jump to a + v0
    #[opcode = "0xbAAA"]
    JpV0 { A: u16 },
    /// | Cxbb | vX = random byte & b
    #[opcode = "0xcxBB"]
    Rnd { x: usize, B: u8 },
    /// | Dxyn | Draw n-byte sprite from I at (vX, vY), vF = collision
    #[opcode = "0xdxyn"]
    Drw { x: usize, y: usize, n: u8 },
    /// | Ex9E | Skip next instruction if key vX is held
    #[opcode = "0xex9e"]
    Skp { x: usize },
    /// | ExA1 | Skip next instruction if key vX is not held
    #[opcode = "0xexa1"]
    Sknp { x: usize },
    /// | Fx07 | vX = DT
    #[opcode = "0xfx07"]
    LdVxDt { x: usize },
    /// | Fx0A | Wait for a key press, vX = key
    #[opcode = "0xfx0a"]
    LdVxK { x: usize },
    /// | Fx15 | DT = vX
    #[opcode = "0xfx15"]
    LdDtVx { x: usize },
    /// | Fx18 | ST = vX
    #[opcode = "0xfx18"]
    LdStVx { x: usize },
    /// | Fx1E | I += vX
    #[opcode = "0xfx1e"]
    AddI { x: usize },
    /// | Fx29 | I = address of the font glyph for digit vX
    #[opcode = "0xfx29"]
    LdF { x: usize },
    /// | Fx33 | Store the decimal digits of vX at I, I+1, I+2
    #[opcode = "0xfx33"]
    LdB { x: usize },
    /// | Fx55 | Store v0..=vX at I..=I+X
    #[opcode = "0xfx55"]
    LdIVx { x: usize },
    /// | Fx65 | Load v0..=vX from I..=I+X
    #[opcode = "0xfx65"]
    LdVxI { x: usize },
}

impl Insn {
    /// Decodes a single instruction word, or [None] if it isn't one
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// assert_eq!(Insn::decode_word(0xd125), Some(Insn::Drw { x: 1, y: 2, n: 5 }));
    /// assert_eq!(Insn::decode_word(0x5121), None);
    /// ```
    pub fn decode_word(word: u16) -> Option<Self> {
        match Self::decode(&word.to_be_bytes()) {
            Ok((2, insn)) => Some(insn),
            _ => None,
        }
    }
}

impl Display for Insn {
    /// Formats the instruction in the conventional `op dst, src` assembly syntax
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Insn::Cls               => write!(f, "cls"),
            Insn::Ret               => write!(f, "ret"),
            Insn::Jp { A }          => write!(f, "jp   #{A:03x}"),
            Insn::Call { A }        => write!(f, "call #{A:03x}"),
            Insn::SeByte { x, B }   => write!(f, "se   v{x:X}, #{B:02x}"),
            Insn::SneByte { x, B }  => write!(f, "sne  v{x:X}, #{B:02x}"),
            Insn::Se { x, y }       => write!(f, "se   v{x:X}, v{y:X}"),
            Insn::LdByte { x, B }   => write!(f, "ld   v{x:X}, #{B:02x}"),
            Insn::AddByte { x, B }  => write!(f, "add  v{x:X}, #{B:02x}"),
            Insn::Ld { x, y }       => write!(f, "ld   v{x:X}, v{y:X}"),
            Insn::Or { x, y }       => write!(f, "or   v{x:X}, v{y:X}"),
            Insn::And { x, y }      => write!(f, "and  v{x:X}, v{y:X}"),
            Insn::Xor { x, y }      => write!(f, "xor  v{x:X}, v{y:X}"),
            Insn::Add { x, y }      => write!(f, "add  v{x:X}, v{y:X}"),
            Insn::Sub { x, y }      => write!(f, "sub  v{x:X}, v{y:X}"),
            Insn::Shr { x, y }      => write!(f, "shr  v{x:X}, v{y:X}"),
            Insn::Subn { x, y }     => write!(f, "subn v{x:X}, v{y:X}"),
            Insn::Shl { x, y }      => write!(f, "shl  v{x:X}, v{y:X}"),
            Insn::Sne { x, y }      => write!(f, "sne  v{x:X}, v{y:X}"),
            Insn::LdI { A }         => write!(f, "ld   I, #{A:03x}"),
            Insn::JpV0 { A }        => write!(f, "jp   v0, #{A:03x}"),
            Insn::Rnd { x, B }      => write!(f, "rnd  v{x:X}, #{B:02x}"),
            Insn::Drw { x, y, n }   => write!(f, "drw  v{x:X}, v{y:X}, {n}"),
            Insn::Skp { x }         => write!(f, "skp  v{x:X}"),
            Insn::Sknp { x }        => write!(f, "sknp v{x:X}"),
            Insn::LdVxDt { x }      => write!(f, "ld   v{x:X}, DT"),
            Insn::LdVxK { x }       => write!(f, "ld   v{x:X}, K"),
            Insn::LdDtVx { x }      => write!(f, "ld   DT, v{x:X}"),
            Insn::LdStVx { x }      => write!(f, "ld   ST, v{x:X}"),
            Insn::AddI { x }        => write!(f, "add  I, v{x:X}"),
            Insn::LdF { x }         => write!(f, "ld   F, v{x:X}"),
            Insn::LdB { x }         => write!(f, "ld   B, v{x:X}"),
            Insn::LdIVx { x }       => write!(f, "ld   [I], v{x:X}"),
            Insn::LdVxI { x }       => write!(f, "ld   v{x:X}, [I]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let cases = [
            (0x00e0, "cls"),
            (0x2abc, "call #abc"),
            (0x6a0f, "ld   vA, #0f"),
            (0x8124, "add  v1, v2"),
            (0xd015, "drw  v0, v1, 5"),
            (0xf30a, "ld   v3, K"),
            (0xff65, "ld   vF, [I]"),
        ];
        for (word, text) in cases {
            let insn = Insn::decode_word(word).expect("should decode");
            assert_eq!(insn.to_string(), text);
        }
    }
}
