// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A disassembler for Chip-8 opcodes
use super::Insn;
use owo_colors::{OwoColorize, Style};

/// Disassembles Chip-8 instructions
pub trait Disassembler {
    /// Disassemble a single instruction
    fn once(&self, insn: u16) -> String;
}

/// Disassembles Chip-8 instructions, printing them in the provided [owo_colors::Style]s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dis {
    /// Styles invalid instructions
    pub invalid: Style,
    /// Styles valid instruction
    pub normal: Style,
}

impl Dis {
    /// A disassembler that emits no escape codes, for logs and files
    pub fn plain() -> Self {
        Self {
            invalid: Style::new(),
            normal: Style::new(),
        }
    }
}

impl Default for Dis {
    fn default() -> Self {
        Self {
            invalid: Style::new().bold().red(),
            normal: Style::new().green(),
        }
    }
}

impl Disassembler for Dis {
    fn once(&self, insn: u16) -> String {
        match Insn::decode_word(insn) {
            Some(insn) => paint(self.normal, insn),
            None => paint(self.invalid, format_args!("inval {insn:04x}")),
        }
    }
}

fn paint(style: Style, text: impl std::fmt::Display) -> String {
    if style == Style::new() {
        text.to_string()
    } else {
        text.style(style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_valid() {
        assert_eq!(Dis::plain().once(0xa2f0), "ld   I, #2f0");
    }

    #[test]
    fn plain_invalid() {
        assert_eq!(Dis::plain().once(0xffff), "inval ffff");
    }

    #[test]
    fn styled_contains_text() {
        let text = Dis::default().once(0x00ee);
        assert!(text.contains("ret"));
        assert_ne!(text, "ret");
    }
}
