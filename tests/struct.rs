//! Testing the traits on chip8vm's public structs
use chip8vm::*;
use std::{collections::hash_map::DefaultHasher, hash::Hash};

#[test]
fn cpu() {
    let cpu = CPU::default(); // Default
    let cpu2 = cpu.clone(); // Clone
    assert_eq!(cpu, cpu2); // PartialEq
    println!("{cpu:?}"); // Debug
}

#[test]
fn error() {
    let error = Error::AddressOutOfRange { range: 0xffe..0x1001 };
    assert_eq!(error.to_string(), "range ffe..1001 is outside of memory");
    println!("{error:?}");
}

mod flags {
    use super::*;
    #[test]
    fn default() {
        let flags = Flags::default();
        assert_eq!(flags.ipf, 10);
        assert_eq!(flags.keypause, None);
        assert!(!flags.is_paused());
        assert_eq!(flags.quirks, Quirks::default());
    }
    #[test]
    fn pause_toggles() {
        let mut flags = Flags::default();
        flags.pause();
        assert!(flags.is_paused());
        flags.pause();
        assert!(!flags.is_paused());
    }
    #[test]
    fn waiting_counts_as_paused() {
        let flags = Flags {
            keypause: Some(0xa),
            ..Default::default()
        };
        assert!(flags.is_paused());
        assert!(!flags.pause);
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Flags::default().hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod quirks {
    use super::*;
    #[test]
    fn from_bool() {
        let cosmac = Quirks::from(true);
        assert!(cosmac.vf_reset && cosmac.shift_vy && cosmac.dma_inc);
        assert_eq!(Quirks::from(false), Quirks::default());
    }
    #[test]
    #[allow(clippy::clone_on_copy)]
    fn clone() {
        let q = Quirks::from(true);
        assert_eq!(q, q.clone());
    }
}

mod keypad {
    use super::*;
    #[test]
    fn held() -> Result<()> {
        let mut keypad = Keypad::default();
        keypad.set(0x3, true)?;
        keypad.set(0xb, true)?;
        assert_eq!(keypad.held().collect::<Vec<_>>(), [0x3, 0xb]);
        keypad.release_all();
        assert_eq!(keypad.held().count(), 0);
        Ok(())
    }
    #[test]
    fn out_of_range_is_up() {
        assert!(!Keypad::default().is_down(0x42));
    }
}

mod screen {
    use super::*;
    #[test]
    fn display() {
        let mut screen = Screen::new();
        screen.draw(0, 0, &[0xff]);
        let text = screen.to_string();
        assert_eq!(text.lines().count(), 16);
        println!("{screen}{screen:?}");
    }
    #[test]
    fn rows() {
        let screen = Screen::new();
        assert_eq!(screen.rows().count(), 32);
        assert!(screen.rows().all(|row| row.len() == 64));
    }
}

mod mem {
    use super::*;
    #[test]
    fn debug() {
        println!("{:?}", Mem::default());
    }
    #[test]
    fn font_is_loaded() -> Result<()> {
        let mem = Mem::new();
        // "F"
        assert_eq!(mem.get(75..80)?, &[0xf0, 0x80, 0xf0, 0x80, 0x80]);
        Ok(())
    }
}

mod dis {
    use super::*;
    #[test]
    fn every_word_disassembles() {
        let dis = Dis::plain();
        for word in 0..=0xffff {
            let text = dis.once(word);
            match Insn::decode_word(word) {
                Some(insn) => assert_eq!(text, insn.to_string()),
                None => assert_eq!(text, format!("inval {word:04x}")),
            }
        }
    }
}
